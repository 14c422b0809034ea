//! Coordinate system identity attached to a [`GeometryFactory`](crate::GeometryFactory).
//!
//! Full coordinate system definitions are provided by external services. This module only knows
//! the handful of systems needed to decide between planar and geodesic measurements.

use serde::{Deserialize, Serialize};

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Semimajor axis in metres.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Mean radius `(2a + b) / 3` in metres.
    pub fn mean_radius(&self) -> f64 {
        let semiminor = self.semimajor * (1.0 - 1.0 / self.inv_flattening);
        (2.0 * self.semimajor + semiminor) / 3.0
    }

    /// Great circle distance in metres between two points given in degrees.
    pub fn distance_metres(&self, lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
        let lat1 = lat1.to_radians();
        let lat2 = lat2.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (lon2 - lon1).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * self.mean_radius() * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Kind of a coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoordinateSystemKind {
    /// Longitude and latitude in degrees on the given datum.
    Geographic(Datum),
    /// Planar coordinates in metres.
    Projected(Datum),
}

/// Identity of a coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    srid: i32,
    kind: CoordinateSystemKind,
}

impl CoordinateSystem {
    /// EPSG:4326, geographic WGS84.
    pub const WGS84: CoordinateSystem = CoordinateSystem {
        srid: 4326,
        kind: CoordinateSystemKind::Geographic(Datum::WGS84),
    };

    /// EPSG:3857, spherical web mercator.
    pub const WORLD_MERCATOR: CoordinateSystem = CoordinateSystem {
        srid: 3857,
        kind: CoordinateSystemKind::Projected(Datum::WGS84),
    };

    /// Creates a coordinate system identity.
    pub const fn new(srid: i32, kind: CoordinateSystemKind) -> Self {
        Self { srid, kind }
    }

    /// Returns the built in definition for the SRID, if it is known.
    pub fn from_srid(srid: i32) -> Option<Self> {
        match srid {
            4326 => Some(Self::WGS84),
            3857 | 900913 => Some(Self::new(srid, Self::WORLD_MERCATOR.kind)),
            _ => None,
        }
    }

    /// SRID of the system.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Kind of the system.
    pub fn kind(&self) -> CoordinateSystemKind {
        self.kind
    }

    /// Whether coordinates are longitude/latitude degrees.
    pub fn is_geographic(&self) -> bool {
        matches!(self.kind, CoordinateSystemKind::Geographic(_))
    }

    /// Whether coordinates are planar.
    pub fn is_projected(&self) -> bool {
        matches!(self.kind, CoordinateSystemKind::Projected(_))
    }

    /// Datum of the system.
    pub fn datum(&self) -> Datum {
        match self.kind {
            CoordinateSystemKind::Geographic(datum) | CoordinateSystemKind::Projected(datum) => {
                datum
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_systems() {
        assert!(CoordinateSystem::from_srid(4326).is_some_and(|cs| cs.is_geographic()));
        assert!(CoordinateSystem::from_srid(3857).is_some_and(|cs| cs.is_projected()));
        assert!(CoordinateSystem::from_srid(26910).is_none());
    }

    #[test]
    fn distance_of_one_degree_on_equator() {
        let distance = Datum::WGS84.distance_metres(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(distance, 111_194.9, epsilon = 10.0);
    }
}
