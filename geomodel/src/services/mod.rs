//! Interfaces of the services the geometry model relies on but does not implement: coordinate
//! transformations, polygon assembly, line merging, validity checks and text parsing.

use std::sync::Arc;

use crate::error::Result;
use crate::factory::GeometryFactory;
use crate::geometry::{Geometry, GeometryOps};
use crate::geometry_type::Location;
use crate::line_string::{LineString, LineStringOps};
use crate::linear_ring::LinearRing;
use crate::polygon::Polygon;

#[cfg(feature = "geodesy")]
mod geodesy;
#[cfg(feature = "geodesy")]
pub use self::geodesy::{GeodesyOperation, GeodesyProjectionService};

/// Transformation of coordinates in place.
pub trait CoordinatesOperation {
    /// Transforms the X and Y of every vertex of a flat coordinate array. Other axes are left
    /// unchanged.
    fn apply(&self, coordinates: &mut [f64], axis_count: usize) -> Result<()>;
}

/// Source of transformations between coordinate systems.
pub trait ProjectionService {
    /// Operation converting coordinates of `source_srid` into `target_srid`, if one is known.
    fn operation(&self, source_srid: i32, target_srid: i32)
        -> Option<Box<dyn CoordinatesOperation>>;
}

/// Builds polygons from a set of lines.
pub trait Polygonizer {
    /// Assembles all closed areas formed by `lines` into a polygonal geometry.
    fn polygonize(&self, lines: &[Geometry]) -> Result<Geometry>;
}

/// Joins lines that share end points.
pub trait LineMerger {
    /// Merges `lines` into as few lines as possible.
    fn merge(&self, lines: &[LineString]) -> Result<Geometry>;
}

/// Geometry validity predicate.
pub trait ValidityCheck {
    /// Whether the geometry is valid.
    fn is_valid(&self, geometry: &Geometry) -> bool;
}

/// Reads geometries from a text representation.
pub trait GeometryReader {
    /// Parses `text` into a geometry built with `factory`.
    fn read(&self, factory: &Arc<GeometryFactory>, text: &str) -> Result<Geometry>;
}

/// Validity check without a spatial index: lines must be simple, rings must be closed and
/// simple, and the vertices of polygon holes must not lie outside the shell.
///
/// Runs in quadratic time on the number of segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleValidity;

impl SimpleValidity {
    fn is_valid_ring(ring: &LinearRing) -> bool {
        ring.is_empty() || (ring.is_closed() && ring.is_simple())
    }

    fn is_valid_polygon(polygon: &Polygon) -> bool {
        if !polygon.rings().iter().all(Self::is_valid_ring) {
            return false;
        }

        let Some(shell) = polygon.shell() else {
            return true;
        };
        polygon.rings()[1..].iter().all(|hole| {
            hole.vertices()
                .all(|vertex| shell.locate_in_ring(vertex.x(), vertex.y()) != Location::Exterior)
        })
    }
}

impl ValidityCheck for SimpleValidity {
    fn is_valid(&self, geometry: &Geometry) -> bool {
        match geometry {
            Geometry::Point(point) => {
                point.is_empty() || !(point.x().is_nan() || point.y().is_nan())
            }
            Geometry::LineString(line) => line.is_empty() || line.is_simple(),
            Geometry::LinearRing(ring) => Self::is_valid_ring(ring),
            Geometry::Polygon(polygon) => Self::is_valid_polygon(polygon),
            Geometry::MultiPoint(points) => points
                .parts()
                .iter()
                .all(|point| self.is_valid(&point.to_geometry())),
            Geometry::MultiLineString(lines) => lines
                .parts()
                .iter()
                .all(|line| line.is_empty() || line.is_simple()),
            Geometry::MultiPolygon(polygons) => {
                polygons.parts().iter().all(Self::is_valid_polygon)
            }
            Geometry::GeometryCollection(collection) => {
                collection.parts().iter().all(|part| self.is_valid(part))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_validity() {
        let factory = GeometryFactory::floating(0, 2);
        let bow: Geometry = factory
            .line_string(2, &[0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0])
            .unwrap()
            .into();
        assert!(!SimpleValidity.is_valid(&bow));

        let polygon: Geometry = factory
            .polygon_from_coordinates(
                2,
                &[
                    &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0],
                    &[1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0, 1.0],
                ],
            )
            .unwrap()
            .into();
        assert!(SimpleValidity.is_valid(&polygon));

        let outside_hole: Geometry = factory
            .polygon_from_coordinates(
                2,
                &[
                    &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0],
                    &[11.0, 1.0, 12.0, 1.0, 12.0, 2.0, 11.0, 1.0],
                ],
            )
            .unwrap()
            .into();
        assert!(!SimpleValidity.is_valid(&outside_hole));
    }
}
