//! Classification enums shared by all geometry kinds.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Concrete kind of a [`Geometry`](crate::Geometry).
///
/// The declaration order is the natural sort order of geometries of different kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// [`Point`](crate::Point).
    Point,
    /// [`MultiPoint`](crate::MultiPoint).
    MultiPoint,
    /// [`LineString`](crate::LineString).
    LineString,
    /// [`LinearRing`](crate::LinearRing).
    LinearRing,
    /// [`MultiLineString`](crate::MultiLineString).
    MultiLineString,
    /// [`Polygon`](crate::Polygon).
    Polygon,
    /// [`MultiPolygon`](crate::MultiPolygon).
    MultiPolygon,
    /// [`GeometryCollection`](crate::GeometryCollection).
    GeometryCollection,
}

impl GeometryKind {
    /// Position of the kind in the ordering of geometries of different kinds.
    pub fn sort_index(&self) -> u8 {
        *self as u8
    }

    /// Name of the kind as used in the simple features model.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::LinearRing => "LinearRing",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Topological dimension of a point set.
///
/// `False` is the dimension of the empty set, used for the boundary of closed curves and points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Empty set (-1).
    False,
    /// Points (0).
    Point,
    /// Curves (1).
    Curve,
    /// Surfaces (2).
    Surface,
}

impl Dimension {
    /// Numeric value: -1, 0, 1 or 2.
    pub fn value(&self) -> i8 {
        match self {
            Self::False => -1,
            Self::Point => 0,
            Self::Curve => 1,
            Self::Surface => 2,
        }
    }
}

/// Position of a point relative to a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Inside the geometry.
    Interior,
    /// On the boundary of the geometry.
    Boundary,
    /// Outside the geometry.
    Exterior,
}

/// Traversal direction of a closed ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockDirection {
    /// Clockwise.
    Clockwise,
    /// Counterclockwise.
    CounterClockwise,
}

impl ClockDirection {
    /// Returns true for [`ClockDirection::Clockwise`].
    pub fn is_clockwise(&self) -> bool {
        *self == Self::Clockwise
    }
}
