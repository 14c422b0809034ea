//! Geomodel is a 2D/3D implementation of the simple features geometry model: points, lines,
//! rings, polygons and their collections, with axis aligned bounding boxes and precision aware
//! geometry factories.
//!
//! # Quick start
//!
//! Every geometry is built by a [`GeometryFactory`], which defines the coordinate system (as an
//! SRID), the number of axes and the grid the coordinates are rounded to:
//!
//! ```
//! use geomodel::{GeometryFactory, GeometryOps, LineStringOps, Location};
//!
//! let factory = GeometryFactory::fixed(26910, 2, &[1000.0, 1000.0]);
//! let polygon = factory
//!     .polygon_from_coordinates(
//!         2,
//!         &[
//!             &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0],
//!             &[2.0, 2.0, 4.0, 2.0, 4.0, 4.0, 2.0, 4.0, 2.0, 2.0],
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(polygon.area(), 96.0);
//! assert_eq!(polygon.locate_xy(3.0, 3.0), Location::Exterior);
//! assert_eq!(polygon.locate_xy(1.0, 1.0), Location::Interior);
//!
//! let moved = polygon.move_by(&[0.12345, 0.0]);
//! assert_eq!(moved.shell().unwrap().coordinate(0, 0), 0.123);
//! ```
//!
//! Geometries are immutable. Operations that "edit" a geometry, like
//! [`GeometryOps::insert_vertex`] or [`Polygon::move_by`], return a new geometry of the same
//! factory.
//!
//! Factories are canonical: equal configurations give the same [`std::sync::Arc`] instance.
//!
//! # Features
//!
//! * `geo-types` (default): conversions to and from [`geo_types`] geometries.
//! * `geodesy` (default): [`services::GeodesyProjectionService`], a projection service for
//!   geographic and web mercator coordinates based on the `geodesy` crate.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod bounding_box;
mod collection;
pub mod coordinate_system;
mod distance;
mod error;
pub mod factory;
#[cfg(feature = "geo-types")]
mod geo_interop;
mod geometry;
mod geometry_type;
mod line_string;
mod linear_ring;
pub mod orient;
mod point;
mod polygon;
pub mod segment;
pub mod services;
mod triangle;
mod vertex;

pub use bounding_box::BoundingBox;
pub use collection::{
    GeometryCollection, GeometryPart, Multi, MultiLineString, MultiPoint, MultiPolygon,
};
pub use coordinate_system::{CoordinateSystem, CoordinateSystemKind};
pub use error::{GeometryError, NotRepresentable, ParseError, Result};
pub use factory::{GeometryFactory, GeometryFactoryBuilder, GeometryFactoryConfig};
pub use geometry::{Geometry, GeometryOps};
pub use geometry_type::{ClockDirection, Dimension, GeometryKind, Location};
pub use line_string::{LineString, LineStringOps};
pub use linear_ring::{LinearRing, MIN_RING_VERTEX_COUNT};
pub use point::Point;
pub use polygon::Polygon;
pub use segment::{Segment, SegmentIter};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexIter};

#[cfg(feature = "geo-types")]
pub use geo_types;
