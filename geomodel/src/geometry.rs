use std::cmp::Ordering;
use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::distance;
use crate::error::{GeometryError, Result};
use crate::factory::GeometryFactory;
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::line_string::LineString;
use crate::linear_ring::LinearRing;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::segment::SegmentIter;
use crate::vertex::VertexIter;

/// Operations available on every geometry kind.
///
/// All "editing" operations return a new geometry built with the same factory, the receiver is
/// never changed.
pub trait GeometryOps {
    /// Kind of the geometry.
    fn kind(&self) -> GeometryKind;

    /// Factory the geometry was built with.
    fn factory(&self) -> &Arc<GeometryFactory>;

    /// Spatial reference identifier of the geometry's factory.
    fn srid(&self) -> i32 {
        self.factory().srid()
    }

    /// Number of values per vertex.
    fn axis_count(&self) -> usize {
        self.factory().axis_count()
    }

    /// Whether the geometry has no vertices.
    fn is_empty(&self) -> bool;

    /// Topological dimension.
    fn dimension(&self) -> Dimension;

    /// Topological dimension of the boundary.
    fn boundary_dimension(&self) -> Dimension;

    /// Area of surfaces, 0 for points and lines.
    fn area(&self) -> f64 {
        0.0
    }

    /// Sum of the XY lengths of all segments.
    fn length(&self) -> f64 {
        self.segments().map(|segment| segment.length()).sum()
    }

    /// Number of vertices, closing vertices of rings included.
    fn vertex_count(&self) -> usize;

    /// Number of segments.
    fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Iterates over all vertices.
    fn vertices(&self) -> VertexIter<'_>;

    /// Iterates over all segments.
    fn segments(&self) -> SegmentIter<'_> {
        SegmentIter::new(self.factory(), self.vertices().into_sequences())
    }

    /// Extent of all vertices, empty for an empty geometry.
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(self.factory(), self.vertices())
    }

    /// Location of the XY position relative to the geometry.
    fn locate_xy(&self, x: f64, y: f64) -> Location;

    /// Location of the point relative to the geometry. An empty point is exterior.
    fn locate(&self, point: &Point) -> Location {
        if point.is_empty() {
            Location::Exterior
        } else {
            self.locate_xy(point.x(), point.y())
        }
    }

    /// Whether any part of the geometry lies in the box.
    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool;

    /// Minimum XY distance to the other geometry, 0 if either is empty or they intersect.
    ///
    /// The search stops as soon as a distance `<= terminate_distance` is found, so with a
    /// positive value the result is only exact when it is larger than `terminate_distance`.
    fn distance(&self, other: &Geometry, terminate_distance: f64) -> f64 {
        distance::distance(self, other, terminate_distance)
    }

    /// Copies the geometry into the [`Geometry`] enum.
    fn to_geometry(&self) -> Geometry;

    /// Inserts a vertex before the one with the given id.
    fn insert_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry>;

    /// Removes the vertex with the given id.
    fn delete_vertex(&self, vertex_id: &[isize]) -> Result<Geometry>;

    /// Replaces the vertex with the given id.
    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry>;

    /// Adds a vertex at the end of the part with the given id.
    fn append_vertex(&self, geometry_id: &[isize], new_point: &Point) -> Result<Geometry>;
}

/// Any geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single position.
    Point(Point),
    /// Line through two or more vertices.
    LineString(LineString),
    /// Closed line.
    LinearRing(LinearRing),
    /// Surface with holes.
    Polygon(Polygon),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of lines.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Set of geometries of any kind.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Normal form of the geometry: equal geometries have equal normal forms.
    pub fn normalize(&self) -> Geometry {
        match self {
            Geometry::Point(v) => v.normalize().into(),
            Geometry::LineString(v) => v.normalize().into(),
            Geometry::LinearRing(v) => v.normalize().into(),
            Geometry::Polygon(v) => v.normalize().into(),
            Geometry::MultiPoint(v) => v.normalize().into(),
            Geometry::MultiLineString(v) => v.normalize().into(),
            Geometry::MultiPolygon(v) => v.normalize().into(),
            Geometry::GeometryCollection(v) => v.normalize().into(),
        }
    }

    /// Geometry with the vertex order of every part reversed.
    pub fn reverse(&self) -> Geometry {
        match self {
            Geometry::Point(v) => v.reverse().into(),
            Geometry::LineString(v) => v.reverse().into(),
            Geometry::LinearRing(v) => v.reverse().into(),
            Geometry::Polygon(v) => v.reverse().into(),
            Geometry::MultiPoint(v) => v.reverse().into(),
            Geometry::MultiLineString(v) => v.reverse().into(),
            Geometry::MultiPolygon(v) => v.reverse().into(),
            Geometry::GeometryCollection(v) => v.reverse().into(),
        }
    }

    /// Geometry translated by `deltas`, one delta per axis.
    pub fn move_by(&self, deltas: &[f64]) -> Geometry {
        match self {
            Geometry::Point(v) => v.move_by(deltas).into(),
            Geometry::LineString(v) => v.move_by(deltas).into(),
            Geometry::LinearRing(v) => v.move_by(deltas).into(),
            Geometry::Polygon(v) => v.move_by(deltas).into(),
            Geometry::MultiPoint(v) => v.move_by(deltas).into(),
            Geometry::MultiLineString(v) => v.move_by(deltas).into(),
            Geometry::MultiPolygon(v) => v.move_by(deltas).into(),
            Geometry::GeometryCollection(v) => v.move_by(deltas).into(),
        }
    }

    /// Lines and rings clockwise, polygon shells clockwise and holes counterclockwise.
    pub fn to_clockwise(&self) -> Geometry {
        match self {
            Geometry::Point(v) => v.clone().into(),
            Geometry::LineString(v) => v.to_clockwise().into(),
            Geometry::LinearRing(v) => v.to_clockwise().into(),
            Geometry::Polygon(v) => v.to_clockwise().into(),
            Geometry::MultiPoint(v) => v.clone().into(),
            Geometry::MultiLineString(v) => v.to_clockwise().into(),
            Geometry::MultiPolygon(v) => v.to_clockwise().into(),
            Geometry::GeometryCollection(v) => v.to_clockwise().into(),
        }
    }

    /// Lines and rings counterclockwise, polygon shells counterclockwise and holes clockwise.
    pub fn to_counter_clockwise(&self) -> Geometry {
        match self {
            Geometry::Point(v) => v.clone().into(),
            Geometry::LineString(v) => v.to_counter_clockwise().into(),
            Geometry::LinearRing(v) => v.to_counter_clockwise().into(),
            Geometry::Polygon(v) => v.to_counter_clockwise().into(),
            Geometry::MultiPoint(v) => v.clone().into(),
            Geometry::MultiLineString(v) => v.to_counter_clockwise().into(),
            Geometry::MultiPolygon(v) => v.to_counter_clockwise().into(),
            Geometry::GeometryCollection(v) => v.to_counter_clockwise().into(),
        }
    }

    /// Whether both geometries have the same kind and structure, with every vertex within
    /// `tolerance` of its counterpart in XY.
    pub fn equals_exact(&self, other: &Geometry, tolerance: f64) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a.equals_exact(b, tolerance),
            (Geometry::LineString(a), Geometry::LineString(b)) => a.equals_exact(b, tolerance),
            (Geometry::LinearRing(a), Geometry::LinearRing(b)) => a.equals_exact(b, tolerance),
            (Geometry::Polygon(a), Geometry::Polygon(b)) => a.equals_exact(b, tolerance),
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => a.equals_exact(b, tolerance),
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                a.equals_exact(b, tolerance)
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => a.equals_exact(b, tolerance),
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                a.equals_exact(b, tolerance)
            }
            _ => false,
        }
    }

    /// Exact XY equality of kind, structure and vertices.
    pub fn equals_2d(&self, other: &Geometry) -> bool {
        self.equals_exact(other, 0.0)
    }

    /// Orders geometries by kind, then empty before non-empty, then by the kind specific order
    /// (vertices for points and lines, shells for polygons, sorted parts for collections).
    pub fn compare(&self, other: &Geometry) -> Ordering {
        self.kind()
            .sort_index()
            .cmp(&other.kind().sort_index())
            .then_with(|| other.is_empty().cmp(&self.is_empty()))
            .then_with(|| match (self, other) {
                (Geometry::Point(a), Geometry::Point(b)) => a.compare_to_same_kind(b),
                (Geometry::LineString(a), Geometry::LineString(b)) => a.compare_to_same_kind(b),
                (Geometry::LinearRing(a), Geometry::LinearRing(b)) => a.compare_to_same_kind(b),
                (Geometry::Polygon(a), Geometry::Polygon(b)) => a.compare_to_same_kind(b),
                (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => a.compare_to_same_kind(b),
                (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                    a.compare_to_same_kind(b)
                }
                (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => {
                    a.compare_to_same_kind(b)
                }
                (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                    a.compare_to_same_kind(b)
                }
                _ => Ordering::Equal,
            })
    }

    /// Parts of a collection, or the geometry itself.
    pub fn geometries(&self) -> Vec<Geometry> {
        match self {
            Geometry::MultiPoint(v) => v.parts().iter().cloned().map(Geometry::from).collect(),
            Geometry::MultiLineString(v) => {
                v.parts().iter().cloned().map(Geometry::from).collect()
            }
            Geometry::MultiPolygon(v) => v.parts().iter().cloned().map(Geometry::from).collect(),
            Geometry::GeometryCollection(v) => v.parts().to_vec(),
            _ => vec![self.clone()],
        }
    }

    /// Part with the given index: a collection part, or the geometry itself for index 0.
    pub fn part(&self, index: usize) -> Option<Geometry> {
        match self {
            Geometry::MultiPoint(v) => v.part(index).cloned().map(Geometry::from),
            Geometry::MultiLineString(v) => v.part(index).cloned().map(Geometry::from),
            Geometry::MultiPolygon(v) => v.part(index).cloned().map(Geometry::from),
            Geometry::GeometryCollection(v) => v.part(index).cloned(),
            _ if index == 0 => Some(self.clone()),
            _ => None,
        }
    }

    /// Number of parts, 1 for non-collections.
    pub fn part_count(&self) -> usize {
        match self {
            Geometry::MultiPoint(v) => v.part_count(),
            Geometry::MultiLineString(v) => v.part_count(),
            Geometry::MultiPolygon(v) => v.part_count(),
            Geometry::GeometryCollection(v) => v.part_count(),
            _ => 1,
        }
    }

    /// The geometry as a point, if it is one.
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(v) => Some(v),
            _ => None,
        }
    }

    /// The geometry as a line string, if it is one.
    pub fn as_line_string(&self) -> Option<&LineString> {
        match self {
            Geometry::LineString(v) => Some(v),
            _ => None,
        }
    }

    /// The geometry as a polygon, if it is one.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geometry::Polygon(v) => Some(v),
            _ => None,
        }
    }
}

impl GeometryOps for Geometry {
    fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(v) => v.kind(),
            Geometry::LineString(v) => v.kind(),
            Geometry::LinearRing(v) => v.kind(),
            Geometry::Polygon(v) => v.kind(),
            Geometry::MultiPoint(v) => v.kind(),
            Geometry::MultiLineString(v) => v.kind(),
            Geometry::MultiPolygon(v) => v.kind(),
            Geometry::GeometryCollection(v) => v.kind(),
        }
    }

    fn factory(&self) -> &Arc<GeometryFactory> {
        match self {
            Geometry::Point(v) => v.factory(),
            Geometry::LineString(v) => v.factory(),
            Geometry::LinearRing(v) => v.factory(),
            Geometry::Polygon(v) => v.factory(),
            Geometry::MultiPoint(v) => v.factory(),
            Geometry::MultiLineString(v) => v.factory(),
            Geometry::MultiPolygon(v) => v.factory(),
            Geometry::GeometryCollection(v) => v.factory(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(v) => v.is_empty(),
            Geometry::LineString(v) => v.is_empty(),
            Geometry::LinearRing(v) => v.is_empty(),
            Geometry::Polygon(v) => v.is_empty(),
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::GeometryCollection(v) => v.is_empty(),
        }
    }

    fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(v) => v.dimension(),
            Geometry::LineString(v) => v.dimension(),
            Geometry::LinearRing(v) => v.dimension(),
            Geometry::Polygon(v) => v.dimension(),
            Geometry::MultiPoint(v) => v.dimension(),
            Geometry::MultiLineString(v) => v.dimension(),
            Geometry::MultiPolygon(v) => v.dimension(),
            Geometry::GeometryCollection(v) => v.dimension(),
        }
    }

    fn boundary_dimension(&self) -> Dimension {
        match self {
            Geometry::Point(v) => v.boundary_dimension(),
            Geometry::LineString(v) => v.boundary_dimension(),
            Geometry::LinearRing(v) => v.boundary_dimension(),
            Geometry::Polygon(v) => v.boundary_dimension(),
            Geometry::MultiPoint(v) => v.boundary_dimension(),
            Geometry::MultiLineString(v) => v.boundary_dimension(),
            Geometry::MultiPolygon(v) => v.boundary_dimension(),
            Geometry::GeometryCollection(v) => v.boundary_dimension(),
        }
    }

    fn area(&self) -> f64 {
        match self {
            Geometry::Point(v) => v.area(),
            Geometry::LineString(v) => v.area(),
            Geometry::LinearRing(v) => v.area(),
            Geometry::Polygon(v) => v.area(),
            Geometry::MultiPoint(v) => v.area(),
            Geometry::MultiLineString(v) => v.area(),
            Geometry::MultiPolygon(v) => v.area(),
            Geometry::GeometryCollection(v) => v.area(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Geometry::Point(v) => v.length(),
            Geometry::LineString(v) => v.length(),
            Geometry::LinearRing(v) => v.length(),
            Geometry::Polygon(v) => v.length(),
            Geometry::MultiPoint(v) => v.length(),
            Geometry::MultiLineString(v) => v.length(),
            Geometry::MultiPolygon(v) => v.length(),
            Geometry::GeometryCollection(v) => v.length(),
        }
    }

    fn vertex_count(&self) -> usize {
        match self {
            Geometry::Point(v) => v.vertex_count(),
            Geometry::LineString(v) => v.vertex_count(),
            Geometry::LinearRing(v) => v.vertex_count(),
            Geometry::Polygon(v) => v.vertex_count(),
            Geometry::MultiPoint(v) => v.vertex_count(),
            Geometry::MultiLineString(v) => v.vertex_count(),
            Geometry::MultiPolygon(v) => v.vertex_count(),
            Geometry::GeometryCollection(v) => v.vertex_count(),
        }
    }

    fn segment_count(&self) -> usize {
        match self {
            Geometry::Point(v) => v.segment_count(),
            Geometry::LineString(v) => v.segment_count(),
            Geometry::LinearRing(v) => v.segment_count(),
            Geometry::Polygon(v) => v.segment_count(),
            Geometry::MultiPoint(v) => v.segment_count(),
            Geometry::MultiLineString(v) => v.segment_count(),
            Geometry::MultiPolygon(v) => v.segment_count(),
            Geometry::GeometryCollection(v) => v.segment_count(),
        }
    }

    fn vertices(&self) -> VertexIter<'_> {
        match self {
            Geometry::Point(v) => v.vertices(),
            Geometry::LineString(v) => v.vertices(),
            Geometry::LinearRing(v) => v.vertices(),
            Geometry::Polygon(v) => v.vertices(),
            Geometry::MultiPoint(v) => v.vertices(),
            Geometry::MultiLineString(v) => v.vertices(),
            Geometry::MultiPolygon(v) => v.vertices(),
            Geometry::GeometryCollection(v) => v.vertices(),
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        match self {
            Geometry::Point(v) => v.bounding_box(),
            Geometry::LineString(v) => v.bounding_box(),
            Geometry::LinearRing(v) => v.bounding_box(),
            Geometry::Polygon(v) => v.bounding_box(),
            Geometry::MultiPoint(v) => v.bounding_box(),
            Geometry::MultiLineString(v) => v.bounding_box(),
            Geometry::MultiPolygon(v) => v.bounding_box(),
            Geometry::GeometryCollection(v) => v.bounding_box(),
        }
    }

    fn locate_xy(&self, x: f64, y: f64) -> Location {
        match self {
            Geometry::Point(v) => v.locate_xy(x, y),
            Geometry::LineString(v) => v.locate_xy(x, y),
            Geometry::LinearRing(v) => v.locate_xy(x, y),
            Geometry::Polygon(v) => v.locate_xy(x, y),
            Geometry::MultiPoint(v) => v.locate_xy(x, y),
            Geometry::MultiLineString(v) => v.locate_xy(x, y),
            Geometry::MultiPolygon(v) => v.locate_xy(x, y),
            Geometry::GeometryCollection(v) => v.locate_xy(x, y),
        }
    }

    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool {
        match self {
            Geometry::Point(v) => v.intersects_bbox(bbox),
            Geometry::LineString(v) => v.intersects_bbox(bbox),
            Geometry::LinearRing(v) => v.intersects_bbox(bbox),
            Geometry::Polygon(v) => v.intersects_bbox(bbox),
            Geometry::MultiPoint(v) => v.intersects_bbox(bbox),
            Geometry::MultiLineString(v) => v.intersects_bbox(bbox),
            Geometry::MultiPolygon(v) => v.intersects_bbox(bbox),
            Geometry::GeometryCollection(v) => v.intersects_bbox(bbox),
        }
    }

    fn to_geometry(&self) -> Geometry {
        self.clone()
    }

    fn insert_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        match self {
            Geometry::Point(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::LineString(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::LinearRing(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::Polygon(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::MultiPoint(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::MultiLineString(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::MultiPolygon(v) => v.insert_vertex(vertex_id, new_point),
            Geometry::GeometryCollection(v) => v.insert_vertex(vertex_id, new_point),
        }
    }

    fn delete_vertex(&self, vertex_id: &[isize]) -> Result<Geometry> {
        match self {
            Geometry::Point(v) => v.delete_vertex(vertex_id),
            Geometry::LineString(v) => v.delete_vertex(vertex_id),
            Geometry::LinearRing(v) => v.delete_vertex(vertex_id),
            Geometry::Polygon(v) => v.delete_vertex(vertex_id),
            Geometry::MultiPoint(v) => v.delete_vertex(vertex_id),
            Geometry::MultiLineString(v) => v.delete_vertex(vertex_id),
            Geometry::MultiPolygon(v) => v.delete_vertex(vertex_id),
            Geometry::GeometryCollection(v) => v.delete_vertex(vertex_id),
        }
    }

    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        match self {
            Geometry::Point(v) => v.move_vertex(vertex_id, new_point),
            Geometry::LineString(v) => v.move_vertex(vertex_id, new_point),
            Geometry::LinearRing(v) => v.move_vertex(vertex_id, new_point),
            Geometry::Polygon(v) => v.move_vertex(vertex_id, new_point),
            Geometry::MultiPoint(v) => v.move_vertex(vertex_id, new_point),
            Geometry::MultiLineString(v) => v.move_vertex(vertex_id, new_point),
            Geometry::MultiPolygon(v) => v.move_vertex(vertex_id, new_point),
            Geometry::GeometryCollection(v) => v.move_vertex(vertex_id, new_point),
        }
    }

    fn append_vertex(&self, geometry_id: &[isize], new_point: &Point) -> Result<Geometry> {
        match self {
            Geometry::Point(v) => v.append_vertex(geometry_id, new_point),
            Geometry::LineString(v) => v.append_vertex(geometry_id, new_point),
            Geometry::LinearRing(v) => v.append_vertex(geometry_id, new_point),
            Geometry::Polygon(v) => v.append_vertex(geometry_id, new_point),
            Geometry::MultiPoint(v) => v.append_vertex(geometry_id, new_point),
            Geometry::MultiLineString(v) => v.append_vertex(geometry_id, new_point),
            Geometry::MultiPolygon(v) => v.append_vertex(geometry_id, new_point),
            Geometry::GeometryCollection(v) => v.append_vertex(geometry_id, new_point),
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Self::LinearRing(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}

/// Resolves a possibly negative index against `count`. With `allow_end` the index may also be
/// equal to `count`.
pub(crate) fn resolve_index(
    what: &'static str,
    index: isize,
    count: usize,
    allow_end: bool,
) -> Result<usize> {
    let limit = if allow_end { count + 1 } else { count };
    let resolved = if index < 0 {
        index + count as isize
    } else {
        index
    };

    if resolved >= 0 && (resolved as usize) < limit {
        Ok(resolved as usize)
    } else {
        Err(GeometryError::Range { what, index, count })
    }
}
