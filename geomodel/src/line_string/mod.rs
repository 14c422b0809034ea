//! Ordered sequences of vertices.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::collection::MultiPoint;
use crate::error::{GeometryError, Result};
use crate::factory::GeometryFactory;
use crate::geometry::{resolve_index, Geometry, GeometryOps};
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::linear_ring::LinearRing;
use crate::point::Point;
use crate::services::LineMerger;
use crate::vertex::{Sequence, VertexIter};

mod ops;

pub use ops::LineStringOps;

/// A line through two or more vertices, or the empty line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    factory: Arc<GeometryFactory>,
    coordinates: Vec<f64>,
}

impl LineString {
    /// `coordinates` must be rounded, with `factory.axis_count()` values per vertex and either
    /// no vertices or at least two.
    pub(crate) fn from_parts(factory: Arc<GeometryFactory>, coordinates: Vec<f64>) -> Self {
        Self {
            factory,
            coordinates,
        }
    }

    /// Builds a line with the same factory, collapsing a single vertex to the empty line.
    fn new_line_string(&self, coordinates: Vec<f64>) -> LineString {
        if coordinates.len() < 2 * self.axis_count() {
            LineString::from_parts(self.factory.clone(), vec![])
        } else {
            LineString::from_parts(self.factory.clone(), coordinates)
        }
    }

    /// Whether the line is closed, has at least 4 vertices and is simple.
    pub fn is_ring(&self) -> bool {
        self.is_closed() && self.vertex_count() >= 4 && self.is_simple()
    }

    /// Line with the vertices in reverse order.
    pub fn reverse(&self) -> LineString {
        self.new_line_string(reversed_coordinates(&self.coordinates, self.axis_count()))
    }

    /// Orients the line so that, comparing vertices from both ends inwards, the first unequal
    /// pair is in ascending order.
    pub fn normalize(&self) -> LineString {
        let vertex_count = self.vertex_count();
        for i in 0..vertex_count / 2 {
            let j = vertex_count - 1 - i;
            if !self.equals_vertex_2d(i, j) {
                return if self.point(i).compare_to_same_kind(&self.point(j)) == Ordering::Greater {
                    self.reverse()
                } else {
                    self.clone()
                };
            }
        }
        self.clone()
    }

    /// Line translated by `deltas`, one delta per axis.
    pub fn move_by(&self, deltas: &[f64]) -> LineString {
        self.new_line_string(moved_coordinates(&self.factory, &self.coordinates, deltas))
    }

    /// Line without consecutive vertices that are equal in XY. A line that collapses to a
    /// single vertex becomes empty.
    pub fn remove_duplicate_points(&self) -> LineString {
        self.new_line_string(deduplicated_coordinates(&self.coordinates, self.axis_count()))
    }

    /// Line with `vertex_count` vertices starting at `from_vertex`, limited to the available
    /// vertices.
    pub fn sub_line(&self, from_vertex: usize, vertex_count: usize) -> LineString {
        let axis_count = self.axis_count();
        let from = from_vertex.min(self.vertex_count());
        let to = from.saturating_add(vertex_count).min(self.vertex_count());
        self.new_line_string(self.coordinates[from * axis_count..to * axis_count].to_vec())
    }

    /// Line reversed if needed so that it runs clockwise.
    pub fn to_clockwise(&self) -> LineString {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Line reversed if needed so that it runs counterclockwise.
    pub fn to_counter_clockwise(&self) -> LineString {
        if self.is_counter_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Copy of the line with `new_point` inserted before the vertex at `index`. `index` may be
    /// equal to the vertex count to add a vertex at the end; negative indices count from the end.
    /// An empty `new_point` leaves the line unchanged.
    pub fn with_vertex_inserted(&self, index: isize, new_point: &Point) -> Result<LineString> {
        if self.is_empty() {
            return Err(GeometryError::StructuralMinimum(
                "cannot insert vertex into an empty LineString".into(),
            ));
        }
        let index = resolve_index("vertex", index, self.vertex_count(), true)?;
        if new_point.is_empty() {
            return Ok(self.clone());
        }
        let values = point_values(&self.factory, new_point);

        let axis_count = self.axis_count();
        let mut coordinates = Vec::with_capacity(self.coordinates.len() + axis_count);
        coordinates.extend_from_slice(&self.coordinates[..index * axis_count]);
        coordinates.extend_from_slice(&values);
        coordinates.extend_from_slice(&self.coordinates[index * axis_count..]);
        Ok(self.new_line_string(coordinates))
    }

    /// Copy of the line without the vertex at `index`.
    pub fn without_vertex(&self, index: isize) -> Result<LineString> {
        if self.is_empty() {
            return Err(GeometryError::StructuralMinimum(
                "cannot delete vertex for empty LineString".into(),
            ));
        }
        let vertex_count = self.vertex_count();
        if vertex_count <= 2 {
            return Err(GeometryError::StructuralMinimum(
                "LineString must have a minimum of 2 vertices".into(),
            ));
        }
        let index = resolve_index("vertex", index, vertex_count, false)?;

        let axis_count = self.axis_count();
        let mut coordinates = Vec::with_capacity(self.coordinates.len() - axis_count);
        coordinates.extend_from_slice(&self.coordinates[..index * axis_count]);
        coordinates.extend_from_slice(&self.coordinates[(index + 1) * axis_count..]);
        Ok(self.new_line_string(coordinates))
    }

    /// Copy of the line with the vertex at `index` replaced. An empty `new_point` leaves the line
    /// unchanged.
    pub fn with_vertex_moved(&self, index: isize, new_point: &Point) -> Result<LineString> {
        if self.is_empty() {
            return Err(GeometryError::StructuralMinimum(
                "cannot move vertex for empty LineString".into(),
            ));
        }
        let index = resolve_index("vertex", index, self.vertex_count(), false)?;
        if new_point.is_empty() {
            return Ok(self.clone());
        }

        let axis_count = self.axis_count();
        let mut coordinates = self.coordinates.clone();
        coordinates[index * axis_count..(index + 1) * axis_count]
            .copy_from_slice(&point_values(&self.factory, new_point));
        Ok(self.new_line_string(coordinates))
    }

    /// Copy of the line with `new_point` added after the last vertex.
    pub fn with_vertex_appended(&self, new_point: &Point) -> Result<LineString> {
        self.with_vertex_inserted(self.vertex_count() as isize, new_point)
    }

    /// End points of an open line, nothing for a closed line.
    pub fn boundary(&self) -> MultiPoint {
        if self.is_empty() || self.is_closed() {
            self.factory.multi_point_empty()
        } else {
            self.factory
                .multi_point(vec![self.from_point(), self.to_point()])
        }
    }

    /// Whether both lines have the same number of vertices, each within `tolerance` in XY.
    pub fn equals_exact(&self, other: &LineString, tolerance: f64) -> bool {
        self.equals_exact_vertices(other, tolerance)
    }

    /// Orders by vertices, then by vertex count.
    pub fn compare_to_same_kind(&self, other: &LineString) -> Ordering {
        self.compare_vertices(other)
    }

    /// Converts the line into a ring. Fails if it is not closed or has too few vertices.
    pub fn to_linear_ring(&self) -> Result<LinearRing> {
        LinearRing::new(self.factory.clone(), self.coordinates.clone())
    }

    /// Returns the line itself (normalized) if it is simple, otherwise the output of the line
    /// merger for it.
    pub fn new_valid_geometry(&self, merger: &dyn LineMerger) -> Result<Geometry> {
        if self.is_empty() {
            Ok(self.clone().into())
        } else if self.is_simple() {
            Ok(self.normalize().into())
        } else {
            merger.merge(std::slice::from_ref(self)).inspect_err(|err| {
                log::warn!("Failed to merge line with {} vertices: {err}", self.vertex_count());
            })
        }
    }

    fn check_vertex_id(&self, vertex_id: &[isize]) -> Result<isize> {
        match vertex_id {
            [index] => Ok(*index),
            _ => Err(GeometryError::Arity {
                kind: GeometryKind::LineString,
                expected: "1",
                actual: vertex_id.to_vec(),
            }),
        }
    }
}

impl GeometryOps for LineString {
    fn kind(&self) -> GeometryKind {
        GeometryKind::LineString
    }

    fn factory(&self) -> &Arc<GeometryFactory> {
        &self.factory
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::Curve
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_closed() {
            Dimension::False
        } else {
            Dimension::Point
        }
    }

    fn vertex_count(&self) -> usize {
        self.coordinates.len() / self.axis_count()
    }

    fn segment_count(&self) -> usize {
        self.vertex_count().saturating_sub(1)
    }

    fn vertices(&self) -> VertexIter<'_> {
        VertexIter::new(&self.factory, vec![Sequence::new(vec![], &self.coordinates)])
    }

    fn locate_xy(&self, x: f64, y: f64) -> Location {
        self.locate_on_line(x, y)
    }

    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool {
        intersects_bbox(self, bbox)
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::LineString(self.clone())
    }

    fn insert_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let index = self.check_vertex_id(vertex_id)?;
        if new_point.is_empty() {
            Ok(self.clone().into())
        } else if self.is_empty() {
            Ok(self.factory.point(new_point.coordinates()).into())
        } else {
            Ok(self.with_vertex_inserted(index, new_point)?.into())
        }
    }

    fn delete_vertex(&self, vertex_id: &[isize]) -> Result<Geometry> {
        let index = self.check_vertex_id(vertex_id)?;
        Ok(self.without_vertex(index)?.into())
    }

    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let index = self.check_vertex_id(vertex_id)?;
        Ok(self.with_vertex_moved(index, new_point)?.into())
    }

    fn append_vertex(&self, geometry_id: &[isize], new_point: &Point) -> Result<Geometry> {
        if !geometry_id.is_empty() {
            return Err(GeometryError::Arity {
                kind: GeometryKind::LineString,
                expected: "0",
                actual: geometry_id.to_vec(),
            });
        }

        if new_point.is_empty() {
            Ok(self.clone().into())
        } else if self.is_empty() {
            Ok(self.factory.point(new_point.coordinates()).into())
        } else {
            Ok(self.with_vertex_appended(new_point)?.into())
        }
    }
}

impl LineStringOps for LineString {
    fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}

/// Values of the point in the axis count and precision of the factory.
pub(crate) fn point_values(factory: &Arc<GeometryFactory>, point: &Point) -> Vec<f64> {
    factory.point(point.coordinates()).coordinates().to_vec()
}

pub(crate) fn reversed_coordinates(coordinates: &[f64], axis_count: usize) -> Vec<f64> {
    coordinates
        .chunks_exact(axis_count)
        .rev()
        .flatten()
        .copied()
        .collect()
}

pub(crate) fn moved_coordinates(
    factory: &GeometryFactory,
    coordinates: &[f64],
    deltas: &[f64],
) -> Vec<f64> {
    let axis_count = factory.axis_count();
    coordinates
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let axis = i % axis_count;
            match deltas.get(axis) {
                Some(delta) if !delta.is_nan() => factory.make_precise(axis, value + delta),
                _ => *value,
            }
        })
        .collect()
}

pub(crate) fn deduplicated_coordinates(coordinates: &[f64], axis_count: usize) -> Vec<f64> {
    let mut result: Vec<f64> = Vec::with_capacity(coordinates.len());
    for vertex in coordinates.chunks_exact(axis_count) {
        let duplicate = result.len() >= axis_count && {
            let last = &result[result.len() - axis_count..];
            last[0] == vertex[0] && last[1] == vertex[1]
        };
        if !duplicate {
            result.extend_from_slice(vertex);
        }
    }
    result
}

pub(crate) fn intersects_bbox<L: LineStringOps + ?Sized>(line: &L, bbox: &BoundingBox) -> bool {
    if line.is_empty() || bbox.is_empty() {
        return false;
    }
    if line.vertex_count() == 1 {
        return bbox.intersects_point(line.x(0), line.y(0));
    }

    (1..line.vertex_count()).any(|i| {
        bbox.intersects_segment(line.x(i - 1), line.y(i - 1), line.x(i), line.y(i))
    })
}
