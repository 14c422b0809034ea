//! Closed lines used as polygon boundaries.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::collection::MultiPoint;
use crate::error::{GeometryError, Result};
use crate::factory::GeometryFactory;
use crate::geometry::{resolve_index, Geometry, GeometryOps};
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::line_string::{
    deduplicated_coordinates, intersects_bbox, moved_coordinates, point_values,
    reversed_coordinates, LineString, LineStringOps,
};
use crate::point::Point;
use crate::vertex::{Sequence, VertexIter};

/// Minimum number of vertices of a non-empty ring, closing vertex included.
pub const MIN_RING_VERTEX_COUNT: usize = 4;

/// A closed line with at least four vertices (the last one repeating the first), or the empty
/// ring.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    factory: Arc<GeometryFactory>,
    coordinates: Vec<f64>,
}

impl LinearRing {
    /// Checks the ring invariants on rounded coordinates of the factory's axis count.
    pub(crate) fn new(factory: Arc<GeometryFactory>, coordinates: Vec<f64>) -> Result<Self> {
        let ring = Self::from_parts(factory, coordinates);
        let vertex_count = ring.vertex_count();
        if vertex_count == 0 {
            return Ok(ring);
        }

        if vertex_count < MIN_RING_VERTEX_COUNT {
            return Err(GeometryError::StructuralMinimum(format!(
                "LinearRing must have a minimum of {MIN_RING_VERTEX_COUNT} vertices, got \
                 {vertex_count}"
            )));
        }

        if !ring.is_closed() {
            let last = vertex_count - 1;
            return Err(GeometryError::NotClosed {
                first: [ring.x(0), ring.y(0)],
                last: [ring.x(last), ring.y(last)],
            });
        }

        Ok(ring)
    }

    pub(crate) fn from_parts(factory: Arc<GeometryFactory>, coordinates: Vec<f64>) -> Self {
        Self {
            factory,
            coordinates,
        }
    }

    /// Vertices without the closing one.
    fn open_coordinates(&self) -> &[f64] {
        let len = self.coordinates.len().saturating_sub(self.axis_count());
        &self.coordinates[..len]
    }

    /// Closes `open` by repeating its first vertex.
    fn closed(&self, mut open: Vec<f64>) -> LinearRing {
        let axis_count = self.axis_count();
        if open.len() >= axis_count {
            open.extend_from_within(..axis_count);
        }
        LinearRing::from_parts(self.factory.clone(), open)
    }

    /// Same vertices as a line string.
    pub fn to_line_string(&self) -> LineString {
        LineString::from_parts(self.factory.clone(), self.coordinates.clone())
    }

    /// Ring with the vertices in reverse order. The start vertex is kept.
    pub fn reverse(&self) -> LinearRing {
        LinearRing::from_parts(
            self.factory.clone(),
            reversed_coordinates(&self.coordinates, self.axis_count()),
        )
    }

    /// Clockwise ring starting at its smallest vertex.
    pub fn normalize(&self) -> LinearRing {
        self.normalize_with(true)
    }

    /// Ring starting at its smallest vertex (by X then Y) and oriented as requested.
    pub fn normalize_with(&self, clockwise: bool) -> LinearRing {
        if self.is_empty() {
            return self.clone();
        }

        let axis_count = self.axis_count();
        let open = self.open_coordinates();
        let open_count = open.len() / axis_count;
        let mut min_index = 0;
        for i in 1..open_count {
            let ordering = self
                .x(i)
                .total_cmp(&self.x(min_index))
                .then_with(|| self.y(i).total_cmp(&self.y(min_index)));
            if ordering == Ordering::Less {
                min_index = i;
            }
        }

        let split = min_index * axis_count;
        let mut rotated = Vec::with_capacity(self.coordinates.len());
        rotated.extend_from_slice(&open[split..]);
        rotated.extend_from_slice(&open[..split]);
        let ring = self.closed(rotated);

        if ring.is_counter_clockwise() == clockwise {
            ring.reverse()
        } else {
            ring
        }
    }

    /// Ring reversed if needed so that it runs clockwise.
    pub fn to_clockwise(&self) -> LinearRing {
        if self.is_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Ring reversed if needed so that it runs counterclockwise.
    pub fn to_counter_clockwise(&self) -> LinearRing {
        if self.is_counter_clockwise() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Ring translated by `deltas`, one delta per axis.
    pub fn move_by(&self, deltas: &[f64]) -> LinearRing {
        LinearRing::from_parts(
            self.factory.clone(),
            moved_coordinates(&self.factory, &self.coordinates, deltas),
        )
    }

    /// Ring without consecutive vertices equal in XY. A ring that collapses below four vertices
    /// becomes empty.
    pub fn remove_duplicate_points(&self) -> LinearRing {
        let coordinates = deduplicated_coordinates(&self.coordinates, self.axis_count());
        if coordinates.len() < MIN_RING_VERTEX_COUNT * self.axis_count() {
            if !coordinates.is_empty() {
                log::debug!("Ring collapsed after removing duplicate points");
            }
            LinearRing::from_parts(self.factory.clone(), vec![])
        } else {
            LinearRing::from_parts(self.factory.clone(), coordinates)
        }
    }

    /// Resolves an index into the open vertex list. The closing vertex maps to the first one.
    fn open_index(&self, index: isize) -> Result<usize> {
        let vertex_count = self.vertex_count();
        let resolved = resolve_index("vertex", index, vertex_count, false)?;
        Ok(if resolved == vertex_count - 1 {
            0
        } else {
            resolved
        })
    }

    fn check_not_empty(&self, action: &str) -> Result<()> {
        if self.is_empty() {
            Err(GeometryError::StructuralMinimum(format!(
                "cannot {action} vertex for empty LinearRing"
            )))
        } else {
            Ok(())
        }
    }

    /// Copy of the ring with `new_point` inserted before the vertex at `index`. Inserting at
    /// index 0 changes the start (and closing) vertex. An empty `new_point` leaves the ring
    /// unchanged.
    pub fn with_vertex_inserted(&self, index: isize, new_point: &Point) -> Result<LinearRing> {
        self.check_not_empty("insert")?;
        let vertex_count = self.vertex_count();
        let index = resolve_index("vertex", index, vertex_count, true)?.min(vertex_count - 1);
        if new_point.is_empty() {
            return Ok(self.clone());
        }
        let values = point_values(&self.factory, new_point);

        let axis_count = self.axis_count();
        let open = self.open_coordinates();
        let mut coordinates = Vec::with_capacity(self.coordinates.len() + axis_count);
        coordinates.extend_from_slice(&open[..index * axis_count]);
        coordinates.extend_from_slice(&values);
        coordinates.extend_from_slice(&open[index * axis_count..]);
        Ok(self.closed(coordinates))
    }

    /// Copy of the ring without the vertex at `index`. Deleting the first or closing vertex
    /// makes the second vertex the new start.
    pub fn without_vertex(&self, index: isize) -> Result<LinearRing> {
        self.check_not_empty("delete")?;
        if self.vertex_count() <= MIN_RING_VERTEX_COUNT {
            return Err(GeometryError::StructuralMinimum(format!(
                "LinearRing must have a minimum of {MIN_RING_VERTEX_COUNT} vertices"
            )));
        }
        let index = self.open_index(index)?;

        let axis_count = self.axis_count();
        let open = self.open_coordinates();
        let mut coordinates = Vec::with_capacity(self.coordinates.len());
        coordinates.extend_from_slice(&open[..index * axis_count]);
        coordinates.extend_from_slice(&open[(index + 1) * axis_count..]);
        Ok(self.closed(coordinates))
    }

    /// Copy of the ring with the vertex at `index` replaced. Moving the first or the closing
    /// vertex moves both.
    pub fn with_vertex_moved(&self, index: isize, new_point: &Point) -> Result<LinearRing> {
        self.check_not_empty("move")?;
        let index = self.open_index(index)?;
        if new_point.is_empty() {
            return Ok(self.clone());
        }

        let axis_count = self.axis_count();
        let mut coordinates = self.open_coordinates().to_vec();
        coordinates[index * axis_count..(index + 1) * axis_count]
            .copy_from_slice(&point_values(&self.factory, new_point));
        Ok(self.closed(coordinates))
    }

    /// Copy of the ring with `new_point` added before the closing vertex.
    pub fn with_vertex_appended(&self, new_point: &Point) -> Result<LinearRing> {
        self.check_not_empty("append")?;
        self.with_vertex_inserted(self.vertex_count() as isize - 1, new_point)
    }

    /// Rings have no boundary.
    pub fn boundary(&self) -> MultiPoint {
        self.factory.multi_point_empty()
    }

    /// Whether both rings have the same vertices within `tolerance`, in the same order.
    pub fn equals_exact(&self, other: &LinearRing, tolerance: f64) -> bool {
        self.equals_exact_vertices(other, tolerance)
    }

    /// Orders by vertices, then by vertex count.
    pub fn compare_to_same_kind(&self, other: &LinearRing) -> Ordering {
        self.compare_vertices(other)
    }

    fn check_vertex_id(&self, vertex_id: &[isize]) -> Result<isize> {
        match vertex_id {
            [index] => Ok(*index),
            _ => Err(GeometryError::Arity {
                kind: GeometryKind::LinearRing,
                expected: "1",
                actual: vertex_id.to_vec(),
            }),
        }
    }
}

impl GeometryOps for LinearRing {
    fn kind(&self) -> GeometryKind {
        GeometryKind::LinearRing
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
        Dimension::False
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
        Geometry::LinearRing(self.clone())
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
                kind: GeometryKind::LinearRing,
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

impl LineStringOps for LinearRing {
    fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}
