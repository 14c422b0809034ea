//! Surfaces bounded by a shell ring and optional holes.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::factory::GeometryFactory;
use crate::geometry::{resolve_index, Geometry, GeometryOps};
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::line_string::LineStringOps;
use crate::linear_ring::LinearRing;
use crate::point::Point;
use crate::services::{Polygonizer, ValidityCheck};
use crate::vertex::{Sequence, VertexIter};

/// A polygon: ring 0 is the shell, the other rings are holes. The empty polygon has no rings.
///
/// Holes crossing the shell are not rejected on construction, see
/// [`Polygon::new_valid_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    factory: Arc<GeometryFactory>,
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// `rings` must be non-empty rings of `factory`.
    pub(crate) fn from_parts(factory: Arc<GeometryFactory>, rings: Vec<LinearRing>) -> Self {
        Self { factory, rings }
    }

    fn with_rings(&self, rings: Vec<LinearRing>) -> Polygon {
        Polygon::from_parts(self.factory.clone(), rings)
    }

    /// Outer ring, `None` for the empty polygon.
    pub fn shell(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    /// Hole with the given index.
    pub fn hole(&self, index: usize) -> Option<&LinearRing> {
        self.rings.get(index + 1)
    }

    /// Number of holes.
    pub fn hole_count(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    /// Ring with the given index, 0 being the shell.
    pub fn ring(&self, index: usize) -> Option<&LinearRing> {
        self.rings.get(index)
    }

    /// Number of rings, shell included.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// All rings, shell first.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    /// Whether the point is inside the polygon or on its boundary.
    pub fn intersects_point(&self, point: &Point) -> bool {
        self.locate(point) != Location::Exterior
    }

    /// Whether the point is strictly inside the polygon.
    pub fn contains_point(&self, point: &Point) -> bool {
        self.locate(point) == Location::Interior
    }

    /// Whether the polygon is an axis-aligned rectangle: no holes and a shell of four corners.
    pub fn is_rectangle(&self) -> bool {
        let Some(shell) = self.shell() else {
            return false;
        };
        if self.hole_count() > 0 || shell.vertex_count() != 5 {
            return false;
        }

        let bbox = self.bounding_box();
        let (min_x, min_y) = (bbox.min_x(), bbox.min_y());
        let (max_x, max_y) = (bbox.max_x(), bbox.max_y());
        for i in 0..5 {
            let (x, y) = (shell.x(i), shell.y(i));
            if (x != min_x && x != max_x) || (y != min_y && y != max_y) {
                return false;
            }
            if i > 0 {
                let x_changed = x != shell.x(i - 1);
                let y_changed = y != shell.y(i - 1);
                if x_changed == y_changed {
                    return false;
                }
            }
        }
        true
    }

    /// 0 if the point is inside or on the boundary, otherwise the distance to the closest ring.
    pub fn distance_to_point(&self, point: &Point, terminate_distance: f64) -> f64 {
        if self.is_empty() || point.is_empty() || self.locate(point) != Location::Exterior {
            return 0.0;
        }

        let mut min = f64::MAX;
        for ring in &self.rings {
            let distance = ring.distance_to_point(point, terminate_distance);
            if distance < min {
                min = distance;
                if min <= terminate_distance {
                    break;
                }
            }
        }
        min
    }

    /// Polygon with the vertices of every ring in reverse order.
    pub fn reverse(&self) -> Polygon {
        self.with_rings(self.rings.iter().map(LinearRing::reverse).collect())
    }

    /// Clockwise shell and counterclockwise holes, each starting at its smallest vertex, holes
    /// in ascending order.
    pub fn normalize(&self) -> Polygon {
        let Some((shell, holes)) = self.rings.split_first() else {
            return self.clone();
        };

        let mut holes: Vec<LinearRing> =
            holes.iter().map(|hole| hole.normalize_with(false)).collect();
        holes.sort_by(LinearRing::compare_to_same_kind);

        let mut rings = Vec::with_capacity(self.rings.len());
        rings.push(shell.normalize_with(true));
        rings.extend(holes);
        self.with_rings(rings)
    }

    /// Shell clockwise, holes counterclockwise.
    pub fn to_clockwise(&self) -> Polygon {
        self.with_rings(
            self.rings
                .iter()
                .enumerate()
                .map(|(i, ring)| {
                    if i == 0 {
                        ring.to_clockwise()
                    } else {
                        ring.to_counter_clockwise()
                    }
                })
                .collect(),
        )
    }

    /// Shell counterclockwise, holes clockwise.
    pub fn to_counter_clockwise(&self) -> Polygon {
        self.with_rings(
            self.rings
                .iter()
                .enumerate()
                .map(|(i, ring)| {
                    if i == 0 {
                        ring.to_counter_clockwise()
                    } else {
                        ring.to_clockwise()
                    }
                })
                .collect(),
        )
    }

    /// Polygon translated by `deltas`, one delta per axis.
    pub fn move_by(&self, deltas: &[f64]) -> Polygon {
        self.with_rings(self.rings.iter().map(|ring| ring.move_by(deltas)).collect())
    }

    /// The shell alone.
    pub fn without_holes(&self) -> Polygon {
        self.with_rings(self.rings.iter().take(1).cloned().collect())
    }

    /// The shell ring for a polygon without holes, all rings as lines otherwise.
    pub fn boundary(&self) -> Geometry {
        match self.rings.as_slice() {
            [] => self.factory.multi_line_string_empty().into(),
            [shell] => shell.clone().into(),
            rings => self
                .factory
                .multi_line_string(rings.iter().map(LinearRing::to_line_string).collect())
                .into(),
        }
    }

    /// Whether both polygons have the same rings within `tolerance`, in the same order.
    pub fn equals_exact(&self, other: &Polygon, tolerance: f64) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }

    /// Orders by shells, then by ring count.
    pub fn compare_to_same_kind(&self, other: &Polygon) -> Ordering {
        match (self.shell(), other.shell()) {
            (Some(a), Some(b)) => a
                .compare_to_same_kind(b)
                .then_with(|| self.ring_count().cmp(&other.ring_count())),
            (a, b) => a.is_some().cmp(&b.is_some()),
        }
    }

    /// The normalized polygon if `validity` accepts it, otherwise the polygons assembled from its
    /// rings by `polygonizer`.
    pub fn new_valid_geometry(
        &self,
        polygonizer: &dyn Polygonizer,
        validity: &dyn ValidityCheck,
    ) -> Result<Geometry> {
        if self.is_empty() {
            return Ok(self.clone().into());
        }

        if validity.is_valid(&self.to_geometry()) {
            return Ok(self.normalize().into());
        }

        let lines: Vec<Geometry> = self
            .rings
            .iter()
            .map(|ring| ring.to_line_string().into())
            .collect();
        polygonizer.polygonize(&lines).inspect_err(|err| {
            log::warn!("Failed to polygonize {} rings: {err}", lines.len());
        })
    }

    fn ring_index(&self, index: isize) -> Result<usize> {
        resolve_index("ring", index, self.rings.len(), false)
    }

    fn with_ring_replaced(&self, index: usize, ring: LinearRing) -> Polygon {
        let mut rings = self.rings.clone();
        rings[index] = ring;
        self.with_rings(rings)
    }

    /// Copy of the polygon with `new_point` inserted into a ring.
    pub fn with_vertex_inserted(
        &self,
        ring_index: isize,
        vertex_index: isize,
        new_point: &Point,
    ) -> Result<Polygon> {
        let ring_index = self.ring_index(ring_index)?;
        let ring = self.rings[ring_index].with_vertex_inserted(vertex_index, new_point)?;
        Ok(self.with_ring_replaced(ring_index, ring))
    }

    /// Copy of the polygon without a vertex of a ring.
    pub fn without_vertex(&self, ring_index: isize, vertex_index: isize) -> Result<Polygon> {
        let ring_index = self.ring_index(ring_index)?;
        let ring = self.rings[ring_index].without_vertex(vertex_index)?;
        Ok(self.with_ring_replaced(ring_index, ring))
    }

    /// Copy of the polygon with a vertex of a ring replaced.
    pub fn with_vertex_moved(
        &self,
        ring_index: isize,
        vertex_index: isize,
        new_point: &Point,
    ) -> Result<Polygon> {
        let ring_index = self.ring_index(ring_index)?;
        let ring = self.rings[ring_index].with_vertex_moved(vertex_index, new_point)?;
        Ok(self.with_ring_replaced(ring_index, ring))
    }

    /// Copy of the polygon with `new_point` added before the closing vertex of a ring.
    pub fn with_vertex_appended(&self, ring_index: isize, new_point: &Point) -> Result<Polygon> {
        let ring_index = self.ring_index(ring_index)?;
        let ring = self.rings[ring_index].with_vertex_appended(new_point)?;
        Ok(self.with_ring_replaced(ring_index, ring))
    }

    fn check_vertex_id(&self, vertex_id: &[isize]) -> Result<(isize, isize)> {
        match vertex_id {
            [ring, vertex] => Ok((*ring, *vertex)),
            _ => Err(GeometryError::Arity {
                kind: GeometryKind::Polygon,
                expected: "2",
                actual: vertex_id.to_vec(),
            }),
        }
    }
}

impl GeometryOps for Polygon {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn factory(&self) -> &Arc<GeometryFactory> {
        &self.factory
    }

    fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::Surface
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::Curve
    }

    fn area(&self) -> f64 {
        let Some((shell, holes)) = self.rings.split_first() else {
            return 0.0;
        };
        holes
            .iter()
            .fold(shell.polygon_area(), |area, hole| area - hole.polygon_area())
    }

    fn vertex_count(&self) -> usize {
        self.rings.iter().map(GeometryOps::vertex_count).sum()
    }

    fn segment_count(&self) -> usize {
        self.rings.iter().map(GeometryOps::segment_count).sum()
    }

    fn vertices(&self) -> VertexIter<'_> {
        let sequences = self
            .rings
            .iter()
            .enumerate()
            .map(|(i, ring)| Sequence::new(vec![i], ring.coordinates()))
            .collect();
        VertexIter::new(&self.factory, sequences)
    }

    fn locate_xy(&self, x: f64, y: f64) -> Location {
        let Some((shell, holes)) = self.rings.split_first() else {
            return Location::Exterior;
        };

        match shell.locate_in_ring(x, y) {
            Location::Interior => {}
            location => return location,
        }

        for hole in holes {
            match hole.locate_in_ring(x, y) {
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
                Location::Exterior => {}
            }
        }
        Location::Interior
    }

    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool {
        if self.is_empty() || bbox.is_empty() {
            return false;
        }

        self.rings.iter().any(|ring| ring.intersects_bbox(bbox))
            || self.locate_xy(bbox.min_x(), bbox.min_y()) != Location::Exterior
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::Polygon(self.clone())
    }

    fn insert_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let (ring, vertex) = self.check_vertex_id(vertex_id)?;
        Ok(self.with_vertex_inserted(ring, vertex, new_point)?.into())
    }

    fn delete_vertex(&self, vertex_id: &[isize]) -> Result<Geometry> {
        let (ring, vertex) = self.check_vertex_id(vertex_id)?;
        Ok(self.without_vertex(ring, vertex)?.into())
    }

    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        let (ring, vertex) = self.check_vertex_id(vertex_id)?;
        Ok(self.with_vertex_moved(ring, vertex, new_point)?.into())
    }

    fn append_vertex(&self, geometry_id: &[isize], new_point: &Point) -> Result<Geometry> {
        match geometry_id {
            [ring] => Ok(self.with_vertex_appended(*ring, new_point)?.into()),
            _ => Err(GeometryError::Arity {
                kind: GeometryKind::Polygon,
                expected: "1",
                actual: geometry_id.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn polygon_with_hole() -> Polygon {
        let factory = GeometryFactory::floating(0, 2);
        factory
            .polygon_from_coordinates(
                2,
                &[
                    &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0],
                    &[4.0, 4.0, 6.0, 4.0, 6.0, 6.0, 4.0, 6.0, 4.0, 4.0],
                ],
            )
            .unwrap()
    }

    #[test]
    fn area_subtracts_holes() {
        let polygon = polygon_with_hole();
        assert_abs_diff_eq!(polygon.area(), 96.0);
        assert_abs_diff_eq!(polygon.length(), 48.0);
        assert_eq!(polygon.vertex_count(), 10);
        assert_eq!(polygon.segment_count(), 8);
        assert_eq!(polygon.hole_count(), 1);
    }

    #[test]
    fn locate_points() {
        let polygon = polygon_with_hole();
        let factory = polygon.factory().clone();
        assert_eq!(polygon.locate(&factory.point_xy(1.0, 1.0)), Location::Interior);
        assert_eq!(polygon.locate(&factory.point_xy(5.0, 5.0)), Location::Exterior);
        assert_eq!(polygon.locate(&factory.point_xy(4.0, 5.0)), Location::Boundary);
        assert_eq!(polygon.locate(&factory.point_xy(0.0, 5.0)), Location::Boundary);
        assert_eq!(polygon.locate(&factory.point_xy(11.0, 5.0)), Location::Exterior);
        assert!(polygon.contains_point(&factory.point_xy(2.0, 8.0)));
        assert!(polygon.intersects_point(&factory.point_xy(10.0, 10.0)));
        assert!(!polygon.contains_point(&factory.point_xy(10.0, 10.0)));
    }

    #[test]
    fn rectangles() {
        let polygon = polygon_with_hole();
        assert!(!polygon.is_rectangle());
        assert!(polygon.without_holes().is_rectangle());

        let factory = polygon.factory().clone();
        let skewed = factory
            .polygon_from_coordinates(
                2,
                &[&[0.0, 0.0, 1.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0]],
            )
            .unwrap();
        assert!(!skewed.is_rectangle());
    }

    #[test]
    fn normalize_orients_rings() {
        let polygon = polygon_with_hole().reverse();
        let normalized = polygon.normalize();
        assert!(normalized.shell().unwrap().is_clockwise());
        assert!(normalized.hole(0).unwrap().is_counter_clockwise());
        assert_eq!(normalized.normalize(), normalized);

        let counter_clockwise = polygon.to_counter_clockwise();
        assert!(counter_clockwise.shell().unwrap().is_counter_clockwise());
        assert!(counter_clockwise.hole(0).unwrap().is_clockwise());
    }

    #[test]
    fn boundary_of_rings() {
        let polygon = polygon_with_hole();
        assert_eq!(polygon.boundary().kind(), GeometryKind::MultiLineString);
        assert_eq!(
            polygon.without_holes().boundary().kind(),
            GeometryKind::LinearRing
        );
        assert_eq!(polygon.boundary_dimension(), Dimension::Curve);
    }

    #[test]
    fn ring_edits() {
        let polygon = polygon_with_hole();
        let target = polygon.factory().point_xy(5.0, 3.0);

        let inserted = polygon.insert_vertex(&[1, 1], &target).unwrap();
        assert_eq!(inserted.vertex_count(), 11);
        assert_eq!(polygon.vertex_count(), 10);

        assert_matches!(
            polygon.insert_vertex(&[2, 0], &target),
            Err(GeometryError::Range { what: "ring", index: 2, count: 2 })
        );
        assert_matches!(
            polygon.delete_vertex(&[1]),
            Err(GeometryError::Arity { .. })
        );
        let triangle = polygon.without_vertex(0, 1).unwrap();
        assert_eq!(triangle.shell().unwrap().vertex_count(), 4);
        assert_matches!(
            triangle.delete_vertex(&[0, 1]),
            Err(GeometryError::StructuralMinimum(_))
        );

        let appended = polygon.append_vertex(&[0], &target).unwrap();
        assert_eq!(appended.vertex_count(), 11);
    }

    #[test]
    fn distance_from_outside() {
        let polygon = polygon_with_hole();
        let factory = polygon.factory().clone();
        assert_abs_diff_eq!(polygon.distance_to_point(&factory.point_xy(13.0, 5.0), 0.0), 3.0);
        assert_abs_diff_eq!(polygon.distance_to_point(&factory.point_xy(5.0, 5.0), 0.0), 1.0);
        assert_eq!(polygon.distance_to_point(&factory.point_xy(1.0, 1.0), 0.0), 0.0);
    }
}
