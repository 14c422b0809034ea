//! Zero dimensional geometry.

use std::cmp::Ordering;
use std::sync::Arc;

use approx::AbsDiffEq;
use nalgebra::Point2;

use crate::bounding_box::BoundingBox;
use crate::error::{GeometryError, Result};
use crate::factory::{GeometryFactory, AXIS_M, AXIS_X, AXIS_Y, AXIS_Z};
use crate::geometry::{Geometry, GeometryOps};
use crate::geometry_type::{Dimension, GeometryKind, Location};
use crate::vertex::{Sequence, VertexIter};

/// A single position, or the empty point.
///
/// A non-empty point stores exactly `factory.axis_count()` values. NaN marks an unset axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    factory: Arc<GeometryFactory>,
    coordinates: Vec<f64>,
}

impl Point {
    /// `coordinates` must be empty or rounded values for every axis of the factory.
    pub(crate) fn from_parts(factory: Arc<GeometryFactory>, coordinates: Vec<f64>) -> Self {
        Self {
            factory,
            coordinates,
        }
    }

    /// Values of all axes, empty for the empty point.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Value of the axis, NaN if the point is empty or has no such axis.
    pub fn coordinate(&self, axis: usize) -> f64 {
        self.coordinates.get(axis).copied().unwrap_or(f64::NAN)
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.coordinate(AXIS_X)
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.coordinate(AXIS_Y)
    }

    /// Z coordinate.
    pub fn z(&self) -> f64 {
        self.coordinate(AXIS_Z)
    }

    /// M value.
    pub fn m(&self) -> f64 {
        self.coordinate(AXIS_M)
    }

    /// X and Y.
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.x(), self.y())
    }

    /// Whether the first `axis_count` values of both points are equal. Two NaN values are
    /// considered equal.
    pub fn equals(&self, axis_count: usize, other: &Point) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }

        (0..axis_count).all(|axis| {
            let a = self.coordinate(axis);
            let b = other.coordinate(axis);
            a == b || (a.is_nan() && b.is_nan())
        })
    }

    /// Whether both points have the same X and Y.
    pub fn equals_2d(&self, other: &Point) -> bool {
        self.equals(2, other)
    }

    /// Whether the points are within `tolerance` of each other in the XY plane.
    pub fn equals_exact(&self, other: &Point, tolerance: f64) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }

        if tolerance == 0.0 {
            self.equals_2d(other)
        } else {
            nalgebra::distance(&self.xy(), &other.xy()) <= tolerance
        }
    }

    /// Euclidean distance in the XY plane, 0 if either point is empty.
    pub fn distance_to_point(&self, other: &Point) -> f64 {
        if self.is_empty() || other.is_empty() {
            0.0
        } else {
            nalgebra::distance(&self.xy(), &other.xy())
        }
    }

    /// Orders by X then Y.
    pub fn compare_to_same_kind(&self, other: &Point) -> Ordering {
        self.x()
            .total_cmp(&other.x())
            .then_with(|| self.y().total_cmp(&other.y()))
    }

    /// Points are always in normal form.
    pub fn normalize(&self) -> Point {
        self.clone()
    }

    /// Reversing a point returns the same point.
    pub fn reverse(&self) -> Point {
        self.clone()
    }

    /// Point translated by `deltas`, one delta per axis. Missing and NaN deltas leave the axis
    /// unchanged.
    pub fn move_by(&self, deltas: &[f64]) -> Point {
        if self.is_empty() {
            return self.clone();
        }

        let coordinates = self
            .coordinates
            .iter()
            .enumerate()
            .map(|(axis, value)| match deltas.get(axis) {
                Some(delta) if !delta.is_nan() => {
                    self.factory.make_precise(axis, value + delta)
                }
                _ => *value,
            })
            .collect();
        Point::from_parts(self.factory.clone(), coordinates)
    }

    /// Replaces the only vertex of the point. The id must be `[0]` (or `[-1]`).
    pub fn with_vertex_moved(&self, vertex_index: isize, new_point: &Point) -> Result<Point> {
        if self.is_empty() {
            return Err(GeometryError::StructuralMinimum(
                "cannot move vertex of an empty Point".into(),
            ));
        }
        if vertex_index != 0 && vertex_index != -1 {
            return Err(GeometryError::Range {
                what: "vertex",
                index: vertex_index,
                count: 1,
            });
        }
        if new_point.is_empty() {
            return Ok(self.clone());
        }

        Ok(self.factory.point(new_point.coordinates()))
    }
}

impl GeometryOps for Point {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Point
    }

    fn factory(&self) -> &Arc<GeometryFactory> {
        &self.factory
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::Point
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::False
    }

    fn vertex_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            1
        }
    }

    fn vertices(&self) -> VertexIter<'_> {
        let sequences = if self.is_empty() {
            vec![]
        } else {
            vec![Sequence::new(vec![], &self.coordinates)]
        };
        VertexIter::new(&self.factory, sequences)
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_point(self)
    }

    fn locate_xy(&self, x: f64, y: f64) -> Location {
        if !self.is_empty() && self.x() == x && self.y() == y {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    fn intersects_bbox(&self, bbox: &BoundingBox) -> bool {
        !self.is_empty() && bbox.intersects_point(self.x(), self.y())
    }

    fn to_geometry(&self) -> Geometry {
        Geometry::Point(self.clone())
    }

    fn insert_vertex(&self, vertex_id: &[isize], _new_point: &Point) -> Result<Geometry> {
        Err(GeometryError::Arity {
            kind: GeometryKind::Point,
            expected: "0 (vertices cannot be inserted)",
            actual: vertex_id.to_vec(),
        })
    }

    fn delete_vertex(&self, _vertex_id: &[isize]) -> Result<Geometry> {
        Err(GeometryError::StructuralMinimum(
            "cannot delete the vertex of a Point".into(),
        ))
    }

    fn move_vertex(&self, vertex_id: &[isize], new_point: &Point) -> Result<Geometry> {
        match vertex_id {
            [index] => Ok(self.with_vertex_moved(*index, new_point)?.into()),
            _ => Err(GeometryError::Arity {
                kind: GeometryKind::Point,
                expected: "1",
                actual: vertex_id.to_vec(),
            }),
        }
    }

    fn append_vertex(&self, geometry_id: &[isize], _new_point: &Point) -> Result<Geometry> {
        Err(GeometryError::Arity {
            kind: GeometryKind::Point,
            expected: "0 (vertices cannot be appended)",
            actual: geometry_id.to_vec(),
        })
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| (a.is_nan() && b.is_nan()) || a.abs_diff_eq(b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn coordinates_round_trip() {
        let factory = GeometryFactory::fixed(0, 3, &[1000.0, 1000.0, 1.0]);
        let point = factory.point(&[1.23456, 2.34567, 3.6]);
        assert_eq!(point.coordinates(), &[1.235, 2.346, 4.0]);

        let copy = factory.point(point.coordinates());
        assert!(copy.equals(2, &point));
        assert!(copy.equals(3, &point));
        assert_eq!(copy, point);
    }

    #[test]
    fn padding_and_truncation() {
        let factory = GeometryFactory::floating(0, 3);
        let point = factory.point(&[1.0, 2.0]);
        assert_eq!(point.coordinates().len(), 3);
        assert!(point.z().is_nan());
        assert!(point.m().is_nan());

        let point = factory.point(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(point.coordinates(), &[1.0, 2.0, 3.0]);

        assert!(factory.point(&[1.0]).is_empty());
        assert!(factory.point(&[]).is_empty());
    }

    #[test]
    fn nan_axes_compare_equal() {
        let factory = GeometryFactory::floating(0, 3);
        let a = factory.point(&[1.0, 2.0]);
        let b = factory.point(&[1.0, 2.0]);
        assert!(a.equals(3, &b));
        assert_abs_diff_eq!(a, b);
    }

    #[test]
    fn dimensions() {
        let factory = GeometryFactory::floating(0, 2);
        let point = factory.point_xy(1.0, 2.0);
        assert_eq!(point.dimension(), Dimension::Point);
        assert_eq!(point.boundary_dimension(), Dimension::False);
        assert_eq!(point.vertex_count(), 1);
        assert_eq!(factory.point_empty().vertex_count(), 0);
    }

    #[test]
    fn move_and_distance() {
        let factory = GeometryFactory::fixed(0, 2, &[10.0, 10.0]);
        let point = factory.point_xy(1.0, 1.0);
        let moved = point.move_by(&[2.04, f64::NAN]);
        assert_eq!(moved.coordinates(), &[3.0, 1.0]);
        assert_abs_diff_eq!(point.distance_to_point(&factory.point_xy(4.0, 5.0)), 5.0);
        assert_eq!(point.distance_to_point(&factory.point_empty()), 0.0);
    }

    #[test]
    fn equals_exact_with_tolerance() {
        let factory = GeometryFactory::floating(0, 2);
        let a = factory.point_xy(1.0, 1.0);
        let b = factory.point_xy(1.0, 1.1);
        assert!(!a.equals_exact(&b, 0.0));
        assert!(a.equals_exact(&b, 0.2));
        assert!(factory.point_empty().equals_exact(&factory.point_empty(), 0.0));
        assert!(!a.equals_exact(&factory.point_empty(), 10.0));
    }

    #[test]
    fn vertex_edits() {
        let factory = GeometryFactory::floating(0, 2);
        let point = factory.point_xy(1.0, 1.0);
        let target = factory.point_xy(5.0, 6.0);

        let moved = point.move_vertex(&[0], &target).unwrap();
        assert_eq!(moved, Geometry::Point(target.clone()));
        assert_eq!(point.x(), 1.0);

        assert_matches!(
            point.move_vertex(&[0, 1], &target),
            Err(GeometryError::Arity { .. })
        );
        assert_matches!(
            point.move_vertex(&[2], &target),
            Err(GeometryError::Range { index: 2, .. })
        );
        assert_matches!(
            point.delete_vertex(&[0]),
            Err(GeometryError::StructuralMinimum(_))
        );
    }

    #[test]
    fn ordering() {
        let factory = GeometryFactory::floating(0, 2);
        let a = factory.point_xy(1.0, 5.0);
        let b = factory.point_xy(2.0, 0.0);
        let c = factory.point_xy(1.0, 6.0);
        assert_eq!(a.compare_to_same_kind(&b), Ordering::Less);
        assert_eq!(a.compare_to_same_kind(&c), Ordering::Less);
        assert_eq!(b.compare_to_same_kind(&c), Ordering::Greater);
    }
}
