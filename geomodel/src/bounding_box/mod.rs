//! Axis-aligned extents.

use std::sync::Arc;

use nalgebra::Point2;

use crate::error::{GeometryError, Result};
use crate::factory::{GeometryFactory, AXIS_X, AXIS_Y};
use crate::geometry::{Geometry, GeometryOps};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::vertex::VertexIter;

mod text;

/// Minimum and maximum value of every axis of a set of coordinates.
///
/// A box is empty if it has no bounds, if the X or Y bounds are NaN, or if the minimum of an
/// axis is larger than its maximum. Z and M bounds may be NaN when no vertex has a value for the
/// axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    factory: Option<Arc<GeometryFactory>>,
    /// All minimums, then all maximums.
    bounds: Vec<f64>,
}

impl BoundingBox {
    /// The empty box without a factory.
    pub const EMPTY: BoundingBox = BoundingBox {
        factory: None,
        bounds: Vec::new(),
    };

    /// The empty box without a factory.
    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub(crate) fn empty_with(factory: &Arc<GeometryFactory>) -> Self {
        Self {
            factory: Some(factory.clone()),
            bounds: vec![],
        }
    }

    /// Extent of a flat array of coordinates with `axis_count` values per vertex. Values are
    /// rounded to the precision of the factory.
    pub fn new(
        factory: &Arc<GeometryFactory>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<Self> {
        if axis_count < 2 || coordinates.len() % axis_count != 0 {
            return Err(GeometryError::Coordinates {
                axis_count,
                len: coordinates.len(),
            });
        }

        let mut bounds = Bounds::new(factory.axis_count());
        for vertex in coordinates.chunks_exact(axis_count) {
            bounds.include(vertex, |axis, value| factory.make_precise(axis, value));
        }
        Ok(bounds.into_box(factory))
    }

    /// Box with the given corners in X and Y.
    pub fn from_corners(
        factory: &Arc<GeometryFactory>,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> Self {
        let mut bounds = Bounds::new(2);
        bounds.include(&[x1, y1], |axis, value| factory.make_precise(axis, value));
        bounds.include(&[x2, y2], |axis, value| factory.make_precise(axis, value));
        bounds.into_box(factory)
    }

    /// Extent of the points. Empty points are skipped.
    pub fn from_points(factory: &Arc<GeometryFactory>, points: &[Point]) -> Self {
        let mut bounds = Bounds::new(factory.axis_count());
        for point in points.iter().filter(|point| !point.is_empty()) {
            bounds.include(point.coordinates(), |axis, value| {
                factory.make_precise(axis, value)
            });
        }
        bounds.into_box(factory)
    }

    /// Extent of a flat coordinate array, see [`BoundingBox::new`].
    pub fn from_coordinates(
        factory: &Arc<GeometryFactory>,
        axis_count: usize,
        coordinates: &[f64],
    ) -> Result<Self> {
        Self::new(factory, axis_count, coordinates)
    }

    /// Box of a single point.
    pub fn from_point(point: &Point) -> Self {
        let factory = point.factory();
        if point.is_empty() {
            return Self::empty_with(factory);
        }

        let mut bounds = Bounds::new(factory.axis_count());
        bounds.include(point.coordinates(), |_, value| value);
        bounds.into_box(factory)
    }

    pub(crate) fn from_vertices(factory: &Arc<GeometryFactory>, vertices: VertexIter) -> Self {
        let mut bounds = Bounds::new(factory.axis_count());
        for vertex in vertices {
            bounds.include(vertex.coordinates(), |_, value| value);
        }
        bounds.into_box(factory)
    }

    /// Factory of the box, if any.
    pub fn factory(&self) -> Option<&Arc<GeometryFactory>> {
        self.factory.as_ref()
    }

    /// Spatial reference identifier, 0 if unknown.
    pub fn srid(&self) -> i32 {
        self.factory.as_ref().map_or(0, |factory| factory.srid())
    }

    /// Number of axes with bounds.
    pub fn axis_count(&self) -> usize {
        self.bounds.len() / 2
    }

    /// Whether the box covers nothing.
    pub fn is_empty(&self) -> bool {
        let axis_count = self.axis_count();
        if axis_count < 2 {
            return true;
        }

        let (mins, maxs) = self.bounds.split_at(axis_count);
        mins[..2].iter().chain(&maxs[..2]).any(|v| v.is_nan())
            || mins.iter().zip(maxs).any(|(min, max)| min > max)
    }

    /// Minimum of the axis, NaN if the box is empty or has no such axis.
    pub fn min(&self, axis: usize) -> f64 {
        if self.is_empty() || axis >= self.axis_count() {
            f64::NAN
        } else {
            self.bounds[axis]
        }
    }

    /// Maximum of the axis, NaN if the box is empty or has no such axis.
    pub fn max(&self, axis: usize) -> f64 {
        if self.is_empty() || axis >= self.axis_count() {
            f64::NAN
        } else {
            self.bounds[self.axis_count() + axis]
        }
    }

    /// Minimum X.
    pub fn min_x(&self) -> f64 {
        self.min(AXIS_X)
    }

    /// Minimum Y.
    pub fn min_y(&self) -> f64 {
        self.min(AXIS_Y)
    }

    /// Maximum X.
    pub fn max_x(&self) -> f64 {
        self.max(AXIS_X)
    }

    /// Maximum Y.
    pub fn max_y(&self) -> f64 {
        self.max(AXIS_Y)
    }

    /// Extent along X, 0 for an empty box.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x() - self.min_x()
        }
    }

    /// Extent along Y, 0 for an empty box.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y() - self.min_y()
        }
    }

    /// Area in the XY plane.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Centre in the XY plane, `None` for an empty box.
    pub fn centre(&self) -> Option<Point2<f64>> {
        if self.is_empty() {
            None
        } else {
            Some(Point2::new(
                self.min_x() + self.width() / 2.0,
                self.min_y() + self.height() / 2.0,
            ))
        }
    }

    /// Corner of the box: 0 is (min x, min y), the others follow counterclockwise. Indices wrap
    /// around.
    pub fn corner(&self, index: usize) -> Option<Point2<f64>> {
        if self.is_empty() {
            return None;
        }

        let (min_x, min_y, max_x, max_y) = (self.min_x(), self.min_y(), self.max_x(), self.max_y());
        Some(match index % 4 {
            0 => Point2::new(min_x, min_y),
            1 => Point2::new(max_x, min_y),
            2 => Point2::new(max_x, max_y),
            _ => Point2::new(min_x, max_y),
        })
    }

    /// Point with the minimum value of every axis.
    pub fn min_point(&self) -> Point {
        let mins: Vec<f64> = (0..self.axis_count()).map(|axis| self.min(axis)).collect();
        self.geometry_factory().point(&mins)
    }

    /// Point with the maximum value of every axis.
    pub fn max_point(&self) -> Point {
        let maxs: Vec<f64> = (0..self.axis_count()).map(|axis| self.max(axis)).collect();
        self.geometry_factory().point(&maxs)
    }

    /// Factory of the box, or a floating factory without coordinate system.
    fn geometry_factory(&self) -> Arc<GeometryFactory> {
        match &self.factory {
            Some(factory) => factory.clone(),
            None => GeometryFactory::floating(0, self.axis_count().max(2)),
        }
    }

    fn with_xy(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        let axis_count = self.axis_count();
        let mut bounds = self.bounds.clone();
        let precise = |axis: usize, value: f64| match &self.factory {
            Some(factory) => factory.make_precise(axis, value),
            None => value,
        };
        bounds[AXIS_X] = precise(AXIS_X, min_x);
        bounds[AXIS_Y] = precise(AXIS_Y, min_y);
        bounds[axis_count + AXIS_X] = precise(AXIS_X, max_x);
        bounds[axis_count + AXIS_Y] = precise(AXIS_Y, max_y);
        BoundingBox {
            factory: self.factory.clone(),
            bounds,
        }
    }

    fn empty_like(&self) -> BoundingBox {
        BoundingBox {
            factory: self.factory.clone(),
            bounds: vec![],
        }
    }

    /// Smallest box containing both boxes.
    pub fn expand_to_include(&self, other: &BoundingBox) -> BoundingBox {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return match &self.factory {
                Some(factory) => other.convert(factory),
                None => other.clone(),
            };
        }

        let axis_count = self.axis_count();
        let mut bounds = self.bounds.clone();
        for axis in 0..axis_count.min(other.axis_count()) {
            bounds[axis] = bounds[axis].min(other.min(axis));
            bounds[axis_count + axis] = bounds[axis_count + axis].max(other.max(axis));
        }
        BoundingBox {
            factory: self.factory.clone(),
            bounds,
        }
    }

    /// Box extended to contain the vertex given by its coordinates (X, Y, ...). Fewer than 2
    /// values leave the box unchanged.
    pub fn expand_to_include_coordinates(&self, coordinates: &[f64]) -> BoundingBox {
        if coordinates.len() < 2 {
            return self.clone();
        }

        let factory = self.geometry_factory();
        let axis_count = if self.is_empty() {
            factory.axis_count()
        } else {
            self.axis_count()
        };
        let mut bounds = Bounds::new(axis_count);
        if !self.is_empty() {
            bounds.values.copy_from_slice(&self.bounds);
        }
        bounds.include(coordinates, |axis, value| factory.make_precise(axis, value));
        BoundingBox {
            factory: self.factory.clone(),
            bounds: bounds.values,
        }
    }

    /// Box extended to contain the geometry.
    pub fn expand_to_include_geometry<G: GeometryOps + ?Sized>(&self, geometry: &G) -> BoundingBox {
        if geometry.is_empty() {
            self.clone()
        } else {
            self.expand_to_include(&geometry.bounding_box())
        }
    }

    /// Box grown by `delta_x` on the left and right and `delta_y` at the top and bottom.
    /// Negative deltas shrink the box, a box shrunk past its centre is empty.
    pub fn expand(&self, delta_x: f64, delta_y: f64) -> BoundingBox {
        if self.is_empty() || (delta_x == 0.0 && delta_y == 0.0) {
            return self.clone();
        }

        let x1 = self.min_x() - delta_x;
        let x2 = self.max_x() + delta_x;
        let y1 = self.min_y() - delta_y;
        let y2 = self.max_y() + delta_y;
        if x1 > x2 || y1 > y2 {
            self.empty_like()
        } else {
            self.with_xy(x1, y1, x2, y2)
        }
    }

    /// Box grown by a fraction of its size: `factor_x * width / 2` on each side along X,
    /// `factor_y * height / 2` along Y.
    pub fn expand_percent(&self, factor_x: f64, factor_y: f64) -> BoundingBox {
        if self.is_empty() {
            return self.clone();
        }
        self.expand(
            self.width() * factor_x / 2.0,
            self.height() * factor_y / 2.0,
        )
    }

    /// Box translated in the XY plane.
    pub fn move_by(&self, delta_x: f64, delta_y: f64) -> BoundingBox {
        if self.is_empty() || (delta_x == 0.0 && delta_y == 0.0) {
            return self.clone();
        }
        self.with_xy(
            self.min_x() + delta_x,
            self.min_y() + delta_y,
            self.max_x() + delta_x,
            self.max_y() + delta_y,
        )
    }

    /// Common part of both boxes, empty if they do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        if !self.intersects(other) {
            return self.empty_like();
        }
        self.with_xy(
            self.min_x().max(other.min_x()),
            self.min_y().max(other.min_y()),
            self.max_x().min(other.max_x()),
            self.max_y().min(other.max_y()),
        )
    }

    fn intersects_bounds(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
        !self.is_empty()
            && !(min_x > self.max_x()
                || max_x < self.min_x()
                || min_y > self.max_y()
                || max_y < self.min_y())
    }

    /// Whether the boxes overlap in X and Y, boundaries included.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !other.is_empty()
            && self.intersects_bounds(other.min_x(), other.min_y(), other.max_x(), other.max_y())
    }

    /// Whether the position is inside the box or on its boundary.
    pub fn intersects_point(&self, x: f64, y: f64) -> bool {
        self.intersects_bounds(x, y, x, y)
    }

    /// Quick test for a segment: true if an end point is covered or the extent of the segment
    /// overlaps the box.
    ///
    /// This is an over-approximation: a diagonal segment passing next to a corner of the box
    /// also passes the test.
    pub fn intersects_segment(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        self.covers_point(x1, y1)
            || self.covers_point(x2, y2)
            || self.intersects_bounds(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    /// Whether `other` lies completely inside this box, boundaries included.
    pub fn covers(&self, other: &BoundingBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Whether the position is inside the box or on its boundary.
    pub fn covers_point(&self, x: f64, y: f64) -> bool {
        !self.is_empty()
            && x >= self.min_x()
            && x <= self.max_x()
            && y >= self.min_y()
            && y <= self.max_y()
    }

    /// Whether the extent of the geometry lies inside the box.
    pub fn covers_geometry<G: GeometryOps + ?Sized>(&self, geometry: &G) -> bool {
        self.covers(&geometry.bounding_box())
    }

    /// Distance between the closest points of both boxes: 0 if they intersect, `f64::MAX` if
    /// either is empty.
    pub fn distance(&self, other: &BoundingBox) -> f64 {
        if self.is_empty() || other.is_empty() {
            return f64::MAX;
        }
        if self.intersects(other) {
            return 0.0;
        }

        let dx = gap(self.min_x(), self.max_x(), other.min_x(), other.max_x());
        let dy = gap(self.min_y(), self.max_y(), other.min_y(), other.max_y());
        dx.hypot(dy)
    }

    /// Distance from the position to the box, 0 if it is covered.
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        if self.is_empty() {
            return f64::MAX;
        }

        let dx = gap(self.min_x(), self.max_x(), x, x);
        let dy = gap(self.min_y(), self.max_y(), y, y);
        dx.hypot(dy)
    }

    /// Same extent with another factory: values are rounded to its precision, axes it does not
    /// have are dropped and missing axes are unbounded.
    pub fn convert(&self, factory: &Arc<GeometryFactory>) -> BoundingBox {
        if self.is_empty() {
            return Self::empty_with(factory);
        }
        if self.factory.as_ref() == Some(factory) {
            return self.clone();
        }

        let axis_count = factory.axis_count();
        let mut bounds = Bounds::new(axis_count);
        let mins: Vec<f64> = (0..self.axis_count()).map(|axis| self.min(axis)).collect();
        let maxs: Vec<f64> = (0..self.axis_count()).map(|axis| self.max(axis)).collect();
        bounds.include(&mins, |axis, value| factory.make_precise(axis, value));
        bounds.include(&maxs, |axis, value| factory.make_precise(axis, value));
        bounds.into_box(factory)
    }

    /// Polygon following the box boundary with `num_x` steps along each horizontal side and
    /// `num_y` steps along each vertical side.
    ///
    /// The ring starts at (max x, min y) and runs clockwise. Steps are never shorter than 1 unit
    /// for projected coordinate systems and 1e-5 units otherwise. An empty box gives an empty
    /// polygon.
    pub fn to_polygon(&self, num_x: usize, num_y: usize) -> Result<Polygon> {
        let factory = self.geometry_factory();
        if self.is_empty() {
            return Ok(factory.polygon_empty());
        }

        let min_step = if factory.is_projected() { 1.0 } else { 1e-5 };
        let (min_x, min_y, max_x, max_y) = (self.min_x(), self.min_y(), self.max_x(), self.max_y());
        let (x_step, num_x) = steps(self.width(), num_x, min_step);
        let (y_step, num_y) = steps(self.height(), num_y, min_step);

        let mut coordinates = Vec::with_capacity(2 * (1 + 2 * (num_x + num_y)));
        coordinates.extend([max_x, min_y]);
        for i in 1..num_x {
            coordinates.extend([max_x - i as f64 * x_step, min_y]);
        }
        coordinates.extend([min_x, min_y]);
        for i in 1..num_y {
            coordinates.extend([min_x, min_y + i as f64 * y_step]);
        }
        coordinates.extend([min_x, max_y]);
        for i in 1..num_x {
            coordinates.extend([min_x + i as f64 * x_step, max_y]);
        }
        coordinates.extend([max_x, max_y]);
        for i in 1..num_y {
            coordinates.extend([max_x, max_y - i as f64 * y_step]);
        }
        coordinates.extend([max_x, min_y]);

        let ring = factory.linear_ring(2, &coordinates)?;
        Ok(factory.polygon(vec![ring]))
    }

    /// Polygon with `segments` steps along every side.
    pub fn to_polygon_segments(&self, segments: usize) -> Result<Polygon> {
        self.to_polygon(segments, segments)
    }

    /// Polygon of the four corners of the box.
    pub fn to_rectangle(&self) -> Result<Polygon> {
        self.to_polygon(1, 1)
    }

    /// Simplest geometry covering the box: a point when width and height are 0, a line when
    /// one of them is 0, a rectangle otherwise. An empty box gives an empty polygon.
    pub fn to_geometry(&self) -> Result<Geometry> {
        let factory = self.geometry_factory();
        if self.is_empty() {
            return Ok(factory.polygon_empty().into());
        }

        let (min_x, min_y, max_x, max_y) = (self.min_x(), self.min_y(), self.max_x(), self.max_y());
        let (width, height) = (self.width(), self.height());
        if width == 0.0 && height == 0.0 {
            Ok(factory.point_xy(min_x, min_y).into())
        } else if width == 0.0 || height == 0.0 {
            Ok(factory
                .line_string(2, &[min_x, min_y, max_x, max_y])?
                .into())
        } else {
            let ring = factory.linear_ring(
                2,
                &[
                    min_x, min_y, min_x, max_y, max_x, max_y, max_x, min_y, min_x, min_y,
                ],
            )?;
            Ok(factory.polygon(vec![ring]).into())
        }
    }
}

/// Distance between two intervals, 0 if they overlap.
fn gap(min1: f64, max1: f64, min2: f64, max2: f64) -> f64 {
    if max1 < min2 {
        min2 - max1
    } else if max2 < min1 {
        min1 - max2
    } else {
        0.0
    }
}

fn steps(size: f64, count: usize, min_step: f64) -> (f64, usize) {
    if count <= 1 {
        (size, 1)
    } else {
        let step = (size / count as f64).max(min_step);
        let count = ((size / step).ceil() as usize).max(1);
        (step, count)
    }
}

/// Accumulator of per axis minimums and maximums.
struct Bounds {
    axis_count: usize,
    values: Vec<f64>,
}

impl Bounds {
    fn new(axis_count: usize) -> Self {
        Self {
            axis_count,
            values: vec![f64::NAN; axis_count * 2],
        }
    }

    /// Includes a vertex. NaN values and axes beyond the accumulator are skipped.
    fn include(&mut self, vertex: &[f64], precise: impl Fn(usize, f64) -> f64) {
        for (axis, value) in vertex.iter().take(self.axis_count).enumerate() {
            if value.is_nan() {
                continue;
            }
            let value = precise(axis, *value);
            // f64::min/max ignore a NaN operand
            self.values[axis] = self.values[axis].min(value);
            let max = &mut self.values[self.axis_count + axis];
            *max = max.max(value);
        }
    }

    fn into_box(self, factory: &Arc<GeometryFactory>) -> BoundingBox {
        let bbox = BoundingBox {
            factory: Some(factory.clone()),
            bounds: self.values,
        };
        if bbox.is_empty() {
            BoundingBox::empty_with(factory)
        } else {
            bbox
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineStringOps;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::from_corners(&GeometryFactory::floating(0, 2), x1, y1, x2, y2)
    }

    #[test]
    fn corners_are_ordered() {
        let bbox = bbox(10.0, 20.0, 0.0, 5.0);
        assert_eq!(bbox.min_x(), 0.0);
        assert_eq!(bbox.min_y(), 5.0);
        assert_eq!(bbox.max_x(), 10.0);
        assert_eq!(bbox.max_y(), 20.0);
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 15.0);
        assert_eq!(bbox.area(), 150.0);
        assert_eq!(bbox.centre(), Some(Point2::new(5.0, 12.5)));
        assert_eq!(bbox.corner(1), Some(Point2::new(10.0, 5.0)));
        assert_eq!(bbox.corner(6), Some(Point2::new(10.0, 20.0)));
    }

    #[test]
    fn empty_box() {
        let empty = BoundingBox::empty();
        assert!(empty.is_empty());
        assert!(BoundingBox::EMPTY.is_empty());
        assert_eq!(empty.width(), 0.0);
        assert!(empty.min_x().is_nan());
        assert_eq!(empty.distance(&bbox(0.0, 0.0, 1.0, 1.0)), f64::MAX);
        assert!(!empty.intersects(&bbox(0.0, 0.0, 1.0, 1.0)));

        let factory = GeometryFactory::floating(0, 2);
        assert!(BoundingBox::new(&factory, 2, &[]).unwrap().is_empty());
        assert_matches!(
            BoundingBox::new(&factory, 2, &[1.0, 2.0, 3.0]),
            Err(GeometryError::Coordinates { .. })
        );
    }

    #[test]
    fn new_rounds_to_precision() {
        let factory = GeometryFactory::fixed(0, 3, &[10.0, 10.0, 1.0]);
        let bbox = BoundingBox::new(&factory, 2, &[0.123, 0.456, 9.87, 5.56]).unwrap();
        assert_eq!(bbox.axis_count(), 3);
        assert_eq!(bbox.min_x(), 0.1);
        assert_eq!(bbox.max_y(), 5.6);
        assert!(bbox.min(2).is_nan());
        assert!(!bbox.is_empty());
    }

    #[test]
    fn expansion() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(20.0, -5.0, 30.0, 5.0);
        let union = a.expand_to_include(&b);
        assert_eq!(union, bbox(0.0, -5.0, 30.0, 10.0));
        assert_eq!(a.expand_to_include(&BoundingBox::empty()), a);
        assert_eq!(BoundingBox::empty().expand_to_include(&a), a);

        assert_eq!(a.expand(1.0, 2.0), bbox(-1.0, -2.0, 11.0, 12.0));
        assert!(a.expand(-6.0, 0.0).is_empty());
        assert_eq!(a.expand_percent(0.5, 1.0), bbox(-2.5, -5.0, 12.5, 15.0));
        assert_eq!(a.move_by(5.0, -5.0), bbox(5.0, -5.0, 15.0, 5.0));
        assert_eq!(
            a.expand_to_include_coordinates(&[12.0, -1.0]),
            bbox(0.0, -1.0, 12.0, 10.0)
        );
    }

    #[test]
    fn intersection_and_distance() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(5.0, 5.0, 15.0, 15.0);
        let c = bbox(13.0, 14.0, 20.0, 20.0);

        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b), bbox(5.0, 5.0, 10.0, 10.0));
        assert!(a.intersection(&c).is_empty());
        assert_eq!(a.distance(&b), 0.0);
        assert_abs_diff_eq!(a.distance(&c), 5.0);
        assert_abs_diff_eq!(a.distance_to_point(13.0, 14.0), 5.0);
        assert!(a.intersects(&bbox(10.0, 10.0, 11.0, 11.0)));
    }

    #[test]
    fn covers() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert!(a.covers(&bbox(0.0, 0.0, 10.0, 5.0)));
        assert!(!a.covers(&bbox(-1.0, 0.0, 10.0, 5.0)));
        assert!(a.covers_point(10.0, 10.0));
        assert!(!a.covers(&BoundingBox::empty()));
        assert!(!BoundingBox::empty().covers_point(0.0, 0.0));
    }

    #[test]
    fn segment_test_over_approximates() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects_segment(5.0, 5.0, 20.0, 20.0));
        assert!(a.intersects_segment(-5.0, 5.0, 15.0, 5.0));
        assert!(!a.intersects_segment(20.0, 0.0, 30.0, 10.0));
        // diagonal passing outside the corner, still reported as intersecting
        assert!(a.intersects_segment(9.0, 12.0, 12.0, 9.0));
    }

    #[test]
    fn to_polygon_rasterises_boundary() {
        let a = bbox(0.0, 0.0, 10.0, 20.0);
        let polygon = a.to_polygon(2, 4).unwrap();
        let shell = polygon.shell().unwrap();
        assert_eq!(shell.vertex_count(), 1 + 2 * (2 + 4));
        assert_eq!(shell.point(0).coordinates(), &[10.0, 0.0]);
        assert_eq!(shell.point(1).coordinates(), &[5.0, 0.0]);
        assert_eq!(shell.point(2).coordinates(), &[0.0, 0.0]);
        assert_eq!(shell.point(3).coordinates(), &[0.0, 5.0]);
        assert!(shell.is_clockwise());
        assert_abs_diff_eq!(polygon.area(), 200.0);

        let rectangle = a.to_rectangle().unwrap();
        assert_eq!(rectangle.vertex_count(), 5);
        assert!(rectangle.is_rectangle());

        assert!(BoundingBox::empty().to_polygon(10, 10).unwrap().is_empty());
    }

    #[test]
    fn projected_steps_are_at_least_one_unit() {
        let factory = GeometryFactory::floating(3857, 2);
        let a = BoundingBox::from_corners(&factory, 0.0, 0.0, 2.0, 2.0);
        let polygon = a.to_polygon(100, 100).unwrap();
        assert_eq!(polygon.vertex_count(), 1 + 2 * (2 + 2));
    }

    #[test]
    fn to_geometry_degenerates() {
        assert_eq!(
            bbox(1.0, 1.0, 1.0, 1.0).to_geometry().unwrap().kind(),
            crate::GeometryKind::Point
        );
        assert_eq!(
            bbox(1.0, 1.0, 1.0, 5.0).to_geometry().unwrap().kind(),
            crate::GeometryKind::LineString
        );
        let rectangle = bbox(0.0, 0.0, 2.0, 5.0).to_geometry().unwrap();
        assert_eq!(rectangle.kind(), crate::GeometryKind::Polygon);
        assert_abs_diff_eq!(rectangle.area(), 10.0);
        assert!(BoundingBox::empty().to_geometry().unwrap().is_empty());
    }

    #[test]
    fn geometry_bounding_box() {
        let factory = GeometryFactory::floating(0, 3);
        let line = factory
            .line_string(2, &[0.0, 5.0, 10.0, -5.0])
            .unwrap();
        let bbox = line.bounding_box();
        assert_eq!(bbox.min_x(), 0.0);
        assert_eq!(bbox.min_y(), -5.0);
        assert!(bbox.min(2).is_nan());
        assert!(bbox.covers_geometry(&line));
        assert!(line.intersects_bbox(&bbox));

        let converted = bbox.convert(&GeometryFactory::fixed(0, 2, &[1.0, 1.0]));
        assert_eq!(converted.axis_count(), 2);
        assert_eq!(converted.max_x(), 10.0);
    }
}
