//! Straight line segments between consecutive vertices, and the planar algorithms on them.

use std::sync::Arc;

use nalgebra::Point2;

use crate::error::{GeometryError, NotRepresentable, Result};
use crate::factory::GeometryFactory;
use crate::line_string::LineString;
use crate::orient::Orientation;
use crate::vertex::Sequence;

/// Shortest euclidian distance between a point and the segment `a-b`:
///
/// * if the normal from the point to the segment ends inside the segment, the returned value is
///   the length of the normal
/// * if the normal from the point to the segment ends outside of the segment, the returned value
///   is the smaller one of the distances between the point and the segment's endpoints
pub fn distance_to_segment(point: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    if a == b {
        return nalgebra::distance(a, point);
    }

    let ds = b - a;
    let dp = point - a;
    let ds_len = ds.norm_squared();

    let r = dp.dot(&ds) / ds_len;
    if r <= 0.0 {
        nalgebra::distance(a, point)
    } else if r >= 1.0 {
        nalgebra::distance(b, point)
    } else {
        let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
        s.abs() * ds_len.sqrt()
    }
}

/// Whether `q` lies on the closed segment `p-r`.
pub fn is_on_segment(q: &Point2<f64>, p: &Point2<f64>, r: &Point2<f64>) -> bool {
    Orientation::triplet(p, r, q) == Orientation::Collinear && within_bounds(q, p, r)
}

fn within_bounds(q: &Point2<f64>, p: &Point2<f64>, r: &Point2<f64>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Returns true, if the segments `p1-p2` and `q1-q2` have at least one common point.
pub fn segments_intersect(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> bool {
    let o1 = Orientation::triplet(p1, p2, q1);
    let o2 = Orientation::triplet(p1, p2, q2);
    let o3 = Orientation::triplet(q1, q2, p1);
    let o4 = Orientation::triplet(q1, q2, p2);

    if o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear
    {
        return true;
    }

    (o1 == Orientation::Collinear && within_bounds(q1, p1, p2))
        || (o2 == Orientation::Collinear && within_bounds(q2, p1, p2))
        || (o3 == Orientation::Collinear && within_bounds(p1, q1, q2))
        || (o4 == Orientation::Collinear && within_bounds(p2, q1, q2))
}

/// Minimum distance between the segments `p1-p2` and `q1-q2`, 0 if they intersect.
pub fn distance_between_segments(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> f64 {
    if segments_intersect(p1, p2, q1, q2) {
        return 0.0;
    }

    distance_to_segment(p1, q1, q2)
        .min(distance_to_segment(p2, q1, q2))
        .min(distance_to_segment(q1, p1, p2))
        .min(distance_to_segment(q2, p1, p2))
}

/// Intersection of the infinite lines through `p1-p2` and `q1-q2`, computed with homogeneous
/// coordinates. Parallel or degenerate lines have no finite intersection.
pub fn line_intersection(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> std::result::Result<Point2<f64>, NotRepresentable> {
    let px = p1.y - p2.y;
    let py = p2.x - p1.x;
    let pw = p1.x * p2.y - p2.x * p1.y;

    let qx = q1.y - q2.y;
    let qy = q2.x - q1.x;
    let qw = q1.x * q2.y - q2.x * q1.y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = x / w;
    let y_int = y / w;
    if x_int.is_finite() && y_int.is_finite() {
        Ok(Point2::new(x_int, y_int))
    } else {
        Err(NotRepresentable)
    }
}

/// A segment of a line or ring, borrowed from the geometry's coordinate storage.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    factory: &'a Arc<GeometryFactory>,
    id: Vec<usize>,
    coordinates: &'a [f64],
}

impl<'a> Segment<'a> {
    /// Id path of the segment: part and ring indices followed by the index of the segment.
    pub fn segment_id(&self) -> &[usize] {
        &self.id
    }

    /// Value of an axis of the start (`vertex == 0`) or end (`vertex == 1`) vertex.
    pub fn coordinate(&self, vertex: usize, axis: usize) -> f64 {
        let axis_count = self.factory.axis_count();
        if vertex < 2 && axis < axis_count {
            self.coordinates[vertex * axis_count + axis]
        } else {
            f64::NAN
        }
    }

    /// Start vertex.
    pub fn p0(&self) -> Point2<f64> {
        Point2::new(self.coordinate(0, 0), self.coordinate(0, 1))
    }

    /// End vertex.
    pub fn p1(&self) -> Point2<f64> {
        Point2::new(self.coordinate(1, 0), self.coordinate(1, 1))
    }

    /// Length of the segment in the XY plane.
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.p0(), &self.p1())
    }

    /// Angle of the segment direction in radians, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        let d = self.p1() - self.p0();
        d.y.atan2(d.x)
    }

    /// Middle of the segment.
    pub fn mid_point(&self) -> Point2<f64> {
        nalgebra::center(&self.p0(), &self.p1())
    }

    /// Position of the projection of the point on the line, as a fraction of the segment length
    /// (0 at the start vertex, 1 at the end vertex).
    pub fn projection_factor(&self, point: &Point2<f64>) -> f64 {
        let p0 = self.p0();
        let p1 = self.p1();
        if point == &p0 {
            return 0.0;
        }
        if point == &p1 {
            return 1.0;
        }

        let ds = p1 - p0;
        let len_sq = ds.norm_squared();
        if len_sq == 0.0 {
            return f64::NAN;
        }
        (point - p0).dot(&ds) / len_sq
    }

    /// Point of the segment nearest to the given point.
    pub fn closest_point(&self, point: &Point2<f64>) -> Point2<f64> {
        let factor = self.projection_factor(point);
        if factor > 0.0 && factor < 1.0 {
            self.p0() + (self.p1() - self.p0()) * factor
        } else if nalgebra::distance(&self.p0(), point) <= nalgebra::distance(&self.p1(), point) {
            self.p0()
        } else {
            self.p1()
        }
    }

    /// Shortest distance from the point to the segment.
    pub fn distance_to_point(&self, point: &Point2<f64>) -> f64 {
        distance_to_segment(point, &self.p0(), &self.p1())
    }

    /// Shortest distance between the segments, 0 if they intersect.
    pub fn distance_to_segment(&self, other: &Segment) -> f64 {
        distance_between_segments(&self.p0(), &self.p1(), &other.p0(), &other.p1())
    }

    /// Which side of the segment the point is on: 1 left, -1 right, 0 on the line.
    pub fn orientation_index(&self, point: &Point2<f64>) -> i8 {
        Orientation::triplet(&self.p0(), &self.p1(), point).index()
    }

    /// Whether the segments have at least one common point.
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(&self.p0(), &self.p1(), &other.p0(), &other.p1())
    }

    /// Intersection of the infinite lines through the two segments.
    pub fn line_intersection(&self, other: &Segment) -> Result<Point2<f64>> {
        line_intersection(&self.p0(), &self.p1(), &other.p0(), &other.p1()).map_err(|source| {
            GeometryError::NotRepresentable {
                context: format!(
                    "no intersection of lines {:?}-{:?} and {:?}-{:?}",
                    self.p0(),
                    self.p1(),
                    other.p0(),
                    other.p1()
                ),
                source,
            }
        })
    }

    /// Whether both vertices have the same Y.
    pub fn is_horizontal(&self) -> bool {
        self.coordinate(0, 1) == self.coordinate(1, 1)
    }

    /// Whether both vertices have the same X.
    pub fn is_vertical(&self) -> bool {
        self.coordinate(0, 0) == self.coordinate(1, 0)
    }

    /// Whether the vertices are equal in XY.
    pub fn is_zero_length(&self) -> bool {
        self.p0() == self.p1()
    }

    /// Copies the segment into a two vertex line.
    pub fn to_line_string(&self) -> LineString {
        LineString::from_parts(self.factory.clone(), self.coordinates.to_vec())
    }
}

/// Iterator over the segments of a geometry, in part, ring and segment order.
#[derive(Debug, Clone)]
pub struct SegmentIter<'a> {
    factory: &'a Arc<GeometryFactory>,
    sequences: Vec<Sequence<'a>>,
    sequence: usize,
    segment: usize,
}

impl<'a> SegmentIter<'a> {
    pub(crate) fn new(factory: &'a Arc<GeometryFactory>, sequences: Vec<Sequence<'a>>) -> Self {
        Self {
            factory,
            sequences,
            sequence: 0,
            segment: 0,
        }
    }
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let axis_count = self.factory.axis_count();
        loop {
            let sequence = self.sequences.get(self.sequence)?;
            let vertex_count = sequence.vertex_count(axis_count);
            if self.segment + 1 < vertex_count {
                let start = self.segment * axis_count;
                let mut id = sequence.id.clone();
                id.push(self.segment);
                self.segment += 1;

                return Some(Segment {
                    factory: self.factory,
                    id,
                    coordinates: &sequence.coordinates[start..start + 2 * axis_count],
                });
            }

            self.sequence += 1;
            self.segment = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeometryFactory, GeometryOps};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn distance_to_point() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(5.0, 3.0), &a, &b), 3.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(-3.0, 4.0), &a, &b), 5.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(13.0, -4.0), &a, &b), 5.0);
        assert_abs_diff_eq!(distance_to_segment(&Point2::new(3.0, 4.0), &a, &a), 5.0);
    }

    #[test]
    fn intersection_of_segments() {
        let p = |x, y| Point2::new(x, y);
        assert!(segments_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
        assert!(segments_intersect(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
        assert!(segments_intersect(&p(0.0, 0.0), &p(2.0, 0.0), &p(2.0, 0.0), &p(3.0, 5.0)));
        assert!(!segments_intersect(&p(0.0, 0.0), &p(2.0, 0.0), &p(3.0, 0.0), &p(4.0, 0.0)));
        assert!(!segments_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 1.0), &p(1.0, 2.0)));

        assert_abs_diff_eq!(
            distance_between_segments(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 1.0), &p(2.0, 1.0)),
            1.0
        );
    }

    #[test]
    fn homogeneous_line_intersection() {
        let p = |x, y| Point2::new(x, y);
        let intersection =
            line_intersection(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)).unwrap();
        assert_abs_diff_eq!(intersection.x, 1.0);
        assert_abs_diff_eq!(intersection.y, 1.0);

        assert_matches!(
            line_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0)),
            Err(NotRepresentable)
        );
    }

    #[test]
    fn segment_view() {
        let factory = GeometryFactory::floating(0, 2);
        let line = factory
            .line_string(2, &[0.0, 0.0, 4.0, 0.0, 4.0, 3.0])
            .unwrap();
        let segments: Vec<_> = line.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].segment_id(), &[1]);
        assert!(segments[0].is_horizontal());
        assert!(segments[1].is_vertical());
        assert_abs_diff_eq!(segments[1].length(), 3.0);
        assert_abs_diff_eq!(segments[1].angle(), std::f64::consts::FRAC_PI_2);
        assert_eq!(segments[0].mid_point(), Point2::new(2.0, 0.0));
        assert_eq!(segments[0].closest_point(&Point2::new(1.0, 5.0)), Point2::new(1.0, 0.0));
        assert_eq!(segments[0].closest_point(&Point2::new(-1.0, 5.0)), Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(segments[0].projection_factor(&Point2::new(1.0, 5.0)), 0.25);
        assert_eq!(segments[0].orientation_index(&Point2::new(1.0, 5.0)), 1);
        assert_eq!(segments[0].orientation_index(&Point2::new(1.0, -5.0)), -1);
        assert!(segments[0].intersects(&segments[1]));
        assert_abs_diff_eq!(segments[0].distance_to_point(&Point2::new(2.0, -2.0)), 2.0);
        assert_eq!(segments[1].to_line_string().vertex_count(), 2);
    }

    #[test]
    fn parallel_segments_are_not_representable() {
        let factory = GeometryFactory::floating(0, 2);
        let lines = factory
            .multi_line_string(vec![
                factory.line_string(2, &[0.0, 0.0, 1.0, 0.0]).unwrap(),
                factory.line_string(2, &[0.0, 1.0, 1.0, 1.0]).unwrap(),
            ]);
        let segments: Vec<_> = lines.segments().collect();
        assert_matches!(
            segments[0].line_intersection(&segments[1]),
            Err(GeometryError::NotRepresentable { .. })
        );
    }
}
