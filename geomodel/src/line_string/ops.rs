use std::cmp::Ordering;

use nalgebra::Point2;

use crate::factory::{AXIS_M, AXIS_X, AXIS_Y, AXIS_Z};
use crate::geometry::GeometryOps;
use crate::geometry_type::{ClockDirection, Location};
use crate::orient::Orientation;
use crate::point::Point;
use crate::segment::{
    distance_between_segments, distance_to_segment, is_on_segment, segments_intersect,
};

/// Algorithms shared by [`LineString`](crate::LineString) and [`LinearRing`](crate::LinearRing).
///
/// Implementors only provide the flat coordinate storage; everything else is derived from it.
pub trait LineStringOps: GeometryOps {
    /// Flat, row-major coordinates: `axis_count` values per vertex.
    fn coordinates(&self) -> &[f64];

    /// Value of the axis of the vertex, NaN if either is out of range.
    fn coordinate(&self, vertex: usize, axis: usize) -> f64 {
        let axis_count = self.axis_count();
        if axis < axis_count {
            self.coordinates()
                .get(vertex * axis_count + axis)
                .copied()
                .unwrap_or(f64::NAN)
        } else {
            f64::NAN
        }
    }

    /// X of the vertex.
    fn x(&self, vertex: usize) -> f64 {
        self.coordinate(vertex, AXIS_X)
    }

    /// Y of the vertex.
    fn y(&self, vertex: usize) -> f64 {
        self.coordinate(vertex, AXIS_Y)
    }

    /// Z of the vertex.
    fn z(&self, vertex: usize) -> f64 {
        self.coordinate(vertex, AXIS_Z)
    }

    /// M of the vertex.
    fn m(&self, vertex: usize) -> f64 {
        self.coordinate(vertex, AXIS_M)
    }

    /// X and Y of the vertex.
    fn xy(&self, vertex: usize) -> Point2<f64> {
        Point2::new(self.x(vertex), self.y(vertex))
    }

    /// Copies the vertex into a point, empty if the index is out of range.
    fn point(&self, vertex: usize) -> Point {
        let axis_count = self.axis_count();
        let start = vertex * axis_count;
        let coordinates = self
            .coordinates()
            .get(start..start + axis_count)
            .map(<[f64]>::to_vec)
            .unwrap_or_default();
        Point::from_parts(self.factory().clone(), coordinates)
    }

    /// First vertex.
    fn from_point(&self) -> Point {
        self.point(0)
    }

    /// Last vertex.
    fn to_point(&self) -> Point {
        self.point(self.vertex_count().saturating_sub(1))
    }

    /// Whether the first and last vertices are equal in X and Y.
    fn is_closed(&self) -> bool {
        let vertex_count = self.vertex_count();
        vertex_count > 1 && self.equals_vertex_2d(0, vertex_count - 1)
    }

    /// Whether two vertices of the line have the same X and Y.
    fn equals_vertex_2d(&self, vertex1: usize, vertex2: usize) -> bool {
        self.x(vertex1) == self.x(vertex2) && self.y(vertex1) == self.y(vertex2)
    }

    /// Whether the first `axis_count` values of a vertex of this line equal a vertex of `other`.
    /// Two NaN values are considered equal.
    fn equals_vertex<L: LineStringOps + ?Sized>(
        &self,
        axis_count: usize,
        vertex: usize,
        other: &L,
        other_vertex: usize,
    ) -> bool {
        (0..axis_count).all(|axis| {
            let a = self.coordinate(vertex, axis);
            let b = other.coordinate(other_vertex, axis);
            a == b || (a.is_nan() && b.is_nan())
        })
    }

    /// Whether both lines have the same vertices in the XY plane, compared with a tolerance.
    fn equals_exact_vertices<L: LineStringOps + ?Sized>(&self, other: &L, tolerance: f64) -> bool {
        let vertex_count = self.vertex_count();
        if vertex_count != other.vertex_count() {
            return false;
        }

        (0..vertex_count).all(|i| {
            if tolerance == 0.0 {
                self.equals_vertex(2, i, other, i)
            } else {
                nalgebra::distance(&self.xy(i), &other.xy(i)) <= tolerance
            }
        })
    }

    /// Compares vertices pairwise (X then Y); if one line is a prefix of the other, the shorter
    /// line is smaller.
    fn compare_vertices<L: LineStringOps + ?Sized>(&self, other: &L) -> Ordering {
        let count = self.vertex_count().min(other.vertex_count());
        for i in 0..count {
            let ordering = self
                .x(i)
                .total_cmp(&other.x(i))
                .then_with(|| self.y(i).total_cmp(&other.y(i)));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        self.vertex_count().cmp(&other.vertex_count())
    }

    /// Length in metres: geodesic for geographic coordinate systems, planar length otherwise.
    fn length_metres(&self) -> f64 {
        match self.factory().coordinate_system() {
            Some(cs) if cs.is_geographic() => {
                let datum = cs.datum();
                (1..self.vertex_count())
                    .map(|i| {
                        datum.distance_metres(self.x(i - 1), self.y(i - 1), self.x(i), self.y(i))
                    })
                    .sum()
            }
            _ => self.length(),
        }
    }

    /// Area enclosed by the vertices (shoelace formula), positive for counterclockwise order.
    ///
    /// X values are taken relative to the first vertex to keep precision for large coordinates.
    fn signed_area(&self) -> f64 {
        let vertex_count = self.vertex_count();
        if vertex_count < 3 {
            return 0.0;
        }

        let x0 = self.x(0);
        let mut sum = 0.0;
        for i in 1..vertex_count - 1 {
            let x = self.x(i) - x0;
            sum += x * (self.y(i + 1) - self.y(i - 1));
        }
        sum / 2.0
    }

    /// Absolute area enclosed by the vertices.
    fn polygon_area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Traversal direction of a closed line.
    ///
    /// The highest vertex (first one on ties) and its distinct neighbours determine the
    /// direction. Collinear neighbours are resolved by their X order, and rings without three
    /// distinct vertices are reported as clockwise.
    fn clock_direction(&self) -> ClockDirection {
        let vertex_count = self.vertex_count();
        if vertex_count < 3 {
            return ClockDirection::Clockwise;
        }
        let point_count = vertex_count - 1;

        let mut hi_index = 0;
        for i in 1..=point_count {
            if self.y(i) > self.y(hi_index) {
                hi_index = i;
            }
        }
        let hi = self.xy(hi_index);

        let mut prev = hi_index;
        loop {
            prev = if prev == 0 { point_count } else { prev - 1 };
            if self.xy(prev) != hi || prev == hi_index {
                break;
            }
        }

        let mut next = hi_index;
        loop {
            next = (next + 1) % point_count;
            if self.xy(next) != hi || next == hi_index {
                break;
            }
        }

        if self.xy(prev) == hi || self.xy(next) == hi || self.equals_vertex_2d(prev, next) {
            return ClockDirection::Clockwise;
        }

        let counter_clockwise = match Orientation::triplet(&self.xy(prev), &hi, &self.xy(next)) {
            Orientation::Collinear => self.x(prev) > self.x(next),
            Orientation::Counterclockwise => true,
            Orientation::Clockwise => false,
        };

        if counter_clockwise {
            ClockDirection::CounterClockwise
        } else {
            ClockDirection::Clockwise
        }
    }

    /// Whether [`LineStringOps::clock_direction`] is counterclockwise.
    fn is_counter_clockwise(&self) -> bool {
        self.clock_direction() == ClockDirection::CounterClockwise
    }

    /// Whether [`LineStringOps::clock_direction`] is clockwise.
    fn is_clockwise(&self) -> bool {
        self.clock_direction() == ClockDirection::Clockwise
    }

    /// Minimum distance from the point to any segment.
    ///
    /// Stops as soon as a distance `<= terminate_distance` is found. 0 if either is empty.
    fn distance_to_point(&self, point: &Point, terminate_distance: f64) -> f64 {
        if self.is_empty() || point.is_empty() {
            return 0.0;
        }

        let p = point.xy();
        if self.vertex_count() == 1 {
            return nalgebra::distance(&self.xy(0), &p);
        }

        let mut min = f64::MAX;
        for i in 1..self.vertex_count() {
            let distance = distance_to_segment(&p, &self.xy(i - 1), &self.xy(i));
            if distance < min {
                min = distance;
                if min <= terminate_distance {
                    return min;
                }
            }
        }
        min
    }

    /// Minimum distance between any two segments of the lines.
    ///
    /// Stops as soon as a distance `<= terminate_distance` is found. 0 if either is empty.
    fn distance_to_line<L: LineStringOps + ?Sized>(
        &self,
        other: &L,
        terminate_distance: f64,
    ) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let mut min = f64::MAX;
        for i in 1..self.vertex_count() {
            let p1 = self.xy(i - 1);
            let p2 = self.xy(i);
            for j in 1..other.vertex_count() {
                let distance = distance_between_segments(&p1, &p2, &other.xy(j - 1), &other.xy(j));
                if distance < min {
                    min = distance;
                    if min <= terminate_distance {
                        return min;
                    }
                }
            }
        }
        min
    }

    /// Whether the point is a vertex of the line or lies on one of its segments.
    fn is_on_line(&self, x: f64, y: f64) -> bool {
        let p = Point2::new(x, y);
        (1..self.vertex_count()).any(|i| is_on_segment(&p, &self.xy(i - 1), &self.xy(i)))
    }

    /// Location of the point relative to the line: the end points of an open line are its
    /// boundary, any other point on the line is interior.
    fn locate_on_line(&self, x: f64, y: f64) -> Location {
        if self.is_empty() {
            return Location::Exterior;
        }

        if !self.is_closed() {
            let last = self.vertex_count() - 1;
            if (self.x(0) == x && self.y(0) == y) || (self.x(last) == x && self.y(last) == y) {
                return Location::Boundary;
            }
        }

        if self.is_on_line(x, y) {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Location of the point relative to the area enclosed by the ring, using ray crossing.
    fn locate_in_ring(&self, x: f64, y: f64) -> Location {
        let p = Point2::new(x, y);
        let mut crossings = 0;

        for i in 1..self.vertex_count() {
            let p1 = self.xy(i - 1);
            let p2 = self.xy(i);

            if p1.x < x && p2.x < x {
                continue;
            }
            if p == p2 {
                return Location::Boundary;
            }
            if p1.y == y && p2.y == y {
                if p1.x.min(p2.x) <= x && x <= p1.x.max(p2.x) {
                    return Location::Boundary;
                }
                continue;
            }
            if (p1.y > y && p2.y <= y) || (p2.y > y && p1.y <= y) {
                let mut orientation = Orientation::triplet(&p1, &p2, &p).index();
                if orientation == 0 {
                    return Location::Boundary;
                }
                if p2.y < p1.y {
                    orientation = -orientation;
                }
                if orientation > 0 {
                    crossings += 1;
                }
            }
        }

        if crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Whether no two non-adjacent segments intersect. The first and last segments of a closed
    /// line may share their end point.
    fn is_simple(&self) -> bool {
        let segment_count = self.vertex_count().saturating_sub(1);
        let closed = self.is_closed();

        for i in 0..segment_count {
            let (a1, a2) = (self.xy(i), self.xy(i + 1));
            for j in i + 1..segment_count {
                let (b1, b2) = (self.xy(j), self.xy(j + 1));
                if j == i + 1 {
                    // adjacent segments may only share the common vertex
                    if (is_on_segment(&b2, &a1, &a2) && b2 != a2)
                        || (is_on_segment(&a1, &b1, &b2) && a1 != b1)
                    {
                        return false;
                    }
                    continue;
                }

                let touching_ends = closed && i == 0 && j == segment_count - 1;
                if touching_ends {
                    if is_on_segment(&b1, &a1, &a2) || is_on_segment(&a2, &b1, &b2) {
                        return false;
                    }
                    continue;
                }

                if segments_intersect(&a1, &a2, &b1, &b2) {
                    return false;
                }
            }
        }
        true
    }
}
