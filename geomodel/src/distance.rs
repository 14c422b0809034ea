//! Brute force distance between geometries of any kind.

use nalgebra::Point2;

use crate::geometry::GeometryOps;
use crate::geometry_type::{Dimension, Location};
use crate::segment::{distance_between_segments, distance_to_segment};

/// Isolated point or segment of a geometry.
#[derive(Debug, Clone, Copy)]
enum Element {
    Point(Point2<f64>),
    Segment(Point2<f64>, Point2<f64>),
}

impl Element {
    fn distance(&self, other: &Element) -> f64 {
        match (self, other) {
            (Element::Point(a), Element::Point(b)) => nalgebra::distance(a, b),
            (Element::Point(p), Element::Segment(a, b))
            | (Element::Segment(a, b), Element::Point(p)) => distance_to_segment(p, a, b),
            (Element::Segment(a1, a2), Element::Segment(b1, b2)) => {
                distance_between_segments(a1, a2, b1, b2)
            }
        }
    }
}

fn elements<G: GeometryOps + ?Sized>(geometry: &G) -> Vec<Element> {
    let axis_count = geometry.axis_count();
    let mut elements = vec![];
    for sequence in geometry.vertices().into_sequences() {
        let vertex_count = sequence.vertex_count(axis_count);
        if vertex_count == 1 {
            elements.push(Element::Point(sequence.xy(axis_count, 0)));
        }
        for i in 1..vertex_count {
            elements.push(Element::Segment(
                sequence.xy(axis_count, i - 1),
                sequence.xy(axis_count, i),
            ));
        }
    }
    elements
}

fn covers_vertex_of<A, B>(surface: &A, other: &B) -> bool
where
    A: GeometryOps + ?Sized,
    B: GeometryOps + ?Sized,
{
    surface.dimension() == Dimension::Surface
        && other
            .vertices()
            .any(|vertex| surface.locate_xy(vertex.x(), vertex.y()) != Location::Exterior)
}

/// Minimum distance between two geometries. 0 if either is empty, if a surface contains a
/// vertex of the other geometry, or if any elements touch.
pub(crate) fn distance<A, B>(a: &A, b: &B, terminate_distance: f64) -> f64
where
    A: GeometryOps + ?Sized,
    B: GeometryOps + ?Sized,
{
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if covers_vertex_of(a, b) || covers_vertex_of(b, a) {
        return 0.0;
    }

    let elements_a = elements(a);
    let elements_b = elements(b);
    let mut min = f64::MAX;
    for element_a in &elements_a {
        for element_b in &elements_b {
            let distance = element_a.distance(element_b);
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

#[cfg(test)]
mod tests {
    use crate::{Geometry, GeometryFactory, GeometryOps};
    use approx::assert_abs_diff_eq;

    #[test]
    fn point_to_line() {
        let factory = GeometryFactory::floating(0, 2);
        let line = factory.line_string(2, &[0.0, 0.0, 10.0, 0.0]).unwrap();
        let point: Geometry = factory.point_xy(5.0, 3.0).into();
        assert_abs_diff_eq!(line.distance(&point, 0.0), 3.0);
        assert_abs_diff_eq!(point.distance(&line.to_geometry(), 0.0), 3.0);
    }

    #[test]
    fn contained_geometry_has_zero_distance() {
        let factory = GeometryFactory::floating(0, 2);
        let polygon = factory
            .polygon_from_coordinates(2, &[&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0]])
            .unwrap();
        let inner: Geometry = factory
            .line_string(2, &[2.0, 2.0, 3.0, 3.0])
            .unwrap()
            .into();
        assert_eq!(polygon.distance(&inner, 0.0), 0.0);
        assert_eq!(inner.distance(&polygon.to_geometry(), 0.0), 0.0);

        let outside: Geometry = factory.point_xy(13.0, 14.0).into();
        assert_abs_diff_eq!(polygon.distance(&outside, 0.0), 5.0);
    }

    #[test]
    fn terminate_distance_stops_early() {
        let factory = GeometryFactory::floating(0, 2);
        let points = factory
            .multi_point_coordinates(2, &[0.0, 5.0, 0.0, 1.0])
            .unwrap();
        let origin: Geometry = factory.point_xy(0.0, 0.0).into();
        assert_abs_diff_eq!(points.distance(&origin, 0.0), 1.0);
        assert_abs_diff_eq!(points.distance(&origin, 10.0), 5.0);
        assert_eq!(points.distance(&factory.point_empty().into(), 0.0), 0.0);
    }
}
