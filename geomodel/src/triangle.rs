use nalgebra::{Point2, Vector2};

use crate::error::{GeometryError, Result};
use crate::orient::Orientation;
use crate::segment::line_intersection;

/// Three points in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point2<f64>,
    /// Second vertex.
    pub b: Point2<f64>,
    /// Third vertex.
    pub c: Point2<f64>,
}

impl Triangle {
    /// Creates a new triangle.
    pub fn new(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        Self { a, b, c }
    }

    /// Signed area, positive if the vertices are in counterclockwise order.
    pub fn signed_area(&self) -> f64 {
        ((self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.c.x - self.a.x) * (self.b.y - self.a.y))
            / 2.0
    }

    /// Area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the point is inside the triangle or on its edges.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let o1 = Orientation::triplet(&self.a, &self.b, point).index();
        let o2 = Orientation::triplet(&self.b, &self.c, point).index();
        let o3 = Orientation::triplet(&self.c, &self.a, point).index();

        let has_left = o1 > 0 || o2 > 0 || o3 > 0;
        let has_right = o1 < 0 || o2 < 0 || o3 < 0;
        !(has_left && has_right)
    }

    /// Centre of the circle through all three vertices, the intersection of the perpendicular
    /// bisectors of two edges. Fails for collinear vertices.
    pub fn circumcentre(&self) -> Result<Point2<f64>> {
        let (ab1, ab2) = perpendicular_bisector(&self.a, &self.b);
        let (bc1, bc2) = perpendicular_bisector(&self.b, &self.c);

        line_intersection(&ab1, &ab2, &bc1, &bc2).map_err(|source| {
            GeometryError::NotRepresentable {
                context: format!(
                    "no circumcentre for triangle {:?}, {:?}, {:?}",
                    self.a, self.b, self.c
                ),
                source,
            }
        })
    }
}

fn perpendicular_bisector(p: &Point2<f64>, q: &Point2<f64>) -> (Point2<f64>, Point2<f64>) {
    let mid = nalgebra::center(p, q);
    let d = q - p;
    (mid, mid + Vector2::new(-d.y, d.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn area_and_orientation() {
        let triangle = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        );
        assert_abs_diff_eq!(triangle.signed_area(), 6.0);
        let reversed = Triangle::new(triangle.c, triangle.b, triangle.a);
        assert_abs_diff_eq!(reversed.signed_area(), -6.0);
        assert_abs_diff_eq!(reversed.area(), 6.0);
    }

    #[test]
    fn contains() {
        let triangle = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        assert!(triangle.contains(&Point2::new(1.0, 1.0)));
        assert!(triangle.contains(&Point2::new(2.0, 2.0)));
        assert!(!triangle.contains(&Point2::new(3.0, 3.0)));
    }

    #[test]
    fn circumcentre() {
        let triangle = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let centre = triangle.circumcentre().unwrap();
        assert_abs_diff_eq!(centre.x, 2.0);
        assert_abs_diff_eq!(centre.y, 2.0);

        let flat = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert_matches!(
            flat.circumcentre(),
            Err(GeometryError::NotRepresentable { .. })
        );
    }
}
