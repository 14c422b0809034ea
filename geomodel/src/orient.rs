use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of the turn `p -> q -> r`.
    ///
    /// Coordinates that produce a NaN determinant are treated as collinear.
    pub fn triplet(p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>) -> Self {
        let det = (q.x - p.x) * (r.y - q.y) - (q.y - p.y) * (r.x - q.x);
        if det > 0.0 {
            Self::Counterclockwise
        } else if det < 0.0 {
            Self::Clockwise
        } else {
            Self::Collinear
        }
    }

    /// Signed index of the orientation: 1 for a left turn, -1 for a right turn, 0 for collinear.
    pub fn index(&self) -> i8 {
        match self {
            Self::Counterclockwise => 1,
            Self::Clockwise => -1,
            Self::Collinear => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplet() {
        let p = Point2::new(0.0, 0.0);
        let q = Point2::new(1.0, 0.0);
        assert_eq!(
            Orientation::triplet(&p, &q, &Point2::new(1.0, 1.0)),
            Orientation::Counterclockwise
        );
        assert_eq!(
            Orientation::triplet(&p, &q, &Point2::new(1.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            Orientation::triplet(&p, &q, &Point2::new(2.0, 0.0)),
            Orientation::Collinear
        );
        assert_eq!(
            Orientation::triplet(&p, &q, &Point2::new(f64::NAN, 0.0)),
            Orientation::Collinear
        );
    }
}
