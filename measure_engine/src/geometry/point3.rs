//! World-space point type used by the measurement kernel.

use std::ops::Sub;

/// Representation of a 3D point in scene world space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product treating both points as vectors from the origin.
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Largest absolute coordinate.
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Length of the vector from the origin to this point.
    ///
    /// Coordinates are scaled by the largest component first, so the
    /// squares neither overflow for huge vectors nor underflow for tiny ones.
    pub fn length(self) -> f64 {
        let m = self.max_abs();
        if m == 0.0 || !m.is_finite() {
            return m;
        }
        let s = Point3::new(self.x / m, self.y / m, self.z / m);
        m * s.dot(s).sqrt()
    }

    /// Unit vector in the same direction, `None` if every coordinate is zero.
    pub fn normalized(self) -> Option<Point3> {
        let m = self.max_abs();
        if m == 0.0 {
            return None;
        }
        let s = Point3::new(self.x / m, self.y / m, self.z / m);
        let len = s.dot(s).sqrt();
        Some(Point3::new(s.x / len, s.y / len, s.z / len))
    }

    /// Returns `true` when no coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_and_length() {
        let v = Point3::new(4.0, 6.0, 3.0) - Point3::new(1.0, 2.0, 3.0);
        assert_eq!(v, Point3::new(3.0, 4.0, 0.0));
        assert!((v.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn length_of_extreme_vectors() {
        let big = Point3::new(3e200, 4e200, 0.0);
        assert!((big.length() / 5e200 - 1.0).abs() < 1e-12);
        let tiny = Point3::new(3e-200, 4e-200, 0.0);
        assert!((tiny.length() / 5e-200 - 1.0).abs() < 1e-12);
        assert_eq!(Point3::new(0.0, 0.0, 0.0).length(), 0.0);
    }

    #[test]
    fn normalized_vectors() {
        let u = Point3::new(0.0, 1e-300, 0.0).normalized().unwrap();
        assert_eq!(u, Point3::new(0.0, 1.0, 0.0));
        assert!(Point3::new(0.0, 0.0, 0.0).normalized().is_none());
    }

    #[test]
    fn finite_check() {
        assert!(Point3::new(1.0, -2.0, 0.0).is_finite());
        assert!(!Point3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3::new(0.0, 0.0, f64::INFINITY).is_finite());
    }
}
