//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// Computes the unit vector pointing in the given direction.
///
/// # Parameters
/// * `angle` - The direction in degrees, measured from the positive x-axis
///   with positive angles turning toward the positive y-axis.
pub fn unit_from_degrees(angle: f64) -> Vector2d {
    let radians = angle.to_radians();
    Vector2d::new(radians.cos(), radians.sin())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn unit_vectors() {
        let v = unit_from_degrees(0.0);
        assert_approx_eq!(v.x, 1.0);
        assert_approx_eq!(v.y, 0.0);

        let v = unit_from_degrees(90.0);
        assert_approx_eq!(v.x, 0.0);
        assert_approx_eq!(v.y, 1.0);

        // Headings are unnormalized; trigonometry wraps them implicitly.
        let v = unit_from_degrees(450.0);
        assert_approx_eq!(v.x, 0.0);
        assert_approx_eq!(v.y, 1.0);
    }
}
