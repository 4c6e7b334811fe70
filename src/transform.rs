//! 3D point transforms for wireframe rendering
//!
//! Rotation angles come from the CORDIC engine, never from libm, so the
//! rendered output matches what a fixed-point target would produce.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::cordic::sin_cos_degrees;

/// 3D point.
///
/// The same type carries both 3D state and, after [`Point3::project`],
/// projected 2D display state: projection forces z to 0 and leaves x/y in
/// display units. Snapshot the point before projecting if you still need
/// the 3D value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply all three coordinates by `factor`
    pub fn scale(self, factor: f64) -> Point3 {
        Point3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Add `offset` component-wise
    pub fn shift(self, offset: Point3) -> Point3 {
        Point3 {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }

    /// Shift as the original firmware did it: z takes the offset's x
    /// component. Kept for pixel parity with reference renders; new code
    /// wants [`Point3::shift`].
    pub fn shift_legacy(self, offset: Point3) -> Point3 {
        Point3 {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.x,
        }
    }

    /// Rotate by the view angles (degrees, one per axis).
    ///
    /// Axis order is Z, then X, then Y. The order is not commutative with
    /// other choices and is fixed for visual parity with the original
    /// renderer.
    pub fn rotate(self, view: Point3) -> Point3 {
        let (sinx, cosx) = sin_cos_degrees(view.x);
        let (siny, cosy) = sin_cos_degrees(view.y);
        let (sinz, cosz) = sin_cos_degrees(view.z);

        // Rotation around axis Z
        let x1 = self.x * cosz + self.y * sinz;
        let y1 = -self.x * sinz + self.y * cosz;
        let z1 = self.z;

        // Rotation around axis X
        let x = x1;
        let y = y1 * cosx + z1 * sinx;
        let z = -y1 * sinx + z1 * cosx;

        // Rotation around axis Y
        Point3 {
            x: x * cosy - z * siny,
            y,
            z: x * siny + z * cosy,
        }
    }

    /// Oblique projection to display coordinates with scale and offset.
    ///
    /// `x' = (x + z/2)*scale + ox`, `y' = (y - z/2)*scale + oy`, z = 0.
    /// Cheaper than a pinhole projection: no division.
    pub fn project(self, scale: f64, offset_x: i32, offset_y: i32) -> Point3 {
        Point3 {
            x: (self.x + self.z / 2.0) * scale + offset_x as f64,
            y: (self.y - self.z / 2.0) * scale + offset_y as f64,
            z: 0.0,
        }
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, other: Point3) -> Point3 {
        self.shift(other)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, other: Point3) -> Point3 {
        Point3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    fn mul(self, s: f64) -> Point3 {
        self.scale(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-4;

    fn assert_point_eq(a: Point3, b: Point3, eps: f64) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
        assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
        assert_abs_diff_eq!(a.z, b.z, epsilon = eps);
    }

    #[test]
    fn test_rotate_identity_view() {
        let p = Point3::new(0.3, -1.2, 2.5);
        assert_point_eq(p.rotate(Point3::ZERO), p, EPS);
    }

    #[test]
    fn test_rotate_z_90() {
        // 90 degrees about Z maps +x onto -y (left-handed screen convention)
        let p = Point3::new(1.0, 0.0, 0.0).rotate(Point3::new(0.0, 0.0, 90.0));
        assert_point_eq(p, Point3::new(0.0, -1.0, 0.0), EPS);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let p = Point3::new(0.5, 0.5, 0.5);
        let r = p.rotate(Point3::new(30.0, -45.0, 60.0));
        let len2 = |q: Point3| q.x * q.x + q.y * q.y + q.z * q.z;
        assert_abs_diff_eq!(len2(r), len2(p), epsilon = EPS);
    }

    #[test]
    fn test_scale_unit_factor_is_identity() {
        let p = Point3::new(1.25, -0.5, 3.0);
        assert_point_eq(p.scale(1.0), p, 0.0);
    }

    #[test]
    fn test_project_origin() {
        let p = Point3::ZERO.project(1.0, 0, 0);
        assert_point_eq(p, Point3::ZERO, 0.0);
    }

    #[test]
    fn test_project_forces_z_to_zero() {
        let p = Point3::new(1.0, 2.0, 4.0).project(2.0, 10, 20);
        assert_abs_diff_eq!(p.x, (1.0 + 2.0) * 2.0 + 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, (2.0 - 2.0) * 2.0 + 20.0, epsilon = 1e-12);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_shift_legacy_takes_x_for_z() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let off = Point3::new(2.0, 3.0, 4.0);
        let shifted = p.shift_legacy(off);
        assert_eq!(shifted, Point3::new(3.0, 4.0, 3.0));
        // and the corrected shift is component-wise
        assert_eq!(p.shift(off), Point3::new(3.0, 4.0, 5.0));
    }
}
