#![warn(missing_docs)]

//! Math types for the pipework geometry crates.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for pipe geometry: points, vectors, directions, rigid transforms,
//! and tolerance constants.

use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D plane coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Translation by a vector.
    pub fn translation_by(v: &Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Rotation about an axis passing through `center`.
    pub fn rotation_about_point(center: &Point3, axis: &Dir3, angle: f64) -> Self {
        let to_origin = Transform::translation(-center.x, -center.y, -center.z);
        let rot = Transform::rotation_about_axis(axis, angle);
        let back = Transform::translation(center.x, center.y, center.z);
        back.then(&rot).then(&to_origin)
    }

    /// Linear map sending the world X, Y, Z axes to `x`, `y`, `z`.
    ///
    /// The axes are normalized but not orthogonalized; callers pass an
    /// orthonormal frame.
    pub fn from_axes(x: &Dir3, y: &Dir3, z: &Dir3) -> Self {
        let mut m = Matrix4::identity();
        for (col, axis) in [x, y, z].iter().enumerate() {
            m[(0, col)] = axis.as_ref().x;
            m[(1, col)] = axis.as_ref().y;
            m[(2, col)] = axis.as_ref().z;
        }
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to a point applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a unit direction, renormalizing the result.
    pub fn apply_dir(&self, d: &Dir3) -> Dir3 {
        Dir3::new_normalize(self.apply_vec(d.as_ref()))
    }

    /// Determinant of the linear part; negative for mirroring transforms.
    pub fn determinant(&self) -> f64 {
        self.matrix.fixed_view::<3, 3>(0, 0).clone_owned().determinant()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default CAD tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Unsigned angle between two vectors in `[0, π]`.
///
/// Returns 0 when either vector has zero length.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    if a.norm() < 1e-15 || b.norm() < 1e-15 {
        return 0.0;
    }
    a.angle(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation_by(&Vec3::new(10.0, 20.0, 30.0));
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
        // Vectors ignore translation
        let v = t.apply_vec(&Vec3::x());
        assert!((v - Vec3::x()).norm() < 1e-12);
    }

    #[test]
    fn test_compose_applies_right_first() {
        let t1 = Transform::translation(1.0, 0.0, 0.0);
        let r = Transform::rotation_about_axis(&Vec3::z_axis(), PI / 2.0);
        // translate (0,0,0) -> (1,0,0), then rotate -> (0,1,0)
        let composed = r.then(&t1);
        let result = composed.apply_point(&Point3::origin());
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_axis() {
        // Rotate (1,0,0) by 90° about Z axis → (0,1,0)
        let axis = Dir3::new_normalize(Vec3::z());
        let t = Transform::rotation_about_axis(&axis, PI / 2.0);
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
        assert!(result.z.abs() < 1e-12);

        // 180° about (1,1,0) swaps x and y
        let axis2 = Dir3::new_normalize(Vec3::new(1.0, 1.0, 0.0));
        let t2 = Transform::rotation_about_axis(&axis2, PI);
        let r2 = t2.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(r2.x.abs() < 1e-12);
        assert!((r2.y - 1.0).abs() < 1e-12);
        assert!(r2.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_point_keeps_center() {
        let center = Point3::new(5.0, 5.0, 0.0);
        let t = Transform::rotation_about_point(&center, &Vec3::z_axis(), PI / 2.0);
        assert!((t.apply_point(&center) - center).norm() < 1e-12);
        // (6,5,0) is one unit along +X from the center → ends one unit along +Y
        let p = t.apply_point(&Point3::new(6.0, 5.0, 0.0));
        assert!((p - Point3::new(5.0, 6.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_from_axes() {
        let t = Transform::from_axes(&Vec3::y_axis(), &Vec3::z_axis(), &Vec3::x_axis());
        let z = t.apply_vec(&Vec3::z());
        assert!((z - Vec3::x()).norm() < 1e-12);
        assert!((t.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 1), 3.1);
        assert_eq!(round_to(0.04, 1), 0.0);
        assert_eq!(round_to(1.25, 0), 1.0);
    }

    #[test]
    fn test_angle_between() {
        assert!((angle_between(&Vec3::x(), &Vec3::y()) - PI / 2.0).abs() < 1e-12);
        assert!((angle_between(&Vec3::x(), &-Vec3::x()) - PI).abs() < 1e-12);
        assert_eq!(angle_between(&Vec3::zeros(), &Vec3::x()), 0.0);
    }
}
