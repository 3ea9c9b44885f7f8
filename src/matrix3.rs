//! 3×3 matrices stored as named basis-vector columns.
//!
//! [`Matrix3`] is the orientation-and-scale half of a
//! [`Transform`](crate::Transform). Rather than a row/column-indexed grid it
//! stores three named [`Vector3`] columns — `right`, `up`, and `back` — the
//! local coordinate frame of whatever the matrix orients. Memory layout is
//! therefore column-major, which is exactly what the GPU expects when the
//! matrix is uploaded as part of a uniform.
//!
//! # Orthonormality is a convention, not an invariant
//!
//! A `Matrix3` can hold any linear map: rotations, scales, shears, or any
//! product of them. Nothing in the type keeps the columns unit-length or
//! perpendicular. Operations whose names mention rotation
//! ([`Matrix3::invert_rotation`]) are only correct when the matrix really is
//! a pure rotation; calling them on anything else silently produces a wrong
//! but well-defined result. Use [`Matrix3::orthonormalize`] to repair a
//! frame that has drifted.
//!
//! # Example
//!
//! ```
//! use vantage::{Matrix3, Vector3};
//!
//! let yaw = Matrix3::from_rotation_y(90.0);
//! // Rotating +Z (back) a quarter turn about Y lands on +X (right).
//! assert_eq!(yaw * Vector3::Z, Vector3::X);
//! ```

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::vector3::{EQ_TOLERANCE, Vector3};

/// A 3×3 matrix of `f32`, stored as three `right`/`up`/`back` columns.
///
/// Equality (`==`) is approximate, componentwise within `1e-5`, matching
/// [`Vector3`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Matrix3 {
    /// First column: the local +X direction.
    pub right: Vector3,
    /// Second column: the local +Y direction.
    pub up: Vector3,
    /// Third column: the local +Z direction (out of the screen, toward the
    /// viewer in the right-handed convention used throughout the crate).
    pub back: Vector3,
}

impl Matrix3 {
    pub const IDENTITY: Self = Self {
        right: Vector3::X,
        up: Vector3::Y,
        back: Vector3::Z,
    };

    pub const ZERO: Self = Self {
        right: Vector3::ZERO,
        up: Vector3::ZERO,
        back: Vector3::ZERO,
    };

    /// Create a matrix from its 9 elements in column-major order:
    /// the `right` column first, then `up`, then `back`.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        rx: f32,
        ry: f32,
        rz: f32,
        ux: f32,
        uy: f32,
        uz: f32,
        bx: f32,
        by: f32,
        bz: f32,
    ) -> Self {
        Self {
            right: Vector3::new(rx, ry, rz),
            up: Vector3::new(ux, uy, uz),
            back: Vector3::new(bx, by, bz),
        }
    }

    /// Create a matrix from three explicit columns.
    pub const fn from_columns(right: Vector3, up: Vector3, back: Vector3) -> Self {
        Self { right, up, back }
    }

    /// Create a matrix from `up` and `back`, computing `right = up × back`.
    ///
    /// With `make_orthonormal` the result is run through
    /// [`orthonormalize`](Self::orthonormalize), so `back`'s direction wins
    /// and the other two columns are re-derived from it.
    pub fn from_up_back(up: Vector3, back: Vector3, make_orthonormal: bool) -> Self {
        let mut m = Self::from_columns(up.cross(back), up, back);
        if make_orthonormal {
            m.orthonormalize();
        }
        m
    }

    /// Create a uniform scale matrix.
    pub fn from_scale(scale: f32) -> Self {
        Self::from_nonuniform_scale(scale, scale, scale)
    }

    /// Create a non-uniform scale matrix.
    pub fn from_nonuniform_scale(scale_x: f32, scale_y: f32, scale_z: f32) -> Self {
        let mut m = Self::ZERO;
        m.right.x = scale_x;
        m.up.y = scale_y;
        m.back.z = scale_z;
        m
    }

    /// Create a matrix that shears X by the given factors of Y and Z.
    pub fn from_shear_x_by_yz(shear_y: f32, shear_z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.up.x = shear_y;
        m.back.x = shear_z;
        m
    }

    /// Create a matrix that shears Y by the given factors of X and Z.
    pub fn from_shear_y_by_xz(shear_x: f32, shear_z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.right.y = shear_x;
        m.back.y = shear_z;
        m
    }

    /// Create a matrix that shears Z by the given factors of X and Y.
    pub fn from_shear_z_by_xy(shear_x: f32, shear_y: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.right.z = shear_x;
        m.up.z = shear_y;
        m
    }

    /// Create a rotation of `angle_degrees` about the X axis (right-handed).
    pub fn from_rotation_x(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let mut m = Self::IDENTITY;
        m.up.y = cos;
        m.up.z = sin;
        m.back.y = -sin;
        m.back.z = cos;
        m
    }

    /// Create a rotation of `angle_degrees` about the Y axis (right-handed).
    pub fn from_rotation_y(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let mut m = Self::IDENTITY;
        m.right.x = cos;
        m.right.z = -sin;
        m.back.x = sin;
        m.back.z = cos;
        m
    }

    /// Create a rotation of `angle_degrees` about the Z axis (right-handed).
    pub fn from_rotation_z(angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let mut m = Self::IDENTITY;
        m.right.x = cos;
        m.right.y = sin;
        m.up.x = -sin;
        m.up.y = cos;
        m
    }

    /// Create a rotation of `angle_degrees` about an arbitrary axis, using
    /// Rodrigues' rotation formula.
    ///
    /// The axis is normalized internally, so it need not be unit length — but
    /// a zero-length axis degenerates to NaN like any other normalization of
    /// zero.
    pub fn from_angle_axis(angle_degrees: f32, axis: Vector3) -> Self {
        let mut a = axis;
        a.normalize();
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let t = 1.0 - cos;
        Self::new(
            a.x * a.x * t + cos,
            a.x * a.y * t + a.z * sin,
            a.x * a.z * t - a.y * sin,
            a.x * a.y * t - a.z * sin,
            a.y * a.y * t + cos,
            a.y * a.z * t + a.x * sin,
            a.x * a.z * t + a.y * sin,
            a.y * a.z * t - a.x * sin,
            a.z * a.z * t + cos,
        )
    }

    /// Reset to the identity matrix.
    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Reset to the all-zero matrix.
    pub fn set_to_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// The elements as a column-major `[f32; 9]` slice: rx, ry, rz, ux, …
    ///
    /// This is the layout GPU APIs expect for a `mat3` uniform.
    pub fn data(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    /// The forward direction: the negation of the `back` column.
    pub fn forward(&self) -> Vector3 {
        -self.back
    }

    /// Set the `back` column to the negation of `forward`.
    pub fn set_forward(&mut self, forward: Vector3) {
        self.back = -forward;
    }

    /// Make the three columns unit length and mutually perpendicular.
    ///
    /// `back` is treated as the authoritative direction and only normalized;
    /// `right` is re-derived as `normalize(up × back)` and `up` as
    /// `normalize(back × right)`. So when the columns disagree, `back` wins,
    /// `up` is adjusted, and `right` is derived last.
    pub fn orthonormalize(&mut self) {
        self.back.normalize();
        self.right = self.up.cross(self.back);
        self.right.normalize();
        self.up = self.back.cross(self.right);
        self.up.normalize();
    }

    /// Invert this matrix in place, assuming it is a pure rotation.
    ///
    /// For an orthonormal matrix the inverse is the transpose, so this is a
    /// handful of swaps. If the matrix carries any scale or shear the result
    /// is simply the transpose — defined, but not the inverse.
    pub fn invert_rotation(&mut self) {
        self.transpose();
    }

    /// Invert this matrix in place, using the general closed-form adjugate.
    ///
    /// A matrix with determinant exactly 0 has no inverse; in that case the
    /// matrix is left unchanged.
    pub fn invert(&mut self) {
        let d = self.determinant();
        if d == 0.0 {
            return;
        }
        let (r, u, b) = (self.right, self.up, self.back);
        self.right.x = (u.y * b.z - b.y * u.z) / d;
        self.right.y = (r.z * b.y - r.y * b.z) / d;
        self.right.z = (r.y * u.z - r.z * u.y) / d;
        self.up.x = (u.z * b.x - u.x * b.z) / d;
        self.up.y = (r.x * b.z - r.z * b.x) / d;
        self.up.z = (u.x * r.z - r.x * u.z) / d;
        self.back.x = (u.x * b.y - b.x * u.y) / d;
        self.back.y = (b.x * r.y - r.x * b.y) / d;
        self.back.z = (r.x * u.y - u.x * r.y) / d;
    }

    /// The determinant, by cofactor expansion along the `right` column.
    pub fn determinant(&self) -> f32 {
        self.right.x * (self.up.y * self.back.z - self.up.z * self.back.y)
            + self.right.y * (self.up.z * self.back.x - self.up.x * self.back.z)
            + self.right.z * (self.up.x * self.back.y - self.up.y * self.back.x)
    }

    /// Transpose this matrix in place.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.right.y, &mut self.up.x);
        std::mem::swap(&mut self.right.z, &mut self.back.x);
        std::mem::swap(&mut self.up.z, &mut self.back.y);
    }

    /// The transpose, leaving this matrix untouched.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Negate every element in place.
    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// Transform a vector: computes `self · v` in the column convention,
    /// i.e. `right·x + up·y + back·z`.
    pub fn transform(&self, v: Vector3) -> Vector3 {
        self.right * v.x + self.up * v.y + self.back * v.z
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| (a - b).abs() < EQ_TOLERANCE)
    }
}

impl approx::AbsDiffEq for Matrix3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.right.abs_diff_eq(&other.right, epsilon)
            && self.up.abs_diff_eq(&other.up, epsilon)
            && self.back.abs_diff_eq(&other.back, epsilon)
    }
}

impl approx::RelativeEq for Matrix3 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.right.relative_eq(&other.right, epsilon, max_relative)
            && self.up.relative_eq(&other.up, epsilon, max_relative)
            && self.back.relative_eq(&other.back, epsilon, max_relative)
    }
}

impl std::ops::Add for Matrix3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_columns(
            self.right + other.right,
            self.up + other.up,
            self.back + other.back,
        )
    }
}

impl std::ops::AddAssign for Matrix3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Matrix3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::from_columns(
            self.right - other.right,
            self.up - other.up,
            self.back - other.back,
        )
    }
}

impl std::ops::SubAssign for Matrix3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Neg for Matrix3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_columns(-self.right, -self.up, -self.back)
    }
}

impl std::ops::Mul<f32> for Matrix3 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::from_columns(self.right * s, self.up * s, self.back * s)
    }
}

impl std::ops::Mul<Matrix3> for f32 {
    type Output = Matrix3;
    fn mul(self, m: Matrix3) -> Matrix3 {
        m * self
    }
}

impl std::ops::MulAssign<f32> for Matrix3 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;

    /// Matrix product: each column of the result is `self` applied to the
    /// corresponding column of `other`. Not commutative.
    fn mul(self, other: Self) -> Self {
        Self::from_columns(
            self.transform(other.right),
            self.transform(other.up),
            self.transform(other.back),
        )
    }
}

impl std::ops::MulAssign for Matrix3 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        self.transform(v)
    }
}

impl std::fmt::Display for Matrix3 {
    /// Writes the matrix in visual row order (rows of the matrix, not of
    /// storage), each element fixed-point with 2 decimals and width 10, each
    /// row followed by a newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}",
            self.right.x, self.up.x, self.back.x
        )?;
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}",
            self.right.y, self.up.y, self.back.y
        )?;
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}",
            self.right.z, self.up.z, self.back.z
        )
    }
}
