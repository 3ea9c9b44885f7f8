//! 4-component float vectors, used as [`Matrix4`](crate::Matrix4) columns.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::vector3::EQ_TOLERANCE;

/// A 4D vector of `f32` components.
///
/// In this crate `Vector4` only ever appears as a column of a
/// [`Matrix4`](crate::Matrix4). By convention `w == 0.0` marks a direction
/// and `w == 1.0` a point; nothing enforces this.
///
/// Like [`Vector3`](crate::Vector3), `==` compares components within an
/// absolute tolerance of `1e-5`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a vector from its four components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a vector with all four components set to `xyzw`.
    pub const fn splat(xyzw: f32) -> Self {
        Self::new(xyzw, xyzw, xyzw, xyzw)
    }

    /// Set all four components at once.
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
    }

    /// Flip this vector to point in the exact opposite direction.
    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// Dot product with another vector.
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Length (magnitude) of this vector.
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale this vector in place to length 1.
    ///
    /// As with [`Vector3::normalize`](crate::Vector3::normalize), a
    /// zero-length input produces NaN components.
    pub fn normalize(&mut self) {
        *self /= self.length();
    }
}

impl Default for Vector4 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Vector4 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EQ_TOLERANCE
            && (self.y - other.y).abs() < EQ_TOLERANCE
            && (self.z - other.z).abs() < EQ_TOLERANCE
            && (self.w - other.w).abs() < EQ_TOLERANCE
    }
}

impl approx::AbsDiffEq for Vector4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        f32::abs_diff_eq(&self.x, &other.x, epsilon)
            && f32::abs_diff_eq(&self.y, &other.y, epsilon)
            && f32::abs_diff_eq(&self.z, &other.z, epsilon)
            && f32::abs_diff_eq(&self.w, &other.w, epsilon)
    }
}

impl approx::RelativeEq for Vector4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        f32::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f32::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f32::relative_eq(&self.z, &other.z, epsilon, max_relative)
            && f32::relative_eq(&self.w, &other.w, epsilon, max_relative)
    }
}

impl std::ops::Add for Vector4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl std::ops::AddAssign for Vector4 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vector4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl std::ops::SubAssign for Vector4 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Neg for Vector4 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl std::ops::Mul<f32> for Vector4 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl std::ops::Mul<Vector4> for f32 {
    type Output = Vector4;
    fn mul(self, v: Vector4) -> Vector4 {
        v * self
    }
}

impl std::ops::MulAssign<f32> for Vector4 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl std::ops::Div<f32> for Vector4 {
    type Output = Self;
    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl std::ops::DivAssign<f32> for Vector4 {
    fn div_assign(&mut self, s: f32) {
        *self = *self / s;
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        [v.x, v.y, v.z, v.w]
    }
}

impl std::fmt::Display for Vector4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:10.2}{:10.2}{:10.2}{:10.2}",
            self.x, self.y, self.z, self.w
        )
    }
}
