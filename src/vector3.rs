//! 3-component float vectors for positions and directions.
//!
//! [`Vector3`] is the workhorse value type of the crate: mesh positions,
//! movement directions, and the basis columns of [`Matrix3`](crate::Matrix3)
//! are all `Vector3`s. It is a plain `Copy` value with public fields and no
//! invariants of its own.
//!
//! # Numerical policy
//!
//! None of these operations guard against degenerate input. Normalizing a
//! zero-length vector divides by zero and fills the vector with NaN/Inf;
//! [`Vector3::angle_between`] does not clamp its `acos` argument, so floating
//! rounding on near-parallel vectors can push it outside `[-1, 1]` and yield
//! NaN. This keeps the per-frame hot path free of branches; callers that can
//! feed degenerate data must check first.
//!
//! # Example
//!
//! ```
//! use vantage::Vector3;
//!
//! let mut dir = Vector3::new(3.0, 0.0, 4.0);
//! dir.normalize();
//! assert_eq!(dir, Vector3::new(0.6, 0.0, 0.8));
//! assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
//! ```

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

/// A 3D vector of `f32` components.
///
/// Equality (`==`) is approximate: components are compared within an absolute
/// tolerance of `1e-5`, which is what the rest of the engine expects when
/// comparing poses that went through different arithmetic paths.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Absolute per-component tolerance used by `==` on every math type.
pub(crate) const EQ_TOLERANCE: f32 = 1e-5;

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a vector from its three components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all three components set to `xyz`.
    pub const fn splat(xyz: f32) -> Self {
        Self::new(xyz, xyz, xyz)
    }

    /// Set all three components at once.
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Set every component to the same value.
    pub fn fill(&mut self, xyz: f32) {
        self.set(xyz, xyz, xyz);
    }

    /// Flip this vector to point in the exact opposite direction.
    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// Dot product with another vector.
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector, right-handed.
    ///
    /// `X.cross(Y) == Z`. The cross of parallel vectors is the zero vector.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - other.y * self.z,
            -(self.x * other.z - other.x * self.z),
            self.x * other.y - other.x * self.y,
        )
    }

    /// Length (magnitude) of this vector.
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale this vector in place to length 1, preserving direction.
    ///
    /// A zero-length vector has no direction; normalizing it divides by zero
    /// and leaves every component NaN.
    pub fn normalize(&mut self) {
        *self /= self.length();
    }

    /// Angle between this vector and `other`, in radians.
    ///
    /// Computed as `acos(dot / (|a| |b|))` with no clamping: for
    /// nearly-parallel inputs rounding can push the cosine slightly outside
    /// `[-1, 1]`, producing NaN.
    pub fn angle_between(self, other: Self) -> f32 {
        (self.dot(other) / (self.length() * other.length())).acos()
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EQ_TOLERANCE
            && (self.y - other.y).abs() < EQ_TOLERANCE
            && (self.z - other.z).abs() < EQ_TOLERANCE
    }
}

impl approx::AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        f32::abs_diff_eq(&self.x, &other.x, epsilon)
            && f32::abs_diff_eq(&self.y, &other.y, epsilon)
            && f32::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl approx::RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        f32::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && f32::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && f32::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vector3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::Mul<Vector3> for f32 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl std::ops::MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl std::ops::Div<f32> for Vector3 {
    type Output = Self;
    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

impl std::ops::DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, s: f32) {
        *self = *self / s;
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl std::fmt::Display for Vector3 {
    /// Writes the components fixed-point, 2 decimals, field width 10.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:10.2}{:10.2}{:10.2}", self.x, self.y, self.z)
    }
}
