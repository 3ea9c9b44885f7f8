//! 4×4 matrices, used to hold projection matrices.
//!
//! [`Matrix4`] stores four named [`Vector4`] columns (`right`, `up`, `back`,
//! `translation`), making the memory layout column-major — the 16 floats
//! starting at `right.x` can be handed to the GPU as a `mat4` uniform
//! untouched, via [`Matrix4::data`] or [`Matrix4::as_bytes`].
//!
//! Affine poses are represented by [`Transform`](crate::Transform), which
//! keeps the bottom row implicitly `[0, 0, 0, 1]`; `Matrix4` exists for the
//! matrices that genuinely need the full bottom row, i.e. perspective and
//! orthographic projections.
//!
//! All projection math runs in `f64` and is narrowed to `f32` only on store.
//! Field-of-view angles can be small and `tan` amplifies error, so the extra
//! precision is not academic.
//!
//! No argument validation is performed anywhere: a non-positive field of
//! view, aspect ratio, or a `near == far` plane pair produces a degenerate
//! or NaN-laden matrix rather than an error.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::vector3::EQ_TOLERANCE;
use crate::vector4::Vector4;

/// A 4×4 matrix of `f32`, stored as `right`/`up`/`back`/`translation`
/// columns.
///
/// Equality (`==`) is approximate, componentwise within `1e-5`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Matrix4 {
    pub right: Vector4,
    pub up: Vector4,
    pub back: Vector4,
    pub translation: Vector4,
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        right: Vector4::new(1.0, 0.0, 0.0, 0.0),
        up: Vector4::new(0.0, 1.0, 0.0, 0.0),
        back: Vector4::new(0.0, 0.0, 1.0, 0.0),
        translation: Vector4::new(0.0, 0.0, 0.0, 1.0),
    };

    pub const ZERO: Self = Self {
        right: Vector4::ZERO,
        up: Vector4::ZERO,
        back: Vector4::ZERO,
        translation: Vector4::ZERO,
    };

    /// Create a matrix from four explicit columns.
    pub const fn from_columns(
        right: Vector4,
        up: Vector4,
        back: Vector4,
        translation: Vector4,
    ) -> Self {
        Self {
            right,
            up,
            back,
            translation,
        }
    }

    /// Build a symmetric perspective projection (standard OpenGL clip-space
    /// conventions) from a vertical field of view in degrees, a
    /// width-over-height aspect ratio, and near/far plane distances.
    pub fn perspective(
        fov_y_degrees: f64,
        aspect_ratio: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) -> Self {
        let half_fov_tan = (fov_y_degrees.to_radians() / 2.0).tan();
        let mut m = Self::ZERO;
        m.right.x = (1.0 / (aspect_ratio * half_fov_tan)) as f32;
        m.up.y = (1.0 / half_fov_tan) as f32;
        m.back.z = ((near_plane_z + far_plane_z) / (near_plane_z - far_plane_z)) as f32;
        m.back.w = -1.0;
        m.translation.z =
            ((2.0 * far_plane_z * near_plane_z) / (near_plane_z - far_plane_z)) as f32;
        m
    }

    /// Build an asymmetric (off-center) perspective projection from the six
    /// frustum plane coordinates on the near plane.
    pub fn perspective_frustum(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) -> Self {
        let mut m = Self::ZERO;
        m.right.x = ((2.0 * near_plane_z) / (right - left)) as f32;
        m.up.y = ((2.0 * near_plane_z) / (top - bottom)) as f32;
        m.back.x = ((right + left) / (right - left)) as f32;
        m.back.y = ((top + bottom) / (top - bottom)) as f32;
        m.back.z = ((near_plane_z + far_plane_z) / (near_plane_z - far_plane_z)) as f32;
        m.back.w = -1.0;
        m.translation.z =
            ((2.0 * far_plane_z * near_plane_z) / (near_plane_z - far_plane_z)) as f32;
        m
    }

    /// Build an orthographic projection mapping the given box to the
    /// normalized device cube, using the standard OpenGL Z convention
    /// (`back.z = 2 / (near − far)`).
    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) -> Self {
        let mut m = Self::ZERO;
        m.right.x = (2.0 / (right - left)) as f32;
        m.up.y = (2.0 / (top - bottom)) as f32;
        m.back.z = (2.0 / (near_plane_z - far_plane_z)) as f32;
        m.translation.x = (-(right + left) / (right - left)) as f32;
        m.translation.y = (-(top + bottom) / (top - bottom)) as f32;
        m.translation.z = ((near_plane_z + far_plane_z) / (near_plane_z - far_plane_z)) as f32;
        m.translation.w = 1.0;
        m
    }

    /// Reset to the identity matrix.
    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Reset to the all-zero matrix.
    pub fn set_to_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// The elements as a column-major `[f32; 16]` slice: rx, ry, rz, rw,
    /// ux, … — the layout a `mat4` shader uniform expects.
    pub fn data(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    /// The matrix as 64 raw bytes, column-major, for buffer upload.
    pub fn as_bytes(&self) -> [u8; 64] {
        bytemuck::cast(*self)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| (a - b).abs() < EQ_TOLERANCE)
    }
}

impl approx::AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.right.abs_diff_eq(&other.right, epsilon)
            && self.up.abs_diff_eq(&other.up, epsilon)
            && self.back.abs_diff_eq(&other.back, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

impl approx::RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.right.relative_eq(&other.right, epsilon, max_relative)
            && self.up.relative_eq(&other.up, epsilon, max_relative)
            && self.back.relative_eq(&other.back, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}

impl std::fmt::Display for Matrix4 {
    /// Writes the matrix in visual row order, each element fixed-point with
    /// 2 decimals and width 10, each row followed by a newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}{:10.2}",
            self.right.x, self.up.x, self.back.x, self.translation.x
        )?;
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}{:10.2}",
            self.right.y, self.up.y, self.back.y, self.translation.y
        )?;
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}{:10.2}",
            self.right.z, self.up.z, self.back.z, self.translation.z
        )?;
        writeln!(
            f,
            "{:10.2}{:10.2}{:10.2}{:10.2}",
            self.right.w, self.up.w, self.back.w, self.translation.w
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_identity() {
        let m = Matrix4::default();
        assert_eq!(m, Matrix4::IDENTITY);
        assert_eq!(m.translation.w, 1.0);
        assert_eq!(
            m.data(),
            &[
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn symmetric_perspective_square_90_degree() {
        let m = Matrix4::perspective(90.0, 1.0, 1.0, 100.0);
        // tan(45°) == 1, so both focal terms collapse to 1.
        assert_eq!(m.right.x, m.up.y);
        assert_abs_diff_eq!(m.right.x, 1.0, epsilon = 1e-6);
        assert_eq!(m.back.w, -1.0);
        assert_abs_diff_eq!(m.back.z, -101.0 / 99.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.translation.z, -200.0 / 99.0, epsilon = 1e-6);
        assert_eq!(m.translation.w, 0.0);
    }

    #[test]
    fn symmetric_perspective_respects_aspect() {
        let m = Matrix4::perspective(60.0, 16.0 / 9.0, 0.1, 50.0);
        assert_abs_diff_eq!(m.up.y / m.right.x, 16.0 / 9.0, epsilon = 1e-5);
    }

    #[test]
    fn frustum_matches_symmetric_for_centered_planes() {
        let fov_y: f64 = 70.0;
        let aspect = 1.5;
        let near = 0.5;
        let far = 200.0;
        let half_height = near * (fov_y.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        let symmetric = Matrix4::perspective(fov_y, aspect, near, far);
        let frustum = Matrix4::perspective_frustum(
            -half_width,
            half_width,
            -half_height,
            half_height,
            near,
            far,
        );
        assert_abs_diff_eq!(symmetric, frustum, epsilon = 1e-5);
    }

    #[test]
    fn off_center_frustum_skews() {
        let m = Matrix4::perspective_frustum(0.0, 2.0, -1.0, 1.0, 1.0, 10.0);
        assert_abs_diff_eq!(m.back.x, 1.0);
        assert_eq!(m.back.y, 0.0);
        assert_eq!(m.back.w, -1.0);
    }

    #[test]
    fn orthographic_box() {
        let m = Matrix4::orthographic(-10.0, 10.0, -5.0, 5.0, 1.0, 100.0);
        assert_abs_diff_eq!(m.right.x, 0.1);
        assert_abs_diff_eq!(m.up.y, 0.2);
        assert_abs_diff_eq!(m.back.z, -2.0 / 99.0, epsilon = 1e-6);
        assert_eq!(m.back.w, 0.0);
        assert_abs_diff_eq!(m.translation.z, -101.0 / 99.0, epsilon = 1e-6);
        assert_eq!(m.translation.w, 1.0);

        // An off-center box picks up an XY translation.
        let m = Matrix4::orthographic(0.0, 10.0, 0.0, 10.0, 1.0, 100.0);
        assert_abs_diff_eq!(m.translation.x, -1.0);
        assert_abs_diff_eq!(m.translation.y, -1.0);
    }

    #[test]
    fn degenerate_planes_are_not_an_error() {
        // near == far: silently produces infinities, no panic.
        let m = Matrix4::perspective(60.0, 1.0, 1.0, 1.0);
        assert!(m.back.z.is_infinite());
    }

    #[test]
    fn byte_layout_for_uniform_upload() {
        let m = Matrix4::perspective(90.0, 1.0, 1.0, 100.0);
        let bytes = m.as_bytes();
        let floats: [f32; 16] = bytemuck::cast(bytes);
        assert_eq!(&floats, m.data());
        assert_eq!(floats[0], m.right.x);
        assert_eq!(floats[11], m.back.w);
    }

    #[test]
    fn display_prints_visual_rows() {
        let m = Matrix4::IDENTITY;
        let expected = concat!(
            "      1.00      0.00      0.00      0.00\n",
            "      0.00      1.00      0.00      0.00\n",
            "      0.00      0.00      1.00      0.00\n",
            "      0.00      0.00      0.00      1.00\n",
        );
        assert_eq!(format!("{}", m), expected);
    }
}
