//! Composite affine transforms: orientation + scale + position.
//!
//! [`Transform`] is how every renderable object and the camera carry their
//! pose. It pairs a [`Matrix3`] (`rot_scale`, the linear part) with a
//! [`Vector3`] (`position`), representing the affine map
//! `x ↦ rot_scale · x + position` — a full 4×4 homogeneous matrix whose
//! bottom row is implicitly `[0, 0, 0, 1]` and therefore never stored:
//!
//! ```text
//! [ rx ux bx px ]
//! [ ry uy by py ]
//! [ rz uz bz pz ]
//! [  0  0  0  1 ]
//! ```
//!
//! # Local vs. world operations
//!
//! Every mutation comes in a local flavor, a world flavor, or both, and the
//! two are deliberately asymmetric:
//!
//! - **Local** rotations/scales/shears post-multiply `rot_scale` (the new
//!   map is applied first, then whatever was already encoded) and leave
//!   `position` untouched.
//! - **World** rotations/scales pre-multiply `rot_scale` **and transform
//!   `position` by the new map**. `rotate_world` on an object away from the
//!   origin swings the object around the world origin — orientation and
//!   location change together. This surprises callers who expect "world
//!   space" to mean "orientation only"; it is the intended semantics, so
//!   read the per-method docs before reaching for the world variants.
//!
//! # Rigidity is the caller's bargain
//!
//! Movement and rotation keep `rot_scale` orthonormal; scale and shear do
//! not. The type happily accumulates any mix, and only
//! [`Transform::invert_rt`] (the view-matrix path) requires that the
//! transform still be rigid. Nothing checks this; see the crate-level notes
//! on silent numerical degeneracy.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::vector3::Vector3;
use crate::vector4::Vector4;

/// An affine transform: a linear `rot_scale` part plus a `position`.
///
/// Equality (`==`) is approximate, componentwise within `1e-5`, matching the
/// component types.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Transform {
    /// Orientation and scale: the upper-left 3×3 block of the homogeneous
    /// matrix.
    pub rot_scale: Matrix3,
    /// Translation: the fourth column of the homogeneous matrix.
    pub position: Vector3,
}

impl Transform {
    /// The identity transform: no rotation, scale, shear, or translation.
    pub const IDENTITY: Self = Self {
        rot_scale: Matrix3::IDENTITY,
        position: Vector3::ZERO,
    };

    /// Create a transform from an orientation/scale matrix and a position.
    pub const fn new(orientation: Matrix3, position: Vector3) -> Self {
        Self {
            rot_scale: orientation,
            position,
        }
    }

    /// Reset to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Orthonormalize the `rot_scale` component (back direction wins; see
    /// [`Matrix3::orthonormalize`]).
    pub fn orthonormalize(&mut self) {
        self.rot_scale.orthonormalize();
    }

    /// The local +X direction (first column of `rot_scale`).
    pub fn right(&self) -> Vector3 {
        self.rot_scale.right
    }

    /// The local +Y direction (second column of `rot_scale`).
    pub fn up(&self) -> Vector3 {
        self.rot_scale.up
    }

    /// The local +Z direction (third column of `rot_scale`).
    pub fn back(&self) -> Vector3 {
        self.rot_scale.back
    }

    /// Translate `distance` units along the current local right vector.
    pub fn move_right(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.right;
    }

    /// Translate `distance` units along the current local up vector.
    pub fn move_up(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.up;
    }

    /// Translate `distance` units along the current local back vector.
    pub fn move_back(&mut self, distance: f32) {
        self.position += distance * self.rot_scale.back;
    }

    /// Translate along an arbitrary direction expressed in local
    /// coordinates: `position += rot_scale · (distance · direction)`.
    ///
    /// Because the direction is mapped through `rot_scale`, any scale
    /// encoded there stretches the step — moving 1 unit "locally" inside a
    /// transform scaled by 2 moves 2 world units.
    pub fn move_local(&mut self, distance: f32, local_direction: Vector3) {
        self.position += self.rot_scale * (distance * local_direction);
    }

    /// Translate along a world-space direction, ignoring `rot_scale`.
    pub fn move_world(&mut self, distance: f32, world_direction: Vector3) {
        self.position += distance * world_direction;
    }

    /// Rotate about the local X axis. Post-multiplies, so the rotation is
    /// applied before whatever the transform already encoded.
    pub fn pitch(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_x(angle_degrees);
    }

    /// Rotate about the local Y axis. Post-multiplies like [`pitch`](Self::pitch).
    pub fn yaw(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_y(angle_degrees);
    }

    /// Rotate about the local Z axis. Post-multiplies like [`pitch`](Self::pitch).
    pub fn roll(&mut self, angle_degrees: f32) {
        self.rot_scale *= Matrix3::from_rotation_z(angle_degrees);
    }

    /// Rotate about an arbitrary local axis. Post-multiplies; `position` is
    /// untouched.
    pub fn rotate_local(&mut self, angle_degrees: f32, axis: Vector3) {
        self.rot_scale = self.rot_scale * Matrix3::from_angle_axis(angle_degrees, axis);
    }

    /// Rotate about an arbitrary **world** axis through the world origin.
    ///
    /// Pre-multiplies `rot_scale` and also maps `position` through the new
    /// rotation: an object at (5, 0, 0) rotated 90° about world Y ends up at
    /// (0, 0, −5), orientation turned to match. To spin an object in place,
    /// use [`rotate_local`](Self::rotate_local).
    pub fn rotate_world(&mut self, angle_degrees: f32, axis: Vector3) {
        let rotation = Matrix3::from_angle_axis(angle_degrees, axis);
        self.rot_scale = rotation * self.rot_scale;
        self.position = rotation * self.position;
    }

    /// Scale uniformly in local space. Post-multiplies; `position` is
    /// untouched.
    pub fn scale_local(&mut self, scale: f32) {
        self.rot_scale = self.rot_scale * Matrix3::from_scale(scale);
    }

    /// Scale per-axis in local space. Post-multiplies; `position` is
    /// untouched.
    pub fn scale_local_axes(&mut self, scale_x: f32, scale_y: f32, scale_z: f32) {
        self.rot_scale =
            self.rot_scale * Matrix3::from_nonuniform_scale(scale_x, scale_y, scale_z);
    }

    /// Scale uniformly in world space. Pre-multiplies and scales `position`
    /// too — the object also moves toward or away from the world origin
    /// (same asymmetry as [`rotate_world`](Self::rotate_world)).
    pub fn scale_world(&mut self, scale: f32) {
        let scaling = Matrix3::from_scale(scale);
        self.rot_scale = scaling * self.rot_scale;
        self.position = scaling * self.position;
    }

    /// Scale per-axis in world space. Pre-multiplies and scales `position`.
    pub fn scale_world_axes(&mut self, scale_x: f32, scale_y: f32, scale_z: f32) {
        let scaling = Matrix3::from_nonuniform_scale(scale_x, scale_y, scale_z);
        self.rot_scale = scaling * self.rot_scale;
        self.position = scaling * self.position;
    }

    /// Shear local X by factors of Y and Z. Post-multiplies.
    pub fn shear_local_x_by_yz(&mut self, shear_y: f32, shear_z: f32) {
        self.rot_scale = self.rot_scale * Matrix3::from_shear_x_by_yz(shear_y, shear_z);
    }

    /// Shear local Y by factors of X and Z. Post-multiplies.
    pub fn shear_local_y_by_xz(&mut self, shear_x: f32, shear_z: f32) {
        self.rot_scale = self.rot_scale * Matrix3::from_shear_y_by_xz(shear_x, shear_z);
    }

    /// Shear local Z by factors of X and Y. Post-multiplies.
    pub fn shear_local_z_by_xy(&mut self, shear_x: f32, shear_y: f32) {
        self.rot_scale = self.rot_scale * Matrix3::from_shear_z_by_xy(shear_x, shear_y);
    }

    /// Force the up vector to world Y and re-derive back and right around
    /// it.
    ///
    /// Discards any accumulated scale, shear, pitch, or roll while keeping
    /// yaw and position — useful to level a camera or character. If the back
    /// vector was parallel to world Y the cross products degenerate and the
    /// basis fills with NaN.
    pub fn align_with_world_y(&mut self) {
        self.rot_scale.up = Vector3::Y;
        let mut back = self.rot_scale.right.cross(self.rot_scale.up);
        back.normalize();
        self.rot_scale.back = back;
        self.rot_scale.right = self.rot_scale.up.cross(self.rot_scale.back);
    }

    /// Invert in place, assuming a rigid (rotation + translation only)
    /// transform.
    ///
    /// Transposes `rot_scale` and maps the negated position through the
    /// transposed matrix. This is how a camera's world pose becomes a view
    /// matrix. On a transform carrying scale or shear the result is defined
    /// but is not the inverse.
    pub fn invert_rt(&mut self) {
        self.rot_scale.invert_rotation();
        self.position = self.rot_scale * -self.position;
    }

    /// Combine with another transform: `self = self ∘ t`, i.e. applying `t`
    /// first and then the previous `self`. Matches matrix-multiplication
    /// order; not commutative.
    pub fn combine(&mut self, t: &Transform) {
        *self = *self * *t;
    }

    /// The full homogeneous 4×4 matrix: `rot_scale` columns padded with 0,
    /// `position` padded with 1.
    pub fn to_matrix4(&self) -> Matrix4 {
        let r = self.rot_scale.right;
        let u = self.rot_scale.up;
        let b = self.rot_scale.back;
        let p = self.position;
        Matrix4::from_columns(
            Vector4::new(r.x, r.y, r.z, 0.0),
            Vector4::new(u.x, u.y, u.z, 0.0),
            Vector4::new(b.x, b.y, b.z, 0.0),
            Vector4::new(p.x, p.y, p.z, 1.0),
        )
    }

    /// The 16 elements of [`to_matrix4`](Self::to_matrix4) in column-major
    /// order, ready for uniform upload.
    pub fn to_array(&self) -> [f32; 16] {
        *self.to_matrix4().data()
    }

    /// The homogeneous matrix as 64 raw bytes, column-major.
    pub fn as_bytes(&self) -> [u8; 64] {
        self.to_matrix4().as_bytes()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.rot_scale == other.rot_scale && self.position == other.position
    }
}

impl approx::AbsDiffEq for Transform {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rot_scale.abs_diff_eq(&other.rot_scale, epsilon)
            && self.position.abs_diff_eq(&other.position, epsilon)
    }
}

impl approx::RelativeEq for Transform {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rot_scale
            .relative_eq(&other.rot_scale, epsilon, max_relative)
            && self
                .position
                .relative_eq(&other.position, epsilon, max_relative)
    }
}

impl std::ops::Mul for Transform {
    type Output = Self;

    /// Affine composition `t1 ∘ t2`: the linear parts multiply and `t2`'s
    /// position is mapped through `t1` then offset by `t1`'s position.
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.rot_scale * other.rot_scale,
            self.rot_scale * other.position + self.position,
        )
    }
}

impl std::fmt::Display for Transform {
    /// Writes the full 4×4 matrix, including the implicit `0 0 0 1` bottom
    /// row, in the same fixed-point width-10 format as the matrix types.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_matrix4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rigid_sample() -> Transform {
        let mut t = Transform::IDENTITY;
        t.yaw(30.0);
        t.pitch(-15.0);
        t.move_world(1.0, Vector3::new(4.0, -2.0, 7.0));
        t
    }

    #[test]
    fn identity_and_reset() {
        let mut t = rigid_sample();
        assert_ne!(t, Transform::IDENTITY);
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn basis_moves_follow_orientation() {
        let mut t = Transform::IDENTITY;
        t.yaw(90.0);
        // After a quarter turn about Y, local right points down world -Z.
        t.move_right(2.0);
        assert_eq!(t.position, Vector3::new(0.0, 0.0, -2.0));
        t.move_up(3.0);
        assert_eq!(t.position, Vector3::new(0.0, 3.0, -2.0));
        // Local back now points down world +X.
        t.move_back(1.0);
        assert_eq!(t.position, Vector3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn move_local_is_scale_coupled() {
        let mut t = Transform::IDENTITY;
        t.scale_local(2.0);
        t.move_local(1.0, Vector3::X);
        assert_eq!(t.position, Vector3::new(2.0, 0.0, 0.0));

        // move_world ignores the encoded scale.
        let mut t = Transform::IDENTITY;
        t.scale_local(2.0);
        t.move_world(1.0, Vector3::X);
        assert_eq!(t.position, Vector3::X);
    }

    #[test]
    fn local_rotations_post_multiply() {
        // yaw-then-pitch and pitch-then-yaw must differ: each new rotation
        // is applied in the frame *before* what was already encoded.
        let mut a = Transform::IDENTITY;
        a.yaw(90.0);
        a.pitch(90.0);
        let mut b = Transform::IDENTITY;
        b.pitch(90.0);
        b.yaw(90.0);
        assert_ne!(a, b);

        let expected = Matrix3::from_rotation_y(90.0) * Matrix3::from_rotation_x(90.0);
        assert_abs_diff_eq!(a.rot_scale, expected, epsilon = 1e-6);
    }

    #[test]
    fn rotate_local_leaves_position() {
        let mut t = Transform::IDENTITY;
        t.position = Vector3::new(5.0, 0.0, 0.0);
        t.rotate_local(90.0, Vector3::Y);
        assert_eq!(t.position, Vector3::new(5.0, 0.0, 0.0));
        assert_abs_diff_eq!(t.rot_scale, Matrix3::from_rotation_y(90.0), epsilon = 1e-6);
    }

    #[test]
    fn rotate_world_swings_position_about_origin() {
        let mut t = Transform::IDENTITY;
        t.position = Vector3::new(5.0, 0.0, 0.0);
        t.rotate_world(90.0, Vector3::Y);
        assert_eq!(t.position, Vector3::new(0.0, 0.0, -5.0));
        assert_abs_diff_eq!(t.rot_scale, Matrix3::from_rotation_y(90.0), epsilon = 1e-6);
    }

    #[test]
    fn scale_world_scales_position_but_local_does_not() {
        let mut t = Transform::IDENTITY;
        t.position = Vector3::new(1.0, 2.0, 3.0);
        t.scale_local(2.0);
        assert_eq!(t.position, Vector3::new(1.0, 2.0, 3.0));
        t.scale_world(2.0);
        assert_eq!(t.position, Vector3::new(2.0, 4.0, 6.0));

        let mut t = Transform::IDENTITY;
        t.position = Vector3::ONE;
        t.scale_world_axes(1.0, 2.0, 3.0);
        assert_eq!(t.position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn shears_post_multiply_and_leave_position() {
        let mut t = Transform::IDENTITY;
        t.position = Vector3::new(1.0, 1.0, 1.0);
        t.shear_local_x_by_yz(2.0, 3.0);
        assert_eq!(t.position, Vector3::ONE);
        assert_eq!(t.rot_scale, Matrix3::from_shear_x_by_yz(2.0, 3.0));

        t.reset();
        t.shear_local_y_by_xz(1.0, 0.0);
        t.shear_local_z_by_xy(0.0, 1.0);
        let expected = Matrix3::from_shear_y_by_xz(1.0, 0.0) * Matrix3::from_shear_z_by_xy(0.0, 1.0);
        assert_eq!(t.rot_scale, expected);
    }

    #[test]
    fn align_with_world_y_keeps_yaw_drops_roll() {
        let mut t = Transform::IDENTITY;
        t.yaw(45.0);
        t.roll(30.0);
        t.pitch(-20.0);
        t.position = Vector3::new(1.0, 2.0, 3.0);
        let yawed_only = {
            let mut y = Transform::IDENTITY;
            y.yaw(45.0);
            y
        };

        t.align_with_world_y();
        assert_eq!(t.up(), Vector3::Y);
        assert_eq!(t.position, Vector3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(t.rot_scale, yawed_only.rot_scale, epsilon = 1e-5);
    }

    #[test]
    fn invert_rt_round_trip() {
        let t = rigid_sample();
        let mut inverse = t;
        inverse.invert_rt();
        let mut round_trip = t;
        round_trip.combine(&inverse);
        assert_abs_diff_eq!(round_trip, Transform::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn combine_is_associative() {
        let t1 = rigid_sample();
        let mut t2 = Transform::IDENTITY;
        t2.roll(12.0);
        t2.position = Vector3::new(-1.0, 0.5, 2.0);
        let mut t3 = Transform::IDENTITY;
        t3.pitch(78.0);
        t3.position = Vector3::new(0.0, -3.0, 1.0);

        assert_abs_diff_eq!((t1 * t2) * t3, t1 * (t2 * t3), epsilon = 1e-4);
    }

    #[test]
    fn combine_applies_right_operand_first() {
        let mut translate = Transform::IDENTITY;
        translate.position = Vector3::new(1.0, 0.0, 0.0);
        let mut rotate = Transform::IDENTITY;
        rotate.yaw(90.0);

        // rotate ∘ translate: the translation is rotated.
        let rt = rotate * translate;
        assert_eq!(rt.position, Vector3::new(0.0, 0.0, -1.0));
        // translate ∘ rotate: the translation is untouched.
        let tr = translate * rotate;
        assert_eq!(tr.position, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn homogeneous_matrix_layout() {
        let mut t = Transform::IDENTITY;
        t.position = Vector3::new(7.0, 8.0, 9.0);
        let m = t.to_matrix4();
        assert_eq!(m.right, Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(m.translation, Vector4::new(7.0, 8.0, 9.0, 1.0));

        let a = t.to_array();
        assert_eq!(&a[..4], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&a[12..], &[7.0, 8.0, 9.0, 1.0]);
        assert_eq!(t.as_bytes(), t.to_matrix4().as_bytes());
    }

    #[test]
    fn display_includes_implicit_bottom_row() {
        let t = Transform::IDENTITY;
        let expected = concat!(
            "      1.00      0.00      0.00      0.00\n",
            "      0.00      1.00      0.00      0.00\n",
            "      0.00      0.00      1.00      0.00\n",
            "      0.00      0.00      0.00      1.00\n",
        );
        assert_eq!(format!("{}", t), expected);
    }
}
