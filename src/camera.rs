//! The camera: a world pose plus a projection matrix.
//!
//! [`Camera`] owns a [`Transform`] for its world pose and a [`Matrix4`]
//! projection. Input handlers mutate the pose every frame; the draw path
//! reads [`Camera::view_matrix`] and [`Camera::projection_matrix`] once per
//! frame and uploads both as shader uniforms.
//!
//! The view matrix is the inverse of the world pose ([`Transform::invert_rt`])
//! and is cached behind a dirty flag: pose mutators only mark the cache
//! stale, and the inversion runs at most once per frame, on the first read
//! after a mutation. Projection setters are independent of that cache —
//! view and projection are orthogonal concerns.
//!
//! # Example
//!
//! ```
//! use vantage::{Camera, Vector3};
//!
//! let mut camera = Camera::new(
//!     Vector3::new(0.0, 0.0, 25.0), // eye
//!     Vector3::Z,                   // local back: looking down -Z
//!     1.0,                          // near
//!     100.0,                        // far
//!     4.0 / 3.0,                    // aspect
//!     60.0,                         // vertical FOV, degrees
//! );
//!
//! camera.move_right(2.0);
//! camera.yaw(15.0);
//! let view = *camera.view_matrix();
//! let projection = camera.projection_matrix();
//! # let _ = (view, projection);
//! ```

use crate::matrix3::Matrix3;
use crate::matrix4::Matrix4;
use crate::transform::Transform;
use crate::vector3::Vector3;

/// A perspective (or orthographic) camera with a lazily recomputed view
/// matrix.
///
/// No pose or projection parameter is validated: a zero aspect ratio or a
/// 0°/180° field of view produces a degenerate projection matrix, silently,
/// in keeping with the crate-wide numerical policy.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Current world pose.
    world: Transform,
    /// The pose given at construction, kept for [`reset_pose`](Self::reset_pose).
    starting_world: Transform,
    /// Cached inverse of `world`; meaningful only when `view_stale` is false.
    view: Transform,
    view_stale: bool,
    projection: Matrix4,
}

impl Camera {
    /// Create a camera at `eye_position` looking opposite `local_back`, with
    /// a symmetric perspective projection.
    ///
    /// The orientation is built from world Y and `local_back` with `back`
    /// authoritative: right and up are re-derived orthonormal to it (see
    /// [`Matrix3::from_up_back`]). A `local_back` parallel to world Y
    /// degenerates to a NaN basis.
    pub fn new(
        eye_position: Vector3,
        local_back: Vector3,
        near_plane: f32,
        far_plane: f32,
        aspect_ratio: f32,
        fov_y_degrees: f32,
    ) -> Self {
        let world = Transform::new(
            Matrix3::from_up_back(Vector3::Y, local_back, true),
            eye_position,
        );
        let mut view = world;
        view.invert_rt();
        Self {
            world,
            starting_world: world,
            view,
            view_stale: false,
            projection: Matrix4::perspective(
                fov_y_degrees as f64,
                aspect_ratio as f64,
                near_plane as f64,
                far_plane as f64,
            ),
        }
    }

    /// The camera's current world pose.
    pub fn world(&self) -> &Transform {
        &self.world
    }

    /// Set the eye position.
    pub fn set_position(&mut self, position: Vector3) {
        self.world.position = position;
        self.view_stale = true;
    }

    /// Move the eye along the camera's local right vector.
    pub fn move_right(&mut self, distance: f32) {
        self.world.move_right(distance);
        self.view_stale = true;
    }

    /// Move the eye along the camera's local up vector.
    pub fn move_up(&mut self, distance: f32) {
        self.world.move_up(distance);
        self.view_stale = true;
    }

    /// Move the eye along the camera's local back vector.
    pub fn move_back(&mut self, distance: f32) {
        self.world.move_back(distance);
        self.view_stale = true;
    }

    /// Turn left/right about the local Y axis.
    pub fn yaw(&mut self, angle_degrees: f32) {
        self.world.yaw(angle_degrees);
        self.view_stale = true;
    }

    /// Tilt up/down about the local X axis.
    pub fn pitch(&mut self, angle_degrees: f32) {
        self.world.pitch(angle_degrees);
        self.view_stale = true;
    }

    /// Bank about the local Z axis.
    pub fn roll(&mut self, angle_degrees: f32) {
        self.world.roll(angle_degrees);
        self.view_stale = true;
    }

    /// The view matrix: the inverse of the world pose.
    ///
    /// Returns the cached value when the pose has not changed since the last
    /// read; otherwise recomputes it once and caches it.
    pub fn view_matrix(&mut self) -> &Transform {
        if self.view_stale {
            self.view = self.world;
            self.view.invert_rt();
            self.view_stale = false;
        }
        &self.view
    }

    /// The current projection matrix.
    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection
    }

    /// Replace the projection with a symmetric perspective projection.
    pub fn set_projection_symmetric_perspective(
        &mut self,
        fov_y_degrees: f64,
        aspect_ratio: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) {
        self.projection =
            Matrix4::perspective(fov_y_degrees, aspect_ratio, near_plane_z, far_plane_z);
    }

    /// Replace the projection with an off-center perspective projection.
    pub fn set_projection_asymmetric_perspective(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) {
        self.projection =
            Matrix4::perspective_frustum(left, right, bottom, top, near_plane_z, far_plane_z);
    }

    /// Replace the projection with an orthographic projection.
    pub fn set_projection_orthographic(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near_plane_z: f64,
        far_plane_z: f64,
    ) {
        self.projection =
            Matrix4::orthographic(left, right, bottom, top, near_plane_z, far_plane_z);
    }

    /// Restore the position and orientation given at construction.
    pub fn reset_pose(&mut self) {
        self.world = self.starting_world;
        self.view_stale = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_camera() -> Camera {
        Camera::new(
            Vector3::new(0.0, 0.0, 25.0),
            Vector3::Z,
            1.0,
            100.0,
            1.0,
            60.0,
        )
    }

    #[test]
    fn construction_orients_and_projects() {
        let camera = sample_camera();
        // Back was already world Z, so the basis is the identity.
        assert_eq!(camera.world.rot_scale, Matrix3::IDENTITY);
        assert_eq!(camera.world.position, Vector3::new(0.0, 0.0, 25.0));
        assert_eq!(
            camera.projection,
            Matrix4::perspective(60.0, 1.0, 1.0, 100.0)
        );
        // The view cache is primed eagerly.
        assert!(!camera.view_stale);
        assert_eq!(camera.view.position, Vector3::new(0.0, 0.0, -25.0));
    }

    #[test]
    fn construction_orthonormalizes_around_back() {
        // A tilted, non-unit back direction still yields an orthonormal
        // basis with back pointing the same way.
        let camera = Camera::new(
            Vector3::ZERO,
            Vector3::new(3.0, 0.0, 3.0),
            0.1,
            50.0,
            1.5,
            45.0,
        );
        let basis = camera.world.rot_scale;
        let mut expected_back = Vector3::new(3.0, 0.0, 3.0);
        expected_back.normalize();
        assert_eq!(basis.back, expected_back);
        assert_abs_diff_eq!(basis.transposed() * basis, Matrix3::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_is_inverse_of_world() {
        let mut camera = sample_camera();
        camera.yaw(40.0);
        camera.move_right(3.0);
        let world = *camera.world();
        let view = *camera.view_matrix();
        assert_abs_diff_eq!(world * view, Transform::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn view_cache_short_circuits_until_mutated() {
        let mut camera = sample_camera();
        let first = *camera.view_matrix();
        // Second read without mutation: still clean, same cached value.
        assert!(!camera.view_stale);
        let second = *camera.view_matrix();
        assert_eq!(first, second);

        // Any pose mutator marks the cache stale; the next read recomputes.
        camera.move_up(1.0);
        assert!(camera.view_stale);
        let third = *camera.view_matrix();
        assert!(!camera.view_stale);
        assert_ne!(first, third);
    }

    #[test]
    fn every_pose_mutator_dirties_the_cache() {
        let mutators: [fn(&mut Camera); 7] = [
            |c| c.set_position(Vector3::ONE),
            |c| c.move_right(1.0),
            |c| c.move_up(1.0),
            |c| c.move_back(1.0),
            |c| c.yaw(5.0),
            |c| c.pitch(5.0),
            |c| c.roll(5.0),
        ];
        for mutate in mutators {
            let mut camera = sample_camera();
            camera.view_matrix();
            assert!(!camera.view_stale);
            mutate(&mut camera);
            assert!(camera.view_stale);
        }
    }

    #[test]
    fn projection_setters_leave_view_cache_clean() {
        let mut camera = sample_camera();
        camera.view_matrix();
        camera.set_projection_symmetric_perspective(90.0, 1.0, 1.0, 100.0);
        assert!(!camera.view_stale);
        assert_eq!(
            camera.projection_matrix(),
            Matrix4::perspective(90.0, 1.0, 1.0, 100.0)
        );

        camera.set_projection_asymmetric_perspective(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert_eq!(
            camera.projection_matrix(),
            Matrix4::perspective_frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0)
        );

        camera.set_projection_orthographic(-5.0, 5.0, -5.0, 5.0, 1.0, 10.0);
        assert_eq!(
            camera.projection_matrix(),
            Matrix4::orthographic(-5.0, 5.0, -5.0, 5.0, 1.0, 10.0)
        );
        assert!(!camera.view_stale);
    }

    #[test]
    fn reset_pose_restores_starting_world() {
        let mut camera = sample_camera();
        let starting_view = *camera.view_matrix();
        camera.yaw(90.0);
        camera.move_back(-10.0);
        camera.set_position(Vector3::new(1.0, 2.0, 3.0));
        assert_ne!(camera.world, camera.starting_world);

        camera.reset_pose();
        assert_eq!(camera.world, camera.starting_world);
        assert!(camera.view_stale);
        assert_eq!(*camera.view_matrix(), starting_view);
    }
}
