//! # Vantage
//!
//! **Affine pose and camera math for real-time 3D rendering.**
//!
//! Vantage is the transform core of a small rendering engine: vectors,
//! basis-vector matrices, composite affine transforms, and a camera that
//! turns a world pose into view and projection matrices ready for shader
//! uniform upload.
//!
//! ## Quick Start
//!
//! ```
//! use vantage::{Camera, Transform, Vector3};
//!
//! // One transform per renderable object.
//! let mut mesh_pose = Transform::IDENTITY;
//! mesh_pose.move_world(5.0, Vector3::X);
//! mesh_pose.yaw(45.0);
//!
//! // One camera, mutated by input, read once per frame.
//! let mut camera = Camera::new(
//!     Vector3::new(0.0, 2.0, 10.0),
//!     Vector3::Z,
//!     0.1,
//!     100.0,
//!     16.0 / 9.0,
//!     60.0,
//! );
//! camera.pitch(-10.0);
//!
//! // Column-major floats, straight into uniform buffers.
//! let model: [f32; 16] = mesh_pose.to_array();
//! let view: [f32; 16] = camera.view_matrix().to_array();
//! let projection = camera.projection_matrix();
//! # let _ = (model, view, projection);
//! ```
//!
//! ## Design
//!
//! - **Basis vectors, not index grids** — [`Matrix3`] and [`Matrix4`] store
//!   named `right`/`up`/`back` columns. Storage is column-major, so
//!   `data()` slices upload to the GPU untouched.
//! - **Poses are `Matrix3` + `Vector3`** — [`Transform`] never stores the
//!   constant `[0, 0, 0, 1]` bottom row; [`Matrix4`] is reserved for
//!   projection matrices that genuinely need it.
//! - **No errors in the hot path** — degenerate input (zero-length
//!   normalize, singular inversion, out-of-domain `acos`) is never reported:
//!   it either no-ops or propagates NaN/Inf. Per-frame arithmetic carries no
//!   control-flow overhead; callers own their preconditions.
//! - **Plain values everywhere** — every type is `Copy`, `#[repr(C)]`, and
//!   [`bytemuck::Pod`]. Nothing owns heap memory; nothing is shared. Updates
//!   to a single transform must be serialized, but distinct objects can be
//!   updated from distinct threads freely.
//!
//! Windowing, GPU resources, model loading, and the scene graph live in the
//! layers above this crate.

mod camera;
mod matrix3;
mod matrix4;
mod transform;
mod vector3;
mod vector4;

pub use camera::Camera;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use transform::Transform;
pub use vector3::Vector3;
pub use vector4::Vector4;
