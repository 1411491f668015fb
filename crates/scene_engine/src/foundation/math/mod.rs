//! Pooled math values
//!
//! Small fixed-size vectors and matrices used by the scene graph. All of them
//! are [`Recyclable`](crate::foundation::pool::Recyclable) so hot paths can take
//! scratch instances from the [`Recycler`](crate::foundation::pool::Recycler).
//!
//! ## Conventions
//!
//! - Column vectors, column-major storage: element `col * N + row`
//! - [`Matrix4x4`] keeps its translation in elements 12, 13 and 14
//! - `Matrix4x4::multiplication(a, b)` is `a × b`, so a world matrix is
//!   `parent_world × local`
//! - Right-multiplying appends an operation in local space, left-multiplying
//!   appends it in parent space
//! - Angles are in degrees everywhere in the public API
//!
//! Conversions to and from `nalgebra` types exist for backend interop.

mod color;
mod matrix3x3;
mod matrix4x4;
mod vector2;
mod vector3;

pub use color::Color;
pub use matrix3x3::Matrix3x3;
pub use matrix4x4::{FieldOfView, Matrix4x4};
pub use vector2::Vector2;
pub use vector3::Vector3;

/// Errors raised by math operations with a restricted domain
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A zero-length vector cannot be normalized
    #[error("Cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Length below which a vector counts as zero for normalization
pub const LENGTH_EPSILON: f32 = 1e-12;
