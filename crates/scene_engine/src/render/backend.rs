//! Backend abstraction traits for render preparation
//!
//! The scene core never talks to a GPU or a physics engine directly. A host
//! implements [`GraphicsBackend`] (and optionally [`PhysicsBackend`]) and
//! hands it to the [`RenderManager`](super::RenderManager).

use super::lights::LightBuckets;
use crate::components::{ComponentMaterial, ComponentMesh, ComponentRigidbody, ShaderKind};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Matrix4x4, Vector3};
use crate::scene::SceneResult;

/// Graphics backend receiving the results of render preparation
pub trait GraphicsBackend {
    /// Upload the light buckets to a shader used during the frame
    fn set_lights_in_shader(&mut self, shader: ShaderKind, lights: &LightBuckets) -> SceneResult<()>;

    /// Bind the mesh and material of the next draw
    fn use_render_data(&mut self, node: NodeId, mesh: &ComponentMesh, material: &ComponentMaterial) -> SceneResult<()>;

    /// Draw the bound mesh
    ///
    /// `mtx_mesh_to_view` is a pooled scratch matrix; it is only valid for the
    /// duration of the call.
    fn draw_node(&mut self, node: NodeId, mtx_mesh_to_world: &Matrix4x4, mtx_mesh_to_view: &Matrix4x4) -> SceneResult<()>;
}

/// Pose of a physics body in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    /// World position
    pub translation: Vector3,
    /// World rotation in degrees
    pub rotation: Vector3,
}

/// Physics bridge consulted for nodes carrying a rigidbody
pub trait PhysicsBackend {
    /// Current pose of the body of a dynamic or static rigidbody
    ///
    /// `None` leaves the node's transform untouched.
    fn body_transform(&mut self, node: NodeId, rigidbody: &ComponentRigidbody) -> Option<BodyTransform>;

    /// Move the body of a kinematic rigidbody to `mtx_world`
    fn push_transform(&mut self, node: NodeId, rigidbody: &ComponentRigidbody, mtx_world: &Matrix4x4);
}
