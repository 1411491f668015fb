//! Mesh component

use crate::foundation::math::Matrix4x4;
use serde::{Deserialize, Serialize};

/// Handle to mesh data owned by the graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MeshId(pub u32);

/// Renders a mesh at the node's position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMesh {
    /// Mesh to render
    pub mesh: MeshId,
    /// Offset of the mesh relative to its node
    pub mtx_pivot: Matrix4x4,
    /// Mesh-to-world matrix, written by render preparation
    #[serde(skip)]
    pub mtx_world: Matrix4x4,
}

impl ComponentMesh {
    /// Create a mesh component with an identity pivot
    pub fn new(mesh: MeshId) -> Self {
        Self {
            mesh,
            ..Self::default()
        }
    }

    /// Set the pivot (builder pattern)
    pub fn with_pivot(mut self, mtx_pivot: Matrix4x4) -> Self {
        self.mtx_pivot = mtx_pivot;
        self
    }
}
