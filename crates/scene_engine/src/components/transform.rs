//! Local transform component

use crate::foundation::math::{Matrix4x4, Vector3};
use serde::{Deserialize, Serialize};

/// Placement of a node relative to its parent
///
/// The render preparation pass multiplies the parent's world matrix with
/// `mtx_local` to obtain the node's world matrix. A node without an active
/// transform inherits its parent's world matrix unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTransform {
    /// Transform relative to the parent node
    pub mtx_local: Matrix4x4,
}

impl ComponentTransform {
    /// Create a transform component from a local matrix
    pub const fn new(mtx_local: Matrix4x4) -> Self {
        Self { mtx_local }
    }

    /// Transform that only translates
    pub fn from_translation(translation: Vector3) -> Self {
        Self::new(Matrix4x4::translation(translation))
    }
}
