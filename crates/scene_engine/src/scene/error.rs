//! Scene graph errors

use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::MathError;

/// Result type for scene graph operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Scene graph errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The operation would create a cycle in the hierarchy
    #[error("Structural error: {0}")]
    Structural(String),

    /// A singleton component kind is already attached to the node
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// No node with this id exists in the graph
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// No component with this id exists, or it has the wrong kind
    #[error("Component not found: {0:?}")]
    ComponentNotFound(ComponentId),

    /// A camera must be attached to a node before it can be drawn from
    #[error("Camera {0:?} is not attached to a node")]
    CameraDetached(ComponentId),

    /// Math domain error
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error reported by a graphics or physics backend
    #[error("Backend error: {0}")]
    Backend(String),
}
