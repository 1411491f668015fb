//! Rigidbody component

use crate::foundation::math::Matrix4x4;
use serde::{Deserialize, Serialize};

/// How the physics backend treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhysicsType {
    /// Simulated; the backend drives the node's transform
    #[default]
    Dynamic,
    /// Immovable; the backend reports its fixed transform
    Static,
    /// Driven by the scene; the node's transform is pushed to the backend
    Kinematic,
}

/// Couples a node to a body in the physics backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRigidbody {
    /// Simulation mode
    pub physics_type: PhysicsType,
    /// Mass in kilograms
    pub mass: f32,
    /// Offset of the body relative to its node
    pub mtx_pivot: Matrix4x4,
}

impl ComponentRigidbody {
    /// Create a body with unit mass
    pub fn new(physics_type: PhysicsType) -> Self {
        Self {
            physics_type,
            mass: 1.0,
            mtx_pivot: Matrix4x4::identity(),
        }
    }

    /// Whether the scene drives this body
    pub fn is_kinematic(&self) -> bool {
        self.physics_type == PhysicsType::Kinematic
    }
}

impl Default for ComponentRigidbody {
    fn default() -> Self {
        Self::new(PhysicsType::default())
    }
}
