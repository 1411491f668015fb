//! # Scene Engine
//!
//! The core of a scene-graph game engine: a node hierarchy with attachable
//! components, DOM-style event propagation, pooled math values and a
//! per-frame render preparation pass.
//!
//! ## Features
//!
//! - **Scene graph**: arena-backed nodes and components with typed ids
//! - **Events**: capture, target and bubble phases plus branch broadcasts
//! - **Pooled math**: column-major matrices with cached decomposition
//! - **Render preparation**: world matrices, light buckets, pick targets and
//!   alpha-sorted draw queues handed to a pluggable backend
//! - **Persistence**: serde serialization of whole branches (RON helpers)
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! # fn main() -> Result<(), SceneError> {
//! let mut graph = Graph::new();
//! let root = graph.create_node("root");
//! let ship = graph.create_node("ship");
//! graph.add_child(root, ship)?;
//!
//! let transform = graph.create_component(ComponentTransform::from_translation(Vector3::new(0.0, 0.0, 5.0)));
//! graph.attach(ship, transform)?;
//! assert_eq!(graph.get_path(ship), vec![root, ship]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod components;
pub mod config;
pub mod events;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        components::{
            Component, ComponentCamera, ComponentData, ComponentKind, ComponentLight, ComponentMaterial,
            ComponentMesh, ComponentPick, ComponentRigidbody, ComponentTransform, LightFactory, LightType,
            Material, MeshId, PhysicsType, PickLayers, PickType, ShaderKind,
        },
        config::{Config, ConfigError, RenderConfig, SceneConfig},
        events::{Event, EventBus, EventPhase, EventTarget, EventType},
        foundation::{
            collections::{ComponentId, NodeId},
            math::{Color, Matrix4x4, Vector3},
            pool::Recycler,
        },
        render::{GraphicsBackend, LightBuckets, PhysicsBackend, RenderManager},
        scene::{Graph, NodeMutator, NodeSerialization, SceneError, SceneResult},
    };
}
