//! Scene graph
//!
//! The [`Graph`] arena owns every [`Node`] and component of a scene. Nodes
//! form a tree; components attach to nodes and give them meaning (placement,
//! geometry, appearance, light, camera, picking, physics).
//!
//! ```
//! use scene_engine::components::{ComponentKind, ComponentTransform};
//! use scene_engine::foundation::math::Vector3;
//! use scene_engine::scene::Graph;
//!
//! let mut graph = Graph::new();
//! let root = graph.create_node("root");
//! let child = graph.create_node("child");
//! graph.add_child(root, child)?;
//!
//! let transform = graph.create_component(ComponentTransform::from_translation(Vector3::new(0.0, 1.0, 0.0)));
//! graph.attach(child, transform)?;
//! assert_eq!(graph.get_component(child, ComponentKind::Transform), Some(transform));
//! # Ok::<(), scene_engine::scene::SceneError>(())
//! ```

mod dispatch;
mod error;
mod graph;
mod iter;
mod mutator;
mod node;
mod serialization;

#[cfg(test)]
mod tests;

pub use error::{SceneError, SceneResult};
pub use graph::Graph;
pub use iter::BranchIter;
pub use mutator::{ComponentMutation, ComponentMutator, NodeMutator};
pub use node::{Node, TIMESTAMP_STALE};
pub use serialization::{ComponentSerialization, NodeSerialization};
