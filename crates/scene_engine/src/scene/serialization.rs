//! Persistence of branches
//!
//! A branch serializes into a nested [`NodeSerialization`]: the node's name
//! and active flag, its components grouped by kind, then its children. The
//! structure is plain serde data; [`NodeSerialization::to_ron`] and
//! [`NodeSerialization::from_ron`] cover the common text form.

use super::{Graph, SceneError, SceneResult};
use crate::components::{Component, ComponentData};
use crate::events::{Event, EventType};
use crate::foundation::collections::NodeId;
use log::debug;
use serde::{Deserialize, Serialize};

/// Serialized state of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSerialization {
    /// Active flag
    pub active: bool,
    /// Singleton flag
    pub singleton: bool,
    /// Payload
    pub data: ComponentData,
}

/// Serialized state of a node and its branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSerialization {
    /// Node name
    pub name: String,
    /// Active flag
    pub active: bool,
    /// Attached components, grouped by kind in attach order
    #[serde(default)]
    pub components: Vec<ComponentSerialization>,
    /// Children in order
    #[serde(default)]
    pub children: Vec<NodeSerialization>,
}

impl NodeSerialization {
    /// Pretty-printed RON text
    ///
    /// # Errors
    ///
    /// [`SceneError::Serialization`] if the encoder fails.
    pub fn to_ron(&self) -> SceneResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Serialization(e.to_string()))
    }

    /// Parse RON text
    ///
    /// # Errors
    ///
    /// [`SceneError::Serialization`] for malformed input.
    pub fn from_ron(text: &str) -> SceneResult<Self> {
        ron::from_str(text).map_err(|e| SceneError::Serialization(e.to_string()))
    }
}

impl Graph {
    /// Serialize the branch rooted at `node`
    ///
    /// Dispatches [`EventType::NodeSerialized`] on every serialized node.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for unknown ids.
    pub fn serialize(&self, node: NodeId) -> SceneResult<NodeSerialization> {
        let n = self.require_node(node)?;
        let components = self
            .get_all_components(node)
            .into_iter()
            .filter_map(|id| self.component(id))
            .map(|component| ComponentSerialization {
                active: component.is_active(),
                singleton: component.is_singleton(),
                data: component.data().clone(),
            })
            .collect();
        let children = n
            .children()
            .iter()
            .map(|&child| self.serialize(child))
            .collect::<SceneResult<Vec<_>>>()?;

        let serialization = NodeSerialization {
            name: n.name().to_string(),
            active: n.is_active(),
            components,
            children,
        };
        self.dispatch_event(node, Event::new(EventType::NodeSerialized));
        Ok(serialization)
    }

    /// Rebuild a detached branch from its serialization
    ///
    /// Components are restored before children. Dispatches
    /// [`EventType::NodeDeserialized`] on every rebuilt node once its branch
    /// is complete.
    ///
    /// # Errors
    ///
    /// [`SceneError::ConstraintViolation`] if the data lists two components of
    /// a singleton kind for one node. Nodes created before the failure are
    /// destroyed again.
    pub fn deserialize(&mut self, serialization: &NodeSerialization) -> SceneResult<NodeId> {
        let node = self.create_node(serialization.name.clone());
        if let Err(error) = self.restore(node, serialization) {
            self.destroy(node)?;
            return Err(error);
        }
        debug!(
            "Deserialized branch '{}' with {} nodes",
            serialization.name,
            self.iter(node, false).count()
        );
        Ok(node)
    }

    fn restore(&mut self, node: NodeId, serialization: &NodeSerialization) -> SceneResult<()> {
        for entry in &serialization.components {
            let mut component = Component::new(entry.data.clone()).with_singleton(entry.singleton);
            component.set_active(entry.active);
            let id = self.add_component(component);
            if let Err(error) = self.attach(node, id) {
                self.components.remove(id);
                return Err(error);
            }
        }

        for child_serialization in &serialization.children {
            let child = self.create_node(child_serialization.name.clone());
            self.add_child(node, child)?;
            self.restore(child, child_serialization)?;
        }

        if let Some(n) = self.node_mut(node) {
            n.active = serialization.active;
        }
        self.dispatch_event(node, Event::new(EventType::NodeDeserialized));
        Ok(())
    }
}
