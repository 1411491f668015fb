//! Arena owning every node and component of a scene
//!
//! Ownership is parent-owns-children and node-owns-its-components, expressed
//! through the arena: [`Graph::destroy`] removes a node, its branch and every
//! component attached in it. Back-references (`Node::parent`,
//! `Component::node`) are plain ids.

use super::iter::BranchIter;
use super::node::{Node, TIMESTAMP_STALE};
use super::{SceneError, SceneResult};
use crate::components::{Component, ComponentData, ComponentKind, ComponentType};
use crate::events::{Event, EventType};
use crate::foundation::collections::{ComponentArena, ComponentId, NodeArena, NodeId};
use log::{debug, trace, warn};
use std::fmt::Write;

/// Scene graph: hierarchy of nodes with attached components
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) nodes: NodeArena<Node>,
    pub(crate) components: ComponentArena<Component>,
    audio_listened: Option<NodeId>,
    timestamp: u64,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // Nodes

    /// Create a detached, active node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.nodes.insert(Node::new(name));
        trace!("Created node {:?}", id);
        id
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably, e.g. to register listeners
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether `id` names a live node
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn require_node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    pub(crate) fn require_node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    // Hierarchy

    /// Append `child` to `parent`'s children
    ///
    /// A child that already belongs to another parent is removed from it
    /// first. Appending a node that is already a child of `parent` does
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`SceneError::Structural`] if `child` is `parent` or one of its
    /// ancestors; the graph is left unchanged.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.insert_child(parent, child, None)
    }

    /// Insert `child` among `parent`'s children at `index`, see [`add_child`](Self::add_child)
    ///
    /// An index past the end appends.
    ///
    /// # Errors
    ///
    /// [`SceneError::Structural`] on cycles, [`SceneError::NodeNotFound`] for
    /// unknown ids.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> SceneResult<()> {
        self.require_node(child)?;
        if self.require_node(parent)?.children.contains(&child) {
            return Ok(());
        }
        self.check_no_cycle(parent, child)?;

        if let Some(previous) = self.nodes[child].parent {
            self.remove_child(previous, child)?;
        }

        let siblings = &mut self.require_node_mut(parent)?.children;
        let index = index.map_or(siblings.len(), |i| i.min(siblings.len()));
        siblings.insert(index, child);
        self.nodes[child].parent = Some(parent);

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            let node = &mut self.nodes[id];
            node.timestamp_update = TIMESTAMP_STALE;
            ancestor = node.parent;
        }

        debug!("Appended node {:?} to {:?}", child, parent);
        self.dispatch_event(child, Event::bubbling(EventType::ChildAppend));
        if self.is_in_audio_branch(child) {
            self.broadcast_event(child, Event::new(EventType::AudioChildAppend));
        }
        Ok(())
    }

    fn check_no_cycle(&self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                warn!("Refused to append {:?} below its own descendant {:?}", child, parent);
                return Err(SceneError::Structural(format!(
                    "node {child:?} is {parent:?} or one of its ancestors"
                )));
            }
            ancestor = self.nodes.get(id).and_then(|node| node.parent);
        }
        Ok(())
    }

    /// Remove `child` from `parent`'s children
    ///
    /// Does nothing if `child` is not a child of `parent`. Otherwise a
    /// bubbling [`EventType::ChildRemove`] is dispatched on `child` and
    /// [`EventType::NodeDeactivate`] is broadcast into its branch while it is
    /// still attached.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `parent` does not exist.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let Some(index) = self.find_child(parent, child)? else {
            return Ok(());
        };

        self.dispatch_event(child, Event::bubbling(EventType::ChildRemove));
        self.broadcast_event(child, Event::new(EventType::NodeDeactivate));
        if self.is_in_audio_branch(child) {
            self.broadcast_event(child, Event::new(EventType::AudioChildRemove));
        }

        self.nodes[parent].children.remove(index);
        self.nodes[child].parent = None;
        debug!("Removed node {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Replace the child `old` with `new`, keeping its position
    ///
    /// Returns `false` and changes nothing if `old` is not a child of `parent`.
    ///
    /// # Errors
    ///
    /// [`SceneError::Structural`] if `new` is `parent` or one of its ancestors.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> SceneResult<bool> {
        self.require_node(new)?;
        if self.find_child(parent, old)?.is_none() {
            return Ok(false);
        }
        if old == new {
            return Ok(true);
        }
        self.check_no_cycle(parent, new)?;

        if let Some(previous) = self.nodes[new].parent {
            self.remove_child(previous, new)?;
        }
        let index = self.find_child(parent, old)?;
        self.remove_child(parent, old)?;
        self.insert_child(parent, new, index)?;
        Ok(true)
    }

    /// Remove every child of `parent`
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `parent` does not exist.
    pub fn remove_all_children(&mut self, parent: NodeId) -> SceneResult<()> {
        let children = self.require_node(parent)?.children.clone();
        for child in children {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// Position of `child` among `parent`'s children
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `parent` does not exist.
    pub fn find_child(&self, parent: NodeId, child: NodeId) -> SceneResult<Option<usize>> {
        Ok(self
            .require_node(parent)?
            .children
            .iter()
            .position(|&id| id == child))
    }

    /// Parent of `node`
    pub fn get_parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(Node::parent)
    }

    /// Children of `node`, empty for unknown ids
    pub fn get_children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Child at `index`
    pub fn get_child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(node)?.children.get(index).copied()
    }

    /// Children of `node` with the given name
    pub fn get_children_by_name(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|&child| self.nodes.get(child).is_some_and(|c| c.name() == name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of children of `node`
    pub fn n_children(&self, node: NodeId) -> usize {
        self.nodes.get(node).map_or(0, Node::n_children)
    }

    /// Root of the tree `node` belongs to
    pub fn get_ancestor(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.get_parent(current) {
            current = parent;
        }
        current
    }

    /// Nodes from the root down to `node`, both included
    pub fn get_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        path.extend(self.ancestors(node));
        path.reverse();
        path
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|id| id == ancestor)
    }

    /// Ancestors of `node`, from its parent up to the root
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get_parent(node), move |&id| self.get_parent(id))
    }

    /// Activate or deactivate `node`
    ///
    /// Broadcasts [`EventType::NodeActivate`] or [`EventType::NodeDeactivate`]
    /// into the node's branch.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for unknown ids.
    pub fn activate(&mut self, node: NodeId, on: bool) -> SceneResult<()> {
        self.require_node_mut(node)?.active = on;
        let event_type = if on {
            EventType::NodeActivate
        } else {
            EventType::NodeDeactivate
        };
        self.broadcast_event(node, Event::new(event_type));
        Ok(())
    }

    /// Remove `node`, its branch and all their components from the graph
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for unknown ids.
    pub fn destroy(&mut self, node: NodeId) -> SceneResult<()> {
        if let Some(parent) = self.require_node(node)?.parent {
            self.remove_child(parent, node)?;
        }
        let branch: Vec<NodeId> = self.iter(node, false).collect();
        for id in branch {
            if let Some(removed) = self.nodes.remove(id) {
                for component in removed.components.into_values().flatten() {
                    self.components.remove(component);
                }
            }
        }
        if self.audio_listened.is_some_and(|root| !self.nodes.contains_key(root)) {
            self.audio_listened = None;
        }
        debug!("Destroyed branch rooted at {:?}", node);
        Ok(())
    }

    /// Pre-order iteration over the branch rooted at `root`
    ///
    /// With `active_only`, inactive nodes are skipped together with their
    /// whole branch.
    pub fn iter(&self, root: NodeId, active_only: bool) -> BranchIter<'_> {
        BranchIter::new(self, root, active_only)
    }

    // Components

    /// Store a detached component in the graph
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.components.insert(component)
    }

    /// Store a detached component built from its payload
    pub fn create_component(&mut self, data: impl Into<ComponentData>) -> ComponentId {
        self.add_component(Component::new(data))
    }

    /// Look up a component
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Look up a component mutably
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Typed payload of a component
    pub fn component_data<T: ComponentType>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)?.get()
    }

    /// Typed payload of a component, mutable
    pub fn component_data_mut<T: ComponentType>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)?.get_mut()
    }

    /// Components of `kind` attached to `node`, in attach order
    pub fn get_components(&self, node: NodeId, kind: ComponentKind) -> Vec<ComponentId> {
        self.nodes
            .get(node)
            .and_then(|n| n.components.get(&kind))
            .cloned()
            .unwrap_or_default()
    }

    /// First component of `kind` attached to `node`
    pub fn get_component(&self, node: NodeId, kind: ComponentKind) -> Option<ComponentId> {
        self.nodes
            .get(node)?
            .components
            .get(&kind)?
            .first()
            .copied()
    }

    /// Every component attached to `node`, grouped by kind
    pub fn get_all_components(&self, node: NodeId) -> Vec<ComponentId> {
        let Some(n) = self.nodes.get(node) else {
            return Vec::new();
        };
        n.component_kinds()
            .into_iter()
            .filter_map(|kind| n.components.get(&kind))
            .flatten()
            .copied()
            .collect()
    }

    /// First component of type `T` on `node`, if it is active
    pub fn active_component<T: ComponentType>(&self, node: NodeId) -> Option<(ComponentId, &T)> {
        let id = self.get_component(node, T::KIND)?;
        let component = self.components.get(id)?;
        if !component.is_active() {
            return None;
        }
        component.get().map(|data| (id, data))
    }

    /// Attach `component` to `node`
    ///
    /// A component attached elsewhere is detached first. Attaching to its
    /// current node does nothing. On success a bubbling
    /// [`EventType::ComponentAdd`] is dispatched on the component.
    ///
    /// # Errors
    ///
    /// [`SceneError::ConstraintViolation`] if the component is a singleton and
    /// `node` already holds one of its kind, or if `node` holds a singleton of
    /// that kind; nothing changes.
    pub fn attach(&mut self, node: NodeId, component: ComponentId) -> SceneResult<()> {
        self.require_node(node)?;
        let cmp = self
            .components
            .get(component)
            .ok_or(SceneError::ComponentNotFound(component))?;
        if cmp.node == Some(node) {
            return Ok(());
        }

        let kind = cmp.kind();
        let held = self.nodes[node].components.get(&kind).map_or(&[][..], Vec::as_slice);
        let held_singleton = held
            .iter()
            .any(|&id| self.components.get(id).is_some_and(Component::is_singleton));
        if (cmp.is_singleton() && !held.is_empty()) || held_singleton {
            warn!("Refused second {} on node {:?}", kind, node);
            return Err(SceneError::ConstraintViolation(format!(
                "node {node:?} already holds a {kind}"
            )));
        }

        self.detach(component)?;

        self.nodes[node]
            .components
            .entry(kind)
            .or_default()
            .push(component);
        self.components[component].node = Some(node);

        trace!("Attached {} {:?} to {:?}", kind, component, node);
        self.dispatch_event(
            component,
            Event::bubbling(EventType::ComponentAdd).with_component(component),
        );
        Ok(())
    }

    /// Detach `component` from its node; does nothing if it is detached
    ///
    /// A bubbling [`EventType::ComponentRemove`] is dispatched while the
    /// component is still attached.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] for unknown ids.
    pub fn detach(&mut self, component: ComponentId) -> SceneResult<()> {
        let cmp = self
            .components
            .get(component)
            .ok_or(SceneError::ComponentNotFound(component))?;
        let Some(node) = cmp.node else {
            return Ok(());
        };
        let kind = cmp.kind();

        self.dispatch_event(
            component,
            Event::bubbling(EventType::ComponentRemove).with_component(component),
        );

        if let Some(owner) = self.nodes.get_mut(node) {
            if let Some(list) = owner.components.get_mut(&kind) {
                list.retain(|&id| id != component);
                if list.is_empty() {
                    owner.components.remove(&kind);
                }
            }
        }
        self.components[component].node = None;
        trace!("Detached {} {:?} from {:?}", kind, component, node);
        Ok(())
    }

    /// Activate or deactivate a component
    ///
    /// Dispatches [`EventType::ComponentActivate`] or
    /// [`EventType::ComponentDeactivate`] on the component.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] for unknown ids.
    pub fn activate_component(&mut self, component: ComponentId, on: bool) -> SceneResult<()> {
        self.components
            .get_mut(component)
            .ok_or(SceneError::ComponentNotFound(component))?
            .set_active(on);
        let event_type = if on {
            EventType::ComponentActivate
        } else {
            EventType::ComponentDeactivate
        };
        self.dispatch_event(component, Event::new(event_type).with_component(component));
        Ok(())
    }

    // Frame state

    /// Timestamp of the most recent render preparation
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Advance the frame timestamp; called once per preparation pass
    pub(crate) fn next_timestamp(&mut self) -> u64 {
        self.timestamp += 1;
        self.timestamp
    }

    // Audio

    /// Set the branch the audio system listens to
    ///
    /// Nodes appended into or removed from this branch receive
    /// [`EventType::AudioChildAppend`] / [`EventType::AudioChildRemove`]
    /// broadcasts.
    pub fn set_audio_listened(&mut self, root: Option<NodeId>) {
        self.audio_listened = root;
    }

    /// Branch the audio system listens to
    pub const fn audio_listened(&self) -> Option<NodeId> {
        self.audio_listened
    }

    fn is_in_audio_branch(&self, node: NodeId) -> bool {
        self.audio_listened
            .is_some_and(|root| self.is_descendant_of(node, root))
    }

    // Diagnostics

    /// Indented outline of the branch rooted at `node`
    pub fn to_hierarchy_string(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_hierarchy(&mut out, node, 0);
        out
    }

    fn write_hierarchy(&self, out: &mut String, node: NodeId, level: usize) {
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        let kinds: Vec<&str> = n.component_kinds().iter().map(|kind| kind.name()).collect();
        let _ = write!(out, "{}{}", "  ".repeat(level), n.name());
        if !kinds.is_empty() {
            let _ = write!(out, " [{}]", kinds.join(", "));
        }
        if !n.is_active() {
            out.push_str(" (inactive)");
        }
        out.push('\n');
        for &child in &n.children {
            self.write_hierarchy(out, child, level + 1);
        }
    }
}
