//! Scene graph node

use crate::components::ComponentKind;
use crate::events::{EventType, Listener, ListenerRegistry};
use crate::foundation::collections::{ComponentId, ListenerId, NodeId};
use crate::foundation::math::Matrix4x4;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Timestamp value marking a node's cached world state as outdated
pub const TIMESTAMP_STALE: u64 = 0;

/// Entity in the scene hierarchy
///
/// Nodes are created and owned by a [`Graph`](super::Graph); the hierarchy
/// and component links are edited through the graph so both sides of every
/// link stay consistent.
pub struct Node {
    name: String,
    pub(crate) active: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) components: HashMap<ComponentKind, Vec<ComponentId>>,
    pub(crate) captures: ListenerRegistry,
    pub(crate) listeners: ListenerRegistry,
    mtx_world: Matrix4x4,
    pub(crate) timestamp_update: u64,
    world_inverse: RefCell<Option<(u64, Rc<Matrix4x4>)>>,
    pub(crate) n_nodes_in_branch: usize,
    pub(crate) radius: f32,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            parent: None,
            children: Vec::new(),
            components: HashMap::new(),
            captures: ListenerRegistry::new(),
            listeners: ListenerRegistry::new(),
            mtx_world: Matrix4x4::identity(),
            timestamp_update: TIMESTAMP_STALE,
            world_inverse: RefCell::new(None),
            n_nodes_in_branch: 0,
            radius: 0.0,
        }
    }

    /// Name of the node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the node
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the node itself is active; ancestors are not consulted
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Parent node, if any
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of children
    pub fn n_children(&self) -> usize {
        self.children.len()
    }

    /// World matrix as of the last render preparation that reached this node
    pub const fn mtx_world(&self) -> &Matrix4x4 {
        &self.mtx_world
    }

    /// Inverse of the world matrix
    ///
    /// Computed on the first read after the node's timestamp changed; later
    /// reads return the same shared instance until the next change.
    pub fn mtx_world_inverse(&self) -> Rc<Matrix4x4> {
        let mut cache = self.world_inverse.borrow_mut();
        if let Some((timestamp, inverse)) = cache.as_ref() {
            if *timestamp == self.timestamp_update {
                return Rc::clone(inverse);
            }
        }
        let inverse = Rc::new(Matrix4x4::inversion(&self.mtx_world));
        *cache = Some((self.timestamp_update, Rc::clone(&inverse)));
        inverse
    }

    /// Timestamp of the last render preparation that reached this node
    pub const fn timestamp_update(&self) -> u64 {
        self.timestamp_update
    }

    /// Whether the node was updated by the preparation pass with `timestamp`
    ///
    /// Always false for [`TIMESTAMP_STALE`], so nodes that were never prepared
    /// do not count as updated.
    pub const fn is_updated(&self, timestamp: u64) -> bool {
        timestamp != TIMESTAMP_STALE && self.timestamp_update == timestamp
    }

    /// Number of nodes in this branch as of the last preparation, itself included
    pub const fn n_nodes_in_branch(&self) -> usize {
        self.n_nodes_in_branch
    }

    /// Radius of a sphere around the node's origin enclosing its branch
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Kinds of the components attached to this node
    pub fn component_kinds(&self) -> Vec<ComponentKind> {
        let mut kinds: Vec<ComponentKind> = self.components.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Register a listener on this node
    ///
    /// Capture listeners run while an event travels down towards its target
    /// and during broadcasts; the others run at the target and while a
    /// bubbling event travels back up.
    pub fn add_event_listener(
        &mut self,
        event_type: EventType,
        listener: Listener,
        capture: bool,
    ) -> ListenerId {
        if capture {
            self.captures.add(event_type, listener)
        } else {
            self.listeners.add(event_type, listener)
        }
    }

    /// Remove a listener registered with [`add_event_listener`](Self::add_event_listener)
    pub fn remove_event_listener(&mut self, event_type: EventType, id: ListenerId, capture: bool) -> bool {
        if capture {
            self.captures.remove(event_type, id)
        } else {
            self.listeners.remove(event_type, id)
        }
    }

    pub(crate) fn set_mtx_world(&mut self, mtx_world: &Matrix4x4, timestamp: u64) {
        self.mtx_world.set(mtx_world);
        self.timestamp_update = timestamp;
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("components", &self.component_kinds())
            .field("timestamp_update", &self.timestamp_update)
            .finish_non_exhaustive()
    }
}
