//! Event system for the scene graph
//!
//! Events travel through the node hierarchy in three phases, the way DOM
//! events do:
//!
//! ```text
//!  root ── capture ──▶ parent ── capture ──▶ target
//!                                              │ capture listeners, then
//!                                              │ bubble listeners
//!  root ◀── bubble ── parent ◀── bubble ───────┘ (only if `bubbles`)
//! ```
//!
//! Broadcasts walk a branch in pre-order and reach capture listeners only.
//! The dispatch algorithms live on [`Graph`](crate::scene::Graph) since they
//! need the hierarchy; this module holds the event value, the listener
//! registries and the static [`EventBus`].

mod bus;
mod registry;

pub use bus::EventBus;
pub use registry::{Listener, ListenerRegistry};

use crate::foundation::collections::{ComponentId, NodeId};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A node was appended to a parent
    ChildAppend,
    /// A node is about to be removed from its parent
    ChildRemove,
    /// A component was attached to a node
    ComponentAdd,
    /// A component is about to be detached from its node
    ComponentRemove,
    /// A component was activated
    ComponentActivate,
    /// A component was deactivated
    ComponentDeactivate,
    /// A node or one of its ancestors was activated
    NodeActivate,
    /// A node or one of its ancestors was deactivated
    NodeDeactivate,
    /// A node finished serializing
    NodeSerialized,
    /// A node finished deserializing
    NodeDeserialized,
    /// Render preparation is about to walk a branch
    RenderPrepareStart,
    /// Render preparation finished walking a branch
    RenderPrepareEnd,
    /// A node joined the branch the audio system listens to
    AudioChildAppend,
    /// A node left the branch the audio system listens to
    AudioChildRemove,
    /// Application defined event
    Custom(&'static str),
}

/// Propagation phase an event is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventPhase {
    /// Not being dispatched
    #[default]
    None,
    /// Travelling from the root towards the target
    Capture,
    /// At the target itself
    AtTarget,
    /// Travelling from the target back towards the root
    Bubble,
}

/// Anything that can be the target of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// A node in the graph
    Node(NodeId),
    /// A component in the graph
    Component(ComponentId),
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<ComponentId> for EventTarget {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

/// Event travelling through the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Whether the event continues to the ancestors after the target
    pub bubbles: bool,
    /// Component the event is about, for component lifecycle events
    pub component: Option<ComponentId>,
    phase: EventPhase,
    target: Option<EventTarget>,
    current_target: Option<EventTarget>,
}

impl Event {
    /// Create a new event that stays at its target
    pub const fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            bubbles: false,
            component: None,
            phase: EventPhase::None,
            target: None,
            current_target: None,
        }
    }

    /// Create a new event that bubbles back up to the root
    pub const fn bubbling(event_type: EventType) -> Self {
        Self {
            bubbles: true,
            ..Self::new(event_type)
        }
    }

    /// Set the component this event is about (builder pattern)
    pub fn with_component(mut self, component: ComponentId) -> Self {
        self.component = Some(component);
        self
    }

    /// Current propagation phase
    pub const fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Object the event was dispatched to
    pub const fn target(&self) -> Option<EventTarget> {
        self.target
    }

    /// Object whose listeners are currently being invoked
    pub const fn current_target(&self) -> Option<EventTarget> {
        self.current_target
    }

    /// Node the event was dispatched to, if the target is a node
    pub const fn target_node(&self) -> Option<NodeId> {
        match self.target {
            Some(EventTarget::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn set_target(&mut self, target: EventTarget) {
        self.target = Some(target);
    }

    pub(crate) fn enter(&mut self, phase: EventPhase, current: Option<EventTarget>) {
        self.phase = phase;
        self.current_target = current;
    }

    pub(crate) fn finish(&mut self) {
        self.phase = EventPhase::None;
        self.current_target = None;
    }
}
