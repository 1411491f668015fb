//! Handle types and arena collections for the scene graph

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node stored in a [`Graph`](crate::scene::Graph)
    pub struct NodeId;

    /// Stable handle to a component stored in a [`Graph`](crate::scene::Graph)
    pub struct ComponentId;
}

/// Arena of nodes keyed by [`NodeId`]
pub type NodeArena<T> = SlotMap<NodeId, T>;

/// Arena of components keyed by [`ComponentId`]
pub type ComponentArena<T> = SlotMap<ComponentId, T>;

/// Handle returned when registering an event listener
///
/// Ids are unique within the registry that issued them and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Get the raw id value
    pub fn raw(self) -> u64 {
        self.0
    }
}
