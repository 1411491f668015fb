//! Per-object listener registries

use super::{Event, EventType};
use crate::foundation::collections::ListenerId;
use std::collections::HashMap;
use std::rc::Rc;

/// Event listener callback
///
/// Listeners observe events; they get no access to the graph that dispatched
/// the event.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Listeners of one object, grouped by event type
#[derive(Default, Clone)]
pub struct ListenerRegistry {
    listeners: HashMap<EventType, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning the handle needed to remove it
    pub fn add(&mut self, event_type: EventType, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event_type)
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn remove(&mut self, event_type: EventType, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&event_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(&event_type);
        }
        removed
    }

    /// Whether any listener is registered for `event_type`
    pub fn has(&self, event_type: EventType) -> bool {
        self.listeners.contains_key(&event_type)
    }

    /// Snapshot of the listeners for `event_type`, in registration order
    pub fn snapshot(&self, event_type: EventType) -> Vec<Listener> {
        self.listeners
            .get(&event_type)
            .map(|list| list.iter().map(|(_, listener)| Rc::clone(listener)).collect())
            .unwrap_or_default()
    }

    /// Invoke every listener for the event's type
    pub fn invoke(&self, event: &Event) {
        for listener in self.snapshot(event.event_type) {
            listener(event);
        }
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("types", &self.listeners.keys().collect::<Vec<_>>())
            .field("listeners", &self.len())
            .finish()
    }
}
