//! Event dispatch over the node hierarchy
//!
//! Dispatch only borrows the graph immutably: listeners observe the graph
//! state at the moment of dispatch but cannot edit it from inside a callback.
//! Listener lists are snapshotted per node before invocation.

use super::Graph;
use crate::events::{Event, EventPhase, EventTarget};
use crate::foundation::collections::NodeId;

impl Graph {
    /// Three-phase dispatch of `event` to `target`
    ///
    /// 1. Capture listeners of every ancestor, root first.
    /// 2. Capture, then bubble listeners of the target itself.
    /// 3. If the event bubbles, bubble listeners of every ancestor, parent first.
    ///
    /// A component target has a single listener list, invoked in step 2; its
    /// ancestors are its owner node and the owner's ancestors. Unknown targets
    /// are ignored.
    pub fn dispatch_event(&self, target: impl Into<EventTarget>, mut event: Event) {
        let target = target.into();
        event.set_target(target);

        let path: Vec<NodeId> = match target {
            EventTarget::Node(id) => self.ancestors(id).collect(),
            EventTarget::Component(id) => match self.component(id).and_then(|c| c.node()) {
                Some(owner) => std::iter::once(owner).chain(self.ancestors(owner)).collect(),
                None => Vec::new(),
            },
        };

        for &id in path.iter().rev() {
            if let Some(node) = self.nodes.get(id) {
                event.enter(EventPhase::Capture, Some(EventTarget::Node(id)));
                node.captures.invoke(&event);
            }
        }

        event.enter(EventPhase::AtTarget, Some(target));
        match target {
            EventTarget::Node(id) => {
                if let Some(node) = self.nodes.get(id) {
                    node.captures.invoke(&event);
                    node.listeners.invoke(&event);
                }
            }
            EventTarget::Component(id) => {
                if let Some(component) = self.components.get(id) {
                    component.listeners.invoke(&event);
                }
            }
        }

        if event.bubbles {
            for &id in &path {
                if let Some(node) = self.nodes.get(id) {
                    event.enter(EventPhase::Bubble, Some(EventTarget::Node(id)));
                    node.listeners.invoke(&event);
                }
            }
        }
        event.finish();
    }

    /// Deliver `event` to the target's own bubble-phase listeners only
    pub fn dispatch_event_to_target_only(&self, target: impl Into<EventTarget>, mut event: Event) {
        let target = target.into();
        event.set_target(target);
        event.enter(EventPhase::AtTarget, Some(target));
        match target {
            EventTarget::Node(id) => {
                if let Some(node) = self.nodes.get(id) {
                    node.listeners.invoke(&event);
                }
            }
            EventTarget::Component(id) => {
                if let Some(component) = self.components.get(id) {
                    component.listeners.invoke(&event);
                }
            }
        }
        event.finish();
    }

    /// Broadcast `event` into the branch rooted at `origin`
    ///
    /// Visits every node of the branch in pre-order, inactive ones included,
    /// and invokes capture listeners only.
    pub fn broadcast_event(&self, origin: NodeId, mut event: Event) {
        event.set_target(EventTarget::Node(origin));
        for id in self.iter(origin, false) {
            if let Some(node) = self.nodes.get(id) {
                event.enter(EventPhase::Capture, Some(EventTarget::Node(id)));
                node.captures.invoke(&event);
            }
        }
        event.finish();
    }
}
