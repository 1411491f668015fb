//! Process-wide event bus
//!
//! Independent of any node: code that has no place in the hierarchy, such as
//! a render loop or an input layer, talks through the bus. Like the rest of
//! the scene core it is single threaded, so each thread sees its own bus.

use super::{Event, EventPhase, EventType, Listener, ListenerRegistry};
use crate::foundation::collections::ListenerId;
use std::cell::RefCell;

thread_local! {
    static BUS: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

/// Static event bus
pub struct EventBus;

impl EventBus {
    /// Register a listener on the bus
    pub fn add_listener(event_type: EventType, listener: Listener) -> ListenerId {
        BUS.with(|bus| bus.borrow_mut().add(event_type, listener))
    }

    /// Remove a listener from the bus; returns whether it was registered
    pub fn remove_listener(event_type: EventType, id: ListenerId) -> bool {
        BUS.with(|bus| bus.borrow_mut().remove(event_type, id))
    }

    /// Deliver an event to every bus listener of its type
    ///
    /// Listeners may register or remove bus listeners while being invoked;
    /// changes take effect from the next dispatch.
    pub fn dispatch(mut event: Event) {
        let listeners = BUS.with(|bus| bus.borrow().snapshot(event.event_type));
        event.enter(EventPhase::AtTarget, None);
        for listener in listeners {
            listener(&event);
        }
    }

    /// Remove every bus listener
    pub fn clear() {
        BUS.with(|bus| bus.borrow_mut().clear());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_bus_dispatch_and_remove() {
        EventBus::clear();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let id = EventBus::add_listener(
            EventType::Custom("frame"),
            Rc::new(move |event: &Event| sink.borrow_mut().push(event.phase())),
        );

        EventBus::dispatch(Event::new(EventType::Custom("frame")));
        EventBus::dispatch(Event::new(EventType::Custom("other")));
        assert_eq!(*hits.borrow(), vec![EventPhase::AtTarget]);

        assert!(EventBus::remove_listener(EventType::Custom("frame"), id));
        EventBus::dispatch(Event::new(EventType::Custom("frame")));
        assert_eq!(hits.borrow().len(), 1);
    }

    #[test]
    fn test_listener_may_register_during_dispatch() {
        EventBus::clear();
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        EventBus::add_listener(
            EventType::Custom("nested"),
            Rc::new(move |_: &Event| {
                *sink.borrow_mut() += 1;
                let inner = Rc::clone(&sink);
                EventBus::add_listener(
                    EventType::Custom("nested"),
                    Rc::new(move |_: &Event| *inner.borrow_mut() += 10),
                );
            }),
        );

        EventBus::dispatch(Event::new(EventType::Custom("nested")));
        assert_eq!(*hits.borrow(), 1);
        EventBus::clear();
    }
}
