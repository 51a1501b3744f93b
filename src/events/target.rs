//! Event capability for host services.
//!
//! A service gains pub/sub by holding an [`EventDispatcher`] field and
//! implementing [`EventTarget`] (read access) and [`Bootstrap`] (receiving a
//! shared dispatcher handle). The listener state stays owned by the
//! dispatcher; the host only delegates.

use serde_json::Value;

use super::{EventDispatcher, Listener};

/// Something that can dispatch events and be listened to.
///
/// Implementors only provide [`dispatcher`](Self::dispatcher); every other
/// method forwards to it.
pub trait EventTarget<P = Value> {
    /// The dispatcher backing this target.
    fn dispatcher(&self) -> &EventDispatcher<P>;

    /// Invoke every listener registered for `event`.
    fn dispatch(&self, event: &str, details: Option<&P>) {
        self.dispatcher().dispatch(event, details);
    }

    /// Register `listener` for `event`; duplicates are ignored.
    fn add_event_listener(&self, event: &str, listener: Listener<P>) {
        self.dispatcher().add_event_listener(event, listener);
    }

    /// Unregister `listener` from `event`, if present.
    fn remove_event_listener(&self, event: &str, listener: &Listener<P>) {
        self.dispatcher().remove_event_listener(event, listener);
    }

    /// Drop every listener for every event.
    fn remove_all_listeners(&self) {
        self.dispatcher().remove_all_listeners();
    }
}

/// A host that can adopt an existing dispatcher's listener state.
pub trait Bootstrap<P = Value> {
    /// Store `dispatcher` as the host's backing dispatcher.
    fn attach_dispatcher(&mut self, dispatcher: EventDispatcher<P>);
}

impl<P> EventTarget<P> for EventDispatcher<P> {
    fn dispatcher(&self) -> &EventDispatcher<P> {
        self
    }
}
