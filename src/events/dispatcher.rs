//! Publish/subscribe dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use super::Bootstrap;

/// A registered callback. Identity is the `Arc` pointer: registering a clone
/// of the same `Arc` twice for one event is a no-op.
pub type Listener<P = Value> = Arc<dyn Fn(Option<&P>) -> anyhow::Result<()> + Send + Sync>;

/// Receives every listener failure during dispatch.
pub type ErrorHook = Arc<dyn Fn(&ListenerFailure) + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<P, F>(f: F) -> Listener<P>
where
    F: Fn(Option<&P>) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Create a dispatcher with its own, empty listener state.
pub fn create_dispatcher<P>() -> EventDispatcher<P> {
    EventDispatcher::new()
}

/// A listener returned an error during dispatch.
#[derive(Debug, Error)]
#[error("listener #{position} for event '{event}' failed: {error:#}")]
pub struct ListenerFailure {
    /// Event being dispatched.
    pub event: String,
    /// Registration position of the failing listener.
    pub position: usize,
    /// Error returned by the listener.
    pub error: anyhow::Error,
}

type ListenerMap<P> = HashMap<String, Vec<Listener<P>>>;

/// Maps event names to ordered listener lists and invokes them on dispatch.
///
/// `new()` always starts from empty state. `clone()` returns another handle
/// to the same state; that is how [`bootstrap`](Self::bootstrap) shares
/// listeners with a host.
///
/// ## Failure policy
///
/// Dispatch is catch-and-continue: a listener returning `Err` is logged,
/// passed to the error hook if one is set, and the remaining listeners still
/// run. Panics are not caught and propagate to the caller of `dispatch`.
pub struct EventDispatcher<P = Value> {
    listeners: Arc<RwLock<ListenerMap<P>>>,
    error_hook: Arc<RwLock<Option<ErrorHook>>>,
}

// Manual Clone implementation that doesn't require P: Clone
impl<P> Clone for EventDispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            error_hook: Arc::clone(&self.error_hook),
        }
    }
}

impl<P> Default for EventDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventDispatcher<P> {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(HashMap::new())),
            error_hook: Arc::new(RwLock::new(None)),
        }
    }

    /// Register `listener` for `event`.
    ///
    /// Registering the same listener twice for the same event does nothing.
    pub fn add_event_listener(&self, event: &str, listener: Listener<P>) {
        let mut listeners = self.listeners.write();
        let registered = listeners.entry(event.to_string()).or_default();

        if registered.iter().any(|existing| Arc::ptr_eq(existing, &listener)) {
            debug!("Listener already registered for event: {}", event);
            return;
        }

        registered.push(listener);
        debug!("Added listener for event: {} ({} total)", event, registered.len());
    }

    /// Unregister `listener` from `event`. Unknown events and listeners are ignored.
    pub fn remove_event_listener(&self, event: &str, listener: &Listener<P>) {
        let mut listeners = self.listeners.write();
        let Some(registered) = listeners.get_mut(event) else {
            return;
        };

        if let Some(index) = registered.iter().position(|existing| Arc::ptr_eq(existing, listener)) {
            registered.remove(index);
            debug!("Removed listener for event: {}", event);
        }

        if registered.is_empty() {
            listeners.remove(event);
        }
    }

    /// Drop every listener for every event. The dispatcher stays usable.
    pub fn remove_all_listeners(&self) {
        self.listeners.write().clear();
        debug!("Removed all listeners");
    }

    /// Invoke every listener registered for `event`, in registration order.
    ///
    /// Listeners see the registrations as they were when dispatch started;
    /// a listener may add or remove listeners (or dispatch again) without
    /// deadlocking, and such changes apply from the next dispatch.
    pub fn dispatch(&self, event: &str, details: Option<&P>) {
        let snapshot: Vec<Listener<P>> = match self.listeners.read().get(event) {
            Some(registered) => registered.clone(),
            None => return,
        };
        let hook = self.error_hook.read().clone();

        for (position, listener) in snapshot.iter().enumerate() {
            if let Err(e) = listener(details) {
                let failure = ListenerFailure {
                    event: event.to_string(),
                    position,
                    error: e,
                };
                error!("{}", failure);

                if let Some(hook) = &hook {
                    hook(&failure);
                }
            }
        }
    }

    /// Give `host` a handle to this dispatcher's listener state.
    ///
    /// After this, listeners added through the host are seen by this
    /// dispatcher and vice versa. `None` is ignored.
    pub fn bootstrap<H>(&self, host: Option<&mut H>)
    where
        H: Bootstrap<P> + ?Sized,
    {
        match host {
            Some(host) => host.attach_dispatcher(self.clone()),
            None => debug!("No host to bootstrap dispatcher onto"),
        }
    }

    /// Report listener failures to `hook` in addition to the log.
    pub fn set_error_hook<F>(&self, hook: F)
    where
        F: Fn(&ListenerFailure) + Send + Sync + 'static,
    {
        *self.error_hook.write() = Some(Arc::new(hook));
    }

    /// Remove the error hook. Failures are still logged.
    pub fn clear_error_hook(&self) {
        *self.error_hook.write() = None;
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }

    /// Check if `event` has at least one listener.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Names of all events with listeners.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners
            .read()
            .iter()
            .filter(|(_, registered)| !registered.is_empty())
            .map(|(event, _)| event.clone())
            .collect()
    }
}

impl<P> std::fmt::Debug for EventDispatcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read();
        f.debug_struct("EventDispatcher")
            .field("events", &listeners.keys().collect::<Vec<_>>())
            .field("has_error_hook", &self.error_hook.read().is_some())
            .finish()
    }
}
