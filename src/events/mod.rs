//! Event system - In-process publish/subscribe.
//!
//! A dispatcher maps event names to ordered listener lists. Stateful
//! services (authentication, data sync, ...) hold one and expose it through
//! [`EventTarget`] so observers can subscribe to `"login"`, `"logout"`,
//! `"change"` and the like.
//!
//! ## Usage
//!
//! ```rust
//! use fluro::events::{create_dispatcher, listener, Bootstrap, EventDispatcher, EventTarget};
//! use serde_json::json;
//!
//! struct Auth {
//!     events: EventDispatcher,
//! }
//!
//! impl EventTarget for Auth {
//!     fn dispatcher(&self) -> &EventDispatcher {
//!         &self.events
//!     }
//! }
//!
//! impl Bootstrap for Auth {
//!     fn attach_dispatcher(&mut self, dispatcher: EventDispatcher) {
//!         self.events = dispatcher;
//!     }
//! }
//!
//! let dispatcher = create_dispatcher();
//! let mut auth = Auth { events: EventDispatcher::new() };
//! dispatcher.bootstrap(Some(&mut auth));
//!
//! auth.add_event_listener("login", listener(|details| {
//!     println!("logged in: {:?}", details);
//!     Ok(())
//! }));
//! dispatcher.dispatch("login", Some(&json!({"user": "jane"})));
//! ```

mod dispatcher;
mod target;

pub use dispatcher::{
    EventDispatcher, ErrorHook, Listener, ListenerFailure, create_dispatcher, listener,
};
pub use target::{Bootstrap, EventTarget};
