//! Switchboard: synchronous in-process events
//!
//! A listener registry ([`Emitter`]) that maps event names to ordered
//! callbacks and dispatches to them synchronously, plus a [`Router`] that
//! namespaces emitters into channels addressed as `"channel:event"`.
//!
//! ```rust
//! use switchboard::prelude::*;
//!
//! let router = Router::<String>::default();
//! router.on("chat:message", callback(|ev| {
//!     println!("{}: {:?}", ev.name(), ev.args());
//!     Ok(())
//! }), None);
//! router.emit("chat:message", &["hello".to_string()])?;
//! # Ok::<(), switchboard::Error>(())
//! ```
//!
//! Everything runs on the caller's thread; listeners may register, remove
//! and trigger events while being dispatched. See `demos/` for runnable
//! programs.

mod config;
mod context;
mod emitter;
mod error;
mod event;
mod event_names;
mod events;
mod handle;
mod listener_id;
mod router;

mod internal;

pub mod introspection;

pub use config::{CHANNEL_REMOVAL_PREFIX, CHANNEL_SPLITTER, Config, DEFAULT_CHANNEL};
pub use context::{Context, Target, context};
pub use emitter::{ALL_EVENTS, Emitter};
pub use error::Error;
pub use event::{Callback, Event, callback};
pub use event_names::{EventNames, Selector};
pub use events::Events;
pub use handle::Handle;
pub use listener_id::ListenerId;
pub use router::{Router, RouterContext};

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::context::{Context, Target, context};
    pub use crate::emitter::Emitter;
    pub use crate::error::Error as SwitchboardError;
    pub use crate::event::{Callback, Event, callback};
    pub use crate::event_names::{EventNames, Selector};
    pub use crate::events::Events;
    pub use crate::handle::Handle;
    pub use crate::router::Router;
}
