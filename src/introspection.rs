//! Point-in-time views of a [`Router`](crate::Router) and its channels.
//!
//! With the `serde` feature every type here is serializable:
//!
//! ```toml
//! [dependencies]
//! switchboard = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use switchboard::{callback, Router};
//!
//! let router = Router::<()>::default();
//! router.on("chat:message", callback(|_| Ok(())), None);
//! router.on("ready", callback(|_| Ok(())), None);
//!
//! let snapshot = router.snapshot();
//! for channel in &snapshot.channels {
//!     for event in &channel.events {
//!         println!("{}:{} ({} listeners)", channel.name, event.name, event.listeners);
//!     }
//! }
//! assert_eq!(snapshot.listener_count(), 2);
//! ```

use std::time::SystemTime;

/// Listener count of one event name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventInfo {
    pub name: String,
    pub listeners: usize,
}

/// One channel and its registered events, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelInfo {
    pub name: String,
    pub events: Vec<EventInfo>,
}

/// Every channel of a router at one instant, sorted by channel name.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterSnapshot {
    /// Timestamp in nanoseconds since Unix epoch when the snapshot was taken.
    pub timestamp: u64,
    pub channels: Vec<ChannelInfo>,
}

impl RouterSnapshot {
    pub(crate) fn new(channels: Vec<ChannelInfo>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            channels,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelInfo> {
        self.channels.iter().find(|channel| channel.name == name)
    }

    /// Total listeners across all channels.
    pub fn listener_count(&self) -> usize {
        self.channels
            .iter()
            .flat_map(|channel| &channel.events)
            .map(|event| event.listeners)
            .sum()
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
