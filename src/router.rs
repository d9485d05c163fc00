use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tracing::{debug, trace};

use crate::{
    CHANNEL_REMOVAL_PREFIX, Callback, Config, Context, Emitter, Error, Handle, Result, Selector,
    internal::ChannelPath,
    introspection::{ChannelInfo, RouterSnapshot},
};

/// Default context of listeners registered through a [`Router`] without an
/// explicit one. Each router has its own instance, see [`Router::context`].
#[derive(Debug)]
pub struct RouterContext;

/// Routes events to isolated channels, each with its own [`Emitter`].
///
/// Event names may carry a channel prefix, `"chat:message"`, split at the
/// first [`Config::splitter`]. Unprefixed names go to
/// [`Config::default_channel`].
///
/// - `on`/`once` create the addressed channel on first use.
/// - `emit(name, args)` dispatches on the addressed channel, or drops the
///   event if the channel does not exist.
/// - `off(Some("chat:message"), ..)` deregisters within a channel,
///   `off(Some("@chat"), ..)` removes the whole channel, `off(None, ..)`
///   removes every channel.
/// - `add_channel`/`remove_channel` manage channels explicitly.
///
/// Construct one router and pass it (or a reference) to whoever needs it;
/// tests simply build a fresh one each.
///
/// # Example
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use switchboard::{callback, Router};
///
/// let router = Router::<u32>::default();
/// let loaded = Rc::new(Cell::new(0));
///
/// let sink = loaded.clone();
/// router.on("load:success", callback(move |ev| {
///     sink.set(ev.arg(0).copied().unwrap_or_default());
///     Ok(())
/// }), None);
///
/// router.emit("load:success", &[42])?;
/// router.emit("success", &[7])?; // default channel, nobody listens there
/// assert_eq!(loaded.get(), 42);
/// # Ok::<(), switchboard::Error>(())
/// ```
pub struct Router<A: 'static> {
    config: Config,
    channels: RefCell<HashMap<String, Emitter<A>>>,
    context: Context,
}

impl<A: 'static> Router<A> {
    /// Create a new router with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            channels: RefCell::default(),
            context: Rc::new(RouterContext),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Context given to listeners registered without one.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Create channel `name` unless it exists. Existing listeners are kept.
    pub fn add_channel(&self, name: &str) -> Result<&Self> {
        if name.is_empty() {
            return Err(Error::InvalidChannelName);
        }
        self.ensure_channel(name);
        Ok(self)
    }

    /// Deregister everything on channel `name` and delete it.
    ///
    /// Returns `Ok(false)` if there was no such channel.
    pub fn remove_channel(&self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Err(Error::InvalidChannelName);
        }
        let removed = self.channels.borrow_mut().remove(name);
        match removed {
            Some(channel) => {
                channel.off_all();
                debug!(channel = name, "Channel removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every channel.
    pub fn reset(&self) -> &Self {
        let channels: Vec<Emitter<A>> = self
            .channels
            .borrow_mut()
            .drain()
            .map(|(_, channel)| channel)
            .collect();
        channels.iter().for_each(|channel| {
            channel.off_all();
        });
        debug!(channels = channels.len(), "All channels removed");
        self
    }

    fn ensure_channel(&self, name: &str) -> Emitter<A> {
        if let Some(channel) = self.channel(name) {
            return channel;
        }
        debug!(channel = name, "Channel created");
        let channel = Emitter::new();
        self.channels
            .borrow_mut()
            .insert(name.to_owned(), channel.clone());
        channel
    }

    /// Register `callback` for `name` (`"channel:event"` or `"event"`).
    ///
    /// The listener is bound to `context`, or to [`Router::context`] if none
    /// is given. The part after the prefix follows [`Emitter::on`], so
    /// `"chat:join leave"` registers two listeners on channel `chat`.
    ///
    /// [`RouterContext`] only identifies the router; it does not lead back to
    /// it. A callback that needs to call into the router captures it, e.g. an
    /// `Rc<Router<A>>` clone or a `Weak` to avoid a cycle:
    ///
    /// ```rust
    /// use std::rc::Rc;
    /// use switchboard::{callback, Router, RouterContext};
    ///
    /// let router = Rc::new(Router::<u32>::default());
    /// let weak = Rc::downgrade(&router);
    /// router.on("job:done", callback(move |ev| {
    ///     assert!(ev.target().downcast_ref::<RouterContext>().is_some());
    ///     if let Some(router) = weak.upgrade() {
    ///         router.remove_channel("job")?;
    ///     }
    ///     Ok(())
    /// }), None);
    ///
    /// router.emit("job:done", &[])?;
    /// assert!(!router.has_channel("job"));
    /// # Ok::<(), switchboard::Error>(())
    /// ```
    pub fn on(
        &self,
        name: &str,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        let path = ChannelPath::parse(name, &self.config);
        let context = context.unwrap_or_else(|| self.context.clone());
        self.ensure_channel(path.channel)
            .on(path.event, callback, Some(context))
    }

    /// [`on`](Self::on) with once semantics.
    pub fn once(
        &self,
        name: &str,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        let path = ChannelPath::parse(name, &self.config);
        let context = context.unwrap_or_else(|| self.context.clone());
        self.ensure_channel(path.channel)
            .once(path.event, callback, Some(context))
    }

    /// Deregister listeners or whole channels.
    ///
    /// - `None`: remove every channel
    /// - `Some("@chat")`: remove channel `chat`
    /// - `Some("chat:message")` / `Some("message")`: remove the listeners
    ///   picked by `selector` from that event, if the channel exists
    ///
    /// Fails only for `"@"` without a channel name.
    pub fn off(&self, name: Option<&str>, selector: impl Into<Selector<A>>) -> Result<&Self> {
        let Some(name) = name else {
            return Ok(self.reset());
        };
        if let Some(channel) = name.strip_prefix(CHANNEL_REMOVAL_PREFIX) {
            self.remove_channel(channel)?;
            return Ok(self);
        }
        let path = ChannelPath::parse(name, &self.config);
        if let Some(channel) = self.channel(path.channel) {
            channel.off(path.event, selector, None);
        }
        Ok(self)
    }

    /// Trigger `name` on its channel with `args`.
    ///
    /// Events for channels that don't exist are dropped, not queued.
    pub fn emit(&self, name: &str, args: &[A]) -> Result<&Self> {
        let path = ChannelPath::parse(name, &self.config);
        match self.channel(path.channel) {
            Some(channel) => {
                channel.trigger(path.event, args)?;
            }
            None => {
                trace!(channel = path.channel, event = path.event, "No such channel, event dropped");
            }
        }
        Ok(self)
    }

    /// The emitter behind channel `name`, if it exists.
    pub fn channel(&self, name: &str) -> Option<Emitter<A>> {
        self.channels.borrow().get(name).cloned()
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.borrow().contains_key(name)
    }

    /// Names of all channels, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Take a point-in-time snapshot of every channel and its listeners.
    pub fn snapshot(&self) -> RouterSnapshot {
        let channels = self
            .channel_names()
            .into_iter()
            .filter_map(|name| {
                let events = self.channel(&name)?.events_info();
                Some(ChannelInfo { name, events })
            })
            .collect();
        RouterSnapshot::new(channels)
    }
}

impl<A: 'static> Default for Router<A> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<A: 'static> std::fmt::Debug for Router<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("channels", &self.channel_names())
            .finish()
    }
}
