use std::{
    cell::{OnceCell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    Callback, Context, Event, EventNames, Handle, ListenerId, Result, Selector,
    context::same_context, internal::ListenerRecord, introspection::EventInfo,
};

/// Name of the catch-all event.
///
/// Listeners registered under `"all"` run after the regular listeners of
/// every triggered event and receive the triggered name via
/// [`Event::name`].
pub const ALL_EVENTS: &str = "all";

type Bucket<A> = Vec<Rc<ListenerRecord<A>>>;

pub(crate) struct Inner<A: 'static> {
    events: RefCell<HashMap<String, Bucket<A>>>,
    listening_to: RefCell<HashMap<String, Emitter<A>>>,
    listen_id: OnceCell<String>,
}

impl<A: 'static> Inner<A> {
    /// Removes the record `id` from bucket `name`, deleting the bucket when it
    /// runs empty.
    pub(crate) fn remove_record(&self, name: &str, id: ListenerId) -> bool {
        let record = {
            let mut events = self.events.borrow_mut();
            let Some(bucket) = events.get_mut(name) else {
                return false;
            };
            let Some(pos) = bucket.iter().position(|record| record.id == id) else {
                return false;
            };
            let record = bucket.remove(pos);
            if bucket.is_empty() {
                events.remove(name);
            }
            record
        };
        record.mark_removed();
        true
    }
}

/// A listener registry: event name → ordered listeners.
///
/// `Emitter` is a cheap, cloneable handle; clones share the same registry.
/// Everything is synchronous and single-threaded. Listeners run inline on
/// the caller's stack, in registration order, and may freely call back into
/// the emitter (register, remove, trigger) while a dispatch is running.
///
/// - `on(names, callback, context)`: register, returns a [`Handle`]
/// - `once(names, callback, context)`: register for a single invocation
/// - `off(names, selector, context)` / `off_all()`: deregister
/// - `trigger(names, args)`: dispatch synchronously
/// - `listen_to(source, ..)` / `stop_listening(..)`: subscribe to another
///   emitter while keeping the cleanup bookkeeping here
///
/// # Example
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use switchboard::{callback, Emitter};
///
/// let seen = Rc::new(Cell::new(0));
/// let emitter = Emitter::<i32>::new();
///
/// let sink = seen.clone();
/// emitter.on("add", callback(move |ev| {
///     sink.set(sink.get() + ev.arg(0).copied().unwrap_or_default());
///     Ok(())
/// }), None);
///
/// emitter.trigger("add", &[2])?.trigger("add", &[3])?;
/// assert_eq!(seen.get(), 5);
/// # Ok::<(), switchboard::Error>(())
/// ```
pub struct Emitter<A: 'static> {
    inner: Rc<Inner<A>>,
}

impl<A: 'static> Emitter<A> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                events: RefCell::default(),
                listening_to: RefCell::default(),
                listen_id: OnceCell::new(),
            }),
        }
    }

    /// Register `callback` for `names`.
    ///
    /// Returns a handle for a single name. Compound names (whitespace
    /// separated or [`EventNames::Map`]) register one listener per name and
    /// return `None`, as does a call without a callback.
    pub fn on(
        &self,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        self.register(names.into(), callback.into(), context, false)
    }

    /// Like [`on`](Self::on), but the listener removes itself right before its
    /// first invocation, so it runs at most once, reentrant triggers included.
    pub fn once(
        &self,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        self.register(names.into(), callback.into(), context, true)
    }

    pub(crate) fn register(
        &self,
        names: EventNames<A>,
        callback: Option<Callback<A>>,
        context: Option<Context>,
        once: bool,
    ) -> Option<Handle<A>> {
        match names {
            EventNames::Single(name) => {
                callback.map(|callback| self.add_record(name, callback, context, once))
            }
            EventNames::Every => None,
            names => {
                for (name, callback) in names.resolve(callback) {
                    if let Some(callback) = callback {
                        self.add_record(name, callback, context.clone(), once);
                    }
                }
                None
            }
        }
    }

    fn add_record(
        &self,
        name: String,
        callback: Callback<A>,
        context: Option<Context>,
        once: bool,
    ) -> Handle<A> {
        let record = Rc::new(ListenerRecord::new(callback, context, once));
        let handle = Handle::new(record.id, Rc::from(name.as_str()), Rc::downgrade(&self.inner));
        self.inner
            .events
            .borrow_mut()
            .entry(name)
            .or_default()
            .push(record);
        handle
    }

    /// Remove registrations.
    ///
    /// For every name in `names` ([`EventNames::Every`] meaning all
    /// registered names), drops the records picked by `selector` and
    /// `context`:
    ///
    /// - `Selector::Id(id)` removes exactly that registration
    /// - `Selector::Callback(cb)` removes registrations of `cb` (bound to
    ///   `context`, if given)
    /// - `Selector::Any` with a context removes everything bound to it
    /// - `Selector::Any` without a context empties the bucket
    ///
    /// With [`EventNames::Map`], each entry's callback is the selector for its
    /// name. Does nothing on an emitter without registrations.
    pub fn off(
        &self,
        names: impl Into<EventNames<A>>,
        selector: impl Into<Selector<A>>,
        context: Option<&Context>,
    ) -> &Self {
        if self.inner.events.borrow().is_empty() {
            return self;
        }
        let selector = selector.into();
        let targets: Vec<(String, Selector<A>)> = match names.into() {
            EventNames::Every => self
                .inner
                .events
                .borrow()
                .keys()
                .map(|name| (name.clone(), selector.clone()))
                .collect(),
            EventNames::Map(pairs) => pairs
                .into_iter()
                .map(|(name, callback)| (name, Selector::Callback(callback)))
                .collect(),
            names => names
                .resolve(None)
                .into_iter()
                .map(|(name, _)| (name, selector.clone()))
                .collect(),
        };

        let mut removed = Vec::new();
        {
            let mut events = self.inner.events.borrow_mut();
            for (name, selector) in targets {
                let Some(bucket) = events.get_mut(&name) else {
                    continue;
                };
                bucket.retain(|record| {
                    if record.is_selected(&selector, context) {
                        record.mark_removed();
                        removed.push(record.clone());
                        false
                    } else {
                        true
                    }
                });
                if bucket.is_empty() {
                    events.remove(&name);
                }
            }
        }
        drop(removed);
        self
    }

    /// Remove every registration. The emitter's own `listen_to`
    /// subscriptions are left untouched; see
    /// [`stop_listening`](Self::stop_listening).
    pub fn off_all(&self) -> &Self {
        let drained: Vec<(String, Bucket<A>)> = self.inner.events.borrow_mut().drain().collect();
        drained
            .iter()
            .flat_map(|(_, bucket)| bucket)
            .for_each(|record| record.mark_removed());
        self
    }

    /// Invoke the listeners of `names` with `args`.
    ///
    /// Each name is dispatched in turn: first its own listeners, then the
    /// `"all"` listeners, everything in registration order. Listeners are
    /// taken from the registry as it is when the dispatch starts; one removed
    /// by an earlier listener of the same dispatch is skipped, one added
    /// during the dispatch waits for the next trigger.
    ///
    /// The first listener returning `Err` stops the dispatch and its error is
    /// returned.
    pub fn trigger(&self, names: impl Into<EventNames<A>>, args: &[A]) -> Result<&Self> {
        if self.inner.events.borrow().is_empty() {
            return Ok(self);
        }
        match names.into() {
            EventNames::Single(name) => self.dispatch(&name, args)?,
            EventNames::Every => {}
            names => {
                for (name, _) in names.resolve(None) {
                    self.dispatch(&name, args)?;
                }
            }
        }
        Ok(self)
    }

    fn dispatch(&self, name: &str, args: &[A]) -> Result<()> {
        let (listeners, all) = {
            let events = self.inner.events.borrow();
            (events.get(name).cloned(), events.get(ALL_EVENTS).cloned())
        };
        if let Some(listeners) = listeners {
            self.invoke(name, &listeners, name, args)?;
        }
        if let Some(all) = all {
            self.invoke(ALL_EVENTS, &all, name, args)?;
        }
        Ok(())
    }

    fn invoke(&self, bucket: &str, records: &[Rc<ListenerRecord<A>>], name: &str, args: &[A]) -> Result<()> {
        for record in records {
            if record.is_removed() {
                continue;
            }
            if record.once {
                self.inner.remove_record(bucket, record.id);
                trace!(event = bucket, listener = %record.id, "Once listener removed");
                if let Some(context) = &record.context {
                    self.release_listener(context);
                }
            }
            let event = Event::new(name, args, self, record.context.as_ref(), record.id);
            if let Err(e) = (record.callback)(&event) {
                debug!(event = name, listener = %record.id, error = %e, "Listener failed, dispatch aborted");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Subscribe to `source`'s events, with this emitter as the context.
    ///
    /// The subscription is recorded here, so a later
    /// [`stop_listening`](Self::stop_listening) can undo it without touching
    /// registrations others made on `source`.
    pub fn listen_to(
        &self,
        source: &Emitter<A>,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
    ) -> &Self {
        self.subscribe(source, names.into(), callback.into(), false)
    }

    /// [`listen_to`](Self::listen_to) with [`once`](Self::once) semantics.
    ///
    /// When the last registration this emitter holds on `source` has fired,
    /// `source` is forgotten as if `stop_listening` had been called for it.
    pub fn listen_to_once(
        &self,
        source: &Emitter<A>,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
    ) -> &Self {
        self.subscribe(source, names.into(), callback.into(), true)
    }

    fn subscribe(
        &self,
        source: &Emitter<A>,
        names: EventNames<A>,
        callback: Option<Callback<A>>,
        once: bool,
    ) -> &Self {
        self.inner
            .listening_to
            .borrow_mut()
            .insert(source.listen_id().to_owned(), source.clone());
        source.register(names, callback, Some(self.as_context()), once);
        self
    }

    /// Drops this emitter from the `listen_to` bookkeeping of `context` once
    /// nothing bound to it is left here. No-op unless `context` is an emitter
    /// that listens to this one.
    fn release_listener(&self, context: &Context) {
        let Some(listener) = (**context).downcast_ref::<Inner<A>>() else {
            return;
        };
        let still_bound = self
            .inner
            .events
            .borrow()
            .values()
            .flatten()
            .any(|record| record.is_selected(&Selector::Any, Some(context)));
        if still_bound {
            return;
        }
        let released = listener.listening_to.borrow_mut().remove(self.listen_id());
        if released.is_some() {
            trace!(
                source = self.listen_id(),
                "Listener released after its last once registration"
            );
        }
    }

    /// Undo `listen_to` subscriptions.
    ///
    /// `source` narrows the cleanup to one emitter, `None` visits all of them.
    /// On each, registrations bound to this emitter and matching `names` and
    /// `selector` are removed. A source is forgotten when the call asked for
    /// everything (`Every`, `Selector::Any`) or nothing is left registered on
    /// it.
    pub fn stop_listening(
        &self,
        source: Option<&Emitter<A>>,
        names: impl Into<EventNames<A>>,
        selector: impl Into<Selector<A>>,
    ) -> &Self {
        let names = names.into();
        let selector = selector.into();
        let sources: Vec<(String, Emitter<A>)> = {
            let listening_to = self.inner.listening_to.borrow();
            if listening_to.is_empty() {
                return self;
            }
            match source {
                Some(source) => vec![(source.listen_id().to_owned(), source.clone())],
                None => listening_to
                    .iter()
                    .map(|(id, source)| (id.clone(), source.clone()))
                    .collect(),
            }
        };

        let full_stop = names.is_every() && selector.is_any();
        let context = self.as_context();
        for (id, source) in sources {
            source.off(names.clone(), selector.clone(), Some(&context));
            if full_stop || source.inner.events.borrow().is_empty() {
                self.inner.listening_to.borrow_mut().remove(&id);
            }
        }
        self
    }

    /// Stable unique id of this emitter as a `listen_to` source, assigned on
    /// first use.
    pub fn listen_id(&self) -> &str {
        self.inner
            .listen_id
            .get_or_init(|| Uuid::new_v4().to_string())
    }

    /// This emitter as a [`Context`], e.g. to remove what it registered
    /// through `listen_to` by hand.
    pub fn as_context(&self) -> Context {
        self.inner.clone()
    }

    /// Whether `context` is this emitter.
    pub fn is(&self, context: &Context) -> bool {
        same_context(&self.as_context(), context)
    }

    /// Whether both handles point to the same registry.
    pub fn ptr_eq(&self, other: &Emitter<A>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Names with at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.events.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .events
            .borrow()
            .get(name)
            .map_or(0, |bucket| bucket.len())
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Number of sources this emitter currently listens to.
    pub fn listening_count(&self) -> usize {
        self.inner.listening_to.borrow().len()
    }

    /// No registrations and no `listen_to` subscriptions, just like a new
    /// emitter.
    pub fn is_empty(&self) -> bool {
        self.inner.events.borrow().is_empty() && self.inner.listening_to.borrow().is_empty()
    }

    pub(crate) fn events_info(&self) -> Vec<EventInfo> {
        self.event_names()
            .into_iter()
            .map(|name| {
                let listeners = self.listener_count(&name);
                EventInfo { name, listeners }
            })
            .collect()
    }
}

impl<A: 'static> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> std::fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events: Vec<(String, usize)> = self
            .events_info()
            .into_iter()
            .map(|info| (info.name, info.listeners))
            .collect();
        f.debug_struct("Emitter")
            .field("events", &events)
            .field("listening_to", &self.listening_count())
            .finish()
    }
}
