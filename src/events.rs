use crate::{Callback, Context, Emitter, EventNames, Handle, Result, Selector};

/// The listener vocabulary for any type that owns an [`Emitter`].
///
/// Implement [`emitter`](Events::emitter) and the rest comes for free, so a
/// domain type can expose `on`/`trigger`/`listen_to` directly instead of
/// handing out its registry:
///
/// ```rust
/// use switchboard::{callback, Emitter, Events};
///
/// struct Document {
///     title: String,
///     events: Emitter<String>,
/// }
///
/// impl Events<String> for Document {
///     fn emitter(&self) -> &Emitter<String> {
///         &self.events
///     }
/// }
///
/// let doc = Document { title: "draft".into(), events: Emitter::new() };
/// doc.on("rename", callback(|ev| {
///     println!("renamed to {:?}", ev.arg(0));
///     Ok(())
/// }), None);
/// doc.trigger("rename", &[doc.title.clone()])?;
/// # Ok::<(), switchboard::Error>(())
/// ```
///
/// Subscriptions made with `listen_to` use the implementor's emitter as the
/// context, so `stop_listening` cleans up exactly what this value
/// subscribed to.
pub trait Events<A: 'static> {
    fn emitter(&self) -> &Emitter<A>;

    fn on(
        &self,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        self.emitter().on(names, callback, context)
    }

    fn once(
        &self,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
        context: Option<Context>,
    ) -> Option<Handle<A>> {
        self.emitter().once(names, callback, context)
    }

    fn off(
        &self,
        names: impl Into<EventNames<A>>,
        selector: impl Into<Selector<A>>,
        context: Option<&Context>,
    ) -> &Self {
        self.emitter().off(names, selector, context);
        self
    }

    fn off_all(&self) -> &Self {
        self.emitter().off_all();
        self
    }

    fn trigger(&self, names: impl Into<EventNames<A>>, args: &[A]) -> Result<&Self> {
        self.emitter().trigger(names, args)?;
        Ok(self)
    }

    fn listen_to<S: Events<A>>(
        &self,
        source: &S,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
    ) -> &Self {
        self.emitter().listen_to(source.emitter(), names, callback);
        self
    }

    fn listen_to_once<S: Events<A>>(
        &self,
        source: &S,
        names: impl Into<EventNames<A>>,
        callback: impl Into<Option<Callback<A>>>,
    ) -> &Self {
        self.emitter().listen_to_once(source.emitter(), names, callback);
        self
    }

    /// Undo subscriptions on every source (`None`) or on one emitter. To name
    /// a source by its owner, use [`stop_listening_to`](Events::stop_listening_to).
    fn stop_listening(
        &self,
        source: Option<&Emitter<A>>,
        names: impl Into<EventNames<A>>,
        selector: impl Into<Selector<A>>,
    ) -> &Self {
        self.emitter().stop_listening(source, names, selector);
        self
    }

    /// Counterpart of [`listen_to`](Events::listen_to): undo subscriptions on
    /// the emitter owned by `source`.
    fn stop_listening_to<S: Events<A>>(
        &self,
        source: &S,
        names: impl Into<EventNames<A>>,
        selector: impl Into<Selector<A>>,
    ) -> &Self {
        self.emitter()
            .stop_listening(Some(source.emitter()), names, selector);
        self
    }
}

impl<A: 'static> Events<A> for Emitter<A> {
    fn emitter(&self) -> &Emitter<A> {
        self
    }
}
