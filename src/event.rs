use std::rc::Rc;

use crate::{Context, Emitter, ListenerId, Result, Target};

/// A registered listener function.
///
/// Callbacks are reference counted so the same callback can be registered
/// under several names and later removed by identity: two `Callback`s match
/// only if they are clones of the same `Rc`. Build one with [`callback`].
///
/// Returning `Err` aborts the dispatch in progress; the error surfaces from
/// [`Emitter::trigger`] or [`Router::emit`](crate::Router::emit).
pub type Callback<A> = Rc<dyn Fn(&Event<'_, A>) -> Result<()>>;

/// Turn a closure into a [`Callback`].
///
/// ```rust
/// use switchboard::{callback, Callback};
///
/// let log: Callback<u32> = callback(|ev| {
///     println!("{} fired with {:?}", ev.name(), ev.args());
///     Ok(())
/// });
/// ```
pub fn callback<A, F>(f: F) -> Callback<A>
where
    A: 'static,
    F: Fn(&Event<'_, A>) -> Result<()> + 'static,
{
    Rc::new(f)
}

#[inline]
pub(crate) fn same_callback<A>(a: &Callback<A>, b: &Callback<A>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A single listener invocation.
///
/// `name` is always the name that was triggered, also for listeners of the
/// `"all"` event, which is how catch-all listeners learn which event fired.
/// `args` are the trigger arguments, forwarded unchanged to every listener.
pub struct Event<'a, A: 'static> {
    name: &'a str,
    args: &'a [A],
    emitter: &'a Emitter<A>,
    context: Option<&'a Context>,
    listener_id: ListenerId,
}

impl<'a, A: 'static> Event<'a, A> {
    pub(crate) fn new(
        name: &'a str,
        args: &'a [A],
        emitter: &'a Emitter<A>,
        context: Option<&'a Context>,
        listener_id: ListenerId,
    ) -> Self {
        Self {
            name,
            args,
            emitter,
            context,
            listener_id,
        }
    }

    /// Name of the triggered event.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn args(&self) -> &'a [A] {
        self.args
    }

    /// Positional argument, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a A> {
        self.args.get(index)
    }

    /// The invocation target: the registration's context if it has one,
    /// otherwise the emitter holding the registration.
    pub fn target(&self) -> Target<'a, A> {
        match self.context {
            Some(ctx) => Target::Context(ctx),
            None => Target::Emitter(self.emitter),
        }
    }

    /// The context the listener was registered with.
    #[inline]
    pub fn context(&self) -> Option<&'a Context> {
        self.context
    }

    /// The emitter dispatching this event.
    #[inline]
    pub fn emitter(&self) -> &'a Emitter<A> {
        self.emitter
    }

    /// Id of the registration being invoked.
    #[inline]
    pub fn listener_id(&self) -> ListenerId {
        self.listener_id
    }
}

impl<A: std::fmt::Debug + 'static> std::fmt::Debug for Event<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("listener_id", &self.listener_id)
            .finish()
    }
}
