use std::{any::Any, rc::Rc};

use crate::Emitter;

/// Opaque value a listener is bound to.
///
/// A context plays two roles: it is handed back to the callback as the
/// invocation target (see [`Event::target`](crate::Event::target)), and it
/// identifies a group of registrations for bulk removal through
/// [`Emitter::off`]. Identity is the identity of the allocation, never the
/// value: two contexts wrapping equal values are still different contexts.
pub type Context = Rc<dyn Any>;

/// Wrap any value into a [`Context`].
///
/// ```rust
/// let view = switchboard::context("sidebar");
/// assert_eq!(view.downcast_ref::<&str>(), Some(&"sidebar"));
/// ```
pub fn context<T: Any>(value: T) -> Context {
    Rc::new(value)
}

#[inline]
pub(crate) fn same_context(a: &Context, b: &Context) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// What a listener is invoked on.
///
/// Registrations made with an explicit context are bound to it; all others
/// are bound to the emitter that holds the registration.
pub enum Target<'a, A: 'static> {
    Context(&'a Context),
    Emitter(&'a Emitter<A>),
}

impl<'a, A: 'static> Target<'a, A> {
    /// Downcast the bound context. Returns `None` for emitter targets and
    /// for contexts of a different type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Target::Context(ctx) => (**ctx).downcast_ref::<T>(),
            Target::Emitter(_) => None,
        }
    }

    pub fn is_emitter(&self) -> bool {
        matches!(self, Target::Emitter(_))
    }
}

impl<A: 'static> std::fmt::Debug for Target<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Context(ctx) => write!(f, "Target::Context({:p})", Rc::as_ptr(ctx)),
            Target::Emitter(emitter) => write!(f, "Target::Emitter({emitter:?})"),
        }
    }
}
