use std::rc::{Rc, Weak};

use crate::{ListenerId, emitter::Inner};

/// A registration returned by `on`/`once`.
///
/// Keeps the registration's id and event name together with a weak link to
/// the emitter, so the caller can remove exactly this registration later
/// without holding on to the callback:
///
/// ```rust
/// use switchboard::{callback, Emitter};
///
/// let emitter = Emitter::<()>::new();
/// let handle = emitter.on("save", callback(|_| Ok(())), None).unwrap();
/// assert_eq!(handle.name(), "save");
/// assert!(handle.off());
/// assert!(!emitter.has_listeners("save"));
/// ```
///
/// Handles never keep the emitter alive.
pub struct Handle<A: 'static> {
    id: ListenerId,
    name: Rc<str>,
    emitter: Weak<Inner<A>>,
}

impl<A: 'static> Handle<A> {
    pub(crate) fn new(id: ListenerId, name: Rc<str>, emitter: Weak<Inner<A>>) -> Self {
        Self { id, name, emitter }
    }

    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The resolved event name of the registration.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remove this registration and nothing else.
    ///
    /// Returns `false` if it was already gone (removed, fired as `once`, or
    /// the emitter was dropped).
    pub fn off(&self) -> bool {
        self.emitter
            .upgrade()
            .is_some_and(|inner| inner.remove_record(&self.name, self.id))
    }
}

impl<A: 'static> Clone for Handle<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            emitter: self.emitter.clone(),
        }
    }
}

impl<A: 'static> PartialEq for Handle<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A: 'static> Eq for Handle<A> {}

impl<A: 'static> std::fmt::Debug for Handle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<A: 'static> std::fmt::Display for Handle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
