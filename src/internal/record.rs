use std::cell::Cell;

use crate::{
    Callback, Context, ListenerId, Selector,
    context::same_context,
    event::same_callback,
};

/// One registration inside a bucket.
///
/// Records are shared between the bucket and any dispatch snapshot taken
/// while they were registered. `removed` is set the moment a record leaves
/// its bucket, so a dispatch already in flight skips it.
pub(crate) struct ListenerRecord<A: 'static> {
    pub id: ListenerId,
    pub callback: Callback<A>,
    pub context: Option<Context>,
    pub once: bool,
    removed: Cell<bool>,
}

impl<A: 'static> ListenerRecord<A> {
    pub fn new(callback: Callback<A>, context: Option<Context>, once: bool) -> Self {
        Self {
            id: ListenerId::next(),
            callback,
            context,
            once,
            removed: Cell::new(false),
        }
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    #[inline]
    pub fn mark_removed(&self) {
        self.removed.set(true);
    }

    fn has_context(&self, context: &Context) -> bool {
        self.context
            .as_ref()
            .is_some_and(|own| same_context(own, context))
    }

    /// Whether `off(_, selector, context)` removes this record.
    ///
    /// An id selects exactly one record regardless of context. Otherwise the
    /// record must match the callback (when given) and the context (when
    /// given); with neither, everything matches.
    pub fn is_selected(&self, selector: &Selector<A>, context: Option<&Context>) -> bool {
        match selector {
            Selector::Id(id) => self.id == *id,
            Selector::Callback(callback) => {
                same_callback(&self.callback, callback)
                    && context.is_none_or(|ctx| self.has_context(ctx))
            }
            Selector::Any => context.is_none_or(|ctx| self.has_context(ctx)),
        }
    }
}
