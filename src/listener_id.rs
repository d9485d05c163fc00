use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identifier of a single registration.
///
/// Every call to `on`/`once` that creates a listener record draws a fresh id
/// from a monotonic counter, so ids are never reused, not even across
/// different emitters. Pass an id to [`Emitter::off`](crate::Emitter::off)
/// (via [`Selector::Id`](crate::Selector::Id)) to remove exactly that
/// registration without keeping the callback around.
///
/// Displayed as `c<N>`, e.g. `c17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}
