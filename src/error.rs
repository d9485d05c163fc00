use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Channel name must not be empty.")]
    InvalidChannelName,

    #[error("Listener failed: {0}")]
    Listener(Arc<str>),
}

impl Error {
    /// Wrap a listener failure so it can be returned from a callback.
    ///
    /// ```rust
    /// use switchboard::Error;
    ///
    /// let err = Error::listener("disk is full");
    /// assert_eq!(err.to_string(), "Listener failed: disk is full");
    /// ```
    pub fn listener(reason: impl std::fmt::Display) -> Self {
        Error::Listener(Arc::from(reason.to_string()))
    }
}
