/// Channel used when an event name carries no `channel:` prefix.
pub const DEFAULT_CHANNEL: &str = "global";

/// Separates the channel from the event in `"channel:event"`.
/// Only the first occurrence splits.
pub const CHANNEL_SPLITTER: char = ':';

/// Marks a whole-channel removal in [`Router::off`](crate::Router::off),
/// e.g. `"@chat"`.
pub const CHANNEL_REMOVAL_PREFIX: char = '@';

/// Router configuration.
///
/// Controls how compound names are split and which channel receives
/// unprefixed events. Use the builder methods to customize, or use
/// [`Default`] for the stock values.
///
/// # Examples
///
/// ```rust
/// use switchboard::Config;
///
/// let config = Config::default()
///     .with_default_channel("app")   // "ready" now means "app:ready"
///     .with_splitter('/');           // "chat/message" instead of "chat:message"
/// assert_eq!(config.default_channel, "app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Channel receiving events without an explicit prefix.
    /// Default: `"global"`
    pub default_channel: String,

    /// Delimiter between channel and event name.
    /// Default: `':'`
    pub splitter: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_channel: DEFAULT_CHANNEL.to_string(),
            splitter: CHANNEL_SPLITTER,
        }
    }
}

impl Config {
    /// Set the channel used for unprefixed event names.
    pub fn with_default_channel(mut self, name: impl Into<String>) -> Self {
        self.default_channel = name.into();
        self
    }

    /// Set the channel/event delimiter.
    pub fn with_splitter(mut self, splitter: char) -> Self {
        self.splitter = splitter;
        self
    }
}
