use crate::Config;

/// A compound `"channel:event"` name split into its parts.
///
/// Only the first splitter counts, so `"a:b:c"` addresses event `"b:c"` on
/// channel `"a"`. A missing or empty channel part means the default channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChannelPath<'a> {
    pub channel: &'a str,
    pub event: &'a str,
}

impl<'a> ChannelPath<'a> {
    pub fn parse(name: &'a str, config: &'a Config) -> Self {
        match name.split_once(config.splitter) {
            Some((channel, event)) if !channel.is_empty() => Self { channel, event },
            Some((_, event)) => Self {
                channel: &config.default_channel,
                event,
            },
            None => Self {
                channel: &config.default_channel,
                event: name,
            },
        }
    }
}
