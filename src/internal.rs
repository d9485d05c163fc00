mod channel_path;
mod record;

pub(crate) use channel_path::ChannelPath;
pub(crate) use record::ListenerRecord;
