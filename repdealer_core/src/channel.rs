//! Outbound half of the host link.
//!
//! Delivery is best-effort. The embedding transport routinely reports failures
//! for calls the host did receive, so a failed post is logged and forgotten:
//! no retry, nothing shown to the player.

use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::protocol::Outbound;

/// Anything that can carry a message toward the host
pub trait OutboundSink {
    fn deliver(&mut self, message: &Outbound) -> Result<(), ChannelError>;
}

impl<S: OutboundSink + ?Sized> OutboundSink for Box<S> {
    fn deliver(&mut self, message: &Outbound) -> Result<(), ChannelError> {
        (**self).deliver(message)
    }
}

/// Fire one message and swallow the outcome
pub fn post<S: OutboundSink + ?Sized>(sink: &mut S, resource: &str, message: &Outbound) {
    let endpoint = message.endpoint(resource);
    match sink.deliver(message) {
        Ok(()) => debug!(%endpoint, "posted to host"),
        Err(e) => warn!(%endpoint, error = %e, "post reported failure, not retrying"),
    }
}

pub fn post_all<S, I>(sink: &mut S, resource: &str, messages: I)
where
    S: OutboundSink + ?Sized,
    I: IntoIterator<Item = Outbound>,
{
    for message in messages {
        post(sink, resource, &message);
    }
}

/// Sink that keeps every message it is handed. With `failing` set it still
/// records the message but reports a transport error, like a host that got the
/// call and answered badly.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<Outbound>,
    pub failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Vec::new(),
            failing: true,
        }
    }

    pub fn count(&self, action: &str) -> usize {
        self.sent.iter().filter(|m| m.action() == action).count()
    }

    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.sent)
    }
}

impl OutboundSink for RecordingSink {
    fn deliver(&mut self, message: &Outbound) -> Result<(), ChannelError> {
        self.sent.push(message.clone());
        if self.failing {
            Err(ChannelError::Disconnected)
        } else {
            Ok(())
        }
    }
}
