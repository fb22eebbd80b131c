//! Error types for the surface core

use thiserror::Error;

use crate::request::RequestId;

/// An inbound line could not be decoded into a host message
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Outbound delivery failed at the transport.
///
/// These are logged and dropped; the host may well have received the message.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("host link is disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a give confirmation was dropped without reaching the host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRejected {
    #[error("surface is hidden")]
    Hidden,

    #[error("no card selected")]
    NoSelection,

    #[error("selected index {0} is not in the catalog")]
    MissingCard(usize),

    #[error("request {0} is still pending")]
    Pending(RequestId),
}

/// Why a cancel was not honoured
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CancelRejected {
    #[error("surface is hidden")]
    Hidden,

    #[error("request {0} is still pending")]
    RequestPending(RequestId),
}
