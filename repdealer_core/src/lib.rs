pub mod card;
pub mod catalog;
pub mod channel;
pub mod config;
pub mod error;
pub mod keys;
pub mod protocol;
pub mod request;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod surface;

pub use card::{Card, PlayerStats};
pub use catalog::{CatalogStore, DisplayMode};
pub use channel::{post, post_all, OutboundSink, RecordingSink};
pub use config::SurfaceConfig;
pub use error::{CancelRejected, ChannelError, ConfirmRejected, ProtocolError};
pub use keys::{InputCapture, KeyOutcome, SurfaceKey};
pub use protocol::{Envelope, Inbound, Outbound};
pub use request::{RequestCoordinator, RequestId, RequestPhase};
pub use selection::{Preview, SelectOutcome, Selection};
pub use session::Session;
pub use surface::{CloseReason, Surface};
