//! Host links: where inbound messages come from and outbound ones go.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use repdealer_core::{ChannelError, Envelope, Inbound, Outbound, OutboundSink};
use serde_json::json;
use tracing::{debug, info, warn};

/// Longest a single outbound write may hold up the UI loop
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(250);

/// A host the surface talks to. Outbound delivery comes from [`OutboundSink`].
pub trait HostLink: OutboundSink {
    /// Next host message that is ready at `now`
    fn try_recv(&mut self, now: Instant) -> Option<Inbound>;

    /// A key the surface let through to the surrounding world
    fn environment_key(&mut self, key: char, now: Instant);

    fn name(&self) -> String;
}

/// Newline-delimited JSON over TCP.
///
/// Inbound lines are `{"type": ...}` messages, outbound lines are
/// `{"action": ..., "body": ...}` envelopes.
pub struct TcpLink {
    stream: TcpStream,
    inbound: Receiver<Inbound>,
    peer: String,
    closed: bool,
}

impl TcpLink {
    pub fn connect(addr: &str) -> Result<Self, ChannelError> {
        let stream = TcpStream::connect(addr)?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.to_string());
        let reader = BufReader::new(stream.try_clone()?);

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("host-reader".into())
            .spawn(move || read_messages(reader, tx))?;

        info!(%peer, "connected to host");
        Ok(Self {
            stream,
            inbound: rx,
            peer,
            closed: false,
        })
    }

    fn write_line(&mut self, line: &str) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::Disconnected);
        }
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\n")?;
        self.stream.flush()?;
        Ok(())
    }
}

impl OutboundSink for TcpLink {
    fn deliver(&mut self, message: &Outbound) -> Result<(), ChannelError> {
        let line = message.envelope()?.to_line()?;
        self.write_line(&line)
    }
}

impl HostLink for TcpLink {
    fn try_recv(&mut self, _now: Instant) -> Option<Inbound> {
        match self.inbound.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.closed {
                    warn!(peer = %self.peer, "host hung up");
                    self.closed = true;
                }
                None
            }
        }
    }

    fn environment_key(&mut self, key: char, _now: Instant) {
        let envelope = Envelope {
            action: "environmentKey".into(),
            body: json!({ "key": key.to_string() }),
        };
        let result = envelope
            .to_line()
            .map_err(ChannelError::from)
            .and_then(|line| self.write_line(&line));
        if let Err(e) = result {
            debug!(error = %e, "environment key not forwarded");
        }
    }

    fn name(&self) -> String {
        format!("tcp {}", self.peer)
    }
}

/// Parse host lines until the stream ends or the receiver goes away.
/// Lines that aren't a host message are logged and skipped.
pub fn read_messages<R: BufRead>(reader: R, tx: Sender<Inbound>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "host read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match Inbound::parse(&line) {
            Ok(message) => {
                debug!(kind = message.kind(), "host message received");
                if tx.send(message).is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "dropping malformed host message"),
        }
    }
    info!("host stream ended");
}
