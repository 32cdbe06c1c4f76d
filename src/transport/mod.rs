//! Transport seam between the connection manager and the wire.
//!
//! A [`TransportFactory`] performs one authenticated handshake per call and
//! hands back a live [`TransportHandle`]. Inbound frames arrive on the
//! handle's channel; the channel closing is the drop signal. Heartbeat and
//! keepalive are the transport implementation's own concern.

mod memory;
mod websocket;

pub use memory::MemoryHub;
pub use websocket::{WebSocketFactory, WebSocketTransport};

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::types::{EventFrame, Result};

/// Outbound half of a live connection.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send one frame to the server.
    async fn send(&self, frame: EventFrame) -> Result<()>;

    /// Close gracefully. Must be safe to call more than once.
    async fn close(&self);
}

/// Opens authenticated connections. Injected into the client so sessions can
/// be built against a real gateway or an in-process double.
#[async_trait]
pub trait TransportFactory: Send + Sync + 'static {
    /// Perform the handshake with `token`. An `Err` is a handshake failure;
    /// the caller decides whether to retry.
    async fn connect(&self, token: &str) -> Result<TransportHandle>;
}

/// A freshly established connection: the outbound half plus the inbound
/// frame stream. The receiver yielding `None` means the transport dropped.
pub struct TransportHandle {
    pub transport: Arc<dyn Transport>,
    pub inbound: mpsc::Receiver<EventFrame>,
}
