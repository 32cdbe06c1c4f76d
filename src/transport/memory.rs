//! In-process transport double.
//!
//! `MemoryHub` plays the server side of the connection: it accepts or
//! refuses handshakes, records outbound frames, injects inbound frames and
//! severs the link on demand. The crate's own lifecycle tests run against
//! it, and downstream crates can use it to exercise an `EventClient`
//! without a gateway.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{Transport, TransportFactory, TransportHandle};
use crate::types::{ClientError, EventFrame, Result};

const INBOUND_BUFFER: usize = 64;

#[derive(Default)]
struct HubState {
    handshakes: Mutex<u32>,
    refusals: Mutex<u32>,
    tokens: Mutex<Vec<String>>,
    sent: Mutex<Vec<EventFrame>>,
    live: Mutex<Option<mpsc::Sender<EventFrame>>>,
}

/// Scripted server double. Clones share the same state, so a test can keep
/// one handle while the client owns another.
#[derive(Clone, Default)]
pub struct MemoryHub {
    state: Arc<HubState>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handshake attempts observed, successful or not.
    pub fn handshake_count(&self) -> u32 {
        *self.state.handshakes.lock()
    }

    /// Tokens presented at each handshake, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.state.tokens.lock().clone()
    }

    /// Frames the "server" has received from the client.
    pub fn sent_frames(&self) -> Vec<EventFrame> {
        self.state.sent.lock().clone()
    }

    /// Refuse the next `n` handshake attempts.
    pub fn refuse_next(&self, n: u32) {
        *self.state.refusals.lock() = n;
    }

    /// Deliver an inbound frame to the currently attached client. Returns
    /// `false` if no connection is live.
    pub fn push(&self, frame: EventFrame) -> bool {
        match self.state.live.lock().as_ref() {
            Some(tx) => tx.try_send(frame).is_ok(),
            None => false,
        }
    }

    /// Sever the live connection, simulating a transport drop.
    pub fn sever(&self) {
        self.state.live.lock().take();
    }

    /// Whether a connection is currently attached.
    pub fn is_attached(&self) -> bool {
        self.state.live.lock().is_some()
    }
}

#[async_trait]
impl TransportFactory for MemoryHub {
    async fn connect(&self, token: &str) -> Result<TransportHandle> {
        *self.state.handshakes.lock() += 1;
        self.state.tokens.lock().push(token.to_string());

        {
            let mut refusals = self.state.refusals.lock();
            if *refusals > 0 {
                *refusals -= 1;
                return Err(ClientError::Handshake("refused by hub".to_string()));
            }
        }

        let (frame_tx, frame_rx) = mpsc::channel(INBOUND_BUFFER);
        *self.state.live.lock() = Some(frame_tx);

        Ok(TransportHandle {
            transport: Arc::new(MemoryTransport {
                state: Arc::clone(&self.state),
            }),
            inbound: frame_rx,
        })
    }
}

struct MemoryTransport {
    state: Arc<HubState>,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, frame: EventFrame) -> Result<()> {
        self.state.sent.lock().push(frame);
        Ok(())
    }

    async fn close(&self) {
        self.state.live.lock().take();
    }
}
