//! # Arena Realtime
//!
//! Realtime event client for the Arena community platform. Maintains one
//! persistent connection per authenticated session, exposes a name-keyed
//! subscription API for inbound events, and guarantees that subscriptions
//! survive transport interruptions without caller intervention.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use arena_realtime::{handler, EventClientBuilder, WebSocketFactory};
//!
//! #[tokio::main]
//! async fn main() {
//!     let factory = Arc::new(WebSocketFactory::new("wss://realtime.arena.dev/socket"));
//!     let client = EventClientBuilder::new(factory).build();
//!
//!     let _sub = client.on(
//!         "challenge:completed",
//!         handler(|payload| println!("completed: {payload}")),
//!     );
//!
//!     client.connect("session-token");
//! }
//! ```

pub mod client;
pub mod dispatcher;
pub mod infrastructure;
pub mod registry;
pub mod transport;
pub mod types;

pub use client::{
    ConnectionState, EventClient, EventClientBuilder, EventClientOptions, StatusSubscription,
};
pub use registry::{EventRegistry, Handler, Subscription, handler};
pub use transport::{MemoryHub, Transport, TransportFactory, TransportHandle, WebSocketFactory};
pub use types::{ClientError, EventFrame, Result};
