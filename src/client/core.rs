use std::sync::Arc;

use super::builder::EventClientBuilder;
use super::connection::{ConnectionManager, ConnectionState, StatusSubscription};
use crate::registry::{EventRegistry, Handler, Subscription};
use crate::transport::TransportFactory;

/// The session-scoped entry point for realtime events.
///
/// `EventClient` keeps one persistent connection to the gateway, exposes a
/// name-keyed subscription API for inbound events, and re-establishes both
/// the connection and the subscriptions across transport interruptions
/// without caller intervention.
///
/// All methods return immediately; connection outcomes surface through
/// [`on_status_change`](Self::on_status_change) callbacks and dispatched
/// events.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use arena_realtime::{handler, EventClientBuilder, WebSocketFactory};
///
/// #[tokio::main]
/// async fn main() {
///     let factory = Arc::new(WebSocketFactory::new("wss://realtime.arena.dev/socket"));
///     let client = EventClientBuilder::new(factory).build();
///
///     let _points = client.on(
///         "points:awarded",
///         handler(|payload| println!("awarded: {payload}")),
///     );
///
///     client.connect("session-token");
///     // ... the application runs; subscriptions survive reconnects ...
///     client.disconnect();
/// }
/// ```
#[derive(Clone)]
pub struct EventClient {
    connection: Arc<ConnectionManager>,
    registry: Arc<EventRegistry>,
}

impl EventClient {
    /// Builds a client with default options. See [`EventClientBuilder`] for
    /// tuning.
    pub fn new(factory: Arc<dyn TransportFactory>) -> Self {
        EventClientBuilder::new(factory).build()
    }

    pub(crate) fn from_parts(
        connection: Arc<ConnectionManager>,
        registry: Arc<EventRegistry>,
    ) -> Self {
        Self {
            connection,
            registry,
        }
    }

    /// Begins the handshake with `token` and returns immediately. A no-op
    /// while a connection attempt is in progress or already established.
    pub fn connect(&self, token: impl Into<String>) {
        self.connection.connect(token);
    }

    /// Tears down the connection, cancels any pending reconnect and clears
    /// all subscriptions. Safe to call from any state.
    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// Subscribes `handler` to `event`. Registering the same handler
    /// identity twice is idempotent. Returns an unsubscribe guard.
    pub fn on(&self, event: impl Into<String>, handler: Handler) -> Subscription {
        self.registry.register(event, handler)
    }

    /// Removes one handler for `event`, or every handler when `handler` is
    /// `None`.
    pub fn off(&self, event: &str, handler: Option<&Handler>) {
        match handler {
            Some(handler) => self.registry.unregister(event, handler),
            None => self.registry.unregister_all(event),
        }
    }

    /// Best-effort outbound command: forwarded while connected, otherwise
    /// dropped silently. Never fails for connectivity reasons.
    pub fn emit(&self, event: impl Into<String>, payload: serde_json::Value) {
        self.connection.emit(event, payload);
    }

    /// Current boolean connectivity.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Registers a callback for boolean connectivity transitions. Returns
    /// an unsubscribe guard.
    pub fn on_status_change<F>(&self, callback: F) -> StatusSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.connection.on_status_change(callback)
    }
}
