use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::builder::EventClientOptions;
use super::state::ClientState;
use crate::dispatcher::Dispatcher;
use crate::infrastructure::RetrySchedule;
use crate::registry::EventRegistry;
use crate::transport::{Transport, TransportFactory, TransportHandle};
use crate::types::EventFrame;
use crate::types::constants::system_events;

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Failed,
}

struct Session {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the connection lifecycle: the state machine, the session task that
/// performs handshakes and pumps inbound frames, the retry budget, and the
/// registry replay on every successful (re)connect.
pub struct ConnectionManager {
    factory: Arc<dyn TransportFactory>,
    registry: Arc<EventRegistry>,
    options: EventClientOptions,
    state: RwLock<ConnectionState>,
    transport: RwLock<Option<Arc<dyn Transport>>>,
    session: Mutex<Option<Session>>,
    listeners: Mutex<ClientState>,
}

impl ConnectionManager {
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        registry: Arc<EventRegistry>,
        options: EventClientOptions,
    ) -> Self {
        Self {
            factory,
            registry,
            options,
            state: RwLock::new(ConnectionState::Disconnected),
            transport: RwLock::new(None),
            session: Mutex::new(None),
            listeners: Mutex::new(ClientState::new()),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Begins the handshake and returns immediately. The outcome surfaces
    /// through status callbacks. A no-op while a connection attempt is in
    /// progress or already established; an active retry loop counts as in
    /// progress and keeps its original token.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(self: &Arc<Self>, token: impl Into<String>) {
        // the session slot is held across claim, spawn and store so a
        // concurrent disconnect() cannot slip between them and orphan the
        // new session task
        let mut session = self.session.lock();
        if !self.try_begin_connect() {
            tracing::debug!("connect ignored while {:?}", self.state());
            return;
        }

        let cancel = CancellationToken::new();
        let manager = Arc::clone(self);
        let token = token.into();
        let session_cancel = cancel.clone();
        let task = tokio::spawn(async move { manager.run_session(token, session_cancel).await });

        *session = Some(Session { cancel, task });
    }

    /// Tears down any live transport, cancels any pending reconnect timer or
    /// in-flight handshake, clears the registry and settles on
    /// `Disconnected`. Safe to call from any state.
    pub fn disconnect(&self) {
        let session = self.session.lock().take();
        if let Some(session) = session {
            session.cancel.cancel();
            session.task.abort();
        }

        let transport = self.transport.write().take();
        if let Some(transport) = transport {
            tokio::spawn(async move { transport.close().await });
        }

        self.registry.clear();
        self.set_state(ConnectionState::Disconnected);
        tracing::info!("disconnected");
    }

    /// Best-effort send. Forwarded only while connected; otherwise dropped.
    pub fn emit(&self, event: impl Into<String>, payload: serde_json::Value) {
        let frame = EventFrame::new(event, payload);
        if !self.is_connected() {
            tracing::debug!("dropping {} while disconnected", frame.event);
            return;
        }

        let transport = self.transport.read().clone();
        let Some(transport) = transport else {
            tracing::debug!("dropping {} while disconnected", frame.event);
            return;
        };

        tokio::spawn(async move {
            if let Err(e) = transport.send(frame).await {
                tracing::debug!("send failed: {}", e);
            }
        });
    }

    /// Registers a callback invoked on every boolean connectivity
    /// transition. Returns an unsubscribe guard.
    pub fn on_status_change<F>(self: &Arc<Self>, callback: F) -> StatusSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.listeners.lock().add_listener(Arc::new(callback));
        StatusSubscription {
            manager: Arc::downgrade(self),
            id,
        }
    }

    /// Atomically claims the right to start a session.
    fn try_begin_connect(&self) -> bool {
        let mut state = self.state.write();
        match *state {
            ConnectionState::Disconnected | ConnectionState::Failed => {
                *state = ConnectionState::Connecting;
                true
            }
            _ => false,
        }
    }

    fn set_state(&self, new_state: ConnectionState) {
        {
            let mut state = self.state.write();
            if *state == new_state {
                return;
            }
            tracing::debug!("connection state {:?} -> {:?}", *state, new_state);
            *state = new_state;
        }

        let connected = new_state == ConnectionState::Connected;
        let callbacks = self.listeners.lock().transition(connected);
        if let Some(callbacks) = callbacks {
            for callback in callbacks {
                (*callback)(connected);
            }
        }
    }

    /// Drives one session: handshake, connected epoch, reconnect loop.
    /// Runs until cancellation or retry-budget exhaustion.
    async fn run_session(self: Arc<Self>, token: String, cancel: CancellationToken) {
        let mut retry = RetrySchedule::new(self.options.max_attempts, self.options.retry_delay);

        loop {
            let attempt = tokio::select! {
                attempt = self.factory.connect(&token) => attempt,
                _ = cancel.cancelled() => return,
            };

            match attempt {
                Ok(handle) => {
                    retry.reset();
                    self.attach(handle, &cancel).await;
                    if cancel.is_cancelled() {
                        return;
                    }

                    self.transport.write().take();
                    self.set_state(ConnectionState::Reconnecting);
                    tracing::warn!("transport dropped, reconnecting");
                }
                Err(e) => {
                    tracing::warn!("handshake failed: {}", e);
                    self.set_state(ConnectionState::Reconnecting);

                    if !retry.record_failure() {
                        tracing::error!(
                            "giving up after {} failed connection attempts",
                            retry.failures()
                        );
                        self.set_state(ConnectionState::Failed);
                        return;
                    }

                    tokio::select! {
                        _ = sleep(retry.delay()) => {}
                        _ = cancel.cancelled() => return,
                    }
                }
            }
        }
    }

    /// One connected epoch: install the transport, replay the registry
    /// snapshot, pump inbound frames until the stream ends or the session
    /// is cancelled.
    async fn attach(&self, handle: TransportHandle, cancel: &CancellationToken) {
        let TransportHandle {
            transport,
            mut inbound,
        } = handle;

        *self.transport.write() = Some(Arc::clone(&transport));
        self.set_state(ConnectionState::Connected);
        tracing::info!("connected");

        self.replay_subscriptions(transport.as_ref()).await;

        let dispatcher = Dispatcher::new(Arc::clone(&self.registry));
        loop {
            tokio::select! {
                frame = inbound.recv() => match frame {
                    Some(frame) => dispatcher.dispatch(&frame),
                    None => return,
                },
                _ = cancel.cancelled() => return,
            }
        }
    }

    /// Announces every registered event name to the freshly established
    /// transport so server-side routing matches the surviving registry.
    async fn replay_subscriptions(&self, transport: &dyn Transport) {
        let snapshot = self.registry.snapshot_all();
        if snapshot.is_empty() {
            return;
        }

        let mut names: Vec<&str> = snapshot.keys().map(String::as_str).collect();
        names.sort_unstable();
        tracing::debug!("replaying {} subscription(s)", names.len());

        let frame = EventFrame::new(
            system_events::SUBSCRIBE,
            serde_json::json!({ "events": names }),
        );
        if let Err(e) = transport.send(frame).await {
            tracing::warn!("failed to replay subscriptions: {}", e);
        }
    }
}

/// Undo guard for a status-change listener.
pub struct StatusSubscription {
    manager: Weak<ConnectionManager>,
    id: u64,
}

impl StatusSubscription {
    pub fn unsubscribe(self) {
        if let Some(manager) = self.manager.upgrade() {
            manager.listeners.lock().remove_listener(self.id);
        }
    }
}
