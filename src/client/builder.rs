use std::sync::Arc;
use std::time::Duration;

use super::connection::ConnectionManager;
use super::core::EventClient;
use crate::registry::EventRegistry;
use crate::transport::TransportFactory;
use crate::types::constants::{MAX_CONNECT_ATTEMPTS, RETRY_DELAY_MS};

/// Tunables for the connection lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct EventClientOptions {
    /// Consecutive failed handshakes tolerated before the client gives up.
    pub max_attempts: u32,
    /// Fixed delay between reconnect attempts.
    pub retry_delay: Duration,
}

impl Default for EventClientOptions {
    fn default() -> Self {
        Self {
            max_attempts: MAX_CONNECT_ATTEMPTS,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

/// Builds an [`EventClient`] around an injected transport factory.
///
/// One client exists per authenticated session: created at login, torn down
/// at logout. Injecting the factory keeps instances isolated, so tests can
/// run any number of clients against in-process transports.
pub struct EventClientBuilder {
    factory: Arc<dyn TransportFactory>,
    options: EventClientOptions,
}

impl EventClientBuilder {
    pub fn new(factory: Arc<dyn TransportFactory>) -> Self {
        Self {
            factory,
            options: EventClientOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EventClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.options.retry_delay = delay;
        self
    }

    pub fn build(self) -> EventClient {
        let registry = Arc::new(EventRegistry::new());
        let connection = Arc::new(ConnectionManager::new(
            self.factory,
            Arc::clone(&registry),
            self.options,
        ));

        EventClient::from_parts(connection, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_protocol_constants() {
        let options = EventClientOptions::default();

        assert_eq!(options.max_attempts, 5);
        assert_eq!(options.retry_delay, Duration::from_millis(1000));
    }

    #[test]
    fn builder_overrides_apply() {
        let options = EventClientOptions {
            max_attempts: 2,
            retry_delay: Duration::from_millis(50),
        };

        let builder = EventClientBuilder::new(Arc::new(crate::transport::MemoryHub::new()))
            .with_options(options)
            .with_max_attempts(3);

        assert_eq!(builder.options.max_attempts, 3);
        assert_eq!(builder.options.retry_delay, Duration::from_millis(50));
    }
}
