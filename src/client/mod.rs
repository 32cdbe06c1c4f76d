// Module declarations
mod builder;
mod connection;
mod core;
mod state;

// Public API exports
pub use builder::{EventClientBuilder, EventClientOptions};
pub use connection::{ConnectionManager, ConnectionState, StatusSubscription};
pub use core::EventClient;
pub use state::{ClientState, StatusCallback};
