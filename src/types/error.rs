use thiserror::Error;

/// Errors that can occur inside the realtime client.
///
/// Connectivity failures never reach the public lifecycle surface; they are
/// retried internally and observable through status callbacks. This type
/// exists for the transport seam and endpoint construction.
#[derive(Error, Debug)]
pub enum ClientError {
    /// WebSocket protocol error (connection failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The server refused the handshake (bad or expired token included).
    #[error("handshake rejected: {0}")]
    Handshake(String),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error (malformed endpoint)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The transport was closed out from under a send.
    #[error("transport closed")]
    TransportClosed,
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
