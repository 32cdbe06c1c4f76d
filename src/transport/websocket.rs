//! Production WebSocket transport for the realtime gateway.

use std::sync::Arc;

use async_trait::async_trait;
use futures::SinkExt;
use futures::stream::{SplitSink, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::{Transport, TransportFactory, TransportHandle};
use crate::types::constants::TOKEN_QUERY_PARAM;
use crate::types::{ClientError, EventFrame, Result};

const INBOUND_BUFFER: usize = 128;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Connects to the realtime gateway over WebSocket, presenting the session
/// token as a query parameter on the endpoint URL.
pub struct WebSocketFactory {
    endpoint: String,
}

impl WebSocketFactory {
    /// `endpoint` is the gateway URL, e.g. `wss://realtime.arena.dev/socket`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn endpoint_url(&self, token: &str) -> Result<String> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut().append_pair(TOKEN_QUERY_PARAM, token);
        Ok(url.to_string())
    }
}

#[async_trait]
impl TransportFactory for WebSocketFactory {
    async fn connect(&self, token: &str) -> Result<TransportHandle> {
        let url = self.endpoint_url(token)?;
        tracing::info!("connecting to {}", self.endpoint);

        let (ws_stream, _response) = connect_async(url).await?;
        let (write_half, mut read_half) = ws_stream.split();

        let (frame_tx, frame_rx) = mpsc::channel(INBOUND_BUFFER);
        tokio::spawn(async move {
            while let Some(msg_result) = read_half.next().await {
                match msg_result {
                    Ok(Message::Text(text)) => match serde_json::from_str::<EventFrame>(&text) {
                        Ok(frame) => {
                            if frame_tx.send(frame).await.is_err() {
                                // receiver gone, nobody is listening anymore
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!("failed to parse frame: {} - raw: {}", e, text.as_str());
                        }
                    },
                    Ok(Message::Close(close_frame)) => {
                        if let Some(close_frame) = close_frame {
                            tracing::warn!(
                                "server closed connection: code={:?}, reason='{}'",
                                close_frame.code,
                                close_frame.reason.as_str()
                            );
                        } else {
                            tracing::warn!("server closed connection without close frame");
                        }
                        break;
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        tracing::trace!("keepalive frame");
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::warn!("unexpected binary message ({} bytes)", data.len());
                    }
                    Ok(Message::Frame(_)) => {}
                    Err(e) => {
                        tracing::error!("WebSocket read error: {}", e);
                        break;
                    }
                }
            }
            // frame_tx drops here, closing the inbound channel: that is the
            // drop signal the connection manager reacts to
            tracing::debug!("read task finished");
        });

        Ok(TransportHandle {
            transport: Arc::new(WebSocketTransport {
                sink: Mutex::new(Some(write_half)),
            }),
            inbound: frame_rx,
        })
    }
}

/// Outbound half of an established WebSocket connection.
pub struct WebSocketTransport {
    sink: Mutex<Option<WsSink>>,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&self, frame: EventFrame) -> Result<()> {
        let json = serde_json::to_string(&frame)?;

        let mut guard = self.sink.lock().await;
        match guard.as_mut() {
            Some(sink) => {
                sink.send(Message::Text(json.into())).await?;
                Ok(())
            }
            None => Err(ClientError::TransportClosed),
        }
    }

    async fn close(&self) {
        let mut guard = self.sink.lock().await;
        if let Some(mut sink) = guard.take() {
            if let Err(e) = sink.close().await {
                tracing::debug!("close handshake failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_carries_the_token() {
        let factory = WebSocketFactory::new("wss://realtime.arena.dev/socket");
        let url = factory.endpoint_url("abc123").unwrap();
        assert_eq!(url, "wss://realtime.arena.dev/socket?token=abc123");
    }

    #[test]
    fn endpoint_url_rejects_malformed_endpoint() {
        let factory = WebSocketFactory::new("not a url");
        assert!(matches!(
            factory.endpoint_url("abc"),
            Err(ClientError::UrlParse(_))
        ));
    }
}
