//! Transport seam for the realtime client.
//!
//! The driver only sees [`Transport`] and [`Connection`]; production wires in
//! [`TungsteniteTransport`], tests wire in in-memory fakes.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use maicivy_shared::RealtimeError;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// One inbound frame as the driver cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    /// Binary, ping/pong and other control frames.
    Other,
}

/// Opens connections to a realtime endpoint.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn connect(&self, url: &str) -> Result<Box<dyn Connection>, RealtimeError>;
}

/// An open connection.
///
/// `next_frame` returning `None` is the close signal. An `Err` item is an
/// error report only; the stream stays open until `None`.
#[async_trait]
pub trait Connection: Send {
    async fn next_frame(&mut self) -> Option<Result<Frame, RealtimeError>>;

    async fn send_text(&mut self, text: String) -> Result<(), RealtimeError>;

    async fn close(&mut self);
}

/// WebSocket transport backed by tokio-tungstenite.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteTransport;

#[async_trait]
impl Transport for TungsteniteTransport {
    async fn connect(&self, url: &str) -> Result<Box<dyn Connection>, RealtimeError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))?;
        Ok(Box::new(TungsteniteConnection {
            stream,
            finished: false,
        }))
    }
}

struct TungsteniteConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    finished: bool,
}

#[async_trait]
impl Connection for TungsteniteConnection {
    async fn next_frame(&mut self) -> Option<Result<Frame, RealtimeError>> {
        if self.finished {
            return None;
        }
        match self.stream.next().await {
            Some(Ok(Message::Text(text))) => Some(Ok(Frame::Text(text.as_str().to_owned()))),
            Some(Ok(Message::Close(frame))) => {
                tracing::debug!("Realtime socket received close frame: {:?}", frame);
                self.finished = true;
                None
            }
            // Pong is handled automatically by tungstenite
            Some(Ok(_)) => Some(Ok(Frame::Other)),
            Some(Err(e)) => {
                // tungstenite does not recover from read errors; report once,
                // then end the stream
                self.finished = true;
                Some(Err(RealtimeError::Transport(e.to_string())))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), RealtimeError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| RealtimeError::Transport(e.to_string()))
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!("Realtime socket close failed: {}", e);
        }
        self.finished = true;
    }
}
