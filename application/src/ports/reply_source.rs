//! Reply source port
//!
//! Defines the interface for obtaining an assistant reply for a user message.
//! The network exchange, retries at the transport level and conversation
//! bookkeeping all live behind this port.

use async_trait::async_trait;
use guide_domain::{ChatReply, ChatRequest, ReplyBuffer, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while fetching a reply
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Timeout")]
    Timeout,
}

/// Source of assistant replies
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Short name for logs (e.g. "http", "echo")
    fn name(&self) -> &str;

    /// Send a message and wait for the complete reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, SourceError>;

    /// Send a message and receive the reply as a stream of events.
    ///
    /// Default implementation calls `send()` and replays the result as a
    /// `Meta`, one `Delta` and `Done`, so non-streaming sources work unchanged.
    async fn send_streaming(&self, request: &ChatRequest) -> Result<StreamHandle, SourceError> {
        let reply = self.send(request).await?;
        let (tx, rx) = mpsc::channel(3);
        // The receiver is still held by the handle, so these cannot fail
        let _ = tx
            .send(StreamEvent::Meta {
                conversation_id: reply.conversation_id,
            })
            .await;
        let _ = tx.send(StreamEvent::Delta(reply.reply)).await;
        let _ = tx.send(StreamEvent::Done).await;
        Ok(StreamHandle::new(rx))
    }
}

/// Handle for receiving streamed reply events.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, or `None` when the stream is closed.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect it into a complete reply.
    ///
    /// `on_delta` is called with the buffer after every text chunk, so a
    /// caller can re-render the growing prefix.
    pub async fn collect_reply<F>(mut self, mut on_delta: F) -> Result<ChatReply, SourceError>
    where
        F: FnMut(&ReplyBuffer) + Send,
    {
        let mut buffer = ReplyBuffer::new();
        while let Some(event) = self.receiver.recv().await {
            let is_delta = event.text().is_some();
            buffer.push(event);
            if is_delta {
                on_delta(&buffer);
            }
            if buffer.is_finished() {
                break;
            }
        }

        if let Some(error) = buffer.error() {
            return Err(SourceError::StreamError(error.to_string()));
        }
        // Channel closed without Done - return what we have
        Ok(buffer.into_reply())
    }
}
