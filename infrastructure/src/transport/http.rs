//! HTTP reply source for the guide backend.
//!
//! - `POST {base}/api/chat` with a JSON [`ChatRequest`], answered by a JSON
//!   [`ChatReply`]
//! - `POST {base}/api/chat/stream` with the same body, answered by
//!   server-sent events (see [`SseDecoder`])

use super::sse::SseDecoder;
use async_trait::async_trait;
use guide_application::{ReplySource, SourceError, StreamHandle};
use guide_domain::{ChatReply, ChatRequest, StreamEvent};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Reply source backed by the guide's HTTP API.
pub struct HttpReplySource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpReplySource {
    /// Create a source for `base_url` (e.g. `http://localhost:8000`).
    ///
    /// `timeout` bounds a whole non-streaming request, and the gap between
    /// two chunks of a streamed one.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| SourceError::ConnectionError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(
        &self,
        path: &str,
        request: &ChatRequest,
        timeout: Option<Duration>,
    ) -> Result<Response, SourceError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let mut builder = self.client.post(&url).json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_connect() {
        SourceError::ConnectionError(e.to_string())
    } else if e.is_decode() {
        SourceError::InvalidResponse(e.to_string())
    } else {
        SourceError::StreamError(e.to_string())
    }
}

#[async_trait]
impl ReplySource for HttpReplySource {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, SourceError> {
        let response = self.post("/api/chat", request, Some(self.timeout)).await?;
        response
            .json::<ChatReply>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }

    async fn send_streaming(&self, request: &ChatRequest) -> Result<StreamHandle, SourceError> {
        let mut response = self.post("/api/chat/stream", request, None).await?;
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let gap = self.timeout;

        tokio::spawn(async move {
            let mut decoder = SseDecoder::new();
            loop {
                let chunk = match tokio::time::timeout(gap, response.chunk()).await {
                    Ok(Ok(Some(chunk))) => chunk,
                    Ok(Ok(None)) => break,
                    Ok(Err(e)) => {
                        warn!("Reply stream failed: {}", e);
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                    Err(_) => {
                        warn!("Reply stream stalled for {:?}", gap);
                        let _ = tx
                            .send(StreamEvent::Error("stream timed out".to_string()))
                            .await;
                        return;
                    }
                };

                for event in decoder.feed(&chunk) {
                    if tx.send(event).await.is_err() {
                        // Receiver dropped; nobody is listening any more
                        return;
                    }
                }
            }

            if let Some(event) = decoder.finish() {
                let _ = tx.send(event).await;
            }
        });

        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let source = HttpReplySource::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.base_url(), "http://localhost:8000");
        assert_eq!(
            source.endpoint("/api/chat"),
            "http://localhost:8000/api/chat"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let source = HttpReplySource::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let request = ChatRequest::new("hi", guide_domain::Language::English);
        assert!(source.send(&request).await.is_err());
    }
}
