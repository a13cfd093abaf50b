// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback advisory: ask an external text service about a query the dataset
//! could not answer well.
//!
//! Requests are superseded, never cancelled: each submission takes a ticket
//! from an [`AdvisoryGate`] and only the result carrying the current ticket is
//! applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default advisory endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/ai/fallback";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

const STATUS_FAILURE_TEXT: &str = "Could not fetch advisory response.";

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory query is blank")]
    BlankQuery,

    #[error("advisory endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("advisory request failed: {0}")]
    Transport(String),

    #[error("advisory response is malformed: {0}")]
    Malformed(String),
}

impl AdvisoryError {
    /// Text shown to the user in place of an advisory.
    pub fn user_message(&self) -> String {
        match self {
            AdvisoryError::BlankQuery => "Type a food or question first.".to_string(),
            AdvisoryError::Status { .. } => STATUS_FAILURE_TEXT.to_string(),
            AdvisoryError::Transport(detail) | AdvisoryError::Malformed(detail) => {
                format!("Connection error: {detail}")
            }
        }
    }
}

/// Collapse an advisory result into displayable text; failures never escape.
pub fn advisory_text(result: Result<String, AdvisoryError>) -> String {
    result.unwrap_or_else(|err| err.user_message())
}

/// External text-advisory collaborator.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Explain `query` (already trimmed and non-blank) in free text.
    async fn request_advisory(&self, query: &str) -> Result<String, AdvisoryError>;
}

#[derive(Debug, Serialize)]
struct AdvisoryRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct AdvisoryResponse {
    text: String,
}

/// JSON-over-HTTP provider: `POST {"query": …}` → `{"text": …}`.
#[derive(Debug, Clone)]
pub struct HttpAdvisory {
    endpoint: String,
    http: HttpClient,
}

impl HttpAdvisory {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
        }
    }
}

impl Default for HttpAdvisory {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl AdvisoryProvider for HttpAdvisory {
    async fn request_advisory(&self, query: &str) -> Result<String, AdvisoryError> {
        debug!(endpoint = %self.endpoint, query, "Requesting advisory");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AdvisoryRequest { query })
            .send()
            .await
            .map_err(|e| AdvisoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Advisory endpoint rejected request");
            return Err(AdvisoryError::Status {
                status: status.as_u16(),
            });
        }

        let body: AdvisoryResponse = response
            .json()
            .await
            .map_err(|e| AdvisoryError::Malformed(e.to_string()))?;
        Ok(body.text)
    }
}

/// Proof that a request was submitted; compared against the gate on
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out monotonically increasing tickets. Only the newest ticket is
/// current.
#[derive(Debug, Default)]
pub struct AdvisoryGate {
    current: AtomicU64,
}

impl AdvisoryGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, superseding any in flight.
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede whatever is in flight without starting anything.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// `Some(result)` if `ticket` is still current, `None` (discarded)
    /// otherwise.
    pub fn complete<T>(&self, ticket: Ticket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!(ticket = ticket.0, "Discarding stale advisory result");
            None
        }
    }
}

/// Provider plus gate: the UI-facing entry point.
pub struct Advisor<P> {
    provider: P,
    gate: AdvisoryGate,
}

impl<P: AdvisoryProvider> Advisor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            gate: AdvisoryGate::new(),
        }
    }

    /// Submit `query`. Returns the display text, or `None` when a newer
    /// submission superseded this one before it finished.
    pub async fn submit(&self, query: &str) -> Option<String> {
        let ticket = self.gate.issue();
        let trimmed = query.trim();
        let result = if trimmed.is_empty() {
            Err(AdvisoryError::BlankQuery)
        } else {
            self.provider.request_advisory(trimmed).await
        };
        self.gate.complete(ticket, advisory_text(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct SlowEcho;

    #[async_trait]
    impl AdvisoryProvider for SlowEcho {
        async fn request_advisory(&self, query: &str) -> Result<String, AdvisoryError> {
            let delay = if query == "slow" { 200 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("about {query}"))
        }
    }

    struct Failing;

    #[async_trait]
    impl AdvisoryProvider for Failing {
        async fn request_advisory(&self, _query: &str) -> Result<String, AdvisoryError> {
            Err(AdvisoryError::Status { status: 503 })
        }
    }

    /// Serve exactly one HTTP exchange, returning the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let endpoint = format!("http://{}/ai/fallback", listener.local_addr().expect("addr"));
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= split + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            String::from_utf8_lossy(&request).into_owned()
        });
        (endpoint, handle)
    }

    #[test]
    fn failures_become_user_text() {
        assert_eq!(
            advisory_text(Err(AdvisoryError::Status { status: 500 })),
            "Could not fetch advisory response."
        );
        assert_eq!(
            advisory_text(Err(AdvisoryError::Transport("refused".to_string()))),
            "Connection error: refused"
        );
        assert_eq!(advisory_text(Ok("fine".to_string())), "fine");
    }

    #[test]
    fn gate_only_accepts_current_ticket() {
        let gate = AdvisoryGate::new();
        let first = gate.issue();
        let second = gate.issue();
        assert_eq!(gate.complete(first, "old"), None);
        assert_eq!(gate.complete(second, "new"), Some("new"));

        gate.invalidate();
        assert!(!gate.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_submission_supersedes_slow_one() {
        let advisor = Advisor::new(SlowEcho);
        let (slow, fast) = tokio::join!(advisor.submit("slow"), advisor.submit("fast"));
        assert_eq!(slow, None);
        assert_eq!(fast.as_deref(), Some("about fast"));
    }

    #[tokio::test]
    async fn provider_failure_is_reported_as_text() {
        let advisor = Advisor::new(Failing);
        assert_eq!(
            advisor.submit("김치").await.as_deref(),
            Some("Could not fetch advisory response.")
        );
    }

    #[tokio::test]
    async fn blank_query_never_reaches_provider() {
        let advisor = Advisor::new(Failing);
        assert_eq!(
            advisor.submit("   ").await.as_deref(),
            Some("Type a food or question first.")
        );
    }

    #[tokio::test]
    async fn http_provider_posts_query_and_reads_text() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"text":"Small amounts are fine."}"#).await;
        let provider = HttpAdvisory::new(endpoint, Duration::from_secs(5));

        let text = provider.request_advisory("커피").await.expect("advisory");
        assert_eq!(text, "Small amounts are fine.");

        let request = server.await.expect("server");
        assert!(request.starts_with("POST /ai/fallback"));
        assert!(request.contains(r#"{"query":"커피"}"#));
    }

    #[tokio::test]
    async fn http_provider_maps_error_status() {
        let (endpoint, server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let provider = HttpAdvisory::new(endpoint, Duration::from_secs(5));

        let err = provider.request_advisory("커피").await.expect_err("status");
        assert!(matches!(err, AdvisoryError::Status { status: 500 }));
        server.await.expect("server");
    }

    #[tokio::test]
    async fn http_provider_rejects_body_without_text() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"answer":"?"}"#).await;
        let provider = HttpAdvisory::new(endpoint, Duration::from_secs(5));

        let err = provider.request_advisory("커피").await.expect_err("malformed");
        assert!(matches!(err, AdvisoryError::Malformed(_)));
        assert!(err.user_message().starts_with("Connection error: "));
        server.await.expect("server");
    }
}
