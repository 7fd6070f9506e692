//! Blocking HTTP behind a trait so tile and geocoding code can be driven by in-memory fakes.

use std::time::Duration;

/// Certificate handling for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlsMode {
    Verify,
    /// Accept any certificate. Only used as a fallback after a verified attempt failed.
    Insecure,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("TLS failure: {0}")]
    Tls(String),

    #[error("connection failure: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Other(String),
}

impl HttpError {
    /// Failures worth retrying with the same TLS mode.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}

pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str, tls: TlsMode) -> Result<Vec<u8>, HttpError>;
}

/// How often and how patiently transient failures are retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        backoff: Duration::ZERO,
    };
}

/// GET `url`, verifying certificates first.
///
/// A TLS failure switches to [`TlsMode::Insecure`] once. Connection failures are retried up to
/// `retry.max_retries` times with a fixed backoff; any other failure is returned immediately.
pub fn get_with_retry(
    client: &dyn HttpClient,
    url: &str,
    retry: RetryPolicy,
) -> Result<Vec<u8>, HttpError> {
    let mut tls = TlsMode::Verify;
    let mut retries = 0u32;
    loop {
        match client.get(url, tls) {
            Ok(bytes) => return Ok(bytes),
            Err(HttpError::Tls(reason)) if tls == TlsMode::Verify => {
                tracing::warn!(url, %reason, "certificate verification failed, retrying without it");
                tls = TlsMode::Insecure;
            }
            Err(e) if e.is_transient() && retries < retry.max_retries => {
                retries += 1;
                tracing::warn!(url, attempt = retries, error = %e, "request failed, retrying");
                std::thread::sleep(retry.backoff);
            }
            Err(e) => return Err(e),
        }
    }
}

const USER_AGENT: &str = concat!("photostamp/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] over `reqwest::blocking`, holding one verifying and one permissive client.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    strict: reqwest::blocking::Client,
    insecure: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// 10 s to connect, 20 s for the whole request.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeouts(Duration::from_secs(10), Duration::from_secs(20))
    }

    /// Clients with a `connect` timeout and a `total` per-request timeout covering connect,
    /// headers and body. Blocking reqwest has no separate read timeout, so `total` bounds reads.
    pub fn with_timeouts(connect: Duration, total: Duration) -> anyhow::Result<Self> {
        let build = |insecure: bool| {
            reqwest::blocking::Client::builder()
                .connect_timeout(connect)
                .timeout(total)
                .user_agent(USER_AGENT)
                .danger_accept_invalid_certs(insecure)
                .build()
        };
        Ok(Self {
            strict: build(false)?,
            insecure: build(true)?,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, tls: TlsMode) -> Result<Vec<u8>, HttpError> {
        let client = match tls {
            TlsMode::Verify => &self.strict,
            TlsMode::Insecure => &self.insecure,
        };
        let response = client.get(url).send().map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Other(format!("read body: {e}")))
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    let err = err.without_url();
    let chain = error_chain_text(&err);
    if is_tls_failure(&err) {
        HttpError::Tls(chain)
    } else if err.is_connect() || err.is_timeout() {
        HttpError::Connect(chain)
    } else {
        HttpError::Other(chain)
    }
}

/// Whether a certificate or handshake failure sits below the top-level message. Only sources are
/// inspected; the top level is reqwest's own summary.
fn is_tls_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(s) = source {
        let text = s.to_string().to_ascii_lowercase();
        if ["certificate", "tls", "ssl", "handshake"]
            .iter()
            .any(|needle| text.contains(needle))
        {
            return true;
        }
        source = s.source();
    }
    false
}

fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out.to_ascii_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/net/http.rs"]
mod tests;
