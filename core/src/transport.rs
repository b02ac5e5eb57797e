//! Network execution of `HttpRequest` values.
//!
//! `Transport` is the only seam where I/O happens. `UreqTransport` is the
//! default blocking implementation; tests substitute in-process fakes.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use ureq::Agent;

use crate::http::{HttpRequest, HttpResponse};

/// Failure to complete an HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Network(Box<dyn StdError + Send + Sync>),

    /// The exchange completed but the body was larger than the read limit.
    #[error("HTTP {status} body exceeds {limit} bytes")]
    BodyTooLarge { status: u16, limit: u64 },
}

/// Executes one HTTP GET and returns the response as data.
///
/// Implementations must return non-2xx responses as `Ok`, leaving status
/// interpretation to the caller.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// `timeout` bounds the whole exchange, body read included.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| classify_body(status, e))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(ref e) if is_timeout(e) => TransportError::Timeout,
        other => TransportError::Network(Box::new(other)),
    }
}

fn classify_body(status: u16, err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::BodyExceedsLimit(limit) => TransportError::BodyTooLarge { status, limit },
        other => classify(other),
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_timeouts_classify_as_timeout() {
        let err = ureq::Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(matches!(classify(err), TransportError::Timeout));
    }

    #[test]
    fn refused_connection_classifies_as_network() {
        let err = ureq::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(matches!(classify(err), TransportError::Network(_)));
    }

    #[test]
    fn oversized_body_keeps_status() {
        let err = classify_body(200, ureq::Error::BodyExceedsLimit(10));
        assert!(matches!(
            err,
            TransportError::BodyTooLarge { status: 200, limit: 10 }
        ));
        assert!(matches!(
            classify_body(200, ureq::Error::Timeout(ureq::Timeout::Global)),
            TransportError::Timeout
        ));
    }

    #[test]
    fn host_not_found_classifies_as_network() {
        assert!(matches!(
            classify(ureq::Error::HostNotFound),
            TransportError::Network(_)
        ));
    }
}
