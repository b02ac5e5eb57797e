//! Search client: request validation, transport and response classification.
//!
//! # Design
//! `find_users` is split into a pure `build_find_users`, one call to the
//! `Transport`, and a pure `parse_find_users`. The client holds only
//! read-only configuration and its transport, so one instance can serve
//! concurrent callers when the transport allows it.
//!
//! To learn whether another page exists, the client asks for one record more
//! than the (clamped) limit and trims it from the result.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::error::{ConfigError, SearchError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError, UreqTransport};
use crate::types::{
    ErrorBody, ErrorCode, SearchRequest, SearchResponse, User, ACCESS_TOKEN_HEADER, MAX_LIMIT,
    SEARCH_PATH,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

const DEFAULT_ORDER_FIELD: &str = "Name";

/// Connection settings for a `SearchClient`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Service root, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    pub access_token: String,
    #[serde(
        rename = "timeout_ms",
        default = "default_timeout",
        deserialize_with = "duration_from_millis"
    )]
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `SEARCH_URL`, `SEARCH_ACCESS_TOKEN` and the optional
    /// `SEARCH_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("SEARCH_URL").map_err(|_| ConfigError::Missing("SEARCH_URL"))?;
        let access_token = std::env::var("SEARCH_ACCESS_TOKEN")
            .map_err(|_| ConfigError::Missing("SEARCH_ACCESS_TOKEN"))?;
        let mut config = Self::new(&base_url, &access_token);
        if let Ok(raw) = std::env::var("SEARCH_TIMEOUT_MS") {
            let millis: u64 = raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                name: "SEARCH_TIMEOUT_MS",
                reason: e.to_string(),
            })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn duration_from_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Client for the user search API.
pub struct SearchClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl SearchClient<UreqTransport> {
    /// Client using a blocking `ureq` transport bounded by `config.timeout`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SearchClient<T> {
    pub fn with_transport(mut config: ClientConfig, transport: T) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs one search against the service. Never retries.
    pub fn find_users(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let http_request = self.build_find_users(request).inspect_err(|e| {
            warn!(error = %e, "rejected search request before sending");
        })?;

        debug!(url = %http_request.url, "sending search request");
        let response = self
            .transport
            .execute(&http_request)
            .map_err(|e| match e {
                TransportError::Timeout => SearchError::Timeout(self.config.timeout),
                TransportError::Network(source) => SearchError::NetworkFailure(source),
                TransportError::BodyTooLarge { status, limit } => {
                    SearchError::UnexpectedServerResponse {
                        status,
                        message: format!("response body exceeds {limit} bytes"),
                    }
                }
            })
            .inspect_err(|e| warn!(error = %e, "search request failed"))?;

        debug!(status = response.status, bytes = response.body.len(), "received search response");
        self.parse_find_users(request, response)
            .inspect_err(|e| warn!(error = %e, "search returned an error"))
    }

    /// Validates `request` and turns it into a GET request. No I/O.
    pub fn build_find_users(&self, request: &SearchRequest) -> Result<HttpRequest, SearchError> {
        if request.limit < 0 {
            return Err(SearchError::BadRequestParams("limit must be > 0".to_string()));
        }
        if request.offset < 0 {
            return Err(SearchError::BadRequestParams("offset must be > 0".to_string()));
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("limit", &overfetch_size(request).to_string())
            .append_pair("offset", &request.offset.to_string())
            .append_pair("query", &request.query)
            .append_pair("order_field", &request.order_field)
            .append_pair("order_by", &request.order_by.code().to_string())
            .finish();

        Ok(HttpRequest {
            url: format!("{}{SEARCH_PATH}?{query}", self.config.base_url),
            headers: vec![(
                ACCESS_TOKEN_HEADER.to_string(),
                self.config.access_token.clone(),
            )],
        })
    }

    /// Classifies the service's answer to `request`. No I/O.
    pub fn parse_find_users(
        &self,
        request: &SearchRequest,
        response: HttpResponse,
    ) -> Result<SearchResponse, SearchError> {
        match response.status {
            200 => {
                let users: Vec<User> = serde_json::from_str(&response.body).map_err(|e| {
                    SearchError::UnexpectedServerResponse {
                        status: 200,
                        message: format!("cannot decode users: {e}"),
                    }
                })?;
                Ok(trim_page(users, overfetch_size(request)))
            }
            400 => Err(classify_bad_request(request, &response.body)),
            401 => Err(SearchError::Unauthorized),
            500 => {
                let message = serde_json::from_str::<ErrorBody>(&response.body)
                    .map(|body| body.detail().to_string())
                    .unwrap_or_else(|_| "search server fatal error".to_string());
                Err(SearchError::InternalServerFailure(message))
            }
            status => Err(SearchError::UnexpectedServerResponse {
                status,
                message: response.body,
            }),
        }
    }
}

impl<T> fmt::Debug for SearchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Clamped limit plus the one extra record used to detect a next page.
fn overfetch_size(request: &SearchRequest) -> usize {
    // Negative limits never reach the wire; clamp keeps this total.
    request.limit.clamp(0, MAX_LIMIT) as usize + 1
}

fn trim_page(mut users: Vec<User>, overfetch: usize) -> SearchResponse {
    let next_page = users.len() == overfetch;
    if next_page {
        users.truncate(overfetch - 1);
    }
    SearchResponse { users, next_page }
}

fn classify_bad_request(request: &SearchRequest, body: &str) -> SearchError {
    let body: ErrorBody = match serde_json::from_str(body) {
        Ok(body) => body,
        Err(e) => {
            return SearchError::UnexpectedServerResponse {
                status: 400,
                message: format!("cannot decode error body: {e}"),
            }
        }
    };

    let field = if request.order_field.is_empty() {
        DEFAULT_ORDER_FIELD
    } else {
        request.order_field.as_str()
    };

    match body.code() {
        Some(ErrorCode::ErrorBadOrderField) => SearchError::InvalidOrderField(field.to_string()),
        Some(ErrorCode::UnexpectedField) => {
            SearchError::BadRequestParams(format!("unexpected order field {field:?}"))
        }
        Some(ErrorCode::BadParam) => SearchError::BadRequestParams(body.detail().to_string()),
        _ => SearchError::UnexpectedServerResponse {
            status: 400,
            message: format!("unknown bad request error: {}", body.detail()),
        },
    }
}
