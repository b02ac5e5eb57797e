//! Blocking client for the paginated user search API.
//!
//! # Overview
//! `SearchClient::find_users` validates a `SearchRequest`, sends one GET to
//! the search service and classifies the answer into a `SearchResponse` or a
//! `SearchError`.
//!
//! # Design
//! - Building the request and parsing the response are pure functions over
//!   `HttpRequest` / `HttpResponse`; only the `Transport` performs I/O.
//! - `SearchClient` holds read-only configuration after construction.
//! - DTOs are defined independently from the `search-server` crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, SearchClient, DEFAULT_TIMEOUT};
pub use error::{ConfigError, SearchError};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{
    ErrorBody, ErrorCode, OrderBy, SearchRequest, SearchResponse, User, ACCESS_TOKEN_HEADER,
    MAX_LIMIT, SEARCH_PATH,
};
