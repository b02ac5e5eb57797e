//! Domain DTOs for the user search API.
//!
//! # Design
//! These types mirror the search server's wire schema but are defined
//! independently of the `search-server` crate. The integration tests run the
//! client against the live server, so any schema drift between the two crates
//! shows up there.

use serde::{Deserialize, Serialize};

/// Largest page size the service hands out. Larger requested limits are
/// clamped to this value before the overfetch is added.
pub const MAX_LIMIT: i64 = 25;

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Path of the search endpoint, relative to the service base URL.
pub const SEARCH_PATH: &str = "/search";

/// Sort direction, sent on the wire as its integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OrderBy {
    Asc,
    #[default]
    AsIs,
    Desc,
}

impl OrderBy {
    pub fn code(self) -> i8 {
        match self {
            OrderBy::Asc => -1,
            OrderBy::AsIs => 0,
            OrderBy::Desc => 1,
        }
    }
}

impl TryFrom<i64> for OrderBy {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(OrderBy::Asc),
            0 => Ok(OrderBy::AsIs),
            1 => Ok(OrderBy::Desc),
            other => Err(format!("unknown order_by code {other}")),
        }
    }
}

impl From<OrderBy> for i64 {
    fn from(order_by: OrderBy) -> Self {
        i64::from(order_by.code())
    }
}

/// Caller input for `SearchClient::find_users`.
///
/// `limit` and `offset` are signed so that out-of-range values can be
/// reported as errors instead of being unrepresentable. An empty
/// `order_field` lets the service pick its default (`Name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: String,
    pub limit: i64,
    pub offset: i64,
    pub order_field: String,
    pub order_by: OrderBy,
}

/// A single matched user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<User>,
    /// True when more matching records exist beyond this page.
    pub next_page: bool,
}

/// Error envelope returned by the service on 400 and 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The structured code carried in `Error`, if it is one the client knows.
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_wire(&self.error)
    }

    /// Human-readable detail, falling back to the raw `Error` text.
    pub fn detail(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.error)
    }
}

/// Closed set of error codes the service puts in the `Error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The order field is known but sorting on it is disabled.
    ErrorBadOrderField,
    /// The order field is not one the service knows.
    UnexpectedField,
    /// A numeric parameter could not be parsed.
    BadParam,
    AccessDenied,
    Internal,
}

impl ErrorCode {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "ErrorBadOrderField" => Some(ErrorCode::ErrorBadOrderField),
            "UnexpectedField" => Some(ErrorCode::UnexpectedField),
            "BadParam" => Some(ErrorCode::BadParam),
            "AccessDenied" => Some(ErrorCode::AccessDenied),
            "Internal" => Some(ErrorCode::Internal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_codes() {
        assert_eq!(OrderBy::Asc.code(), -1);
        assert_eq!(OrderBy::AsIs.code(), 0);
        assert_eq!(OrderBy::Desc.code(), 1);
        assert_eq!(OrderBy::try_from(1i64), Ok(OrderBy::Desc));
        assert!(OrderBy::try_from(2i64).is_err());
    }

    #[test]
    fn user_uses_pascal_case_keys() {
        let user: User = serde_json::from_str(
            r#"{"Id":3,"Name":"Everett Dillard","Age":27,"About":"Sint","Gender":"male"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Everett Dillard");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["Gender"], "male");
    }

    #[test]
    fn search_request_defaults_from_empty_json() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, SearchRequest::default());
        assert_eq!(req.order_by, OrderBy::AsIs);
    }

    #[test]
    fn error_body_code_and_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"Error":"ErrorBadOrderField"}"#).unwrap();
        assert_eq!(body.code(), Some(ErrorCode::ErrorBadOrderField));
        assert_eq!(body.detail(), "ErrorBadOrderField");

        let body: ErrorBody =
            serde_json::from_str(r#"{"Error":"BadParam","Message":"limit: invalid digit"}"#).unwrap();
        assert_eq!(body.code(), Some(ErrorCode::BadParam));
        assert_eq!(body.detail(), "limit: invalid digit");

        let body: ErrorBody = serde_json::from_str(r#"{"Error":"something else"}"#).unwrap();
        assert_eq!(body.code(), None);
    }
}
