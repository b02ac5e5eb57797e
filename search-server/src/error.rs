//! Error responses for the search endpoint.
//!
//! Every failure is sent as `{"Error": <code>, "Message": <text>}`. Clients
//! branch on the code; the message is for humans.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dataset::DatasetError;
use crate::order::OrderField;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("access denied")]
    AccessDenied,

    #[error("{0}")]
    BadParam(String),

    #[error("unexpected order field {0:?}")]
    UnexpectedField(String),

    #[error("sorting by {0} is disabled")]
    BadOrderField(OrderField),

    #[error("dataset unavailable: {0}")]
    Dataset(#[from] DatasetError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(rename = "Error")]
    error: &'static str,
    #[serde(rename = "Message")]
    message: String,
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccessDenied => "AccessDenied",
            Self::BadParam(_) => "BadParam",
            Self::UnexpectedField(_) => "UnexpectedField",
            Self::BadOrderField(_) => "ErrorBadOrderField",
            Self::Dataset(_) => "Internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AccessDenied => StatusCode::UNAUTHORIZED,
            Self::BadParam(_) | Self::UnexpectedField(_) | Self::BadOrderField(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "search failed");
        } else {
            tracing::debug!(error = %self, "search rejected");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
