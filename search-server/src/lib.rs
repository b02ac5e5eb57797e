//! Reference implementation of the user search service.
//!
//! One GET endpoint at `/search` that checks the `AccessToken` header, filters
//! the dataset by `query`, sorts by `order_field`/`order_by` and returns one
//! `offset`/`limit` page as a JSON array.

pub mod dataset;
pub mod error;
pub mod order;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use dataset::{Dataset, DatasetError, Row, User};
pub use error::ApiError;
pub use order::{OrderBy, OrderField};

pub const SEARCH_PATH: &str = "/search";
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Everything the service needs; no process-wide state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub access_token: String,
    pub dataset: Dataset,
}

type AppState = Arc<ServerConfig>;

pub fn app(config: ServerConfig) -> Router {
    Router::new()
        .route(SEARCH_PATH, get(search_users))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

/// Validated query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    pub order_field: OrderField,
    pub order_by: OrderBy,
}

impl SearchParams {
    pub fn parse(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let limit = count_param(params, "limit")?;
        let offset = count_param(params, "offset")?;
        let order_by = OrderBy::from_code(int_param(params, "order_by")?);

        let order_field = match params.get("order_field").map(String::as_str) {
            None | Some("") => OrderField::Name,
            Some(name) => name
                .parse::<OrderField>()
                .map_err(|unknown| ApiError::UnexpectedField(unknown.0))?,
        };
        if !order_field.is_sortable() {
            return Err(ApiError::BadOrderField(order_field));
        }

        Ok(Self {
            query: params.get("query").cloned().unwrap_or_default(),
            limit,
            offset,
            order_field,
            order_by,
        })
    }
}

fn int_param(params: &HashMap<String, String>, name: &str) -> Result<i64, ApiError> {
    let raw = params.get(name).map(String::as_str).unwrap_or_default();
    raw.parse::<i64>()
        .map_err(|e| ApiError::BadParam(format!("{name}: {e}")))
}

fn count_param(params: &HashMap<String, String>, name: &str) -> Result<usize, ApiError> {
    let value = int_param(params, name)?;
    usize::try_from(value).map_err(|_| ApiError::BadParam(format!("{name}: must not be negative")))
}

/// Filters, sorts and paginates `rows`.
pub fn search(rows: &[Row], params: &SearchParams) -> Vec<User> {
    let mut users: Vec<User> = rows
        .iter()
        .filter(|row| row.matches(&params.query))
        .map(User::from)
        .collect();
    order::sort_users(&mut users, params.order_field, params.order_by);

    let offset = params.offset.min(users.len());
    let limit = params.limit.min(users.len() - offset);
    users.drain(offset..offset + limit).collect()
}

async fn search_users(
    State(config): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let token = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if token != Some(config.access_token.as_str()) {
        return Err(ApiError::AccessDenied);
    }

    let params = SearchParams::parse(&params)?;
    let rows = config.dataset.load().await?;
    let users = search(&rows, &params);
    tracing::debug!(
        query = %params.query,
        offset = params.offset,
        limit = params.limit,
        returned = users.len(),
        "search served"
    );
    Ok(Json(users))
}
