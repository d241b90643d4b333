//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every store failure becomes an explicit `500` response with a JSON error
/// body — a failed request never goes unanswered.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let ApiError::Store(e) = &self;
    tracing::error!(error = %e, "store operation failed");
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "error": e.to_string() })),
    )
      .into_response()
  }
}
