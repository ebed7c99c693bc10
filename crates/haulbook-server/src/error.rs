//! Server-side error type and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,

  /// A logo was uploaded before the organization profile was created.
  #[error("no organization profile exists yet")]
  ProfileMissing,

  #[error("unsupported media type: {0:?}")]
  UnsupportedMediaType(String),

  #[error("upload exceeds the size limit")]
  PayloadTooLarge,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::NotFound => StatusCode::NOT_FOUND,
      Error::ProfileMissing => StatusCode::CONFLICT,
      Error::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Io(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
