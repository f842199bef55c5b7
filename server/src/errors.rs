// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use eduportal::model::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// A uniqueness rule was violated (duplicate email).
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  /// A storage or internal failure, tagged with the message shown to the client.
  #[error("{message}: {detail}")]
  Operation { message: &'static str, detail: String },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Tags storage and internal failures with the client-facing message of the
  /// operation that hit them. Client errors pass through unchanged.
  pub fn during(self, message: &'static str) -> Self {
    match self {
      AppError::Sqlx(e) => AppError::Operation {
        message,
        detail: e.to_string(),
      },
      AppError::Internal(detail) => AppError::Operation { message, detail },
      other => other,
    }
  }
}

fn body(message: impl Into<String>, error: Option<String>) -> ErrorResponse {
  ErrorResponse {
    success: false,
    message: message.into(),
    error,
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      // Duplicate emails are reported as a plain 400, like other rejected input.
      AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Operation { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    if self.status_code().is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }
    let payload = match self {
      AppError::Validation(m) | AppError::Conflict(m) | AppError::Auth(m) | AppError::NotFound(m) => body(m.clone(), None),
      AppError::Config(m) => body("Configuration issue", Some(m.clone())),
      AppError::Sqlx(e) => body("Database operation failed", Some(e.to_string())),
      AppError::Operation { message, detail } => body(*message, Some(detail.clone())),
      AppError::Internal(m) => body("An internal error occurred", Some(m.clone())),
    };
    HttpResponse::build(self.status_code()).json(payload)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
