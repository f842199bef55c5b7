// core/src/error.rs
use thiserror::Error;

/// Message shown when a request fails without a usable server message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum PortalError {
  /// The admin session has no valid token; the caller must go back to the entry page.
  #[error("Admin session is not authenticated")]
  Unauthenticated,

  /// The server refused the request as malformed or conflicting (HTTP 400).
  #[error("Request rejected: {message}")]
  Rejected { message: String },

  #[error("Credentials rejected: {message}")]
  Unauthorized { message: String },

  #[error("Not found: {message}")]
  NotFound { message: String },

  /// Any other non-success status. `message` is the server's, if it sent one.
  #[error("Server responded with {status}: {}", message.as_deref().unwrap_or("<no message>"))]
  Server { status: u16, message: Option<String> },

  #[error("Transport failure: {0}")]
  Transport(String),

  #[error("Malformed response body: {0}")]
  Decode(String),
}

impl PortalError {
  /// Text suitable for a user-facing notice. Server-supplied messages are
  /// passed through verbatim, everything else falls back to `fallback`.
  pub fn user_message(&self, fallback: &str) -> String {
    match self {
      PortalError::Rejected { message }
      | PortalError::Unauthorized { message }
      | PortalError::NotFound { message } => message.clone(),
      PortalError::Server {
        message: Some(message), ..
      } => message.clone(),
      _ => fallback.to_string(),
    }
  }
}

impl From<reqwest::Error> for PortalError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      PortalError::Decode(err.to_string())
    } else {
      PortalError::Transport(err.to_string())
    }
  }
}

pub type PortalResult<T, E = PortalError> = std::result::Result<T, E>;
