// core/src/model/envelope.rs

//! JSON envelopes of the REST API. Every response carries a `success` flag;
//! failures carry a human-readable `message` and optionally an `error` detail.

use serde::{Deserialize, Serialize};

use super::registrant::Registrant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
  pub success: bool,
  pub message: String,
  pub user: Registrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
  pub success: bool,
  pub count: usize,
  pub users: Vec<Registrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
  pub success: bool,
  pub user: Registrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
  pub success: bool,
  pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for AdminLoginRequest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AdminLoginRequest")
      .field("username", &self.username)
      .field("password", &"[REDACTED]")
      .finish()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
  pub success: bool,
  pub message: String,
  pub token: String,
}
