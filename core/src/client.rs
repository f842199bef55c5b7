// core/src/client.rs

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::api::RegistryApi;
use crate::error::{PortalError, PortalResult};
use crate::model::{
  AdminLoginRequest, AdminLoginResponse, ErrorResponse, MessageResponse, NewRegistrant, Registrant, RegistrantId,
  RegisterResponse, UserListResponse, UserResponse,
};

/// `RegistryApi` over HTTP.
///
/// No timeout is configured and nothing is retried: a failed call is reported
/// once and the caller decides whether to try again.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
  http: Client,
  base_url: String,
}

impl HttpRegistryClient {
  /// `base_url` is the server root, e.g. `http://localhost:3000`.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(Client::new(), base_url)
  }

  pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    HttpRegistryClient { http, base_url }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }
}

/// Turns a response into `T`, or into a `PortalError` carrying the server's
/// `message` when the status is not a success.
async fn decode<T: DeserializeOwned>(response: Response) -> PortalResult<T> {
  let status = response.status();
  if status.is_success() {
    return Ok(response.json::<T>().await?);
  }

  // Error bodies are best-effort; a proxy may answer with HTML.
  let message = response.json::<ErrorResponse>().await.ok().map(|body| body.message);
  warn!(status = status.as_u16(), message = ?message, "Request failed.");
  Err(error_for_status(status, message))
}

fn error_for_status(status: StatusCode, message: Option<String>) -> PortalError {
  match status {
    StatusCode::BAD_REQUEST => PortalError::Rejected {
      message: message.unwrap_or_else(|| "Request rejected".to_string()),
    },
    StatusCode::UNAUTHORIZED => PortalError::Unauthorized {
      message: message.unwrap_or_else(|| "Invalid credentials".to_string()),
    },
    StatusCode::NOT_FOUND => PortalError::NotFound {
      message: message.unwrap_or_else(|| "User not found".to_string()),
    },
    other => PortalError::Server {
      status: other.as_u16(),
      message,
    },
  }
}

#[async_trait]
impl RegistryApi for HttpRegistryClient {
  #[instrument(name = "client::register", skip(self, registrant), fields(email = %registrant.email))]
  async fn register(&self, registrant: &NewRegistrant) -> PortalResult<Registrant> {
    let response = self.http.post(self.url("/api/register")).json(registrant).send().await?;
    let body: RegisterResponse = decode(response).await?;
    debug!(id = %body.user.id, "Registration accepted.");
    Ok(body.user)
  }

  #[instrument(name = "client::list_users", skip(self))]
  async fn list_users(&self) -> PortalResult<Vec<Registrant>> {
    let response = self.http.get(self.url("/api/users")).send().await?;
    let body: UserListResponse = decode(response).await?;
    debug!(count = body.count, "Fetched users.");
    Ok(body.users)
  }

  #[instrument(name = "client::get_user", skip(self))]
  async fn get_user(&self, id: RegistrantId) -> PortalResult<Registrant> {
    let response = self.http.get(self.url(&format!("/api/users/{}", id))).send().await?;
    let body: UserResponse = decode(response).await?;
    Ok(body.user)
  }

  #[instrument(name = "client::delete_user", skip(self))]
  async fn delete_user(&self, id: RegistrantId) -> PortalResult<String> {
    let response = self.http.delete(self.url(&format!("/api/users/{}", id))).send().await?;
    let body: MessageResponse = decode(response).await?;
    Ok(body.message)
  }

  #[instrument(name = "client::admin_login", skip(self, password))]
  async fn admin_login(&self, username: &str, password: &str) -> PortalResult<String> {
    let request = AdminLoginRequest {
      username: username.to_string(),
      password: password.to_string(),
    };
    let response = self.http.post(self.url("/api/admin/login")).json(&request).send().await?;
    let body: AdminLoginResponse = decode(response).await?;
    Ok(body.token)
  }
}
