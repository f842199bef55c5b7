// core/src/session.rs

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api::RegistryApi;
use crate::error::PortalResult;

type AuthPredicate = Arc<dyn Fn(Option<&str>) -> bool + Send + Sync>;

/// Client-held admin session.
///
/// The token is an opaque marker handed out by `POST /api/admin/login`; it is
/// only ever checked for presence, never verified. Clones share the same
/// token slot, so the entry page and the dashboard see one session.
///
/// Lock guards are released before any `.await`.
#[derive(Clone)]
pub struct AdminSession {
  token: Arc<RwLock<Option<String>>>,
  is_authenticated: AuthPredicate,
}

impl AdminSession {
  pub fn new() -> Self {
    AdminSession {
      token: Arc::new(RwLock::new(None)),
      is_authenticated: Arc::new(|token: Option<&str>| token.is_some_and(|t| !t.is_empty())),
    }
  }

  pub fn with_token(token: impl Into<String>) -> Self {
    let session = Self::new();
    session.store_token(token);
    session
  }

  /// Replaces the "is authenticated" check, mainly for tests.
  pub fn with_predicate<F>(mut self, predicate: F) -> Self
  where
    F: Fn(Option<&str>) -> bool + Send + Sync + 'static,
  {
    self.is_authenticated = Arc::new(predicate);
    self
  }

  pub fn is_authenticated(&self) -> bool {
    let guard = self.token.read();
    (self.is_authenticated)(guard.as_deref())
  }

  pub fn token(&self) -> Option<String> {
    self.token.read().clone()
  }

  pub fn store_token(&self, token: impl Into<String>) {
    *self.token.write() = Some(token.into());
  }

  pub fn clear(&self) {
    *self.token.write() = None;
  }

  /// Exchanges the admin credential pair for a token and stores it.
  #[instrument(name = "session::login", skip(self, api, password))]
  pub async fn login<A>(&self, api: &A, username: &str, password: &str) -> PortalResult<()>
  where
    A: RegistryApi + ?Sized,
  {
    match api.admin_login(username, password).await {
      Ok(token) => {
        self.store_token(token);
        info!("Admin session established.");
        Ok(())
      }
      Err(err) => {
        warn!(error = %err, "Admin login failed.");
        Err(err)
      }
    }
  }
}

impl Default for AdminSession {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for AdminSession {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AdminSession")
      .field("has_token", &self.token.read().is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_share_the_token_slot() {
    let entry_page = AdminSession::new();
    let dashboard = entry_page.clone();
    assert!(!dashboard.is_authenticated());

    entry_page.store_token("admin_123");
    assert!(dashboard.is_authenticated());
    assert_eq!(dashboard.token().as_deref(), Some("admin_123"));

    dashboard.clear();
    assert!(!entry_page.is_authenticated());
  }

  #[test]
  fn empty_token_is_not_a_session() {
    assert!(!AdminSession::with_token("").is_authenticated());
  }

  #[test]
  fn predicate_can_be_injected() {
    let session = AdminSession::with_token("anything").with_predicate(|t| t == Some("admin_ok"));
    assert!(!session.is_authenticated());
    session.store_token("admin_ok");
    assert!(session.is_authenticated());
  }
}
