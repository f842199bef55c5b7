// core/src/api.rs

//! The REST API as seen by the controllers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::PortalResult;
use crate::model::{NewRegistrant, Registrant, RegistrantId};

/// Client side of the registration service.
///
/// `HttpRegistryClient` talks to the real server; tests substitute an
/// in-process fake.
#[async_trait]
pub trait RegistryApi: Send + Sync {
  /// `POST /api/register`. Returns the stored record.
  async fn register(&self, registrant: &NewRegistrant) -> PortalResult<Registrant>;

  /// `GET /api/users`.
  async fn list_users(&self) -> PortalResult<Vec<Registrant>>;

  /// `GET /api/users/{id}`.
  async fn get_user(&self, id: RegistrantId) -> PortalResult<Registrant>;

  /// `DELETE /api/users/{id}`. Returns the server's confirmation message.
  async fn delete_user(&self, id: RegistrantId) -> PortalResult<String>;

  /// `POST /api/admin/login`. Returns the opaque admin token.
  async fn admin_login(&self, username: &str, password: &str) -> PortalResult<String>;
}

#[async_trait]
impl<T: RegistryApi + ?Sized> RegistryApi for Arc<T> {
  async fn register(&self, registrant: &NewRegistrant) -> PortalResult<Registrant> {
    (**self).register(registrant).await
  }

  async fn list_users(&self) -> PortalResult<Vec<Registrant>> {
    (**self).list_users().await
  }

  async fn get_user(&self, id: RegistrantId) -> PortalResult<Registrant> {
    (**self).get_user(id).await
  }

  async fn delete_user(&self, id: RegistrantId) -> PortalResult<String> {
    (**self).delete_user(id).await
  }

  async fn admin_login(&self, username: &str, password: &str) -> PortalResult<String> {
    (**self).admin_login(username, password).await
  }
}
