// server/src/state.rs
use crate::services::auth_service::AdminCredentials;
use crate::store::RegistrantStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn RegistrantStore>,
  pub admin: Arc<AdminCredentials>,
}
