// server/src/services/registrant_service.rs

//! Create, list, get and delete for registrant records.

use chrono::NaiveDate;
use eduportal::validation::validate_submission;
use eduportal::{NewRegistrant, Registrant, RegistrantId};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result as AppResult};
use crate::models::NewRegistrantRecord;
use crate::services::auth_service;
use crate::store::RegistrantStore;

pub const DUPLICATE_EMAIL: &str = "User with this email already exists";
pub const USER_NOT_FOUND: &str = "User not found";

/// Validates and stores a registration.
///
/// Uniqueness is a pre-check followed by the insert, not a transaction; a
/// store with its own unique constraint turns the lost race into the same
/// conflict error.
#[instrument(name = "registrant_service::register", skip(store, payload), fields(email = %payload.email))]
pub async fn register(store: &dyn RegistrantStore, payload: NewRegistrant, today: NaiveDate) -> AppResult<Registrant> {
  let payload = payload.normalized();

  let report = validate_submission(&payload, today);
  if let Some(first) = report.first() {
    warn!(failing = ?report.fields(), "Registration payload failed validation.");
    return Err(AppError::Validation(first.message.to_string()));
  }

  if store.email_exists(&payload.email).await? {
    warn!("Attempt to register an existing email.");
    return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
  }

  let password_hash = auth_service::hash_password(&payload.password)?;
  let registrant = store.insert(NewRegistrantRecord::new(payload, password_hash)).await?;
  info!(id = %registrant.id, "Registrant created.");
  Ok(registrant)
}

pub async fn list(store: &dyn RegistrantStore) -> AppResult<Vec<Registrant>> {
  store.list().await
}

pub async fn get(store: &dyn RegistrantStore, id: RegistrantId) -> AppResult<Registrant> {
  store
    .get(id)
    .await?
    .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

#[instrument(name = "registrant_service::delete", skip(store))]
pub async fn delete(store: &dyn RegistrantStore, id: RegistrantId) -> AppResult<()> {
  if store.delete(id).await? {
    info!("Registrant deleted.");
    Ok(())
  } else {
    Err(AppError::NotFound(USER_NOT_FOUND.to_string()))
  }
}
