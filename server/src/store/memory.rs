// server/src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use eduportal::{Registrant, RegistrantId};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::RegistrantStore;
use crate::errors::{AppError, Result as AppResult};
use crate::models::NewRegistrantRecord;
use crate::services::registrant_service::DUPLICATE_EMAIL;

struct StoredRegistrant {
  registrant: Registrant,
  password_hash: String,
}

/// Process-local store, used when no `DATABASE_URL` is configured and in tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryRegistrantStore {
  records: RwLock<Vec<StoredRegistrant>>,
}

impl MemoryRegistrantStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// The stored hash for a record. Not part of `RegistrantStore`: nothing in
  /// the API ever hands a password back out.
  pub fn password_hash(&self, id: RegistrantId) -> Option<String> {
    self
      .records
      .read()
      .iter()
      .find(|s| s.registrant.id == id)
      .map(|s| s.password_hash.clone())
  }
}

#[async_trait]
impl RegistrantStore for MemoryRegistrantStore {
  async fn email_exists(&self, email: &str) -> AppResult<bool> {
    Ok(self.records.read().iter().any(|s| s.registrant.email == email))
  }

  async fn insert(&self, record: NewRegistrantRecord) -> AppResult<Registrant> {
    let mut records = self.records.write();
    // Same guarantee as the unique index on the Postgres table.
    if records.iter().any(|s| s.registrant.email == record.registrant.email) {
      return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
    }
    let password_hash = record.password_hash.clone();
    let registrant = record.into_registrant(Uuid::new_v4(), Utc::now());
    debug!(id = %registrant.id, "Inserted registrant into memory store.");
    records.push(StoredRegistrant {
      registrant: registrant.clone(),
      password_hash,
    });
    Ok(registrant)
  }

  async fn list(&self) -> AppResult<Vec<Registrant>> {
    Ok(self.records.read().iter().map(|s| s.registrant.clone()).collect())
  }

  async fn get(&self, id: RegistrantId) -> AppResult<Option<Registrant>> {
    Ok(
      self
        .records
        .read()
        .iter()
        .find(|s| s.registrant.id == id)
        .map(|s| s.registrant.clone()),
    )
  }

  async fn delete(&self, id: RegistrantId) -> AppResult<bool> {
    let mut records = self.records.write();
    let before = records.len();
    records.retain(|s| s.registrant.id != id);
    Ok(records.len() < before)
  }
}
