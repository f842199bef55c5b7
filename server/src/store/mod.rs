// server/src/store/mod.rs

//! Persistence for registrant records.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use eduportal::{Registrant, RegistrantId};

use crate::errors::Result as AppResult;
use crate::models::NewRegistrantRecord;

pub use memory::MemoryRegistrantStore;
pub use postgres::PgRegistrantStore;

/// Storage backend behind the record service. Reads never return the
/// password hash.
#[async_trait]
pub trait RegistrantStore: Send + Sync {
  /// `email` is expected to be normalized (trimmed, lower-cased).
  async fn email_exists(&self, email: &str) -> AppResult<bool>;

  /// Persists a new record, assigning its id and creation time. A store that
  /// enforces email uniqueness itself reports a violation as `AppError::Conflict`.
  async fn insert(&self, record: NewRegistrantRecord) -> AppResult<Registrant>;

  /// All records, oldest first.
  async fn list(&self) -> AppResult<Vec<Registrant>>;

  async fn get(&self, id: RegistrantId) -> AppResult<Option<Registrant>>;

  /// Returns `false` when no record had this id.
  async fn delete(&self, id: RegistrantId) -> AppResult<bool>;
}
