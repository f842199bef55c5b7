// server/src/models/registrant.rs

use chrono::{DateTime, NaiveDate, Utc};
use eduportal::{NewRegistrant, Registrant};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Columns selected by every read. The password hash is deliberately absent.
pub const REGISTRANT_COLUMNS: &str =
  "id, full_name, email, phone, dob, gender, address, city, country, newsletter, registered_at";

#[derive(Debug, Clone, FromRow)]
pub struct RegistrantRow {
  pub id: Uuid,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub dob: NaiveDate,
  pub gender: String,
  pub address: String,
  pub city: String,
  pub country: String,
  pub newsletter: bool,
  pub registered_at: DateTime<Utc>,
}

impl TryFrom<RegistrantRow> for Registrant {
  type Error = AppError;

  fn try_from(row: RegistrantRow) -> Result<Self, Self::Error> {
    let gender = row
      .gender
      .parse()
      .map_err(|e| AppError::Internal(format!("Stored registrant {} is corrupt: {}", row.id, e)))?;
    Ok(Registrant {
      id: row.id,
      full_name: row.full_name,
      email: row.email,
      phone: row.phone,
      dob: row.dob,
      gender,
      address: row.address,
      city: row.city,
      country: row.country,
      newsletter: row.newsletter,
      registered_at: row.registered_at,
    })
  }
}

/// A validated registration ready to be written. The store assigns `id`
/// and `registered_at`.
#[derive(Clone)]
pub struct NewRegistrantRecord {
  pub registrant: NewRegistrant,
  pub password_hash: String,
}

impl NewRegistrantRecord {
  pub fn new(registrant: NewRegistrant, password_hash: String) -> Self {
    NewRegistrantRecord {
      registrant,
      password_hash,
    }
  }

  /// Builds the stored view of this record.
  pub fn into_registrant(self, id: Uuid, registered_at: DateTime<Utc>) -> Registrant {
    let r = self.registrant;
    Registrant {
      id,
      full_name: r.full_name,
      email: r.email,
      phone: r.phone,
      dob: r.dob,
      gender: r.gender,
      address: r.address,
      city: r.city,
      country: r.country,
      newsletter: r.newsletter,
      registered_at,
    }
  }
}

impl std::fmt::Debug for NewRegistrantRecord {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NewRegistrantRecord")
      .field("registrant", &self.registrant)
      .field("password_hash", &"[REDACTED]")
      .finish()
  }
}
