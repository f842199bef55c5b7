// server/src/store/postgres.rs

use async_trait::async_trait;
use chrono::Utc;
use eduportal::{Registrant, RegistrantId};
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::RegistrantStore;
use crate::errors::{AppError, Result as AppResult};
use crate::models::{NewRegistrantRecord, RegistrantRow, REGISTRANT_COLUMNS};
use crate::services::registrant_service::DUPLICATE_EMAIL;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS registrants (
  id            UUID PRIMARY KEY,
  full_name     TEXT NOT NULL,
  email         TEXT NOT NULL,
  phone         TEXT NOT NULL,
  dob           DATE NOT NULL,
  gender        TEXT NOT NULL
                CHECK (gender IN ('Male', 'Female', 'Other', 'Prefer not to say')),
  address       TEXT NOT NULL,
  city          TEXT NOT NULL,
  country       TEXT NOT NULL,
  password_hash TEXT NOT NULL,
  newsletter    BOOLEAN NOT NULL DEFAULT FALSE,
  registered_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_EMAIL_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS registrants_email_key ON registrants (email)";

#[derive(Clone)]
pub struct PgRegistrantStore {
  pool: PgPool,
}

impl PgRegistrantStore {
  pub fn new(pool: PgPool) -> Self {
    PgRegistrantStore { pool }
  }

  /// Creates the table and the unique email index if they do not exist yet.
  pub async fn bootstrap_schema(&self) -> AppResult<()> {
    sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
    sqlx::query(CREATE_EMAIL_INDEX).execute(&self.pool).await?;
    info!("Registrant schema is in place.");
    Ok(())
  }
}

/// A unique violation means a concurrent registration with the same email
/// won the race past `email_exists`.
fn insert_error(e: sqlx::Error) -> AppError {
  match e {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(DUPLICATE_EMAIL.to_string()),
    e => {
      error!(error = %e, "Database error while inserting registrant.");
      AppError::Sqlx(e)
    }
  }
}

fn rows_to_registrants(rows: Vec<RegistrantRow>) -> AppResult<Vec<Registrant>> {
  rows.into_iter().map(Registrant::try_from).collect()
}

#[async_trait]
impl RegistrantStore for PgRegistrantStore {
  #[instrument(name = "pg_store::email_exists", skip(self))]
  async fn email_exists(&self, email: &str) -> AppResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM registrants WHERE email = $1)")
      .bind(email)
      .fetch_one(&self.pool)
      .await?;
    Ok(exists)
  }

  #[instrument(name = "pg_store::insert", skip(self, record), fields(email = %record.registrant.email))]
  async fn insert(&self, record: NewRegistrantRecord) -> AppResult<Registrant> {
    let query = format!(
      "INSERT INTO registrants \
         (id, full_name, email, phone, dob, gender, address, city, country, password_hash, newsletter, registered_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
       RETURNING {}",
      REGISTRANT_COLUMNS
    );
    let r = &record.registrant;
    let result = sqlx::query_as::<_, RegistrantRow>(&query)
      .bind(Uuid::new_v4())
      .bind(&r.full_name)
      .bind(&r.email)
      .bind(&r.phone)
      .bind(r.dob)
      .bind(r.gender.as_str())
      .bind(&r.address)
      .bind(&r.city)
      .bind(&r.country)
      .bind(&record.password_hash)
      .bind(r.newsletter)
      .bind(Utc::now())
      .fetch_one(&self.pool)
      .await;

    match result {
      Ok(row) => Registrant::try_from(row),
      Err(e) => Err(insert_error(e)),
    }
  }

  #[instrument(name = "pg_store::list", skip(self))]
  async fn list(&self) -> AppResult<Vec<Registrant>> {
    let query = format!(
      "SELECT {} FROM registrants ORDER BY registered_at ASC, id ASC",
      REGISTRANT_COLUMNS
    );
    let rows = sqlx::query_as::<_, RegistrantRow>(&query).fetch_all(&self.pool).await?;
    rows_to_registrants(rows)
  }

  #[instrument(name = "pg_store::get", skip(self))]
  async fn get(&self, id: RegistrantId) -> AppResult<Option<Registrant>> {
    let query = format!("SELECT {} FROM registrants WHERE id = $1", REGISTRANT_COLUMNS);
    let row = sqlx::query_as::<_, RegistrantRow>(&query)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.map(Registrant::try_from).transpose()
  }

  #[instrument(name = "pg_store::delete", skip(self))]
  async fn delete(&self, id: RegistrantId) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM registrants WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}
