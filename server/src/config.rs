// server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Postgres connection string. `None` runs the service on the in-memory store.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  /// Create the `registrants` table and its email index when missing.
  pub bootstrap_schema: bool,

  pub admin_username: String,
  pub admin_password: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    AppConfig {
      server_host: "127.0.0.1".to_string(),
      server_port: 3000,
      database_url: None,
      database_max_connections: 5,
      bootstrap_schema: true,
      admin_username: "admin".to_string(),
      admin_password: "admin123".to_string(),
    }
  }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
    Err(_) => Ok(default),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let defaults = AppConfig::default();

    let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_var("SERVER_PORT", defaults.server_port)?;
    let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;
    let bootstrap_schema = parse_var("BOOTSTRAP_SCHEMA", defaults.bootstrap_schema)?;
    let admin_username = env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username);
    let admin_password = env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password);

    if admin_username.is_empty() || admin_password.is_empty() {
      return Err(AppError::Config(
        "ADMIN_USERNAME and ADMIN_PASSWORD must not be empty".to_string(),
      ));
    }

    tracing::info!("Application configuration loaded successfully.");
    // Secrets stay out of the log.
    tracing::debug!(
      server_host = %server_host,
      server_port,
      has_database_url = database_url.is_some(),
      database_max_connections,
      bootstrap_schema,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      bootstrap_schema,
      admin_username,
      admin_password,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
