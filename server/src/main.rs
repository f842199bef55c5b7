// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use eduportal_server::config::AppConfig;
use eduportal_server::services::auth_service::AdminCredentials;
use eduportal_server::state::AppState;
use eduportal_server::store::{MemoryRegistrantStore, PgRegistrantStore, RegistrantStore};
use eduportal_server::web::configure_app_routes;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn RegistrantStore>> {
  let Some(database_url) = config.database_url.as_deref() else {
    tracing::warn!("DATABASE_URL is not set; registrations are kept in memory and lost on restart.");
    return Ok(Arc::new(MemoryRegistrantStore::new()));
  };

  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(database_url)
    .await
    .context("Failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  let store = PgRegistrantStore::new(pool);
  if config.bootstrap_schema {
    store
      .bootstrap_schema()
      .await
      .context("Failed to create the registrants schema")?;
  }
  Ok(Arc::new(store))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting EduPortal registration server...");

  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  let store = open_store(&app_config).await?;
  let admin = Arc::new(AdminCredentials::from_config(&app_config).context("Failed to prepare admin credentials")?);
  tracing::info!(admin = %admin.username(), "Admin account configured.");

  let app_state = AppState { store, admin };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("Server terminated with an error")
}
