// server/src/web/routes.rs

use actix_web::{error, web, HttpResponse};

use crate::errors::AppError;
use crate::services::registrant_service::USER_NOT_FOUND;
use crate::web::handlers::{admin_handlers, registrant_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies (missing fields, unknown gender, bad date) are
/// reported in the API's own error envelope.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    let message = match &err {
      error::JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
      other => format!("Invalid request body: {}", other),
    };
    AppError::Validation(message).into()
  })
}

/// An id that is not a UUID cannot name any record.
fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|_err, _req| AppError::NotFound(USER_NOT_FOUND.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).app_data(path_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .route("/register", web::post().to(registrant_handlers::register_handler))
      .route("/users", web::get().to(registrant_handlers::list_users_handler))
      .service(
        web::resource("/users/{id}")
          .route(web::get().to(registrant_handlers::get_user_handler))
          .route(web::delete().to(registrant_handlers::delete_user_handler)),
      )
      .route("/admin/login", web::post().to(admin_handlers::admin_login_handler)),
  );
}
