// server/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use eduportal::model::{AdminLoginRequest, AdminLoginResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

#[instrument(
    name = "handler::admin_login",
    skip(app_state, req_payload),
    fields(username = %req_payload.username)
)]
pub async fn admin_login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
  let token = auth_service::admin_login(&app_state.admin, &req_payload.username, &req_payload.password)?;

  Ok(HttpResponse::Ok().json(AdminLoginResponse {
    success: true,
    message: "Login successful".to_string(),
    token,
  }))
}
