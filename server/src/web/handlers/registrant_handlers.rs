// server/src/web/handlers/registrant_handlers.rs

use actix_web::{web, HttpResponse};
use eduportal::model::{MessageResponse, RegisterResponse, UserListResponse, UserResponse};
use eduportal::validation;
use eduportal::NewRegistrant;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::registrant_service;
use crate::state::AppState;

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<NewRegistrant>,
) -> Result<HttpResponse, AppError> {
  let today = validation::today();
  let user = registrant_service::register(app_state.store.as_ref(), req_payload.into_inner(), today)
    .await
    .map_err(|e| e.during("Registration failed. Please try again."))?;

  info!(user_id = %user.id, "Registration successful.");
  Ok(HttpResponse::Created().json(RegisterResponse {
    success: true,
    message: "Registration successful!".to_string(),
    user,
  }))
}

#[instrument(name = "handler::list_users", skip(app_state))]
pub async fn list_users_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let users = registrant_service::list(app_state.store.as_ref())
    .await
    .map_err(|e| e.during("Failed to fetch users"))?;

  info!("Fetched {} users.", users.len());
  Ok(HttpResponse::Ok().json(UserListResponse {
    success: true,
    count: users.len(),
    users,
  }))
}

#[instrument(name = "handler::get_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_user_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
  let user = registrant_service::get(app_state.store.as_ref(), path.into_inner())
    .await
    .map_err(|e| e.during("Failed to fetch user"))?;

  Ok(HttpResponse::Ok().json(UserResponse { success: true, user }))
}

#[instrument(name = "handler::delete_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  registrant_service::delete(app_state.store.as_ref(), path.into_inner())
    .await
    .map_err(|e| e.during("Failed to delete user"))?;

  Ok(HttpResponse::Ok().json(MessageResponse {
    success: true,
    message: "User deleted successfully".to_string(),
  }))
}
