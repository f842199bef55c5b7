// server/src/services/auth_service.rs

//! Password hashing for registrants and the admin credential check.

use crate::config::AppConfig;
use crate::errors::AppError; // Application-specific error type
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => {
      debug!("Password hashed successfully.");
      Ok(password_hash_obj.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on a mismatch; an unparseable hash is an internal error.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// The single admin account. The password is hashed once at startup and the
/// plain text is not kept.
#[derive(Clone)]
pub struct AdminCredentials {
  username: String,
  password_hash: String,
}

impl AdminCredentials {
  pub fn new(username: &str, password: &str) -> Result<Self, AppError> {
    Ok(AdminCredentials {
      username: username.to_string(),
      password_hash: hash_password(password)?,
    })
  }

  pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
    Self::new(&config.admin_username, &config.admin_password)
  }

  pub fn username(&self) -> &str {
    &self.username
  }
}

impl std::fmt::Debug for AdminCredentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AdminCredentials")
      .field("username", &self.username)
      .finish_non_exhaustive()
  }
}

/// Checks the admin credential pair and issues an opaque session token.
///
/// Tokens are not recorded anywhere; clients only check that they hold one.
#[instrument(name = "auth_service::admin_login", skip(admin, password))]
pub fn admin_login(admin: &AdminCredentials, username: &str, password: &str) -> Result<String, AppError> {
  let password_ok = verify_password(&admin.password_hash, password)?;
  if username != admin.username || !password_ok {
    warn!("Admin login rejected.");
    return Err(AppError::Auth("Invalid credentials".to_string()));
  }
  let token = format!("admin_{}", Uuid::new_v4().simple());
  info!("Admin login accepted.");
  Ok(token)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("secret1").unwrap();
    assert_ne!(hash, "secret1");
    assert!(verify_password(&hash, "secret1").unwrap());
    assert!(!verify_password(&hash, "secret2").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn empty_password_is_not_hashed() {
    assert!(matches!(hash_password(""), Err(AppError::Validation(_))));
  }

  #[test]
  fn corrupt_hash_is_internal() {
    assert!(matches!(verify_password("not-a-hash", "secret1"), Err(AppError::Internal(_))));
  }

  #[test]
  fn admin_login_issues_distinct_tokens() {
    let admin = AdminCredentials::new("admin", "admin123").unwrap();
    let first = admin_login(&admin, "admin", "admin123").unwrap();
    let second = admin_login(&admin, "admin", "admin123").unwrap();
    assert!(first.starts_with("admin_"));
    assert_ne!(first, second);

    assert!(matches!(admin_login(&admin, "root", "admin123"), Err(AppError::Auth(_))));
    assert!(matches!(admin_login(&admin, "admin", "admin12"), Err(AppError::Auth(_))));
  }
}
