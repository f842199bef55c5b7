// core/src/model/mod.rs

//! Data structures shared by the server and its clients.

pub mod envelope;
pub mod registrant;

pub use envelope::{
  AdminLoginRequest, AdminLoginResponse, ErrorResponse, MessageResponse, RegisterResponse, UserListResponse,
  UserResponse,
};
pub use registrant::{Gender, NewRegistrant, Registrant, RegistrantId};
