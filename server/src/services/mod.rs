// server/src/services/mod.rs

pub mod auth_service;
pub mod registrant_service;
