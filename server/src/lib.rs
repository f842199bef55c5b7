// server/src/lib.rs

//! HTTP service for EduPortal registrations: the record API over a
//! Postgres or in-memory store, plus the admin login endpoint.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
