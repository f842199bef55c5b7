// server/src/web/handlers/mod.rs

pub mod admin_handlers;
pub mod registrant_handlers;
