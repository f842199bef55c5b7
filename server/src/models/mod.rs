// server/src/models/mod.rs

//! Database-side representations of the registrant entity.

pub mod registrant;

pub use registrant::{NewRegistrantRecord, RegistrantRow, REGISTRANT_COLUMNS};
