// core/src/lib.rs

//! EduPortal: the client-facing half of a student registration service.
//!
//! The crate contains everything that is not the HTTP server itself:
//!  - The wire model shared with the server (`Registrant`, `NewRegistrant`,
//!    response envelopes).
//!  - Field validation rules for the registration form.
//!  - The registration form controller (validate, submit, summary view).
//!  - The admin dashboard controller (statistics, filterable table, row
//!    actions keyed by record id).
//!  - An explicit admin session object replacing browser-local storage.
//!  - The `RegistryApi` trait and a reqwest-backed implementation.

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod format;
pub mod model;
pub mod session;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::api::RegistryApi;
pub use crate::client::HttpRegistryClient;
pub use crate::controller::busy::BusyFlag;
pub use crate::controller::dashboard::{
  filter_records, ActionOutcome, Confirm, Dashboard, RegistrantDetail, RowAction, Statistics, TableRow, TableView,
};
pub use crate::controller::form::{
  FormInput, FormView, RegistrationForm, ScrollTarget, SubmissionSummary, SubmitOutcome,
};
pub use crate::error::{PortalError, PortalResult};
pub use crate::model::{Gender, NewRegistrant, Registrant, RegistrantId};
pub use crate::session::AdminSession;
pub use crate::validation::{Field, FieldError, ValidationReport};
