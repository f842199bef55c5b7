// core/src/controller/form.rs

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::api::RegistryApi;
use crate::controller::busy::BusyFlag;
use crate::format::{address_line, long_date, yes_no};
use crate::model::{Gender, NewRegistrant, Registrant};
use crate::validation::{self, Field, ValidationReport};

/// Notice shown when a registration fails without a server message.
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Raw values bound to the registration form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
  pub full_name: String,
  pub email: String,
  pub phone: String,
  /// Value of the date input, `YYYY-MM-DD`, empty when nothing is picked.
  pub dob: String,
  pub gender: Option<Gender>,
  pub address: String,
  pub city: String,
  pub country: String,
  pub password: String,
  pub confirm_password: String,
  pub newsletter: bool,
  pub terms: bool,
}

impl FormInput {
  /// Packages the values for `POST /api/register`. Returns `None` when the
  /// date or gender is missing, which validation reports first.
  fn to_submission(&self) -> Option<NewRegistrant> {
    Some(NewRegistrant {
      full_name: self.full_name.trim().to_string(),
      email: self.email.trim().to_string(),
      phone: self.phone.trim().to_string(),
      dob: validation::parse_dob(&self.dob)?,
      gender: self.gender?,
      address: self.address.trim().to_string(),
      city: self.city.trim().to_string(),
      country: self.country.clone(),
      password: self.password.clone(),
      newsletter: self.newsletter,
    })
  }
}

/// Read-only confirmation shown after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub dob: String,
  pub gender: String,
  pub address: String,
  pub newsletter: &'static str,
}

impl SubmissionSummary {
  fn from_submission(submitted: &NewRegistrant) -> Self {
    SubmissionSummary {
      full_name: submitted.full_name.clone(),
      email: submitted.email.clone(),
      phone: submitted.phone.clone(),
      dob: long_date(submitted.dob),
      gender: submitted.gender.to_string(),
      address: address_line(&submitted.address, &submitted.city, &submitted.country),
      newsletter: yes_no(submitted.newsletter),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
  Entry,
  Summary(SubmissionSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
  Top,
  Field(Field),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
  /// Validation failed; nothing was sent.
  Invalid,
  Registered(Registrant),
  /// The request was sent and failed; carries the notice shown to the user.
  Failed(String),
}

pub struct RegistrationForm<A: RegistryApi> {
  api: A,
  input: FormInput,
  errors: ValidationReport,
  view: FormView,
  submitting: BusyFlag,
  notice: Option<String>,
  scroll: Option<ScrollTarget>,
}

impl<A: RegistryApi> RegistrationForm<A> {
  pub fn new(api: A) -> Self {
    RegistrationForm {
      api,
      input: FormInput::default(),
      errors: ValidationReport::default(),
      view: FormView::Entry,
      submitting: BusyFlag::default(),
      notice: None,
      scroll: None,
    }
  }

  pub fn input(&self) -> &FormInput {
    &self.input
  }

  pub fn input_mut(&mut self) -> &mut FormInput {
    &mut self.input
  }

  pub fn errors(&self) -> &ValidationReport {
    &self.errors
  }

  pub fn view(&self) -> &FormView {
    &self.view
  }

  pub fn is_submit_enabled(&self) -> bool {
    !self.submitting.is_busy()
  }

  /// Handle the renderer keeps to disable the submit control while a
  /// registration request is pending.
  pub fn submit_busy(&self) -> BusyFlag {
    self.submitting.clone()
  }

  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  /// Pending scroll instruction, consumed by the renderer.
  pub fn take_scroll(&mut self) -> Option<ScrollTarget> {
    self.scroll.take()
  }

  /// Leaving a field hides its error until the next submit.
  pub fn on_blur(&mut self, field: Field) {
    self.errors.clear(field);
  }

  pub async fn submit(&mut self) -> SubmitOutcome {
    self.submit_on(validation::today()).await
  }

  /// Validates against `today` and, when every rule passes, sends the
  /// registration. The submit control stays disabled until the call returns.
  #[instrument(name = "form::submit", skip(self), fields(email = %self.input.email.trim()))]
  pub async fn submit_on(&mut self, today: NaiveDate) -> SubmitOutcome {
    self.notice = None;
    self.errors = validation::validate_form(&self.input, today);

    let submission = match (self.errors.first(), self.input.to_submission()) {
      (None, Some(submission)) => submission,
      (first, _) => {
        debug!(failing = ?self.errors.fields(), "Registration form has invalid fields.");
        self.scroll = first.map(|e| ScrollTarget::Field(e.field));
        return SubmitOutcome::Invalid;
      }
    };

    let result = {
      let _busy = self.submitting.hold();
      self.api.register(&submission).await
    };

    match result {
      Ok(registrant) => {
        info!(id = %registrant.id, "Registration succeeded.");
        self.view = FormView::Summary(SubmissionSummary::from_submission(&submission));
        self.scroll = Some(ScrollTarget::Top);
        SubmitOutcome::Registered(registrant)
      }
      Err(err) => {
        warn!(error = %err, "Registration request failed.");
        let message = err.user_message(REGISTRATION_FAILED);
        self.notice = Some(message.clone());
        SubmitOutcome::Failed(message)
      }
    }
  }

  /// The summary's "back" action: clear everything and show the empty form.
  pub fn back(&mut self) {
    self.input = FormInput::default();
    self.errors = ValidationReport::default();
    self.notice = None;
    self.view = FormView::Entry;
    self.scroll = Some(ScrollTarget::Top);
  }
}
