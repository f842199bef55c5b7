// core/src/validation.rs

//! Field validation rules for a registration.
//!
//! Every rule runs on every submission; the resulting `ValidationReport`
//! holds one `FieldError` per failing field, in form order, so the caller
//! can mark each field and scroll to the first one.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::controller::form::FormInput;
use crate::model::{Gender, NewRegistrant};

pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 120;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s+\-()]+$").unwrap());

/// Form fields, declared in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
  FullName,
  Email,
  Phone,
  Dob,
  Gender,
  Address,
  City,
  Country,
  Password,
  ConfirmPassword,
  Terms,
}

impl Field {
  /// The field's element id on the registration page.
  pub fn id(&self) -> &'static str {
    match self {
      Field::FullName => "fullName",
      Field::Email => "email",
      Field::Phone => "phone",
      Field::Dob => "dob",
      Field::Gender => "gender",
      Field::Address => "address",
      Field::City => "city",
      Field::Country => "country",
      Field::Password => "password",
      Field::ConfirmPassword => "confirmPassword",
      Field::Terms => "terms",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
  pub field: Field,
  pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
  errors: Vec<FieldError>,
}

impl ValidationReport {
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn errors(&self) -> &[FieldError] {
    &self.errors
  }

  /// The first failing field in page order.
  pub fn first(&self) -> Option<&FieldError> {
    self.errors.first()
  }

  pub fn message_for(&self, field: Field) -> Option<&'static str> {
    self.errors.iter().find(|e| e.field == field).map(|e| e.message)
  }

  pub fn fields(&self) -> Vec<Field> {
    self.errors.iter().map(|e| e.field).collect()
  }

  /// Clears a single field's marker, as happens when the user leaves it.
  pub fn clear(&mut self, field: Field) {
    self.errors.retain(|e| e.field != field);
  }

  fn push(&mut self, field: Field, message: &'static str) {
    self.errors.push(FieldError { field, message });
  }
}

/// The date ages are measured against. The form and the server both use the
/// UTC calendar day so a date of birth never passes one and fails the other.
pub fn today() -> NaiveDate {
  Utc::now().date_naive()
}

/// Age in whole calendar years, ignoring month and day.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
  today.year() - dob.year()
}

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
  phone.chars().count() >= 10 && PHONE_PATTERN.is_match(phone)
}

/// Parses the value of a date input (`YYYY-MM-DD`). Empty and malformed
/// values are both treated as "no date selected".
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

struct Candidate<'a> {
  full_name: &'a str,
  email: &'a str,
  phone: &'a str,
  dob: Option<NaiveDate>,
  gender: Option<Gender>,
  address: &'a str,
  city: &'a str,
  country: &'a str,
  password: &'a str,
  // (confirm password, terms accepted); only the form collects these.
  confirmation: Option<(&'a str, bool)>,
}

fn char_len(s: &str) -> usize {
  s.trim().chars().count()
}

fn check(candidate: &Candidate<'_>, today: NaiveDate) -> ValidationReport {
  let mut report = ValidationReport::default();

  if char_len(candidate.full_name) < 3 {
    report.push(Field::FullName, "Please enter your full name (minimum 3 characters)");
  }
  if !is_valid_email(candidate.email.trim()) {
    report.push(Field::Email, "Please enter a valid email address");
  }
  if !is_valid_phone(candidate.phone.trim()) {
    report.push(Field::Phone, "Please enter a valid phone number");
  }
  match candidate.dob {
    None => report.push(Field::Dob, "Please select your date of birth"),
    Some(dob) => {
      let age = age_in_years(dob, today);
      if age < MIN_AGE {
        report.push(Field::Dob, "You must be at least 13 years old");
      } else if age > MAX_AGE {
        report.push(Field::Dob, "Please enter a valid date of birth");
      }
    }
  }
  if candidate.gender.is_none() {
    report.push(Field::Gender, "Please select your gender");
  }
  if char_len(candidate.address) < 5 {
    report.push(Field::Address, "Please enter a valid address");
  }
  if char_len(candidate.city) < 2 {
    report.push(Field::City, "Please enter a valid city name");
  }
  if candidate.country.trim().is_empty() {
    report.push(Field::Country, "Please select your country");
  }
  if candidate.password.chars().count() < 6 {
    report.push(Field::Password, "Password must be at least 6 characters long");
  }
  if let Some((confirm, terms_accepted)) = candidate.confirmation {
    if confirm != candidate.password {
      report.push(Field::ConfirmPassword, "Passwords do not match");
    }
    if !terms_accepted {
      report.push(Field::Terms, "You must agree to the terms and conditions");
    }
  }

  report
}

/// Runs every form rule against the raw field values.
pub fn validate_form(input: &FormInput, today: NaiveDate) -> ValidationReport {
  let candidate = Candidate {
    full_name: &input.full_name,
    email: &input.email,
    phone: &input.phone,
    dob: parse_dob(&input.dob),
    gender: input.gender,
    address: &input.address,
    city: &input.city,
    country: &input.country,
    password: &input.password,
    confirmation: Some((&input.confirm_password, input.terms)),
  };
  check(&candidate, today)
}

/// Server-side pass over a submitted payload: the same rules as the form,
/// minus the confirm-password and terms checks that never leave the browser.
pub fn validate_submission(registrant: &NewRegistrant, today: NaiveDate) -> ValidationReport {
  let candidate = Candidate {
    full_name: &registrant.full_name,
    email: &registrant.email,
    phone: &registrant.phone,
    dob: Some(registrant.dob),
    gender: Some(registrant.gender),
    address: &registrant.address,
    city: &registrant.city,
    country: &registrant.country,
    password: &registrant.password,
    confirmation: None,
  };
  check(&candidate, today)
}
