// core/src/model/registrant.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub type RegistrantId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  Other,
  #[serde(rename = "Prefer not to say")]
  PreferNotToSay,
}

impl Gender {
  pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::PreferNotToSay];

  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Male => "Male",
      Gender::Female => "Female",
      Gender::Other => "Other",
      Gender::PreferNotToSay => "Prefer not to say",
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender value '{0}'")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
  type Err = UnknownGender;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Gender::ALL
      .into_iter()
      .find(|g| g.as_str() == s)
      .ok_or_else(|| UnknownGender(s.to_string()))
  }
}

/// A stored registrant as returned by every read endpoint.
///
/// There is no password field: the server keeps only a hash and never sends
/// it back, including in the response to a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
  pub id: RegistrantId,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub dob: NaiveDate,
  pub gender: Gender,
  pub address: String,
  pub city: String,
  pub country: String,
  pub newsletter: bool,
  pub registered_at: DateTime<Utc>,
}

/// Body of `POST /api/register`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistrant {
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub dob: NaiveDate,
  pub gender: Gender,
  pub address: String,
  pub city: String,
  pub country: String,
  pub password: String,
  /// Missing and `null` both mean "not subscribed".
  #[serde(default, deserialize_with = "null_as_false")]
  pub newsletter: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewRegistrant {
  /// Trims text fields and lower-cases the email, the way records are stored.
  pub fn normalized(mut self) -> Self {
    self.full_name = self.full_name.trim().to_string();
    self.email = self.email.trim().to_lowercase();
    self.phone = self.phone.trim().to_string();
    self.address = self.address.trim().to_string();
    self.city = self.city.trim().to_string();
    self.country = self.country.trim().to_string();
    self
  }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for NewRegistrant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NewRegistrant")
      .field("full_name", &self.full_name)
      .field("email", &self.email)
      .field("phone", &self.phone)
      .field("dob", &self.dob)
      .field("gender", &self.gender)
      .field("address", &self.address)
      .field("city", &self.city)
      .field("country", &self.country)
      .field("password", &"[REDACTED]")
      .field("newsletter", &self.newsletter)
      .finish()
  }
}
