// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use eduportal::{BusyFlag, Gender, NewRegistrant, PortalError, PortalResult, Registrant, RegistrantId, RegistryApi};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// How the fake should fail the next matching call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
  Transport,
  ServerWithMessage,
  NotFound,
}

impl Failure {
  fn to_error(self) -> PortalError {
    match self {
      Failure::Transport => PortalError::Transport("connection refused".to_string()),
      Failure::ServerWithMessage => PortalError::Server {
        status: 500,
        message: Some("Storage is temporarily unavailable".to_string()),
      },
      Failure::NotFound => PortalError::NotFound {
        message: "User not found".to_string(),
      },
    }
  }
}

#[derive(Default)]
struct FakeState {
  records: Vec<Registrant>,
  passwords: Vec<(RegistrantId, String)>,
  fail_register: Option<Failure>,
  fail_list: Option<Failure>,
  fail_delete: Option<Failure>,
  list_calls: usize,
  get_calls: usize,
  watched: Option<BusyFlag>,
  busy_seen: Vec<bool>,
}

impl FakeState {
  /// Records what a renderer holding the watched flag would see right now.
  fn observe_busy(&mut self) {
    if let Some(flag) = &self.watched {
      let busy = flag.is_busy();
      self.busy_seen.push(busy);
    }
  }
}

/// In-process stand-in for the registration server, with the same
/// duplicate-email and not-found behaviour.
#[derive(Default)]
pub struct FakeApi {
  state: Mutex<FakeState>,
}

impl FakeApi {
  pub fn with_records(records: Vec<Registrant>) -> Self {
    let api = FakeApi::default();
    api.state.lock().records = records;
    api
  }

  pub fn records(&self) -> Vec<Registrant> {
    self.state.lock().records.clone()
  }

  pub fn stored_password(&self, id: RegistrantId) -> Option<String> {
    let state = self.state.lock();
    state.passwords.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p.clone())
  }

  pub fn fail_register(&self, failure: Failure) {
    self.state.lock().fail_register = Some(failure);
  }

  pub fn fail_list(&self, failure: Option<Failure>) {
    self.state.lock().fail_list = failure;
  }

  pub fn fail_delete(&self, failure: Failure) {
    self.state.lock().fail_delete = Some(failure);
  }

  pub fn list_calls(&self) -> usize {
    self.state.lock().list_calls
  }

  pub fn get_calls(&self) -> usize {
    self.state.lock().get_calls
  }

  /// Samples `flag` from inside every `register` and `list_users` call.
  pub fn watch_busy(&self, flag: BusyFlag) {
    self.state.lock().watched = Some(flag);
  }

  pub fn busy_seen(&self) -> Vec<bool> {
    self.state.lock().busy_seen.clone()
  }
}

#[async_trait]
impl RegistryApi for FakeApi {
  async fn register(&self, registrant: &NewRegistrant) -> PortalResult<Registrant> {
    let mut state = self.state.lock();
    state.observe_busy();
    if let Some(failure) = state.fail_register.take() {
      return Err(failure.to_error());
    }
    let email = registrant.email.trim().to_lowercase();
    if state.records.iter().any(|r| r.email == email) {
      return Err(PortalError::Rejected {
        message: "User with this email already exists".to_string(),
      });
    }
    let stored = Registrant {
      id: Uuid::new_v4(),
      full_name: registrant.full_name.clone(),
      email,
      phone: registrant.phone.clone(),
      dob: registrant.dob,
      gender: registrant.gender,
      address: registrant.address.clone(),
      city: registrant.city.clone(),
      country: registrant.country.clone(),
      newsletter: registrant.newsletter,
      registered_at: Utc::now(),
    };
    state.passwords.push((stored.id, registrant.password.clone()));
    state.records.push(stored.clone());
    Ok(stored)
  }

  async fn list_users(&self) -> PortalResult<Vec<Registrant>> {
    let mut state = self.state.lock();
    state.list_calls += 1;
    state.observe_busy();
    if let Some(failure) = state.fail_list {
      return Err(failure.to_error());
    }
    Ok(state.records.clone())
  }

  async fn get_user(&self, id: RegistrantId) -> PortalResult<Registrant> {
    let mut state = self.state.lock();
    state.get_calls += 1;
    state
      .records
      .iter()
      .find(|r| r.id == id)
      .cloned()
      .ok_or_else(|| Failure::NotFound.to_error())
  }

  async fn delete_user(&self, id: RegistrantId) -> PortalResult<String> {
    let mut state = self.state.lock();
    if let Some(failure) = state.fail_delete.take() {
      return Err(failure.to_error());
    }
    let before = state.records.len();
    state.records.retain(|r| r.id != id);
    if state.records.len() == before {
      return Err(Failure::NotFound.to_error());
    }
    Ok("User deleted successfully".to_string())
  }

  async fn admin_login(&self, username: &str, password: &str) -> PortalResult<String> {
    if username == "admin" && password == "admin123" {
      Ok(format!("admin_{}", Uuid::new_v4().simple()))
    } else {
      Err(PortalError::Unauthorized {
        message: "Invalid credentials".to_string(),
      })
    }
  }
}

pub fn registrant(name: &str, email: &str, gender: Gender, city: &str, newsletter: bool) -> Registrant {
  Registrant {
    id: Uuid::new_v4(),
    full_name: name.to_string(),
    email: email.to_string(),
    phone: "+1 555 010 2030".to_string(),
    dob: NaiveDate::from_ymd_opt(1999, 4, 12).unwrap(),
    gender,
    address: "42 Harbour Road".to_string(),
    city: city.to_string(),
    country: "Canada".to_string(),
    newsletter,
    registered_at: Utc.with_ymd_and_hms(2024, 9, 2, 10, 30, 0).unwrap(),
  }
}

pub fn sample_records() -> Vec<Registrant> {
  vec![
    registrant("Amara Okafor", "amara@example.com", Gender::Female, "Toronto", true),
    registrant("Liam Chen", "liam@example.com", Gender::Male, "Vancouver", false),
    registrant("Noor Haddad", "noor@example.com", Gender::Other, "Montreal", true),
    registrant("Sam Rivera", "sam@example.com", Gender::PreferNotToSay, "Ottawa", false),
    registrant("Jonas Berg", "jonas@example.com", Gender::Male, "Halifax", true),
  ]
}
