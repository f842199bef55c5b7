// core/src/controller/dashboard.rs

//! Admin dashboard: statistics, a filterable table of registrants and the
//! per-row view/delete actions.

use tracing::{error, info, instrument, warn};

use crate::api::RegistryApi;
use crate::controller::busy::BusyFlag;
use crate::error::{PortalError, PortalResult};
use crate::format::{address_line, long_date, long_timestamp, short_date, yes_no};
use crate::model::{Gender, Registrant, RegistrantId};
use crate::session::AdminSession;

pub const LOAD_FAILED: &str = "Failed to load users. Make sure the server is running.";
pub const NO_USERS: &str = "No users registered yet";

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm {
  fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
  fn confirm(&self, prompt: &str) -> bool {
    self(prompt)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
  pub total: usize,
  pub male: usize,
  pub female: usize,
  pub newsletter: usize,
}

impl Statistics {
  pub fn from_records(records: &[Registrant]) -> Self {
    Statistics {
      total: records.len(),
      male: records.iter().filter(|r| r.gender == Gender::Male).count(),
      female: records.iter().filter(|r| r.gender == Gender::Female).count(),
      newsletter: records.iter().filter(|r| r.newsletter).count(),
    }
  }
}

/// Records whose name, email, phone, city or country contains `query`,
/// ignoring case. An empty query keeps everything.
pub fn filter_records<'a>(records: &'a [Registrant], query: &str) -> Vec<&'a Registrant> {
  if query.is_empty() {
    return records.iter().collect();
  }
  let needle = query.to_lowercase();
  records
    .iter()
    .filter(|r| {
      [&r.full_name, &r.email, &r.phone, &r.city, &r.country]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    })
    .collect()
}

/// A row button, addressed by record id and handed back to `Dashboard::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
  View(RegistrantId),
  Delete(RegistrantId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
  /// 1-based position in the rendered (possibly filtered) table.
  pub number: usize,
  pub id: RegistrantId,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub gender: Gender,
  pub city: String,
  pub country: String,
  pub registered: String,
  pub view: RowAction,
  pub delete: RowAction,
}

impl TableRow {
  fn new(number: usize, r: &Registrant) -> Self {
    TableRow {
      number,
      id: r.id,
      full_name: r.full_name.clone(),
      email: r.email.clone(),
      phone: r.phone.clone(),
      gender: r.gender,
      city: r.city.clone(),
      country: r.country.clone(),
      registered: short_date(r.registered_at),
      view: RowAction::View(r.id),
      delete: RowAction::Delete(r.id),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
  Loading,
  /// Nothing to show; carries the placeholder text.
  Empty(&'static str),
  Rows(Vec<TableRow>),
  Error(String),
}

/// Contents of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrantDetail {
  pub id: String,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub dob: String,
  pub gender: String,
  pub address: String,
  pub newsletter: &'static str,
  pub registered: String,
}

impl From<&Registrant> for RegistrantDetail {
  fn from(r: &Registrant) -> Self {
    RegistrantDetail {
      id: r.id.to_string(),
      full_name: r.full_name.clone(),
      email: r.email.clone(),
      phone: r.phone.clone(),
      dob: long_date(r.dob),
      gender: r.gender.to_string(),
      address: address_line(&r.address, &r.city, &r.country),
      newsletter: yes_no(r.newsletter),
      registered: long_timestamp(r.registered_at),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  Viewed,
  Deleted,
  /// The confirmation prompt was declined.
  Cancelled,
  /// The id is not in the cached list.
  Unknown,
  /// The request failed; carries the notice shown to the user.
  Failed(String),
}

pub struct Dashboard<A: RegistryApi> {
  api: A,
  session: AdminSession,
  records: Vec<Registrant>,
  stats: Statistics,
  filter: String,
  table: TableView,
  refreshing: BusyFlag,
  detail: Option<RegistrantDetail>,
  notice: Option<String>,
}

impl<A: RegistryApi> Dashboard<A> {
  /// Fails with `PortalError::Unauthenticated` when the session holds no
  /// admin token; the caller then returns to the entry page.
  pub fn open(session: AdminSession, api: A) -> PortalResult<Self> {
    if !session.is_authenticated() {
      warn!("Dashboard opened without an admin session.");
      return Err(PortalError::Unauthenticated);
    }
    Ok(Dashboard {
      api,
      session,
      records: Vec::new(),
      stats: Statistics::default(),
      filter: String::new(),
      table: TableView::Loading,
      refreshing: BusyFlag::default(),
      detail: None,
      notice: None,
    })
  }

  /// Fetches the full list and rebuilds statistics and table from it.
  #[instrument(name = "dashboard::load", skip(self))]
  pub async fn load(&mut self) {
    let result = {
      let _busy = self.refreshing.hold();
      self.api.list_users().await
    };

    match result {
      Ok(records) => {
        info!(count = records.len(), "Loaded registrants.");
        self.records = records;
        self.stats = Statistics::from_records(&self.records);
        self.render();
      }
      Err(err) => {
        error!(error = %err, "Failed to load registrants.");
        self.table = TableView::Error(LOAD_FAILED.to_string());
      }
    }
  }

  /// The refresh button. Same as the initial load.
  pub async fn refresh(&mut self) {
    self.load().await;
  }

  pub fn is_refreshing(&self) -> bool {
    self.refreshing.is_busy()
  }

  /// Handle the renderer keeps to show the busy indicator while a fetch is
  /// pending.
  pub fn refresh_busy(&self) -> BusyFlag {
    self.refreshing.clone()
  }

  pub fn stats(&self) -> Statistics {
    self.stats
  }

  pub fn records(&self) -> &[Registrant] {
    &self.records
  }

  pub fn table(&self) -> &TableView {
    &self.table
  }

  pub fn filter(&self) -> &str {
    &self.filter
  }

  pub fn detail(&self) -> Option<&RegistrantDetail> {
    self.detail.as_ref()
  }

  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  /// Live search box input.
  pub fn set_filter(&mut self, query: &str) {
    self.filter = query.to_string();
    self.render();
  }

  fn render(&mut self) {
    let rows: Vec<TableRow> = filter_records(&self.records, &self.filter)
      .into_iter()
      .enumerate()
      .map(|(i, r)| TableRow::new(i + 1, r))
      .collect();

    self.table = if rows.is_empty() {
      TableView::Empty(NO_USERS)
    } else {
      TableView::Rows(rows)
    };
  }

  pub async fn dispatch(&mut self, action: RowAction, confirm: &(dyn Confirm + Sync)) -> ActionOutcome {
    match action {
      RowAction::View(id) => {
        if self.view(id) {
          ActionOutcome::Viewed
        } else {
          ActionOutcome::Unknown
        }
      }
      RowAction::Delete(id) => self.delete(id, confirm).await,
    }
  }

  /// Opens the detail overlay from the cached record; no request is made.
  pub fn view(&mut self, id: RegistrantId) -> bool {
    match self.records.iter().find(|r| r.id == id) {
      Some(record) => {
        self.detail = Some(RegistrantDetail::from(record));
        true
      }
      None => false,
    }
  }

  pub fn close_detail(&mut self) {
    self.detail = None;
  }

  /// Deletes after confirmation, then reloads the whole list.
  #[instrument(name = "dashboard::delete", skip(self, confirm))]
  pub async fn delete(&mut self, id: RegistrantId, confirm: &(dyn Confirm + Sync)) -> ActionOutcome {
    let name = match self.records.iter().find(|r| r.id == id) {
      Some(record) => record.full_name.clone(),
      None => return ActionOutcome::Unknown,
    };
    if !confirm.confirm(&format!("Are you sure you want to delete {}?", name)) {
      return ActionOutcome::Cancelled;
    }

    match self.api.delete_user(id).await {
      Ok(_) => {
        info!(%id, "Registrant deleted.");
        self.notice = Some("User deleted successfully!".to_string());
        self.load().await;
        ActionOutcome::Deleted
      }
      Err(err) => {
        warn!(%id, error = %err, "Delete failed.");
        let message = match err {
          PortalError::Rejected { message }
          | PortalError::NotFound { message }
          | PortalError::Unauthorized { message } => format!("Failed to delete user: {}", message),
          _ => "Failed to delete user. Please try again.".to_string(),
        };
        self.notice = Some(message.clone());
        ActionOutcome::Failed(message)
      }
    }
  }

  /// Clears the admin token after confirmation. Returns `true` when the
  /// caller should navigate back to the entry page.
  pub fn logout(&mut self, confirm: &(dyn Confirm + Sync)) -> bool {
    if !confirm.confirm("Are you sure you want to logout?") {
      return false;
    }
    self.session.clear();
    info!("Admin logged out.");
    true
  }
}
