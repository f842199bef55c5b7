// tests/dashboard_tests.rs
mod common;

use common::*;
use eduportal::controller::dashboard::{LOAD_FAILED, NO_USERS};
use eduportal::{ActionOutcome, AdminSession, Dashboard, PortalError, RowAction, Statistics, TableView};
use serial_test::serial;
use std::sync::Arc;

fn yes(_: &str) -> bool {
  true
}

fn no(_: &str) -> bool {
  false
}

fn rows(dashboard: &Dashboard<Arc<FakeApi>>) -> Vec<String> {
  match dashboard.table() {
    TableView::Rows(rows) => rows.iter().map(|r| r.full_name.clone()).collect(),
    other => panic!("expected rows, got {:?}", other),
  }
}

async fn loaded(api: &Arc<FakeApi>) -> Dashboard<Arc<FakeApi>> {
  let mut dashboard = Dashboard::open(AdminSession::with_token("admin_test"), api.clone()).expect("session is set");
  dashboard.load().await;
  dashboard
}

#[tokio::test]
#[serial]
async fn test_open_requires_admin_session() {
  setup_tracing();
  let api = Arc::new(FakeApi::default());

  let result = Dashboard::open(AdminSession::new(), api.clone());
  assert!(matches!(result, Err(PortalError::Unauthenticated)));

  let rejecting = AdminSession::with_token("admin_test").with_predicate(|_| false);
  assert!(Dashboard::open(rejecting, api.clone()).is_err());
  assert_eq!(api.list_calls(), 0);
}

#[tokio::test]
#[serial]
async fn test_load_computes_statistics_and_numbered_rows() {
  setup_tracing();
  let api = Arc::new(FakeApi::with_records(sample_records()));
  let dashboard = loaded(&api).await;

  assert_eq!(
    dashboard.stats(),
    Statistics {
      total: 5,
      male: 2,
      female: 1,
      newsletter: 3,
    }
  );
  let stats = dashboard.stats();
  assert!(stats.male + stats.female <= stats.total);

  match dashboard.table() {
    TableView::Rows(rows) => {
      assert_eq!(rows.len(), 5);
      assert_eq!(rows.iter().map(|r| r.number).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
      assert_eq!(rows[0].registered, "Sep 2, 2024");
      assert_eq!(rows[0].view, RowAction::View(rows[0].id));
      assert_eq!(rows[0].delete, RowAction::Delete(rows[0].id));
    }
    other => panic!("expected rows, got {:?}", other),
  }
  assert!(!dashboard.is_refreshing());
}

#[tokio::test]
#[serial]
async fn test_filter_by_unique_city_and_clear() {
  setup_tracing();
  let api = Arc::new(FakeApi::with_records(sample_records()));
  let mut dashboard = loaded(&api).await;

  dashboard.set_filter("halif");
  assert_eq!(rows(&dashboard), vec!["Jonas Berg"]);
  match dashboard.table() {
    TableView::Rows(r) => assert_eq!(r[0].number, 1),
    _ => unreachable!(),
  }

  dashboard.set_filter("NOOR@");
  assert_eq!(rows(&dashboard), vec!["Noor Haddad"]);

  dashboard.set_filter("");
  assert_eq!(rows(&dashboard).len(), 5);

  dashboard.set_filter("nowhere");
  assert_eq!(dashboard.table(), &TableView::Empty(NO_USERS));

  // Filtering never triggers a fetch and never touches the statistics.
  assert_eq!(api.list_calls(), 1);
  assert_eq!(dashboard.stats().total, 5);
}

#[tokio::test]
#[serial]
async fn test_view_uses_cached_record() {
  setup_tracing();
  let records = sample_records();
  let target = records[0].clone();
  let api = Arc::new(FakeApi::with_records(records));
  let mut dashboard = loaded(&api).await;

  let outcome = dashboard.dispatch(RowAction::View(target.id), &yes).await;
  assert_eq!(outcome, ActionOutcome::Viewed);
  assert_eq!(api.get_calls(), 0);

  let detail = dashboard.detail().expect("overlay is open");
  assert_eq!(detail.full_name, "Amara Okafor");
  assert_eq!(detail.dob, "April 12, 1999");
  assert_eq!(detail.registered, "September 2, 2024 at 10:30 AM");
  assert_eq!(detail.address, "42 Harbour Road, Toronto, Canada");
  assert_eq!(detail.newsletter, "Yes");
  assert_eq!(detail.id, target.id.to_string());

  dashboard.close_detail();
  assert!(dashboard.detail().is_none());
}

#[tokio::test]
#[serial]
async fn test_delete_confirms_then_reloads() {
  setup_tracing();
  let records = sample_records();
  let target = records[1].id;
  let api = Arc::new(FakeApi::with_records(records));
  let mut dashboard = loaded(&api).await;

  let prompts = parking_lot::Mutex::new(Vec::new());
  let declining = |prompt: &str| {
    prompts.lock().push(prompt.to_string());
    false
  };
  assert_eq!(
    dashboard.dispatch(RowAction::Delete(target), &declining).await,
    ActionOutcome::Cancelled
  );
  assert_eq!(
    *prompts.lock(),
    vec!["Are you sure you want to delete Liam Chen?".to_string()]
  );
  assert_eq!(api.records().len(), 5);

  assert_eq!(dashboard.dispatch(RowAction::Delete(target), &yes).await, ActionOutcome::Deleted);
  assert_eq!(api.list_calls(), 2);
  assert!(dashboard.records().iter().all(|r| r.id != target));
  assert_eq!(dashboard.stats().male, 1);
  assert_eq!(dashboard.notice(), Some("User deleted successfully!"));
}

#[tokio::test]
#[serial]
async fn test_delete_failure_keeps_list() {
  setup_tracing();
  let records = sample_records();
  let target = records[2].id;
  let api = Arc::new(FakeApi::with_records(records));
  let mut dashboard = loaded(&api).await;

  api.fail_delete(Failure::NotFound);
  assert_eq!(
    dashboard.delete(target, &yes).await,
    ActionOutcome::Failed("Failed to delete user: User not found".to_string())
  );

  api.fail_delete(Failure::Transport);
  assert_eq!(
    dashboard.delete(target, &yes).await,
    ActionOutcome::Failed("Failed to delete user. Please try again.".to_string())
  );
  assert_eq!(api.list_calls(), 1);
  assert_eq!(dashboard.records().len(), 5);

  assert_eq!(
    dashboard.delete(uuid::Uuid::new_v4(), &yes).await,
    ActionOutcome::Unknown
  );
}

#[tokio::test]
#[serial]
async fn test_fetch_failure_renders_error_state() {
  setup_tracing();
  let api = Arc::new(FakeApi::with_records(sample_records()));
  api.fail_list(Some(Failure::Transport));
  let mut dashboard = loaded(&api).await;

  assert_eq!(dashboard.table(), &TableView::Error(LOAD_FAILED.to_string()));
  assert!(!dashboard.is_refreshing());

  api.fail_list(None);
  dashboard.refresh().await;
  assert_eq!(rows(&dashboard).len(), 5);
}

#[tokio::test]
#[serial]
async fn test_empty_list_and_logout() {
  setup_tracing();
  let api = Arc::new(FakeApi::default());
  let session = AdminSession::with_token("admin_test");
  let mut dashboard = Dashboard::open(session.clone(), api.clone()).unwrap();
  dashboard.load().await;
  assert_eq!(dashboard.table(), &TableView::Empty(NO_USERS));
  assert_eq!(dashboard.stats(), Statistics::default());

  assert!(!dashboard.logout(&no));
  assert!(session.is_authenticated());

  assert!(dashboard.logout(&yes));
  assert!(!session.is_authenticated());
  assert!(Dashboard::open(session, api).is_err());
}

#[tokio::test]
#[serial]
async fn test_login_then_open() {
  setup_tracing();
  let api = Arc::new(FakeApi::default());
  let session = AdminSession::new();

  let err = session.login(api.as_ref(), "admin", "wrong").await.unwrap_err();
  assert_eq!(err.user_message("x"), "Invalid credentials");
  assert!(!session.is_authenticated());

  session.login(api.as_ref(), "admin", "admin123").await.unwrap();
  assert!(session.token().unwrap().starts_with("admin_"));
  assert!(Dashboard::open(session, api).is_ok());
}

#[tokio::test]
#[serial]
async fn test_busy_indicator_is_raised_during_fetch() {
  setup_tracing();
  let api = Arc::new(FakeApi::with_records(sample_records()));
  let mut dashboard = Dashboard::open(AdminSession::with_token("admin_test"), api.clone()).unwrap();
  let indicator = dashboard.refresh_busy();
  api.watch_busy(indicator.clone());

  dashboard.load().await;
  assert!(!indicator.is_busy());

  api.fail_list(Some(Failure::Transport));
  dashboard.refresh().await;
  assert!(!dashboard.is_refreshing());

  // Observed from inside both list requests, including the failed one.
  assert_eq!(api.busy_seen(), vec![true, true]);
}
