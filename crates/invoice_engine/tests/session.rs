mod common;

use std::sync::atomic::Ordering;

use common::FakeBrowser;
use invoice_core::Credentials;
use invoice_engine::{HarvestError, Phase, PortalSession};
use pretty_assertions::assert_eq;

fn credentials() -> Credentials {
    Credentials::new("billing-bot", "hunter2")
}

#[tokio::test]
async fn lifecycle_runs_uninitialized_to_closed() {
    let (fake, state) = FakeBrowser::with_rows(&[]);
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());
    assert_eq!(session.phase(), Phase::Uninitialized);

    session.initialize().await.unwrap();
    assert_eq!(session.phase(), Phase::Initialized);

    session.authenticate(&credentials()).await.unwrap();
    assert_eq!(session.phase(), Phase::Authenticated);
    assert!(!state.typed.lock().unwrap().is_empty());

    session.teardown().await;
    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(state.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_is_idempotent() {
    let (fake, state) = FakeBrowser::with_rows(&[]);
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());

    session.initialize().await.unwrap();
    session.teardown().await;
    session.teardown().await;

    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(state.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_is_safe_on_an_uninitialized_session() {
    let (fake, state) = FakeBrowser::with_rows(&[]);
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());

    session.teardown().await;

    assert_eq!(session.phase(), Phase::Closed);
    assert_eq!(state.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn authenticate_requires_an_initialized_session() {
    let (fake, _state) = FakeBrowser::with_rows(&[]);
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());

    let err = session.authenticate(&credentials()).await.unwrap_err();
    assert!(matches!(err, HarvestError::Authentication(_)));
    assert_eq!(session.phase(), Phase::Uninitialized);
}

#[tokio::test]
async fn initialize_cannot_run_twice() {
    let (fake, _state) = FakeBrowser::with_rows(&[]);
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());

    session.initialize().await.unwrap();
    let err = session.initialize().await.unwrap_err();
    assert!(matches!(err, HarvestError::Initialization(_)));
}

#[tokio::test]
async fn auth_failure_is_absorbing_and_still_releases() {
    let (mut fake, state) = FakeBrowser::with_rows(&[]);
    fake.fail_login_wait = true;
    let mut session = PortalSession::new(Box::new(fake), common::session_settings());

    session.initialize().await.unwrap();
    let err = session.authenticate(&credentials()).await.unwrap_err();
    assert!(matches!(err, HarvestError::Authentication(_)));
    assert_eq!(session.phase(), Phase::Failed);

    session.teardown().await;
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(state.close_calls.load(Ordering::SeqCst), 1);
}
