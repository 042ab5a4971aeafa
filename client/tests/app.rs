//! # App Tests
//!
//! Startup, gating of protected actions, and logout.

mod common;

use common::MockGateway;
use nearby::app::ToastKind;
use nearby::services::location::FixedLocation;
use nearby::{App, SessionStore};
use serde_json::json;
use shared::Coordinates;
use std::sync::Arc;

const DEFAULT: Coordinates = Coordinates::new(12.9716, 77.5946);

fn app_with(gateway: &Arc<MockGateway>, session: SessionStore) -> App {
    App::new(gateway.clone(), Arc::new(session), None, DEFAULT)
}

#[tokio::test]
async fn test_anonymous_favorite_makes_no_request() {
    let gateway = Arc::new(MockGateway::new());
    let app = app_with(&gateway, SessionStore::in_memory());

    assert!(!app.favorite("p1").await);
    assert!(gateway.calls().is_empty());
    assert!(app.notifications().active().is_empty());
}

#[tokio::test]
async fn test_signed_in_favorite_runs() {
    let gateway = Arc::new(MockGateway::new());
    gateway.ok("/users/me/favorites?place_id=p1", json!({}));
    let session = SessionStore::in_memory();
    session.save("abc").unwrap();
    let app = app_with(&gateway, session);

    assert!(app.favorite("p1").await);
    assert_eq!(gateway.calls().len(), 1);
    assert_eq!(app.notifications().active().len(), 1);
}

#[tokio::test]
async fn test_signed_in_favorite_failure_still_counts_as_run() {
    let gateway = Arc::new(MockGateway::new());
    gateway.fail("/users/me/favorites?place_id=p9", "Place not found");
    let session = SessionStore::in_memory();
    session.save("abc").unwrap();
    let app = app_with(&gateway, session);

    assert!(app.favorite("p9").await);
    let toasts = app.notifications().active();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Place not found");
}

#[tokio::test]
async fn test_start_restores_profile_for_stored_credential() {
    let gateway = Arc::new(MockGateway::new());
    gateway.ok("/users/me", json!({"id": 1, "name": "Asha", "email": "asha@example.com", "plan": "pro"}));
    let session = SessionStore::in_memory();
    session.save("stored").unwrap();
    let app = app_with(&gateway, session);

    app.start().await;

    let profile = app.profile().unwrap();
    assert_eq!(profile.name, "Asha");
    assert_eq!(profile.plan.as_deref(), Some("pro"));
}

#[tokio::test]
async fn test_start_without_credential_skips_profile() {
    let gateway = Arc::new(MockGateway::new());
    let app = App::new(
        gateway.clone(),
        Arc::new(SessionStore::in_memory()),
        Some(Arc::new(FixedLocation(Coordinates::new(1.0, 2.0)))),
        DEFAULT,
    );

    app.start().await;

    assert!(app.profile().is_none());
    assert!(gateway.calls().is_empty());
    assert_eq!(app.discovery.coordinates(), Coordinates::new(1.0, 2.0));
}

#[tokio::test]
async fn test_failed_profile_restore_is_silent() {
    let gateway = Arc::new(MockGateway::new());
    gateway.fail("/users/me", "Token expired");
    let session = SessionStore::in_memory();
    session.save("stale").unwrap();
    let app = app_with(&gateway, session);

    app.start().await;

    assert!(app.profile().is_none());
    assert!(app.is_authenticated());
    assert_eq!(app.auth.error(), None);
}

#[tokio::test]
async fn test_login_then_logout() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .ok("/auth/login", json!({"token": "abc"}))
        .ok("/users/me", json!({"id": "u1", "name": "Asha", "email": "asha@example.com"}));
    let app = app_with(&gateway, SessionStore::in_memory());

    app.auth.set_email("asha@example.com");
    app.auth.set_password("pw");
    app.auth.submit().await.unwrap();
    assert_eq!(app.process_events(), 2);
    assert_eq!(app.profile().unwrap().name, "Asha");

    app.logout().unwrap();
    assert!(app.profile().is_none());
    assert!(!app.is_authenticated());
    assert!(app.session().auth_header().is_empty());

    // Once signed out, protected actions are gated again.
    assert!(!app.favorite("p1").await);
    assert_eq!(gateway.calls().len(), 2);
}

#[tokio::test]
async fn test_new_credential_drops_previous_profile() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .ok("/users/me", json!({"id": "a", "name": "Alice", "email": "alice@example.com"}))
        .ok("/auth/login", json!({"token": "bob-token"}))
        .fail("/users/me", "Request failed");
    let session = SessionStore::in_memory();
    session.save("alice-token").unwrap();
    let app = app_with(&gateway, session);

    app.start().await;
    assert_eq!(app.profile().unwrap().name, "Alice");

    app.auth.set_email("bob@example.com");
    app.auth.set_password("pw");
    assert!(app.auth.submit().await.is_err());
    app.process_events();

    // The credential is kept, but Alice's profile no longer matches it.
    assert_eq!(app.session().current_token().as_deref(), Some("bob-token"));
    assert!(app.profile().is_none());
    assert_eq!(app.auth.error().as_deref(), Some("Request failed"));
}
