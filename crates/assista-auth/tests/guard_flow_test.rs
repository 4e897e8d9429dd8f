//! Guard behavior against a real session file.

mod helpers;

use assista_auth::{Decision, GuardError, RedirectReason, UserNotice};

use helpers::TestApp;

#[tokio::test]
async fn test_half_written_session_file_is_reset() {
    let app = TestApp::new();
    std::fs::write(
        app.dir.path().join("session.json"),
        r#"{"token":"orphan"}"#,
    )
    .unwrap();

    let decision = app.access.enter("chat").unwrap();

    let redirect = decision.redirect().unwrap();
    assert_eq!(redirect.reason, RedirectReason::CorruptedSession);
    assert_eq!(redirect.target, "/login");
    assert_eq!(
        UserNotice::for_decision(&decision),
        Some(UserNotice::SessionCorrupted)
    );
    assert!(app.storage.get("token").unwrap().is_none());
    assert_eq!(app.navigator.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_client_sent_to_own_home_from_admin_views() {
    let app = TestApp::new();
    app.manager.login("cliente@example.com", "secret").await.unwrap();

    for view in ["admin_metrics", "admin_users", "admin_analytics"] {
        let decision = app.access.enter(view).unwrap();
        let redirect = decision.redirect().unwrap();
        assert_eq!(redirect.reason, RedirectReason::RoleMismatch);
        assert_eq!(redirect.target, "/cliente");
    }
    assert_eq!(app.navigator.visits().len(), 3);
}

#[tokio::test]
async fn test_open_views_render_for_every_role() {
    for identifier in [
        "admin@example.com",
        "abogado@example.com",
        "cliente@example.com",
    ] {
        let app = TestApp::new();
        app.manager.login(identifier, "secret").await.unwrap();
        for view in ["dashboard", "chat", "documents"] {
            assert!(app.access.enter(view).unwrap().is_render(), "{identifier} on {view}");
        }
    }
}

#[tokio::test]
async fn test_stored_user_without_role_is_an_error() {
    let app = TestApp::new();
    std::fs::write(
        app.dir.path().join("session.json"),
        r#"{"token":"tok","user":"{\"id\":\"3\",\"email\":\"x@example.com\"}"}"#,
    )
    .unwrap();

    assert_eq!(
        app.access.enter("dashboard").unwrap(),
        Decision::Error(GuardError::MissingRole)
    );
    assert!(app.navigator.visits().is_empty());
}
