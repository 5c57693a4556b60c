// Bundled identity provider: register, login, token verification

mod common;

use common::setup_test_db;
use nutricart_core::errors::ExErrorKind;
use nutricart_core_types::Sensitive;
use nutricart_engine::identity::{Credentials, IdentityProvider, Registration, SqliteIdentityProvider};

fn registration(email: &str, password: &str) -> Registration {
    Registration {
        first_name: Some("Grace".into()),
        last_name: Some("Hopper".into()),
        email: Some(email.into()),
        password: Some(Sensitive::new(password.to_string())),
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: Some(email.into()),
        password: Some(Sensitive::new(password.to_string())),
    }
}

#[test]
fn test_register_assigns_next_id_and_issues_token() {
    let (_db, mut conn) = setup_test_db();
    let provider = SqliteIdentityProvider::new();

    let session = provider
        .register(&mut conn, &registration("grace@example.com", "cobol"))
        .unwrap();

    // Fixture users occupy ids 1 and 2.
    assert_eq!(session.user.id, 3);
    assert_eq!(session.user.first_name, "Grace");
    assert!(!session.token.is_empty());

    let hash: String = conn
        .query_row("SELECT password_hash FROM users WHERE user_id = 3", [], |row| row.get(0))
        .unwrap();
    assert_ne!(hash, "cobol");
}

#[test]
fn test_register_duplicate_email_rejected() {
    let (_db, mut conn) = setup_test_db();
    let provider = SqliteIdentityProvider::new();
    provider
        .register(&mut conn, &registration("grace@example.com", "cobol"))
        .unwrap();

    let err = provider
        .register(&mut conn, &registration("GRACE@example.com", "other"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(err.message(), "Email already registered");
}

#[test]
fn test_register_missing_field_rejected() {
    let (_db, mut conn) = setup_test_db();
    let mut reg = registration("grace@example.com", "cobol");
    reg.last_name = Some("   ".into());

    let err = SqliteIdentityProvider::new()
        .register(&mut conn, &reg)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingField);
    assert_eq!(err.entity_id(), Some("lastName"));
}

#[test]
fn test_login_and_verify_round_trip() {
    let (_db, mut conn) = setup_test_db();
    let provider = SqliteIdentityProvider::new();
    let registered = provider
        .register(&mut conn, &registration("grace@example.com", "cobol"))
        .unwrap();

    let session = provider
        .login(&conn, &credentials("grace@example.com", "cobol"))
        .unwrap();
    assert_eq!(session.user, registered.user);
    assert_ne!(session.token, registered.token);

    let user = provider.verify(&conn, &session.token).unwrap();
    assert_eq!(user.email, "grace@example.com");
}

#[test]
fn test_login_failures_share_one_message() {
    let (_db, mut conn) = setup_test_db();
    let provider = SqliteIdentityProvider::new();
    provider
        .register(&mut conn, &registration("grace@example.com", "cobol"))
        .unwrap();

    let wrong_password = provider
        .login(&conn, &credentials("grace@example.com", "fortran"))
        .unwrap_err();
    let unknown_email = provider
        .login(&conn, &credentials("nobody@example.com", "cobol"))
        .unwrap_err();

    for err in [wrong_password, unknown_email] {
        assert_eq!(err.kind(), ExErrorKind::Unauthorised);
        assert_eq!(err.message(), "Invalid email or password");
    }
}

#[test]
fn test_verify_rejects_unknown_and_expired_tokens() {
    let (_db, mut conn) = setup_test_db();
    let provider = SqliteIdentityProvider::new().with_session_ttl(chrono::Duration::seconds(-1));
    let session = provider
        .register(&mut conn, &registration("grace@example.com", "cobol"))
        .unwrap();

    let expired = provider.verify(&conn, &session.token).unwrap_err();
    assert_eq!(expired.kind(), ExErrorKind::Unauthorised);

    let unknown = provider.verify(&conn, "not-a-token").unwrap_err();
    assert_eq!(unknown.kind(), ExErrorKind::Unauthorised);
}

#[test]
fn test_registration_debug_redacts_password() {
    let reg = registration("grace@example.com", "cobol");
    let rendered = format!("{:?}", reg);
    assert!(!rendered.contains("cobol"));
    assert!(rendered.contains("REDACTED"));
}
