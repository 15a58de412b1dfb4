//! End-to-end account flows over the in-memory repository: registration,
//! update, removal, and login, including the validation failures each
//! operation can surface.

use assert_matches::assert_matches;
use moneta_core::error::CoreError;
use moneta_core::models::user::{
    AuthRequest, CreateAccountRequest, DeleteAccountRequest, UpdateAccountRequest, User,
};
use moneta_core::password;
use moneta_core::repository::memory::InMemoryRepository;
use moneta_core::repository::Repository;
use moneta_core::services::account::AccountService;
use moneta_core::types::AccountStatus;
use serde_json::json;

fn service() -> AccountService<InMemoryRepository<User>> {
    AccountService::new(InMemoryRepository::new())
}

fn create_request(nickname: &str, email: &str, password: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        nickname: nickname.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_request(email: &str, nickname: &str, password: &str) -> AuthRequest {
    AuthRequest {
        email: email.to_string(),
        nickname: nickname.to_string(),
        password: password.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: registration persists an inactive user with a hashed password
// ---------------------------------------------------------------------------

#[test]
fn test_create_account() {
    let svc = service();
    let response = svc
        .create_account(&create_request(
            "alice_serat",
            "alice@example.com",
            "securepassword123!",
        ))
        .expect("create should succeed");

    assert_eq!(response.id, 1);
    assert_eq!(response.nickname, "alice_serat");
    assert_eq!(response.email, "alice@example.com");

    let stored = svc
        .accounts()
        .find_by_field("email", &json!("alice@example.com"))
        .expect("stored user should be findable");
    assert_eq!(stored.status, AccountStatus::Inactive);
    assert!(
        stored.password_hash.starts_with("$argon2id$"),
        "password must be stored as an argon2id PHC hash"
    );
    assert!(password::verify_password("securepassword123!", &stored.password_hash).unwrap());
    assert_eq!(svc.accounts().created_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: a taken email rejects registration with a single message
// ---------------------------------------------------------------------------

#[test]
fn test_create_account_duplicate_email() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let err = svc
        .create_account(&create_request(
            "someone_else",
            "alice@example.com",
            "anotherpassword!",
        ))
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(messages, vec!["email already exists"]);
    });
    assert_eq!(svc.accounts().created_count(), 1, "nothing new may be written");
}

// ---------------------------------------------------------------------------
// Test: a taken nickname rejects registration with a single message
// ---------------------------------------------------------------------------

#[test]
fn test_create_account_duplicate_nickname() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let err = svc
        .create_account(&create_request(
            "alice_serat",
            "other@example.com",
            "anotherpassword!",
        ))
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(messages, vec!["nickname already exists"]);
    });
}

// ---------------------------------------------------------------------------
// Test: a bad request reports every violated rule, in declaration order
// ---------------------------------------------------------------------------

#[test]
fn test_create_account_collects_all_failures() {
    let svc = service();
    let err = svc
        .create_account(&create_request("", "bad", "pw"))
        .unwrap_err();

    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(
            messages,
            vec![
                "email must be at least 12 characters",
                "invalid email format",
                "nickname cannot be empty",
                "nickname must be at least 3 characters",
                "password must be at least 8 characters",
            ]
        );
    });
    assert_eq!(svc.accounts().created_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: an update applies the supplied fields and writes once
// ---------------------------------------------------------------------------

#[test]
fn test_update_account() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let response = svc
        .update_account(&UpdateAccountRequest {
            email: "alice@example.com".to_string(),
            first_name: Some("Alice".to_string()),
            status: Some("active".to_string()),
            ..Default::default()
        })
        .expect("update should succeed");
    assert!(response.changed);

    let stored = svc
        .accounts()
        .find_by_field("email", &json!("alice@example.com"))
        .unwrap();
    assert_eq!(stored.first_name, "Alice");
    assert_eq!(stored.status, AccountStatus::Active);
    assert_eq!(svc.accounts().updated_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: an update matching the stored state performs no write
// ---------------------------------------------------------------------------

#[test]
fn test_update_account_no_op() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();
    svc.update_account(&UpdateAccountRequest {
        email: "alice@example.com".to_string(),
        first_name: Some("Alice".to_string()),
        ..Default::default()
    })
    .unwrap();

    // Re-sending the stored state, including the unchanged password, must
    // not produce a second write.
    let response = svc
        .update_account(&UpdateAccountRequest {
            email: "alice@example.com".to_string(),
            first_name: Some("Alice".to_string()),
            password: Some("securepassword123!".to_string()),
            ..Default::default()
        })
        .expect("no-op update should still succeed");
    assert!(!response.changed);
    assert_eq!(svc.accounts().updated_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: a changed password is re-hashed and the old one stops working
// ---------------------------------------------------------------------------

#[test]
fn test_update_account_password() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let response = svc
        .update_account(&UpdateAccountRequest {
            email: "alice@example.com".to_string(),
            password: Some("brandnewpassword!".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(response.changed);

    svc.login(&login_request("alice@example.com", "", "brandnewpassword!"))
        .expect("new password should authenticate");
    let err = svc
        .login(&login_request("alice@example.com", "", "securepassword123!"))
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidCredentials);
}

// ---------------------------------------------------------------------------
// Test: updating an unknown account fails validation
// ---------------------------------------------------------------------------

#[test]
fn test_update_account_unknown_email() {
    let svc = service();
    let err = svc
        .update_account(&UpdateAccountRequest {
            email: "ghost@example.com".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(messages, vec!["account not found"]);
    });
}

// ---------------------------------------------------------------------------
// Test: destroy deletes the stored user; a second destroy fails validation
// ---------------------------------------------------------------------------

#[test]
fn test_destroy_account() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    svc.destroy_account(&DeleteAccountRequest {
        email: "alice@example.com".to_string(),
    })
    .expect("destroy should succeed");

    assert!(svc.accounts().get_all().unwrap().is_empty());
    assert_eq!(svc.accounts().deleted_count(), 1);

    let err = svc
        .destroy_account(&DeleteAccountRequest {
            email: "alice@example.com".to_string(),
        })
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(messages, vec!["account not found"]);
    });
}

// ---------------------------------------------------------------------------
// Test: login works by email and by nickname
// ---------------------------------------------------------------------------

#[test]
fn test_login() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let by_email = svc
        .login(&login_request("alice@example.com", "", "securepassword123!"))
        .expect("email login should succeed");
    assert_eq!(by_email.nickname, "alice_serat");

    let by_nickname = svc
        .login(&login_request("", "alice_serat", "securepassword123!"))
        .expect("nickname login should succeed");
    assert_eq!(by_nickname.id, by_email.id);
}

// ---------------------------------------------------------------------------
// Test: a wrong password is rejected as invalid credentials
// ---------------------------------------------------------------------------

#[test]
fn test_login_wrong_password() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();

    let err = svc
        .login(&login_request("alice@example.com", "", "wrong-password!"))
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidCredentials);
}

// ---------------------------------------------------------------------------
// Test: an unknown identifier reports the same as a wrong password
// ---------------------------------------------------------------------------

#[test]
fn test_login_unknown_identifier() {
    let svc = service();
    let err = svc
        .login(&login_request("nobody@example.com", "", "whatever-password"))
        .unwrap_err();
    assert_matches!(err, CoreError::InvalidCredentials);
}

// ---------------------------------------------------------------------------
// Test: a suspended account cannot authenticate
// ---------------------------------------------------------------------------

#[test]
fn test_login_suspended_account() {
    let svc = service();
    svc.create_account(&create_request(
        "alice_serat",
        "alice@example.com",
        "securepassword123!",
    ))
    .unwrap();
    svc.update_account(&UpdateAccountRequest {
        email: "alice@example.com".to_string(),
        status: Some("suspended".to_string()),
        ..Default::default()
    })
    .unwrap();

    let err = svc
        .login(&login_request("alice@example.com", "", "securepassword123!"))
        .unwrap_err();
    assert_matches!(err, CoreError::AccountSuspended);
}

// ---------------------------------------------------------------------------
// Test: login without email or nickname fails validation
// ---------------------------------------------------------------------------

#[test]
fn test_login_missing_identifier() {
    let svc = service();
    let err = svc
        .login(&login_request("", "", "securepassword123!"))
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(messages) => {
        assert_eq!(messages, vec!["email or nickname is required"]);
    });
}

// ---------------------------------------------------------------------------
// Test: a failing backend surfaces as a storage error, not a rejection
// ---------------------------------------------------------------------------

#[test]
fn test_login_backend_failure() {
    let svc = service();
    svc.accounts().fail_with("connection refused");

    let err = svc
        .login(&login_request("alice@example.com", "", "securepassword123!"))
        .unwrap_err();
    assert_matches!(err, CoreError::Storage(message) => {
        assert_eq!(message, "connection refused");
    });
}
