//! Unit tests for the account service

use std::sync::atomic::Ordering;

use chrono::Duration;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::domain::entities::account::{Account, VerificationStatus};
use crate::domain::entities::Claims;
use crate::errors::{AuthError, ConflictError, DomainError, ValidationError};
use crate::repositories::CredentialStore;
use crate::services::clock::Clock;
use crate::services::password::{BcryptHasher, SecretHasher, MAX_SECRET_BYTES};

use super::mocks::*;

const SECRET: &str = "correct horse battery staple";

async fn register_alice<S: CredentialStore>(harness: &Harness<S>) -> Uuid {
    harness
        .service
        .register("Alice", "alice@example.com", SECRET)
        .await
        .unwrap()
        .id
}

async fn register_and_verify_alice<S: CredentialStore>(harness: &Harness<S>) -> Uuid {
    let id = register_alice(harness).await;
    harness
        .service
        .verify("alice@example.com", "100000")
        .await
        .unwrap();
    id
}

// ---- register ----

#[tokio::test]
async fn test_register_creates_unverified_account() {
    let harness = harness();
    let now = harness.clock.now();

    let view = harness
        .service
        .register("Alice", "alice@example.com", SECRET)
        .await
        .unwrap();

    assert_eq!(view.name, "Alice");
    assert_eq!(view.email, "alice@example.com");
    assert!(!view.is_verified);
    assert_eq!(view.created_at, now);
    assert_eq!(view.updated_at, now);

    let stored = harness.store.find_by_id(view.id).await.unwrap().unwrap();
    assert_ne!(stored.secret_hash, SECRET);
    assert!(BcryptHasher::new(4).verify(SECRET, &stored.secret_hash).unwrap());

    let challenge = stored.challenge().unwrap();
    assert_eq!(challenge.code, "100000");
    assert_eq!(challenge.expires_at, now + Duration::minutes(5));
}

#[tokio::test]
async fn test_register_normalizes_name_and_email() {
    let harness = harness();

    let view = harness
        .service
        .register("  Alice  ", "  Alice@Example.COM ", SECRET)
        .await
        .unwrap();

    assert_eq!(view.name, "Alice");
    assert_eq!(view.email, "alice@example.com");
    assert!(harness
        .store
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let harness = harness();

    let cases = [
        ("", "alice@example.com", SECRET, ValidationError::required("name")),
        ("   ", "alice@example.com", SECRET, ValidationError::required("name")),
        ("Alice", "", SECRET, ValidationError::required("email")),
        ("Alice", "not-an-email", SECRET, ValidationError::InvalidEmail),
        ("Alice", "alice@example.com", "", ValidationError::required("secret")),
    ];

    for (name, email, secret, expected) in cases {
        let result = harness.service.register(name, email, secret).await;
        assert_eq!(result.unwrap_err(), DomainError::Validation(expected));
    }

    assert!(harness.store.is_empty().await);
}

#[tokio::test]
async fn test_register_rejects_secret_longer_than_72_bytes() {
    let harness = harness();
    let secret = "s".repeat(MAX_SECRET_BYTES + 1);

    let result = harness
        .service
        .register("Alice", "alice@example.com", &secret)
        .await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Validation(ValidationError::SecretTooLong { max_bytes: 72 })
    );
    assert!(harness.store.is_empty().await);
    assert_eq!(harness.notifier.delivery_count(), 0);
}

#[tokio::test]
async fn test_register_accepts_multibyte_secret_within_limit() {
    let harness = harness();
    // 24 three-byte characters
    let secret = "\u{20ac}".repeat(24);
    assert_eq!(secret.len(), MAX_SECRET_BYTES);

    let result = harness
        .service
        .register("Alice", "alice@example.com", &secret)
        .await;
    assert!(result.is_ok());

    let over = "\u{20ac}".repeat(25);
    let result = harness
        .service
        .register("Bob", "bob@example.com", &over)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::SecretTooLong { .. }))
    ));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let harness = harness();
    register_alice(&harness).await;

    let result = harness
        .service
        .register("Other Alice", "ALICE@example.com", "another secret")
        .await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Conflict(ConflictError::EmailAlreadyRegistered)
    );
    assert_eq!(harness.store.len().await, 1);
}

#[tokio::test]
async fn test_register_sends_code_to_normalized_email() {
    let harness = harness();
    harness
        .service
        .register("Alice", "Alice@Example.com", SECRET)
        .await
        .unwrap();

    wait_for_deliveries(&harness, 1).await;

    assert_eq!(
        harness.notifier.last_code_for("alice@example.com"),
        Some("100000".to_string())
    );
    assert_eq!(harness.service.delivery_stats().sent, 1);
}

#[tokio::test]
async fn test_register_store_failure_is_internal_and_sends_nothing() {
    let harness = harness_with(FlakyStore::new(), false);
    harness
        .store
        .fail_writes
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let result = harness
        .service
        .register("Alice", "alice@example.com", SECRET)
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(harness.store.inner.is_empty().await);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(harness.notifier.delivery_count(), 0);
    assert_eq!(harness.service.delivery_stats().total(), 0);
}

// ---- verify ----

#[tokio::test]
async fn test_verify_with_correct_code() {
    let harness = harness();
    let id = register_alice(&harness).await;
    harness.clock.advance(Duration::minutes(2));

    let view = harness
        .service
        .verify("alice@example.com", "100000")
        .await
        .unwrap();

    assert!(view.is_verified);
    assert_eq!(view.id, id);
    assert!(view.updated_at > view.created_at);

    let stored = harness.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, VerificationStatus::Verified);
    assert!(stored.challenge().is_none());
}

#[tokio::test]
async fn test_verify_twice_reports_already_verified() {
    let harness = harness();
    let id = register_and_verify_alice(&harness).await;
    let before = harness.store.find_by_id(id).await.unwrap().unwrap();

    let result = harness.service.verify("alice@example.com", "100000").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Conflict(ConflictError::AlreadyVerified)
    );
    let after = harness.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_verify_with_wrong_code_leaves_state_unchanged() {
    let harness = harness();
    let id = register_alice(&harness).await;
    let before = harness.store.find_by_id(id).await.unwrap().unwrap();

    let result = harness.service.verify("alice@example.com", "000000").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidVerificationCode)
    );
    let after = harness.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(before, after);
    assert!(!after.is_verified());
}

#[tokio::test]
async fn test_verify_after_expiry_fails_even_with_right_code() {
    let harness = harness();
    let id = register_alice(&harness).await;
    harness.clock.advance(Duration::minutes(6));

    let result = harness.service.verify("alice@example.com", "100000").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::VerificationCodeExpired)
    );
    let stored = harness.store.find_by_id(id).await.unwrap().unwrap();
    assert!(!stored.is_verified());
    assert!(stored.challenge().is_some());
}

#[tokio::test]
async fn test_verify_exactly_at_expiry_is_expired() {
    let harness = harness();
    register_alice(&harness).await;
    harness.clock.advance(Duration::minutes(5));

    let result = harness.service.verify("alice@example.com", "100000").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::VerificationCodeExpired)
    );
}

#[tokio::test]
async fn test_verify_wrong_code_after_expiry_reports_invalid_code() {
    let harness = harness();
    register_alice(&harness).await;
    harness.clock.advance(Duration::minutes(10));

    let result = harness.service.verify("alice@example.com", "999999").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidVerificationCode)
    );
}

#[tokio::test]
async fn test_verify_rejects_malformed_code() {
    let harness = harness();
    register_alice(&harness).await;

    for code in ["", "10000", "1000000", "10000a", "１００００0"] {
        let result = harness.service.verify("alice@example.com", code).await;
        assert_eq!(
            result.unwrap_err(),
            DomainError::Auth(AuthError::InvalidVerificationCode),
            "code {code:?}"
        );
    }

    // Surrounding whitespace is tolerated
    assert!(harness
        .service
        .verify("alice@example.com", " 100000 ")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verify_unknown_email() {
    let harness = harness();

    let result = harness.service.verify("nobody@example.com", "100000").await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_verify_without_outstanding_challenge_is_expired() {
    let harness = harness();
    let now = harness.clock.now();

    let mut account = Account::new(
        "Carol",
        "carol@example.com",
        BcryptHasher::new(4).hash(SECRET).unwrap(),
        crate::domain::entities::VerificationChallenge::new("100000", now),
        now,
    );
    account.status = VerificationStatus::Pending(None);
    harness.store.insert(account).await.unwrap();

    let result = harness.service.verify("carol@example.com", "100000").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::VerificationCodeExpired)
    );
}

// ---- login ----

#[tokio::test]
async fn test_login_before_verification() {
    let harness = harness();
    register_alice(&harness).await;

    let result = harness.service.login("alice@example.com", SECRET).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::AccountNotVerified)
    );
}

#[tokio::test]
async fn test_login_unknown_email() {
    let harness = harness();

    let result = harness.service.login("nobody@example.com", SECRET).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_login_wrong_secret() {
    let harness = harness();
    register_and_verify_alice(&harness).await;

    let result = harness.service.login("alice@example.com", "wrong secret").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_login_with_secret_extending_stored_one_fails() {
    let harness = harness();
    let stored = "p".repeat(MAX_SECRET_BYTES);
    harness
        .service
        .register("Alice", "alice@example.com", &stored)
        .await
        .unwrap();
    harness
        .service
        .verify("alice@example.com", "100000")
        .await
        .unwrap();

    let longer = format!("{}anything", stored);
    let result = harness.service.login("alice@example.com", &longer).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::InvalidCredentials)
    );

    assert!(harness.service.login("alice@example.com", &stored).await.is_ok());
}

#[tokio::test]
async fn test_login_issues_signed_token() {
    let harness = harness();
    let id = register_and_verify_alice(&harness).await;
    let now = harness.clock.now();

    let issued = harness
        .service
        .login("  ALICE@example.com", SECRET)
        .await
        .unwrap();

    assert_eq!(issued.expires_at, now + Duration::hours(1));

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&["accounts"]);
    let decoded = decode::<Claims>(
        &issued.access_token,
        &DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        &validation,
    )
    .unwrap();

    assert_eq!(decoded.claims.sub, id.to_string());
    assert_eq!(decoded.claims.email, "alice@example.com");
    assert_eq!(decoded.claims.name, "Alice");
    assert_eq!(decoded.claims.iat, now.timestamp());
    assert_eq!(decoded.claims.exp, issued.expires_at.timestamp());
}

#[tokio::test]
async fn test_login_does_not_mutate_account() {
    let harness = harness();
    let id = register_and_verify_alice(&harness).await;
    let before = harness.store.find_by_id(id).await.unwrap().unwrap();

    harness
        .service
        .login("alice@example.com", SECRET)
        .await
        .unwrap();

    let after = harness.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(before, after);
}

// ---- resend_verification ----

#[tokio::test]
async fn test_resend_replaces_code() {
    let harness = harness();
    register_alice(&harness).await;
    harness.clock.advance(Duration::minutes(4));

    harness
        .service
        .resend_verification("alice@example.com")
        .await
        .unwrap();
    wait_for_deliveries(&harness, 2).await;

    assert_eq!(
        harness.notifier.last_code_for("alice@example.com"),
        Some("100001".to_string())
    );

    let stale = harness.service.verify("alice@example.com", "100000").await;
    assert_eq!(
        stale.unwrap_err(),
        DomainError::Auth(AuthError::InvalidVerificationCode)
    );

    // The new code carries its own five minutes
    harness.clock.advance(Duration::minutes(3));
    let view = harness
        .service
        .verify("alice@example.com", "100001")
        .await
        .unwrap();
    assert!(view.is_verified);
}

#[tokio::test]
async fn test_resend_for_verified_account() {
    let harness = harness();
    register_and_verify_alice(&harness).await;

    let result = harness.service.resend_verification("alice@example.com").await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Conflict(ConflictError::AlreadyVerified)
    );
}

#[tokio::test]
async fn test_resend_for_unknown_email() {
    let harness = harness();

    let result = harness.service.resend_verification("nobody@example.com").await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

// ---- get_account ----

#[tokio::test]
async fn test_get_account() {
    let harness = harness();
    let id = register_alice(&harness).await;

    let view = harness.service.get_account(id).await.unwrap();
    assert_eq!(view.id, id);
    assert_eq!(view.email, "alice@example.com");

    let missing = harness.service.get_account(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

// ---- check_store ----

#[tokio::test]
async fn test_check_store_reports_store_health() {
    let harness = harness_with(FlakyStore::new(), false);
    assert!(harness.service.check_store().await.is_ok());

    harness.store.fail_writes.store(true, Ordering::SeqCst);
    let result = harness.service.check_store().await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
