//! Mock implementations for testing the account service

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CredentialStore, InMemoryCredentialStore};
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::clock::Clock;
use crate::services::notification::Notifier;
use crate::services::password::BcryptHasher;
use crate::services::token::{TokenIssuer, TokenIssuerConfig};
use crate::services::verification::CodeGenerator;

pub const TEST_JWT_SECRET: &str = "account-service-test-secret";

// Manually driven clock
#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// Hands out 100000, 100001, ...
pub struct SequentialCodeGenerator {
    next: AtomicU32,
}

impl SequentialCodeGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(100_000),
        }
    }
}

impl CodeGenerator for SequentialCodeGenerator {
    fn generate(&self) -> String {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

// Records every delivery, optionally failing all of them
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl RecordingNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn delivery_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("SMTP relay unavailable".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

// In-memory store whose writes can be made to fail
pub struct FlakyStore {
    pub inner: InMemoryCredentialStore,
    pub fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCredentialStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Failed to write account"));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FlakyStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, account: Account) -> DomainResult<Account> {
        self.check()?;
        self.inner.insert(account).await
    }

    async fn update(&self, account: Account) -> DomainResult<Account> {
        self.check()?;
        self.inner.update(account).await
    }

    async fn health_check(&self) -> DomainResult<()> {
        self.check()
    }
}

pub type TestService<S = InMemoryCredentialStore> =
    AccountService<S, RecordingNotifier, BcryptHasher, SequentialCodeGenerator, FixedClock>;

pub struct Harness<S: CredentialStore = InMemoryCredentialStore> {
    pub service: TestService<S>,
    pub store: Arc<S>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: FixedClock,
}

pub fn test_token_issuer() -> TokenIssuer {
    TokenIssuer::new(TokenIssuerConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..Default::default()
    })
    .unwrap()
}

pub fn harness_with<S: CredentialStore>(store: S, notifier_fails: bool) -> Harness<S> {
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::new(notifier_fails));
    let clock = FixedClock::new(Utc::now());

    let service = AccountService::with_components(
        Arc::clone(&store),
        Arc::clone(&notifier),
        test_token_issuer(),
        BcryptHasher::new(4),
        SequentialCodeGenerator::new(),
        clock.clone(),
        AccountServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    Harness {
        service,
        store,
        notifier,
        clock,
    }
}

pub fn harness() -> Harness {
    harness_with(InMemoryCredentialStore::new(), false)
}

/// Waits until `expected` deliveries have finished on their spawned tasks
pub async fn wait_for_deliveries<S: CredentialStore>(harness: &Harness<S>, expected: u64) {
    for _ in 0..200 {
        if harness.service.delivery_stats().total() >= expected {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!(
        "expected {} deliveries, saw {:?}",
        expected,
        harness.service.delivery_stats()
    );
}
