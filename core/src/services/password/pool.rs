//! Bounded offloading of hash jobs

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::errors::{DomainError, DomainResult};

use super::hasher::SecretHasher;

/// Runs a [`SecretHasher`] on tokio's blocking pool
///
/// At most `max_concurrent` jobs run at once; extra callers wait for a permit.
pub struct HashingPool<H> {
    hasher: Arc<H>,
    permits: Arc<Semaphore>,
}

impl<H> Clone for HashingPool<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: Arc::clone(&self.hasher),
            permits: Arc::clone(&self.permits),
        }
    }
}

impl<H: SecretHasher> HashingPool<H> {
    pub fn new(hasher: H, max_concurrent: usize) -> Self {
        Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub async fn hash(&self, secret: &str) -> DomainResult<String> {
        let secret = secret.to_owned();
        self.run(move |hasher| hasher.hash(&secret)).await
    }

    pub async fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool> {
        let secret = secret.to_owned();
        let hash = hash.to_owned();
        self.run(move |hasher| hasher.verify(&secret, &hash)).await
    }

    async fn run<T, F>(&self, job: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> DomainResult<T> + Send + 'static,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DomainError::internal("Hashing pool is closed"))?;

        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || job(hasher.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "hash_job_failed");
                DomainError::internal("Hashing task failed")
            })?
    }
}
