//! In-memory lock service with expiring locks.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::{
    Result,
    reference::DocumentReference,
    store::{LockService, StoreError},
};

type LockTable = HashMap<(DocumentReference, String), (String, Instant)>;

/// A [`LockService`] for one owner over a lock table that may be shared.
///
/// Locks expire `ttl` after they were taken. Taking a lock you already hold
/// renews it.
#[derive(Debug, Clone)]
pub struct InMemoryLocks {
    owner: String,
    ttl: Duration,
    table: Arc<Mutex<LockTable>>,
}

impl InMemoryLocks {
    pub fn new(owner: impl Into<String>, ttl: Duration) -> Self {
        Self {
            owner: owner.into(),
            ttl,
            table: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A handle for another owner sharing the same lock table.
    pub fn for_owner(&self, owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ttl: self.ttl,
            table: Arc::clone(&self.table),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl LockService for InMemoryLocks {
    fn try_lock(&self, doc_ref: &DocumentReference, lock_name: &str) -> Result<bool> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned {
            resource: "locks".to_string(),
        })?;
        let now = Instant::now();
        let key = (doc_ref.clone(), lock_name.to_string());
        if let Some((holder, expires)) = table.get(&key) {
            if holder != &self.owner && *expires > now {
                tracing::debug!(doc = %doc_ref, lock = lock_name, holder = %holder, "Lock held");
                return Ok(false);
            }
        }
        table.insert(key, (self.owner.clone(), now + self.ttl));
        Ok(true)
    }

    fn unlock_by_owner(&self, doc_ref: &DocumentReference, lock_name: &str) -> Result<bool> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned {
            resource: "locks".to_string(),
        })?;
        let key = (doc_ref.clone(), lock_name.to_string());
        match table.get(&key) {
            Some((holder, _)) if holder == &self.owner => {
                table.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
