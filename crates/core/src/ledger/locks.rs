//! Per-account mutual exclusion.
//!
//! Movement creation and deletion read an account, validate, and write it
//! back. Two such sequences on the same account must not interleave, so each
//! one holds the account's lock from the first read to the commit.
//!
//! The registry lives in process memory. One server instance owns a database;
//! two instances sharing one would not see each other's locks.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tally_shared::types::ClientId;

/// Registry of async mutexes keyed by account.
#[derive(Debug, Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<ClientId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to an account.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn acquire(&self, client_id: ClientId) -> OwnedMutexGuard<()> {
        // Clone the mutex out so the map shard is not held across the await.
        let mutex = Arc::clone(self.locks.entry(client_id).or_default().value());
        mutex.lock_owned().await
    }

    /// Number of accounts that have been locked at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no account has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
