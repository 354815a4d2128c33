//! Store gateway abstraction trait.
//!
//! Handlers depend on this contract only, so the engine behind it can be
//! swapped (or faked in tests) without touching request handling.

use async_trait::async_trait;
use items_core::InternalRecord;

use crate::StoreError;

/// Point get/put by primary key plus a descending scan of one index partition.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// concurrent request. No method retries on failure.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Stores `record` under `key`, replacing any existing record.
    ///
    /// No concurrency check is made; the last writer for a key wins.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the underlying store fails.
    async fn put_by_key(&self, key: &str, record: InternalRecord) -> Result<(), StoreError>;

    /// Looks up the record stored under `key`. `Ok(None)` means not found.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the underlying store fails.
    async fn get_by_key(&self, key: &str) -> Result<Option<InternalRecord>, StoreError>;

    /// Returns at most `limit` records of `partition`, newest sort key first.
    ///
    /// Records sharing a sort key come back in unspecified relative order.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the underlying store fails.
    async fn query_by_partition_descending(
        &self,
        partition: &str,
        limit: usize,
    ) -> Result<Vec<InternalRecord>, StoreError>;
}
