//! In-process item store.
//!
//! Keeps records in a primary-key map and mirrors the listing index as an
//! ordered set per partition. Nothing is persisted across restarts.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{PoisonError, RwLock},
};

use async_trait::async_trait;
use items_core::InternalRecord;
use tracing::debug;

use crate::{ItemStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<String, InternalRecord>,
    /// partition -> (sort key, store key), ascending.
    listing: HashMap<String, BTreeSet<(String, String)>>,
}

impl Tables {
    fn unindex(&mut self, key: &str, record: &InternalRecord) {
        if let Some(entries) = self.listing.get_mut(&record.listing_partition) {
            entries.remove(&(record.listing_sort_key.clone(), key.to_owned()));
            if entries.is_empty() {
                self.listing.remove(&record.listing_partition);
            }
        }
    }

    fn index(&mut self, key: &str, record: &InternalRecord) {
        // Sparse index: records without a partition are not listed.
        if record.listing_partition.is_empty() {
            return;
        }
        self.listing
            .entry(record.listing_partition.clone())
            .or_default()
            .insert((record.listing_sort_key.clone(), key.to_owned()));
    }
}

/// Thread-safe in-memory [`ItemStore`].
#[derive(Debug)]
pub struct MemoryStore {
    table: String,
    index: String,
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    ///
    /// # Arguments
    /// - `table`: table identifier, reported in logs
    /// - `index`: listing index name, reported in logs
    #[must_use]
    pub fn new(table: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            index: index.into(),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Number of records currently stored.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the internal lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.records.len())
    }

    /// Returns `true` if no record is stored.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the internal lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_owned())
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put_by_key(&self, key: &str, record: InternalRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if let Some(previous) = tables.records.remove(key) {
            tables.unindex(key, &previous);
        }
        tables.index(key, &record);
        tables.records.insert(key.to_owned(), record);
        debug!(table = %self.table, key, "put item");
        Ok(())
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<InternalRecord>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let found = tables.records.get(key).cloned();
        debug!(table = %self.table, key, found = found.is_some(), "get item");
        Ok(found)
    }

    async fn query_by_partition_descending(
        &self,
        partition: &str,
        limit: usize,
    ) -> Result<Vec<InternalRecord>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let records: Vec<InternalRecord> = tables
            .listing
            .get(partition)
            .into_iter()
            .flat_map(|entries| entries.iter().rev())
            .filter_map(|(_, key)| tables.records.get(key).cloned())
            .take(limit)
            .collect();
        debug!(
            table = %self.table,
            index = %self.index,
            partition,
            limit,
            returned = records.len(),
            "query listing index"
        );
        Ok(records)
    }
}
