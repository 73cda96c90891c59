//! # Sales Store
//!
//! The storage seam of the ledger. lotto-core never touches a database;
//! it talks to whatever implements [`SalesStore`].
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesStore contract                              │
//! │                                                                         │
//! │  ensure_day(date)              idempotent, creates bookkeeping once    │
//! │  list_entries(date)            creation order, oldest first            │
//! │  create_entry(date, fields)    → new unique EntryId                    │
//! │  update_entry(date, id, f)     EntryNotFound if id absent              │
//! │  delete_entry(date, id)        EntryNotFound if id absent              │
//! │                                                                         │
//! │  Every call may suspend and every call may fail on its own.            │
//! │  There are no multi-call transactions.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//! - [`MemoryStore`] (this module): process-local, used by tests and demos
//! - `SalesRepository` (lotto-db): SQLite via sqlx

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{EntryId, SaleEntry, SaleFields, SalesDayId};

// =============================================================================
// Store Trait
// =============================================================================

/// Asynchronous persistence for sales days and their entries.
///
/// Implementations decide their own timeout and retry behaviour; the ledger
/// propagates whatever they return.
pub trait SalesStore: Send + Sync {
    /// Creates bookkeeping for `date` if absent; a no-op otherwise.
    fn ensure_day(&self, date: SalesDayId) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All entries of `date`, ordered by creation ascending.
    fn list_entries(
        &self,
        date: SalesDayId,
    ) -> impl Future<Output = Result<Vec<SaleEntry>, StoreError>> + Send;

    /// Stores a new entry and returns the identity assigned to it.
    fn create_entry(
        &self,
        date: SalesDayId,
        fields: &SaleFields,
    ) -> impl Future<Output = Result<EntryId, StoreError>> + Send;

    /// Replaces the fields of an existing entry. Position in the listing is
    /// unchanged.
    fn update_entry(
        &self,
        date: SalesDayId,
        id: &EntryId,
        fields: &SaleFields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete_entry(
        &self,
        date: SalesDayId,
        id: &EntryId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A [`SalesStore`] backed by a map in process memory.
///
/// A day with an empty entry list still counts as existing, which is what
/// makes `ensure_day` observable in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    days: Mutex<HashMap<SalesDayId, Vec<SaleEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `ensure_day` (or a create) has touched this date.
    pub fn has_day(&self, date: SalesDayId) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(&date))
    }

    /// Number of dates with bookkeeping.
    pub fn day_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SalesDayId, Vec<SaleEntry>>>, StoreError> {
        self.days
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl SalesStore for MemoryStore {
    async fn ensure_day(&self, date: SalesDayId) -> Result<(), StoreError> {
        self.lock()?.entry(date).or_default();
        Ok(())
    }

    async fn list_entries(&self, date: SalesDayId) -> Result<Vec<SaleEntry>, StoreError> {
        let days = self.lock()?;
        Ok(days.get(&date).cloned().unwrap_or_default())
    }

    async fn create_entry(&self, date: SalesDayId, fields: &SaleFields) -> Result<EntryId, StoreError> {
        let id = EntryId::from(Uuid::new_v4().to_string());
        debug!(date = %date, id = %id, "memory store: create entry");

        self.lock()?
            .entry(date)
            .or_default()
            .push(SaleEntry::new(id.clone(), fields.clone()));
        Ok(id)
    }

    async fn update_entry(
        &self,
        date: SalesDayId,
        id: &EntryId,
        fields: &SaleFields,
    ) -> Result<(), StoreError> {
        let mut days = self.lock()?;
        let entry = days
            .get_mut(&date)
            .and_then(|entries| entries.iter_mut().find(|e| &e.id == id))
            .ok_or_else(|| StoreError::EntryNotFound {
                date,
                id: id.clone(),
            })?;

        entry.fields = fields.clone();
        Ok(())
    }

    async fn delete_entry(&self, date: SalesDayId, id: &EntryId) -> Result<(), StoreError> {
        let mut days = self.lock()?;
        let entries = days.get_mut(&date);
        let position = entries
            .as_ref()
            .and_then(|entries| entries.iter().position(|e| &e.id == id));

        match (entries, position) {
            (Some(entries), Some(index)) => {
                entries.remove(index);
                Ok(())
            }
            _ => Err(StoreError::EntryNotFound {
                date,
                id: id.clone(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
