//! # Sales Repository
//!
//! SQLite implementation of the [`SalesStore`] contract.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Entry Lifecycle                                   │
//! │                                                                         │
//! │  1. DAY                                                                │
//! │     └── upsert_day()  INSERT ... ON CONFLICT(date) DO UPDATE           │
//! │                                                                         │
//! │  2. CREATE                                                             │
//! │     └── insert_entry() → new UUID v4, next `seq`                       │
//! │                                                                         │
//! │  3. EDIT                                                               │
//! │     └── replace_entry() → same id, same `seq`, new fields              │
//! │                                                                         │
//! │  4. DELETE                                                             │
//! │     └── remove_entry() → row gone; a second delete is EntryNotFound    │
//! │                                                                         │
//! │  `seq` is AUTOINCREMENT, so listing ORDER BY seq is creation order     │
//! │  even when two rows share a timestamp.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lotto_core::{
    EntryId, GameCode, Money, SaleBoard, SaleEntry, SaleFields, SalesDayId, SalesStore, StoreError,
};

// =============================================================================
// Row Mapping
// =============================================================================

/// A `sale_entries` row as read back for listing.
#[derive(Debug, Clone, sqlx::FromRow)]
struct EntryRecord {
    id: String,
    board: SaleBoard,
    code: String,
    gross_cents: i64,
    deduction_cents: i64,
}

impl TryFrom<EntryRecord> for SaleEntry {
    type Error = DbError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let code = GameCode::parse(&record.code).map_err(|e| DbError::CorruptRow {
            id: record.id.clone(),
            reason: e.to_string(),
        })?;

        let gross = Money::from_cents(record.gross_cents);
        let deduction = Money::from_cents(record.deduction_cents);
        if gross.exceeds_max() || deduction.exceeds_max() {
            return Err(DbError::CorruptRow {
                id: record.id,
                reason: format!("amount beyond {}", Money::MAX_AMOUNT),
            });
        }

        Ok(SaleEntry::new(
            EntryId::from(record.id),
            SaleFields {
                board: record.board,
                code,
                gross,
                deduction,
            },
        ))
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sales days and their entries.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sales();
///
/// // Through the ledger (normal path)
/// let ledger = SalesLedger::open(&repo, day).await?;
///
/// // Directly, for diagnostics
/// let exists = repo.day_exists(day).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    /// Creates a new SalesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalesRepository { pool }
    }

    /// Creates the `sales_days` row, or only touches `updated_at`.
    pub async fn upsert_day(&self, date: SalesDayId) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO sales_days (date, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            ON CONFLICT(date) DO UPDATE SET updated_at = excluded.updated_at
            "#,
        )
        .bind(date.to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(date = %date, "Sales day ensured");
        Ok(())
    }

    /// Whether the date has a `sales_days` row.
    pub async fn day_exists(&self, date: SalesDayId) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_days WHERE date = ?1")
            .bind(date.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Entries of a date in creation order.
    pub async fn entries_for(&self, date: SalesDayId) -> DbResult<Vec<SaleEntry>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            r#"
            SELECT id, board, code, gross_cents, deduction_cents
            FROM sale_entries
            WHERE date = ?1
            ORDER BY seq ASC
            "#,
        )
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await?;

        debug!(date = %date, count = records.len(), "Loaded entries");
        records.into_iter().map(SaleEntry::try_from).collect()
    }

    /// Inserts a new entry with a fresh UUID.
    ///
    /// The parent `sales_days` row is created in the same transaction if it
    /// is missing, so the foreign key always holds.
    pub async fn insert_entry(&self, date: SalesDayId, fields: &SaleFields) -> DbResult<EntryId> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let day = date.to_string();

        debug!(date = %date, id = %id, board = %fields.board, code = %fields.code, "Inserting entry");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales_days (date, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            ON CONFLICT(date) DO NOTHING
            "#,
        )
        .bind(&day)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO sale_entries (
                id, date, board, code,
                gross_cents, deduction_cents, net_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&id)
        .bind(&day)
        .bind(fields.board)
        .bind(fields.code.as_str())
        .bind(fields.gross.cents())
        .bind(fields.deduction.cents())
        .bind(fields.net().cents())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(EntryId::from(id))
    }

    /// Overwrites the fields of an entry; `seq` and `created_at` stay.
    pub async fn replace_entry(
        &self,
        date: SalesDayId,
        id: &EntryId,
        fields: &SaleFields,
    ) -> DbResult<()> {
        debug!(date = %date, id = %id, "Updating entry");

        let result = sqlx::query(
            r#"
            UPDATE sale_entries
            SET board = ?3,
                code = ?4,
                gross_cents = ?5,
                deduction_cents = ?6,
                net_cents = ?7,
                updated_at = ?8
            WHERE date = ?1 AND id = ?2
            "#,
        )
        .bind(date.to_string())
        .bind(id.as_str())
        .bind(fields.board)
        .bind(fields.code.as_str())
        .bind(fields.gross.cents())
        .bind(fields.deduction.cents())
        .bind(fields.net().cents())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::EntryNotFound {
                date,
                id: id.clone(),
            });
        }
        Ok(())
    }

    /// Deletes an entry of a date.
    pub async fn remove_entry(&self, date: SalesDayId, id: &EntryId) -> DbResult<()> {
        debug!(date = %date, id = %id, "Deleting entry");

        let result = sqlx::query("DELETE FROM sale_entries WHERE date = ?1 AND id = ?2")
            .bind(date.to_string())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::EntryNotFound {
                date,
                id: id.clone(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// SalesStore
// =============================================================================

impl SalesStore for SalesRepository {
    async fn ensure_day(&self, date: SalesDayId) -> Result<(), StoreError> {
        Ok(self.upsert_day(date).await?)
    }

    async fn list_entries(&self, date: SalesDayId) -> Result<Vec<SaleEntry>, StoreError> {
        Ok(self.entries_for(date).await?)
    }

    async fn create_entry(&self, date: SalesDayId, fields: &SaleFields) -> Result<EntryId, StoreError> {
        Ok(self.insert_entry(date, fields).await?)
    }

    async fn update_entry(
        &self,
        date: SalesDayId,
        id: &EntryId,
        fields: &SaleFields,
    ) -> Result<(), StoreError> {
        Ok(self.replace_entry(date, id, fields).await?)
    }

    async fn delete_entry(&self, date: SalesDayId, id: &EntryId) -> Result<(), StoreError> {
        Ok(self.remove_entry(date, id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
