//! # Sales Ledger
//!
//! The entries of one sales day, read and written through a [`SalesStore`].
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SalesLedger (one date)                          │
//! │                                                                         │
//! │  open(store, date) ──► store.ensure_day(date)                          │
//! │  attach(store, date) ──► no store call (edits/deletes only)            │
//! │                                                                         │
//! │  record(candidate) ──► validate() ──► add(fields)                      │
//! │  amend(id, cand.)  ──► validate() ──► update(id, fields)               │
//! │  load_template()   ──► templates.expand(weekday)                       │
//! │                         └── add(placeholder) per row, NLB then DLB     │
//! │                                                                         │
//! │  add / update / remove / list ──► one store call each                  │
//! │  totals / report              ──► list() + pure aggregation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - `add` and `update` store what they are given. Validation is the
//!   caller's job ([`record`](SalesLedger::record) and
//!   [`amend`](SalesLedger::amend) do it for you). That is what lets the
//!   template loader store zero-value rows.
//! - Net is never stored on the entry; the returned [`SaleEntry`] derives
//!   it from the fields just written.
//! - No retries and no multi-call transactions. "Update then list" is two
//!   independent fallible calls.
//! - Concurrent writers to one date are last-write-wins per entry.

use tracing::{debug, info};

use crate::error::CoreResult;
use crate::report::DailyReport;
use crate::store::SalesStore;
use crate::templates::{TemplatePreview, TemplateRegistry, STANDARD_TEMPLATES};
use crate::totals::DayTotals;
use crate::types::{EntryId, SaleEntry, SaleFields, SalesDayId, WeekdayIndex};
use crate::validation::{validate, SaleCandidate};

/// Handle on one date's entries.
///
/// Borrowing the store keeps the ledger cheap to create per request.
#[derive(Debug)]
pub struct SalesLedger<'s, S: SalesStore> {
    store: &'s S,
    day: SalesDayId,
    templates: &'static TemplateRegistry,
}

impl<'s, S: SalesStore> SalesLedger<'s, S> {
    /// Opens the ledger for `day` using the standard weekday templates.
    ///
    /// Calls `ensure_day` once, so the date exists in the store afterwards
    /// even if nothing is ever added.
    pub async fn open(store: &'s S, day: SalesDayId) -> CoreResult<Self> {
        Self::open_with_templates(store, day, &STANDARD_TEMPLATES).await
    }

    pub async fn open_with_templates(
        store: &'s S,
        day: SalesDayId,
        templates: &'static TemplateRegistry,
    ) -> CoreResult<Self> {
        store.ensure_day(day).await?;
        debug!(date = %day, "Sales day ready");

        Ok(SalesLedger {
            store,
            day,
            templates,
        })
    }

    /// Handle on `day` that skips `ensure_day`.
    ///
    /// For edits and deletes of existing entries: they fail with
    /// `EntryNotFound` on a date that was never opened, and leave no
    /// `sales_days` bookkeeping behind when they do.
    pub fn attach(store: &'s S, day: SalesDayId) -> Self {
        SalesLedger {
            store,
            day,
            templates: &STANDARD_TEMPLATES,
        }
    }

    pub fn day(&self) -> SalesDayId {
        self.day
    }

    pub fn weekday(&self) -> WeekdayIndex {
        self.day.weekday()
    }

    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Appends an entry and returns it with its new identity.
    pub async fn add(&self, fields: SaleFields) -> CoreResult<SaleEntry> {
        let id = self.store.create_entry(self.day, &fields).await?;

        info!(
            date = %self.day,
            id = %id,
            board = %fields.board,
            code = %fields.code,
            net = %fields.net(),
            "Entry added"
        );
        Ok(SaleEntry::new(id, fields))
    }

    /// Replaces an entry's fields. Net follows from the patch.
    pub async fn update(&self, id: &EntryId, patch: SaleFields) -> CoreResult<SaleEntry> {
        self.store.update_entry(self.day, id, &patch).await?;

        info!(
            date = %self.day,
            id = %id,
            board = %patch.board,
            code = %patch.code,
            net = %patch.net(),
            "Entry updated"
        );
        Ok(SaleEntry::new(id.clone(), patch))
    }

    /// Deletes an entry. Deleting the same id twice is an error.
    pub async fn remove(&self, id: &EntryId) -> CoreResult<()> {
        self.store.delete_entry(self.day, id).await?;
        info!(date = %self.day, id = %id, "Entry removed");
        Ok(())
    }

    /// All entries in creation order.
    pub async fn list(&self) -> CoreResult<Vec<SaleEntry>> {
        let entries = self.store.list_entries(self.day).await?;
        debug!(date = %self.day, rows = entries.len(), "Listed entries");
        Ok(entries)
    }

    // =========================================================================
    // Validated Writes
    // =========================================================================

    /// Validates hand-entered input, then adds it.
    pub async fn record(&self, candidate: SaleCandidate) -> CoreResult<SaleEntry> {
        let fields = validate(candidate)?;
        self.add(fields).await
    }

    /// Validates an edit, then applies it to `id`.
    pub async fn amend(&self, id: &EntryId, candidate: SaleCandidate) -> CoreResult<SaleEntry> {
        let fields = validate(candidate)?;
        self.update(id, fields).await
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Inserts one zero-value row per template code for this date's weekday.
    ///
    /// Additive: existing rows are kept and loading twice duplicates every
    /// row. If the store fails midway, the rows already written stay and
    /// the error is returned.
    pub async fn load_template(&self) -> CoreResult<Vec<SaleEntry>> {
        let weekday = self.weekday();
        let rows = self.templates.expand(weekday)?;

        let mut added = Vec::with_capacity(rows.len());
        for row in rows {
            let fields = SaleFields::placeholder(row.board, row.code);
            let id = self.store.create_entry(self.day, &fields).await?;
            added.push(SaleEntry::new(id, fields));
        }

        info!(date = %self.day, weekday = %weekday, rows = added.len(), "Template loaded");
        Ok(added)
    }

    /// The weekday template for this date, without touching the store.
    pub fn preview_template(&self) -> CoreResult<TemplatePreview> {
        self.templates.preview(self.weekday())
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    pub async fn totals(&self) -> CoreResult<DayTotals> {
        let entries = self.list().await?;
        Ok(DayTotals::from_entries(&entries))
    }

    pub async fn report(&self) -> CoreResult<DailyReport> {
        let entries = self.list().await?;
        Ok(DailyReport::build(self.day, &entries))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StoreError, ValidationError};
    use crate::money::Money;
    use crate::store::MemoryStore;
    use crate::templates::WeekdayTemplate;
    use crate::types::{GameCode, SaleBoard};

    static MONDAY_ONLY: [WeekdayTemplate; 1] = [WeekdayTemplate {
        weekday: WeekdayIndex::MONDAY,
        nlb: &["MSM", "GSM"],
        dlb: &["LWM"],
    }];
    static PARTIAL: TemplateRegistry = TemplateRegistry::new(&MONDAY_ONLY);

    const MONDAY: &str = "2024-06-03";
    const TUESDAY: &str = "2024-06-04";

    fn day(raw: &str) -> SalesDayId {
        SalesDayId::parse(raw).unwrap()
    }

    fn fields(board: SaleBoard, code: &str, gross: i64, deduction: i64) -> SaleFields {
        SaleFields {
            board,
            code: GameCode::parse(code).unwrap(),
            gross: Money::from_major_minor(gross, 0),
            deduction: Money::from_major_minor(deduction, 0),
        }
    }

    /// Store whose every call fails.
    #[derive(Debug)]
    struct OfflineStore;

    impl SalesStore for OfflineStore {
        async fn ensure_day(&self, _date: SalesDayId) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn list_entries(&self, _date: SalesDayId) -> Result<Vec<SaleEntry>, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn create_entry(&self, _date: SalesDayId, _fields: &SaleFields) -> Result<EntryId, StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn update_entry(
            &self,
            _date: SalesDayId,
            _id: &EntryId,
            _fields: &SaleFields,
        ) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }

        async fn delete_entry(&self, _date: SalesDayId, _id: &EntryId) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".to_string()))
        }
    }

    /// Store that accepts `ensure_day` and a fixed number of creates.
    #[derive(Debug)]
    struct FlakyStore {
        inner: MemoryStore,
        creates_left: std::sync::Mutex<usize>,
    }

    impl SalesStore for FlakyStore {
        async fn ensure_day(&self, date: SalesDayId) -> Result<(), StoreError> {
            self.inner.ensure_day(date).await
        }

        async fn list_entries(&self, date: SalesDayId) -> Result<Vec<SaleEntry>, StoreError> {
            self.inner.list_entries(date).await
        }

        async fn create_entry(&self, date: SalesDayId, fields: &SaleFields) -> Result<EntryId, StoreError> {
            {
                let mut left = self.creates_left.lock().unwrap();
                if *left == 0 {
                    return Err(StoreError::Unavailable("disk full".to_string()));
                }
                *left -= 1;
            }
            self.inner.create_entry(date, fields).await
        }

        async fn update_entry(
            &self,
            date: SalesDayId,
            id: &EntryId,
            fields: &SaleFields,
        ) -> Result<(), StoreError> {
            self.inner.update_entry(date, id, fields).await
        }

        async fn delete_entry(&self, date: SalesDayId, id: &EntryId) -> Result<(), StoreError> {
            self.inner.delete_entry(date, id).await
        }
    }

    #[tokio::test]
    async fn test_open_ensures_day() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        assert!(store.has_day(day(MONDAY)).unwrap());
        assert!(ledger.list().await.unwrap().is_empty());
        assert_eq!(ledger.weekday(), WeekdayIndex::MONDAY);
    }

    #[tokio::test]
    async fn test_attach_leaves_unknown_day_untouched() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::attach(&store, day(MONDAY));

        let err = ledger.remove(&EntryId::from("bogus")).await.unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { .. }));

        let err = ledger
            .amend(
                &EntryId::from("bogus"),
                SaleCandidate::new(SaleBoard::Nlb, "MSM", Money::from_cents(100), Money::zero()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { .. }));

        assert!(!store.has_day(day(MONDAY)).unwrap());
    }

    #[tokio::test]
    async fn test_attach_edits_existing_entries() {
        let store = MemoryStore::new();
        let opened = SalesLedger::open(&store, day(MONDAY)).await.unwrap();
        let entry = opened.add(fields(SaleBoard::Nlb, "MSM", 10, 0)).await.unwrap();

        let attached = SalesLedger::attach(&store, day(MONDAY));
        attached
            .update(&entry.id, fields(SaleBoard::Nlb, "MSM", 10, 4))
            .await
            .unwrap();
        assert_eq!(opened.list().await.unwrap()[0].net(), Money::from_major_minor(6, 0));

        attached.remove(&entry.id).await.unwrap();
        assert!(opened.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order_across_edits() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        let a = ledger.add(fields(SaleBoard::Nlb, "MSM", 10, 0)).await.unwrap();
        let b = ledger.add(fields(SaleBoard::Dlb, "LWM", 20, 0)).await.unwrap();
        let c = ledger.add(fields(SaleBoard::Nlb, "GSM", 30, 0)).await.unwrap();

        ledger
            .update(&a.id, fields(SaleBoard::Dlb, "SM", 99, 9))
            .await
            .unwrap();

        let ids: Vec<EntryId> = ledger.list().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, [a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_update_recomputes_net() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        let entry = ledger.add(fields(SaleBoard::Nlb, "MSM", 100, 0)).await.unwrap();
        assert_eq!(entry.net(), Money::from_major_minor(100, 0));

        let updated = ledger
            .update(&entry.id, fields(SaleBoard::Nlb, "MSM", 100, 25))
            .await
            .unwrap();
        assert_eq!(updated.net(), Money::from_major_minor(75, 0));

        let listed = ledger.list().await.unwrap();
        assert_eq!(listed[0].net(), Money::from_major_minor(75, 0));
    }

    #[tokio::test]
    async fn test_missing_entry_is_not_found() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();
        let ghost = EntryId::from("ghost");

        let err = ledger
            .update(&ghost, fields(SaleBoard::Nlb, "MSM", 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { ref id, .. } if *id == ghost));

        let err = ledger.remove(&ghost).await.unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_twice_fails_the_second_time() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();
        let entry = ledger.add(fields(SaleBoard::Nlb, "MSM", 5, 0)).await.unwrap();

        ledger.remove(&entry.id).await.unwrap();
        assert!(ledger.list().await.unwrap().is_empty());

        let err = ledger.remove(&entry.id).await.unwrap_err();
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_record_validates_before_writing() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        let err = ledger
            .record(SaleCandidate::new(SaleBoard::Nlb, "AB", Money::zero(), Money::zero()))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyEntry)));
        assert!(ledger.list().await.unwrap().is_empty());

        let entry = ledger
            .record(SaleCandidate::new(
                SaleBoard::Nlb,
                "ab",
                Money::from_major_minor(100, 0),
                Money::from_major_minor(20, 0),
            ))
            .await
            .unwrap();
        assert_eq!(entry.fields.code.as_str(), "AB");
        assert_eq!(entry.net(), Money::from_major_minor(80, 0));
    }

    #[tokio::test]
    async fn test_amend_rejects_bad_edit_and_keeps_prior_state() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();
        let entry = ledger.add(fields(SaleBoard::Nlb, "MSM", 50, 0)).await.unwrap();

        let err = ledger
            .amend(
                &entry.id,
                SaleCandidate::new(
                    SaleBoard::Nlb,
                    "MSM",
                    Money::from_major_minor(5, 0),
                    Money::from_major_minor(10, 0),
                ),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ReturnExceedsGross { .. })
        ));
        assert_eq!(ledger.list().await.unwrap()[0], entry);
    }

    #[tokio::test]
    async fn test_monday_template_loads_sixteen_zero_rows() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        let rows = ledger.load_template().await.unwrap();
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|e| e.fields.gross.is_zero()
            && e.fields.deduction.is_zero()
            && e.net().is_zero()));
        assert_eq!(rows[0].board(), SaleBoard::Nlb);
        assert_eq!(rows[15].board(), SaleBoard::Dlb);

        let totals = ledger.totals().await.unwrap();
        assert_eq!(totals.total_count(), 16);
        assert!(totals.grand_total().is_zero());
    }

    #[tokio::test]
    async fn test_template_load_is_additive() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        ledger.add(fields(SaleBoard::Nlb, "EXTRA", 10, 0)).await.unwrap();
        ledger.load_template().await.unwrap();
        ledger.load_template().await.unwrap();

        let entries = ledger.list().await.unwrap();
        assert_eq!(entries.len(), 33);
        assert_eq!(entries[0].fields.code.as_str(), "EXTRA");
        let msm = entries.iter().filter(|e| e.fields.code.as_str() == "MSM").count();
        assert_eq!(msm, 2);
    }

    #[tokio::test]
    async fn test_missing_template_reports_weekday_and_writes_nothing() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open_with_templates(&store, day(TUESDAY), &PARTIAL)
            .await
            .unwrap();

        let err = ledger.load_template().await.unwrap_err();
        assert_eq!(err.to_string(), "no template defined for Tuesday");
        assert!(ledger.list().await.unwrap().is_empty());

        // Manual entry still works
        ledger.add(fields(SaleBoard::Nlb, "MST", 5, 0)).await.unwrap();
        assert_eq!(ledger.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_registry_loads_its_rows() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open_with_templates(&store, day(MONDAY), &PARTIAL)
            .await
            .unwrap();

        let rows = ledger.load_template().await.unwrap();
        let codes: Vec<&str> = rows.iter().map(|e| e.fields.code.as_str()).collect();
        assert_eq!(codes, ["MSM", "GSM", "LWM"]);
        assert_eq!(ledger.preview_template().unwrap().count(SaleBoard::Nlb), 2);
    }

    #[tokio::test]
    async fn test_store_failures_propagate_unchanged() {
        let err = SalesLedger::open(&OfflineStore, day(MONDAY)).await.unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Unavailable(ref m)) if m == "offline"));

        let overview = crate::report::daily_overview(&OfflineStore, day(MONDAY)).await;
        assert!(matches!(overview, Err(CoreError::Store(_))));
    }

    #[tokio::test]
    async fn test_template_load_stops_at_first_store_failure() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            creates_left: std::sync::Mutex::new(3),
        };
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();

        let err = ledger.load_template().await.unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Unavailable(_))));
        assert_eq!(ledger.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_report_matches_totals() {
        let store = MemoryStore::new();
        let ledger = SalesLedger::open(&store, day(MONDAY)).await.unwrap();
        ledger.add(fields(SaleBoard::Nlb, "MSM", 100, 0)).await.unwrap();
        ledger.add(fields(SaleBoard::Nlb, "GSM", 50, 10)).await.unwrap();
        ledger.add(fields(SaleBoard::Dlb, "LWM", 30, 0)).await.unwrap();

        let report = ledger.report().await.unwrap();
        assert_eq!(report.totals, ledger.totals().await.unwrap());
        assert_eq!(report.grand_total, Money::from_major_minor(170, 0));
        assert_eq!(report.weekday, "Monday");
    }
}
