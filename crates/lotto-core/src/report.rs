//! # Daily Report
//!
//! Read-only projections of a sales day for the owner view and for export.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DailyReport                                                            │
//! │  ├── date          "2024-06-03"                                        │
//! │  ├── weekday       "Monday"                                            │
//! │  ├── rows          [ReportRow ...]      (creation order)               │
//! │  ├── totals        DayTotals            (per board: net, count)        │
//! │  ├── grand_total   Money                                               │
//! │  └── total_count   usize                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering to PDF is somebody else's job. This module stops at JSON and a
//! plain text table.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::store::SalesStore;
use crate::totals::DayTotals;
use crate::types::{EntryId, GameCode, SaleBoard, SaleEntry, SalesDayId};

// =============================================================================
// Report Types
// =============================================================================

/// One ledger line, with net spelled out for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportRow {
    pub id: EntryId,
    pub board: SaleBoard,
    pub code: GameCode,
    pub gross: Money,
    pub deduction: Money,
    pub net: Money,
}

impl From<&SaleEntry> for ReportRow {
    fn from(entry: &SaleEntry) -> Self {
        ReportRow {
            id: entry.id.clone(),
            board: entry.fields.board,
            code: entry.fields.code.clone(),
            gross: entry.fields.gross,
            deduction: entry.fields.deduction,
            net: entry.net(),
        }
    }
}

/// Everything the summary and export views need for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    #[ts(type = "string")]
    pub date: SalesDayId,
    pub weekday: String,
    pub rows: Vec<ReportRow>,
    pub totals: DayTotals,
    pub grand_total: Money,
    pub total_count: usize,
}

impl DailyReport {
    /// Builds the report from a listing, keeping its order.
    pub fn build(date: SalesDayId, entries: &[SaleEntry]) -> Self {
        let totals = DayTotals::from_entries(entries);
        DailyReport {
            date,
            weekday: date.weekday().label().to_string(),
            rows: entries.iter().map(ReportRow::from).collect(),
            totals,
            grand_total: totals.grand_total(),
            total_count: totals.total_count(),
        }
    }

    /// Rows of one board, in listing order.
    pub fn rows_for(&self, board: SaleBoard) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(move |row| row.board == board)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Plain text table, NLB section then DLB section, then the totals.
impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily sales {} ({})", self.date, self.weekday)?;

        for board in SaleBoard::ALL {
            let totals = self.totals.board(board);
            writeln!(f)?;
            writeln!(f, "{} - {}", board, board.full_name())?;
            writeln!(
                f,
                "  {:<8} {:>12} {:>12} {:>12}  {}",
                "CODE", "GROSS", "RETURN", "NET", "ID"
            )?;
            for row in self.rows_for(board) {
                writeln!(
                    f,
                    "  {:<8} {:>12} {:>12} {:>12}  {}",
                    row.code.as_str(),
                    row.gross.to_string(),
                    row.deduction.to_string(),
                    row.net.to_string(),
                    row.id
                )?;
            }
            writeln!(f, "  {} total: {} ({} entries)", board, totals.net, totals.count)?;
        }

        writeln!(f)?;
        write!(
            f,
            "Grand total: {} ({} entries)",
            self.grand_total, self.total_count
        )
    }
}

// =============================================================================
// Overview
// =============================================================================

/// Owner view of a date: lists whatever the store holds.
///
/// Unlike [`SalesLedger::open`](crate::ledger::SalesLedger::open) this
/// does not call `ensure_day`, so looking at a date leaves no trace.
pub async fn daily_overview<S: SalesStore>(store: &S, date: SalesDayId) -> CoreResult<DailyReport> {
    let entries = store.list_entries(date).await?;
    Ok(DailyReport::build(date, &entries))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::SaleFields;

    fn fields(board: SaleBoard, code: &str, gross: i64, deduction: i64) -> SaleFields {
        SaleFields {
            board,
            code: GameCode::parse(code).unwrap(),
            gross: Money::from_major_minor(gross, 0),
            deduction: Money::from_major_minor(deduction, 0),
        }
    }

    async fn seeded() -> (MemoryStore, SalesDayId) {
        let store = MemoryStore::new();
        let date = SalesDayId::parse("2024-06-03").unwrap();
        store.create_entry(date, &fields(SaleBoard::Dlb, "LWM", 30, 0)).await.unwrap();
        store.create_entry(date, &fields(SaleBoard::Nlb, "MSM", 100, 0)).await.unwrap();
        store.create_entry(date, &fields(SaleBoard::Nlb, "GSM", 50, 10)).await.unwrap();
        (store, date)
    }

    #[tokio::test]
    async fn test_overview_totals_and_order() {
        let (store, date) = seeded().await;
        let report = daily_overview(&store, date).await.unwrap();

        assert_eq!(report.weekday, "Monday");
        assert_eq!(report.grand_total, Money::from_major_minor(170, 0));
        assert_eq!(report.total_count, 3);

        let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["LWM", "MSM", "GSM"]);
        assert_eq!(report.rows[2].net, Money::from_major_minor(40, 0));
    }

    #[tokio::test]
    async fn test_overview_does_not_create_day() {
        let store = MemoryStore::new();
        let date = SalesDayId::parse("2024-06-05").unwrap();

        let report = daily_overview(&store, date).await.unwrap();
        assert!(report.rows.is_empty());
        assert!(!store.has_day(date).unwrap());
    }

    #[tokio::test]
    async fn test_text_table_groups_by_board() {
        let (store, date) = seeded().await;
        let text = daily_overview(&store, date).await.unwrap().to_string();

        let nlb = text.find("NLB - National Lottery Board").unwrap();
        let dlb = text.find("DLB - Daily Lottery Board").unwrap();
        assert!(nlb < dlb);
        assert!(text.contains("NLB total: 140.00 (2 entries)"));
        assert!(text.contains("DLB total: 30.00 (1 entries)"));
        assert!(text.ends_with("Grand total: 170.00 (3 entries)"));
    }

    #[tokio::test]
    async fn test_json_export() {
        let (store, date) = seeded().await;
        let report = daily_overview(&store, date).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["date"], "2024-06-03");
        assert_eq!(json["grand_total"], 17000);
        assert_eq!(json["rows"][0]["board"], "DLB");
        assert_eq!(json["totals"]["nlb"]["count"], 2);
    }
}
