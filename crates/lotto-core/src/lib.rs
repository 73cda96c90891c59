//! # lotto-core: Daily Sales Ledger Logic
//!
//! The rules of the lottery sales ledger: what a valid entry is, which game
//! codes belong to which weekday, how a day's entries are kept and how they
//! add up. Storage is reached through the [`SalesStore`] trait only.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lotto Ledger Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Boundary (`daily` CLI in lotto-db)                 │   │
//! │  │    parse date ──► open ledger ──► add / edit / template / show  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lotto-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ templates │  │ validation│  │  ledger   │  │  totals   │  │   │
//! │  │   │ weekday → │  │  4 rules  │  │ add/edit/ │  │  report   │  │   │
//! │  │   │   codes   │  │ in order  │  │ rm / list │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       │ SalesStore trait      │   │
//! │  │   NO DATABASE • NO NETWORK • NO FILES │                       │   │
//! │  └───────────────────────────────────────┼───────────────────────┘   │
//! │                                          │                            │
//! │  ┌───────────────────────────────────────▼───────────────────────┐   │
//! │  │          lotto-db: SalesRepository (SQLite, sqlx)              │   │
//! │  └────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Boards, game codes, date keys, entries
//! - [`money`] - Integer cents
//! - [`error`] - Validation, store and ledger errors
//! - [`validation`] - The entry validator
//! - [`templates`] - Weekday template registry and expansion
//! - [`store`] - The `SalesStore` seam and an in-memory implementation
//! - [`ledger`] - `SalesLedger`, one date's entries
//! - [`totals`] - Per-board and grand totals
//! - [`report`] - Report and overview projections
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use lotto_core::{MemoryStore, Money, SaleBoard, SaleCandidate, SalesDayId, SalesLedger};
//!
//! let store = MemoryStore::new();
//! let day = SalesDayId::parse("2024-06-03")?;
//! let ledger = SalesLedger::open(&store, day).await?;
//!
//! // Validated, normalised to "MSM", net derived
//! ledger
//!     .record(SaleCandidate::new(SaleBoard::Nlb, "msm", "100".parse()?, Money::zero()))
//!     .await?;
//!
//! let totals = ledger.totals().await?;
//! assert_eq!(totals.grand_total().to_string(), "100.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod store;
pub mod templates;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lotto_core::Money` instead of
// `use lotto_core::money::Money`

pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use ledger::SalesLedger;
pub use money::Money;
pub use report::{daily_overview, DailyReport, ReportRow};
pub use store::{MemoryStore, SalesStore};
pub use templates::{TemplatePreview, TemplateRegistry, TemplateRow, STANDARD_TEMPLATES};
pub use totals::{BoardTotals, DayTotals};
pub use types::*;
pub use validation::{validate, SaleCandidate};
