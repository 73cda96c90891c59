//! # lotto-db: SQLite Sales Store for Lotto Ledger
//!
//! Persists sales days and entries in SQLite with sqlx and implements the
//! `SalesStore` trait from lotto-core on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lotto Ledger Data Flow                           │
//! │                                                                         │
//! │  `daily add NLB MSM 100`                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SalesLedger::record() (lotto-core) ── validate ── store.create_entry  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     lotto-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (sales.rs)   │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ SalesStore    │    │ 001_sales_   │  │   │
//! │  │   └───────────────┘    └───────────────┘    │ ledger.sql   │  │   │
//! │  │   ┌───────────────┐                         └──────────────┘  │   │
//! │  │   │ LedgerConfig  │  ledger.toml + LOTTO_* env                │   │
//! │  │   └───────────────┘                                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir)/lotto-ledger.db                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `SalesRepository`
//! - [`config`] - `ledger.toml` loading
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lotto_core::{SalesDayId, SalesLedger};
//! use lotto_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lotto-ledger.db")).await?;
//! let store = db.sales();
//! let ledger = SalesLedger::open(&store, SalesDayId::today()).await?;
//! ledger.load_template().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{LedgerConfig, DEFAULT_LOG_FILTER};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::sales::SalesRepository;
