//! # Repository Module
//!
//! Database repository implementations for Lotto Ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  SalesLedger (lotto-core)                                              │
//! │       │                                                                 │
//! │       │  store.create_entry(date, &fields)   (SalesStore trait)        │
//! │       ▼                                                                 │
//! │  SalesRepository                                                       │
//! │  ├── upsert_day / entries_for                                          │
//! │  ├── insert_entry / replace_entry / remove_entry                       │
//! │  └── day_exists                                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The ledger only ever sees the trait, so its tests run against        │
//! │  MemoryStore and the SQL stays in this one place.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SalesRepository`](sales::SalesRepository) - Sales days and entries

pub mod sales;
