//! # Error Types
//!
//! Domain-specific error types for lotto-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lotto-core errors (this file)                                         │
//! │  ├── ValidationError  - Rejected input (code, amounts, dates)          │
//! │  ├── StoreError       - What a SalesStore implementation reports       │
//! │  └── CoreError        - What ledger operations return                  │
//! │                                                                         │
//! │  lotto-db errors (separate crate)                                      │
//! │  └── DbError          - SQLite failures, converted into StoreError     │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError → CLI message                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (date, entry id, weekday)
//! 3. Errors are enum variants, never String
//! 4. Nothing is retried here; the caller decides

use thiserror::Error;

use crate::money::Money;
use crate::types::{EntryId, SalesDayId, WeekdayIndex};

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Always recoverable: the caller corrects the input and tries again.
/// Variant order mirrors the validator's rule precedence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Game code is empty after trimming.
    #[error("missing code")]
    MissingCode,

    /// Gross or return is below zero.
    #[error("negative amount: {field} cannot be negative")]
    NegativeAmount { field: &'static str },

    /// Gross or return is above `Money::MAX_AMOUNT`.
    #[error("amount too large: {field} cannot exceed {max}")]
    AmountTooLarge { field: &'static str, max: Money },

    /// More was returned than was sold.
    #[error("return exceeds gross: return {deduction} is more than gross {gross}")]
    ReturnExceedsGross { gross: Money, deduction: Money },

    /// Both amounts are zero; nothing to record.
    #[error("empty entry: gross and return are both zero")]
    EmptyEntry,

    /// Amount text could not be parsed.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Date key is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Board name is not NLB or DLB.
    #[error("unknown board '{0}': expected NLB or DLB")]
    UnknownBoard(String),
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors reported by a [`SalesStore`](crate::store::SalesStore).
///
/// ## Mapping
/// ```text
/// EntryNotFound  → CoreError::EntryNotFound
/// Unavailable    → CoreError::Store (unchanged)
/// Backend        → CoreError::Store (unchanged)
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update/delete addressed an id that the date does not hold.
    #[error("entry {id} not found on {date}")]
    EntryNotFound { date: SalesDayId, id: EntryId },

    /// The backend could not be reached.
    #[error("sales store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure, kept as the original error.
    #[error("sales store failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an arbitrary backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by ledger operations.
///
/// Every failed operation returns one of these instead of a partial
/// success; state the caller already holds stays valid.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Update or delete referenced an entry that does not exist.
    #[error("entry not found: {id} on {date}")]
    EntryNotFound { date: SalesDayId, id: EntryId },

    /// No template is configured for the weekday.
    ///
    /// Entries can still be added by hand.
    #[error("no template defined for {weekday}")]
    NoTemplate { weekday: WeekdayIndex },

    /// The sales store failed; propagated without retry.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EntryNotFound { date, id } => CoreError::EntryNotFound { date, id },
            other => CoreError::Store(other),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
