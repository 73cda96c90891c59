//! # Validation Module
//!
//! Business rules for a candidate sale entry.
//!
//! ## Rule Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(candidate)                                                    │
//! │       │                                                                 │
//! │       ├── 1. code blank after trim?      → MissingCode                 │
//! │       ├── 2. gross < 0 or return < 0?    → NegativeAmount              │
//! │       ├── 2b. above Money::MAX_AMOUNT?   → AmountTooLarge              │
//! │       ├── 3. return > gross?             → ReturnExceedsGross          │
//! │       ├── 4. gross == 0 and return == 0? → EmptyEntry                  │
//! │       │                                                                 │
//! │       └── OK → SaleFields { code: TRIMMED + UPPERCASE }                │
//! │                net = gross - return ≥ 0 (guaranteed by rule 3)         │
//! │                                                                         │
//! │  First failing rule wins.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger does not call this itself. Hand-entered rows and edits go
//! through here first; template rows are zero-value placeholders and skip
//! rules 2-4 on purpose (see [`crate::templates`]).
//!
//! ## Usage
//! ```rust
//! use lotto_core::validation::{validate, SaleCandidate};
//! use lotto_core::{Money, SaleBoard};
//!
//! let fields = validate(SaleCandidate {
//!     board: SaleBoard::Nlb,
//!     code: "ab".to_string(),
//!     gross: Money::from_cents(10000),
//!     deduction: Money::from_cents(2000),
//! })
//! .unwrap();
//!
//! assert_eq!(fields.code.as_str(), "AB");
//! assert_eq!(fields.net().cents(), 8000);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{GameCode, SaleBoard, SaleFields};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw entry input as typed by staff, before any normalisation.
///
/// Any `net` a client sends alongside is not part of this type and is
/// dropped on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleCandidate {
    pub board: SaleBoard,
    pub code: String,
    pub gross: Money,
    pub deduction: Money,
}

impl SaleCandidate {
    /// Builds a candidate from already-typed amounts.
    pub fn new(board: SaleBoard, code: impl Into<String>, gross: Money, deduction: Money) -> Self {
        SaleCandidate {
            board,
            code: code.into(),
            gross,
            deduction,
        }
    }
}

/// Validates a candidate entry and returns normalised fields.
pub fn validate(candidate: SaleCandidate) -> ValidationResult<SaleFields> {
    let SaleCandidate {
        board,
        code,
        gross,
        deduction,
    } = candidate;

    let code = GameCode::parse(&code)?;

    if gross.is_negative() {
        return Err(ValidationError::NegativeAmount { field: "gross" });
    }
    if deduction.is_negative() {
        return Err(ValidationError::NegativeAmount { field: "return" });
    }

    if gross.exceeds_max() {
        return Err(too_large("gross"));
    }
    if deduction.exceeds_max() {
        return Err(too_large("return"));
    }

    if deduction > gross {
        return Err(ValidationError::ReturnExceedsGross { gross, deduction });
    }

    if gross.is_zero() && deduction.is_zero() {
        return Err(ValidationError::EmptyEntry);
    }

    Ok(SaleFields {
        board,
        code,
        gross,
        deduction,
    })
}

fn too_large(field: &'static str) -> ValidationError {
    ValidationError::AmountTooLarge {
        field,
        max: Money::MAX_AMOUNT,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
