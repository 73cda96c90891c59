//! # Weekday Templates
//!
//! Which game codes are sold on which weekday, per board, and the
//! expansion of a weekday into placeholder ledger rows.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesDayId "2024-06-03"                                                │
//! │       │ weekday()                                                       │
//! │       ▼                                                                 │
//! │  WeekdayIndex 1 (Monday)                                                │
//! │       │ template_for()                                                  │
//! │       ▼                                                                 │
//! │  WeekdayTemplate { nlb: [MSM, GSM, ...], dlb: [LWM, AKM, ...] }        │
//! │       │ expand()                                                        │
//! │       ▼                                                                 │
//! │  [NLB MSM, NLB GSM, ..., DLB LWM, DLB AKM, ...]   (NLB first)          │
//! │       │ SalesLedger::load_template()                                   │
//! │       ▼                                                                 │
//! │  gross 0 / return 0 / net 0 rows in the ledger                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is a compile-time constant. Nothing here mutates.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{GameCode, SaleBoard, WeekdayIndex};

// =============================================================================
// Template Types
// =============================================================================

/// Game codes sold on one weekday, per board, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayTemplate {
    pub weekday: WeekdayIndex,
    pub nlb: &'static [&'static str],
    pub dlb: &'static [&'static str],
}

impl WeekdayTemplate {
    /// Codes for one board.
    pub fn codes(&self, board: SaleBoard) -> &'static [&'static str] {
        match board {
            SaleBoard::Nlb => self.nlb,
            SaleBoard::Dlb => self.dlb,
        }
    }
}

/// One row of an expanded template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateRow {
    pub board: SaleBoard,
    pub code: GameCode,
}

/// Read-only summary of a weekday's template for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplatePreview {
    pub weekday: WeekdayIndex,
    pub label: String,
    pub nlb: Vec<String>,
    pub dlb: Vec<String>,
}

impl TemplatePreview {
    /// Number of codes for one board.
    pub fn count(&self, board: SaleBoard) -> usize {
        match board {
            SaleBoard::Nlb => self.nlb.len(),
            SaleBoard::Dlb => self.dlb.len(),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// A fixed set of weekday templates.
///
/// [`STANDARD_TEMPLATES`] is the production table. Other registries exist
/// only to exercise the missing-template path.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRegistry {
    templates: &'static [WeekdayTemplate],
}

impl TemplateRegistry {
    pub const fn new(templates: &'static [WeekdayTemplate]) -> Self {
        TemplateRegistry { templates }
    }

    /// Template for a weekday, or `None` when none is configured.
    pub fn template_for(&self, weekday: WeekdayIndex) -> Option<&'static WeekdayTemplate> {
        self.templates.iter().find(|t| t.weekday == weekday)
    }

    /// Like [`template_for`](Self::template_for) but a missing template is
    /// an error naming the weekday.
    pub fn require(&self, weekday: WeekdayIndex) -> CoreResult<&'static WeekdayTemplate> {
        self.template_for(weekday)
            .ok_or(CoreError::NoTemplate { weekday })
    }

    /// Expands a weekday into `(board, code)` rows: all NLB codes, then all
    /// DLB codes, each in table order.
    pub fn expand(&self, weekday: WeekdayIndex) -> CoreResult<Vec<TemplateRow>> {
        let template = self.require(weekday)?;

        let mut rows = Vec::with_capacity(template.nlb.len() + template.dlb.len());
        for board in SaleBoard::ALL {
            for code in template.codes(board) {
                rows.push(TemplateRow {
                    board,
                    code: GameCode::parse(code)?,
                });
            }
        }
        Ok(rows)
    }

    /// Codes offered for a board on a weekday; empty when no template.
    pub fn allowed_codes(&self, weekday: WeekdayIndex, board: SaleBoard) -> &'static [&'static str] {
        self.template_for(weekday)
            .map(|t| t.codes(board))
            .unwrap_or(&[])
    }

    /// Whether `code` is on the weekday's schedule for `board`.
    ///
    /// Advisory only; the validator accepts off-schedule codes.
    pub fn is_code_scheduled(&self, weekday: WeekdayIndex, board: SaleBoard, code: &GameCode) -> bool {
        self.allowed_codes(weekday, board)
            .iter()
            .any(|c| *c == code.as_str())
    }

    pub fn preview(&self, weekday: WeekdayIndex) -> CoreResult<TemplatePreview> {
        let template = self.require(weekday)?;
        let owned = |codes: &[&str]| -> Vec<String> { codes.iter().map(|c| c.to_string()).collect() };

        Ok(TemplatePreview {
            weekday,
            label: weekday.label().to_string(),
            nlb: owned(template.nlb),
            dlb: owned(template.dlb),
        })
    }
}

// =============================================================================
// Standard Table
// =============================================================================

static WEEKDAY_GAMES: [WeekdayTemplate; 7] = [
    WeekdayTemplate {
        weekday: WeekdayIndex::SUNDAY,
        nlb: &["MSS", "GSI", "MPI", "DNI", "HI", "NJI", "AI", "SDI"],
        dlb: &["LWI", "AKI", "SFI", "SBI", "KTI", "SPI", "VI", "SI"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::MONDAY,
        nlb: &["MSM", "GSM", "MPM", "DNM", "HM", "NJM", "AM", "SDM"],
        dlb: &["LWM", "AKM", "SFM", "SBM", "KTM", "SPM", "VM", "SM"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::TUESDAY,
        nlb: &["MST", "GSA", "MPA", "DNA", "HA", "NJA", "AA", "SDA"],
        dlb: &["LWA", "AKA", "SFA", "SBA", "KTT", "SPA", "VA", "SA"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::WEDNESDAY,
        nlb: &["MSW", "GSW", "MPW", "DNW", "HW", "NJW", "AW", "SDW"],
        dlb: &["LWW", "AKW", "SFW", "SBW", "KTW", "SPW", "VW", "SW"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::THURSDAY,
        nlb: &["MSB", "GSB", "MPB", "DNB", "HT", "NJB", "AB", "SDB"],
        dlb: &["LWB", "AKT", "SFT", "SBT", "KTB", "SPT", "VT", "ST"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::FRIDAY,
        nlb: &["MSF", "GSF", "MPF", "DNF", "HF", "NJF", "AF", "SDF"],
        dlb: &["LWF", "AKF", "SFF", "SBF", "KTF", "SPF", "VF", "SF"],
    },
    WeekdayTemplate {
        weekday: WeekdayIndex::SATURDAY,
        nlb: &["MS", "GSS", "MPS", "DNS", "HS", "NJS", "AS", "SDS"],
        dlb: &["LWS", "AKS", "SFS", "SBS", "KTS", "SPS", "VS", "SS"],
    },
];

/// The production weekday table.
pub static STANDARD_TEMPLATES: TemplateRegistry = TemplateRegistry::new(&WEEKDAY_GAMES);

/// Looks up the standard template for a weekday.
pub fn template_for(weekday: WeekdayIndex) -> Option<&'static WeekdayTemplate> {
    STANDARD_TEMPLATES.template_for(weekday)
}

/// Expands the standard template for a weekday.
pub fn expand(weekday: WeekdayIndex) -> CoreResult<Vec<TemplateRow>> {
    STANDARD_TEMPLATES.expand(weekday)
}

// =============================================================================
// Unit Tests
// =============================================================================
