//! # Domain Types
//!
//! Core domain types used throughout Lotto Ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │   SalesDayId    │ 1 ── * │   SaleEntry     │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  YYYY-MM-DD     │        │  id (EntryId)   │                        │
//! │  │  weekday()      │        │  fields ────────┼──► SaleFields          │
//! │  └─────────────────┘        └─────────────────┘    board, code,        │
//! │                                                     gross, deduction   │
//! │  ┌─────────────────┐   ┌─────────────────┐         net() = derived     │
//! │  │   SaleBoard     │   │   GameCode      │                             │
//! │  │  NLB | DLB      │   │  "MSM", "LWI"   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saved vs Unsaved
//! An entry that has not reached the store is a bare [`SaleFields`]; only
//! the store hands out an [`EntryId`], and only a [`SaleEntry`] carries
//! one. Update and delete take an `EntryId`, so an unsaved row cannot be
//! addressed by them.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Sale Board
// =============================================================================

/// The two lottery boards tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum SaleBoard {
    /// National Lottery Board.
    Nlb,
    /// Daily Lottery Board.
    Dlb,
}

impl SaleBoard {
    /// Both boards in display order (NLB first).
    pub const ALL: [SaleBoard; 2] = [SaleBoard::Nlb, SaleBoard::Dlb];

    /// Short code as stored and printed.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleBoard::Nlb => "NLB",
            SaleBoard::Dlb => "DLB",
        }
    }

    /// Long name shown on the entry form header.
    pub const fn full_name(&self) -> &'static str {
        match self {
            SaleBoard::Nlb => "National Lottery Board",
            SaleBoard::Dlb => "Daily Lottery Board",
        }
    }
}

impl fmt::Display for SaleBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleBoard {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NLB" => Ok(SaleBoard::Nlb),
            "DLB" => Ok(SaleBoard::Dlb),
            _ => Err(ValidationError::UnknownBoard(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Game Code
// =============================================================================

/// A game code, always trimmed and uppercase, never empty.
///
/// Whether a code is sellable on a given day is a template question
/// (see [`crate::templates`]), not a property of the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct GameCode(String);

impl GameCode {
    /// Normalises raw input: trims, uppercases, rejects empty.
    ///
    /// ```rust
    /// use lotto_core::types::GameCode;
    ///
    /// assert_eq!(GameCode::parse("  msm ").unwrap().as_str(), "MSM");
    /// assert!(GameCode::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingCode);
        }
        Ok(GameCode(code.to_uppercase()))
    }

    /// Returns the code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GameCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GameCode::parse(&value)
    }
}

impl From<GameCode> for String {
    fn from(code: GameCode) -> Self {
        code.0
    }
}

// =============================================================================
// Entry Id
// =============================================================================

/// Identity assigned by the sales store when an entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntryId(String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        EntryId(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

// =============================================================================
// Weekday Index
// =============================================================================

/// Day of week, Sunday = 0 … Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct WeekdayIndex(u8);

const WEEKDAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl WeekdayIndex {
    pub const SUNDAY: WeekdayIndex = WeekdayIndex(0);
    pub const MONDAY: WeekdayIndex = WeekdayIndex(1);
    pub const TUESDAY: WeekdayIndex = WeekdayIndex(2);
    pub const WEDNESDAY: WeekdayIndex = WeekdayIndex(3);
    pub const THURSDAY: WeekdayIndex = WeekdayIndex(4);
    pub const FRIDAY: WeekdayIndex = WeekdayIndex(5);
    pub const SATURDAY: WeekdayIndex = WeekdayIndex(6);

    /// Returns `None` outside 0..=6.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 7 {
            Some(WeekdayIndex(index))
        } else {
            None
        }
    }

    /// All seven weekdays, Sunday first.
    pub fn all() -> impl Iterator<Item = WeekdayIndex> {
        (0..7).map(WeekdayIndex)
    }

    pub const fn index(&self) -> u8 {
        self.0
    }

    /// English day name ("Sunday" … "Saturday").
    pub const fn label(&self) -> &'static str {
        WEEKDAY_LABELS[self.0 as usize]
    }
}

impl fmt::Display for WeekdayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<chrono::Weekday> for WeekdayIndex {
    fn from(day: chrono::Weekday) -> Self {
        WeekdayIndex(day.num_days_from_sunday() as u8)
    }
}

impl TryFrom<u8> for WeekdayIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WeekdayIndex::new(value).ok_or_else(|| format!("weekday index {value} is outside 0..=6"))
    }
}

impl From<WeekdayIndex> for u8 {
    fn from(day: WeekdayIndex) -> Self {
        day.0
    }
}

// =============================================================================
// Sales Day Id
// =============================================================================

/// Key of a sales day: an ISO calendar date, `YYYY-MM-DD`.
///
/// ## Boundary Rules
/// - Must match `^\d{4}-\d{2}-\d{2}$`
/// - Must also be a real calendar date; `2024-02-30` matches the shape but
///   has no weekday, so it is rejected here too
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SalesDayId(NaiveDate);

impl SalesDayId {
    /// Parses and validates a date key.
    ///
    /// ```rust
    /// use lotto_core::types::SalesDayId;
    ///
    /// let day = SalesDayId::parse("2024-06-03").unwrap();
    /// assert_eq!(day.weekday().label(), "Monday");
    /// assert!(SalesDayId::parse("3/6/2024").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidDate {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let bytes = raw.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shaped {
            return Err(invalid("expected YYYY-MM-DD"));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(SalesDayId)
            .map_err(|_| invalid("not a calendar date"))
    }

    /// Today on the local clock.
    pub fn today() -> Self {
        SalesDayId(Local::now().date_naive())
    }

    /// The day before, if representable.
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(SalesDayId)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Weekday used to pick the game template.
    pub fn weekday(&self) -> WeekdayIndex {
        self.0.weekday().into()
    }
}

impl From<NaiveDate> for SalesDayId {
    fn from(date: NaiveDate) -> Self {
        SalesDayId(date)
    }
}

impl fmt::Display for SalesDayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for SalesDayId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SalesDayId::parse(s)
    }
}

impl TryFrom<String> for SalesDayId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SalesDayId::parse(&value)
    }
}

impl From<SalesDayId> for String {
    fn from(day: SalesDayId) -> Self {
        day.to_string()
    }
}

// =============================================================================
// Sale Fields / Sale Entry
// =============================================================================

/// The editable part of an entry: what a new row or a patch carries.
///
/// There is no `net` field. Net is always `gross - deduction`, computed
/// on read, so a stale or caller-supplied net has nowhere to live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleFields {
    pub board: SaleBoard,
    pub code: GameCode,
    pub gross: Money,
    pub deduction: Money,
}

impl SaleFields {
    /// Zero-value row used by the template loader.
    ///
    /// Deliberately skips the amount rules of the validator: a template
    /// row has no sales yet and is filled in later.
    pub fn placeholder(board: SaleBoard, code: GameCode) -> Self {
        SaleFields {
            board,
            code,
            gross: Money::zero(),
            deduction: Money::zero(),
        }
    }

    /// Net sale: gross minus return.
    #[inline]
    pub fn net(&self) -> Money {
        self.gross - self.deduction
    }
}

/// A stored entry: fields plus the identity the store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleEntry {
    pub id: EntryId,
    pub fields: SaleFields,
}

impl SaleEntry {
    pub fn new(id: EntryId, fields: SaleFields) -> Self {
        SaleEntry { id, fields }
    }

    #[inline]
    pub fn board(&self) -> SaleBoard {
        self.fields.board
    }

    #[inline]
    pub fn net(&self) -> Money {
        self.fields.net()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
