//! # Money Module
//!
//! Provides the `Money` type for gross, return and net amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a day of board sales in floating point:                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    gross 12.50 → 1250, return 0.25 → 25, net → 1225                    │
//! │    Board totals and the grand total are exact sums of integers         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lotto_core::money::Money;
//!
//! let gross = Money::from_major_minor(100, 0);
//! let deduction: Money = "20.00".parse().unwrap();
//! assert_eq!((gross - deduction).to_string(), "80.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values must be representable so the
///   validator can reject them, rather than being unrepresentable input
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Newtype serde**: serialises as the bare cent count
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single gross or return may carry: 100 billion.
    ///
    /// A day would need more than 900,000 entries at this ceiling before
    /// its totals could overflow `i64`.
    pub const MAX_AMOUNT: Money = Money(10_000_000_000_000);

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use lotto_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the magnitude exceeds [`Money::MAX_AMOUNT`].
    #[inline]
    pub const fn exceeds_max(&self) -> bool {
        self.0.unsigned_abs() > Self::MAX_AMOUNT.0.unsigned_abs()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text as typed at the entry form: `12`, `12.5`, `12.50`,
/// `.75`, `-3.25`.
///
/// At most two fractional digits are accepted; anything finer than a cent
/// is rejected rather than rounded. So is anything beyond
/// [`Money::MAX_AMOUNT`] in either direction.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = |reason: &str| ValidationError::InvalidAmount {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let (major, minor) = digits.split_once('.').unwrap_or((digits, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("amount is empty"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a decimal number"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
            _ => minor.parse().map_err(|_| invalid("must be a decimal number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        let money = Money(if negative { -cents } else { cents });
        if money.exceeds_max() {
            return Err(invalid("amount is too large"));
        }
        Ok(money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering (`1234.50`, `-5.50`).
///
/// ## Note
/// No currency symbol or grouping; locale formatting belongs to whatever
/// renders the report.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!(" 0.05 ".parse::<Money>().unwrap().cents(), 5);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
        assert_eq!("+4".parse::<Money>().unwrap().cents(), 400);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "-", ".", "abc", "1.234", "1,5", "1e3", "--2"] {
            let err = bad.parse::<Money>().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidAmount { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_enforces_max_amount() {
        assert_eq!("100000000000".parse::<Money>().unwrap(), Money::MAX_AMOUNT);
        assert_eq!(
            "-100000000000".parse::<Money>().unwrap().cents(),
            -Money::MAX_AMOUNT.cents()
        );

        for too_big in [
            "100000000000.01",
            "-100000000000.01",
            "92233720368547758.07",
            "92233720368547758.08",
        ] {
            let err = too_big.parse::<Money>().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidAmount { ref reason, .. } if reason == "amount is too large"),
                "{too_big:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);

        let amounts = [a, b, Money::from_cents(5)];
        assert_eq!(amounts.iter().sum::<Money>().cents(), 1255);
        assert_eq!(amounts.into_iter().sum::<Money>().cents(), 1255);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(1).is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::MAX_AMOUNT.exceeds_max());
        assert!(Money::from_cents(i64::MIN).exceeds_max());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(8000)).unwrap();
        assert_eq!(json, "8000");
        let back: Money = serde_json::from_str("8000").unwrap();
        assert_eq!(back, Money::from_cents(8000));
    }
}
