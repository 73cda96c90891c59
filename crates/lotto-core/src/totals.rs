//! # Aggregation
//!
//! Per-board and grand totals over a day's entries.
//!
//! Always recomputed from the current entry list; nothing is cached and no
//! total is ever stored.
//!
//! ```text
//!   entries ──► from_entries() ──► DayTotals
//!                                  ├── nlb: BoardTotals { gross, deduction, net, count }
//!                                  ├── dlb: BoardTotals { ... }
//!                                  └── grand_total() = nlb.net + dlb.net
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{SaleBoard, SaleEntry};

/// Sums for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoardTotals {
    pub board: SaleBoard,
    pub gross: Money,
    pub deduction: Money,
    pub net: Money,
    pub count: usize,
}

impl BoardTotals {
    pub fn empty(board: SaleBoard) -> Self {
        BoardTotals {
            board,
            gross: Money::zero(),
            deduction: Money::zero(),
            net: Money::zero(),
            count: 0,
        }
    }

    fn push(&mut self, entry: &SaleEntry) {
        self.gross += entry.fields.gross;
        self.deduction += entry.fields.deduction;
        self.net += entry.net();
        self.count += 1;
    }
}

/// Totals for a whole sales day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayTotals {
    pub nlb: BoardTotals,
    pub dlb: BoardTotals,
}

impl Default for DayTotals {
    fn default() -> Self {
        DayTotals {
            nlb: BoardTotals::empty(SaleBoard::Nlb),
            dlb: BoardTotals::empty(SaleBoard::Dlb),
        }
    }
}

impl DayTotals {
    /// Aggregates a list of entries.
    ///
    /// ```rust
    /// use lotto_core::totals::DayTotals;
    ///
    /// let totals = DayTotals::from_entries(&[]);
    /// assert!(totals.grand_total().is_zero());
    /// assert_eq!(totals.total_count(), 0);
    /// ```
    pub fn from_entries(entries: &[SaleEntry]) -> Self {
        let mut totals = DayTotals::default();
        for entry in entries {
            totals.board_mut(entry.board()).push(entry);
        }
        totals
    }

    pub fn board(&self, board: SaleBoard) -> &BoardTotals {
        match board {
            SaleBoard::Nlb => &self.nlb,
            SaleBoard::Dlb => &self.dlb,
        }
    }

    fn board_mut(&mut self, board: SaleBoard) -> &mut BoardTotals {
        match board {
            SaleBoard::Nlb => &mut self.nlb,
            SaleBoard::Dlb => &mut self.dlb,
        }
    }

    /// Sum of net over one board.
    pub fn total_for(&self, board: SaleBoard) -> Money {
        self.board(board).net
    }

    pub fn count_for(&self, board: SaleBoard) -> usize {
        self.board(board).count
    }

    /// NLB net plus DLB net.
    pub fn grand_total(&self) -> Money {
        self.nlb.net + self.dlb.net
    }

    pub fn total_count(&self) -> usize {
        self.nlb.count + self.dlb.count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
