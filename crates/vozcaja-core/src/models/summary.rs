//! Balance and totals over interpreted movements.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{Category, Direction, ParsedTransaction};

/// Aggregate view over a set of movements.
///
/// Movements without a detected amount are counted as rejected and left out
/// of every total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Movements included in the totals.
    pub accepted: usize,

    /// Movements skipped because their amount is zero.
    pub rejected: usize,

    /// Sum of inflow amounts.
    pub total_inflow: Decimal,

    /// Sum of outflow amounts.
    pub total_outflow: Decimal,

    /// Inflow minus outflow.
    pub balance: Decimal,

    /// Amount per category, regardless of direction.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_category: BTreeMap<Category, Decimal>,
}

impl LedgerSummary {
    /// Build a summary from a slice of movements.
    pub fn from_transactions(transactions: &[ParsedTransaction]) -> Self {
        let mut summary = Self::default();
        for txn in transactions {
            summary.add(txn);
        }
        summary
    }

    /// Fold one more movement into the summary.
    pub fn add(&mut self, txn: &ParsedTransaction) {
        if !txn.has_amount() {
            self.rejected += 1;
            return;
        }

        self.accepted += 1;
        match txn.direction {
            Direction::Inflow => self.total_inflow += txn.amount,
            Direction::Outflow => self.total_outflow += txn.amount,
        }
        self.balance += txn.signed_amount();
        *self.by_category.entry(txn.category).or_insert(Decimal::ZERO) += txn.amount;
    }

    /// Categories sorted by descending total.
    pub fn top_categories(&self) -> Vec<(Category, Decimal)> {
        let mut totals: Vec<(Category, Decimal)> =
            self.by_category.iter().map(|(c, a)| (*c, *a)).collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        totals
    }
}
