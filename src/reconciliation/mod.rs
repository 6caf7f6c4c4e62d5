//! Reconciliation of bank statements against expense reports

pub mod config;
pub mod matcher;
pub mod session;

pub use config::*;
pub use matcher::*;
pub use session::*;

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Which expense record accounted for which bank transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLink {
    pub bank_id: String,
    pub expense_id: String,
}

/// Counts over a classified batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub bank_count: usize,
    pub expense_count: usize,
    pub reported: usize,
    pub unreported: usize,
}

impl ReconciliationSummary {
    /// Tally a classified bank batch
    pub fn from_transactions(transactions: &[BankTransaction], expense_count: usize) -> Self {
        let reported = transactions.iter().filter(|t| t.reported).count();
        Self {
            bank_count: transactions.len(),
            expense_count,
            reported,
            unreported: transactions.len() - reported,
        }
    }

    /// True when every bank transaction has a matching expense
    pub fn is_fully_reported(&self) -> bool {
        self.unreported == 0
    }
}

/// Result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Bank transactions in input order with `reported` set
    pub transactions: Vec<BankTransaction>,
    /// One entry per reported transaction
    pub matches: Vec<MatchLink>,
    /// Counts derived from `transactions`
    pub summary: ReconciliationSummary,
}

impl ReconciliationReport {
    /// Bundle a classified batch with its links and derived counts
    pub fn new(
        transactions: Vec<BankTransaction>,
        matches: Vec<MatchLink>,
        expense_count: usize,
    ) -> Self {
        let summary = ReconciliationSummary::from_transactions(&transactions, expense_count);
        Self {
            transactions,
            matches,
            summary,
        }
    }

    /// Transactions that still need a receipt
    pub fn unreported(&self) -> impl Iterator<Item = &BankTransaction> {
        self.transactions.iter().filter(|t| !t.reported)
    }

    /// Expense id matched to the given bank transaction, if any
    pub fn matched_expense(&self, bank_id: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|link| link.bank_id == bank_id)
            .map(|link| link.expense_id.as_str())
    }
}
