//! Classifying bank transactions against the expense report

use bigdecimal::BigDecimal;
use tracing::{debug, info};

use crate::reconciliation::{MatchConfig, MatchLink, MatchStrategy, ReconciliationReport};
use crate::types::*;

/// Decides, for each bank transaction, whether the expense report accounts for it
///
/// A pure function of its two input batches: running it again on the same
/// batches yields the same flags.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Create a matcher with a validated configuration
    pub fn new(config: MatchConfig) -> ReconcileResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this matcher was built with
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Amount within tolerance and one description contained in the other
    pub fn is_match(&self, transaction: &BankTransaction, expense: &ExpenseRecord) -> bool {
        amounts_within_tolerance(&transaction.amount, &expense.amount, &self.config.tolerance)
            && descriptions_overlap(
                &transaction.description,
                &expense.description,
                self.config.min_description_len,
            )
    }

    /// First qualifying expense in input order, ignoring any other claims
    pub fn find_match<'a>(
        &self,
        transaction: &BankTransaction,
        expenses: &'a [ExpenseRecord],
    ) -> Option<&'a ExpenseRecord> {
        expenses
            .iter()
            .find(|expense| self.is_match(transaction, expense))
    }

    /// Return a new batch with every `reported` flag recomputed from scratch
    pub fn classify(
        &self,
        transactions: &[BankTransaction],
        expenses: &[ExpenseRecord],
    ) -> Vec<BankTransaction> {
        self.reconcile(transactions, expenses).transactions
    }

    /// Classify the batch and keep track of which expense backed which charge
    pub fn reconcile(
        &self,
        transactions: &[BankTransaction],
        expenses: &[ExpenseRecord],
    ) -> ReconciliationReport {
        let matched: Vec<Option<&ExpenseRecord>> = match self.config.strategy {
            MatchStrategy::FirstMatch => transactions
                .iter()
                .map(|transaction| self.find_match(transaction, expenses))
                .collect(),
            MatchStrategy::OneToOne => {
                let mut claimed = vec![false; expenses.len()];
                transactions
                    .iter()
                    .map(|transaction| {
                        let position = expenses.iter().enumerate().position(|(i, expense)| {
                            !claimed[i] && self.is_match(transaction, expense)
                        })?;
                        claimed[position] = true;
                        Some(&expenses[position])
                    })
                    .collect()
            }
        };

        let mut classified = Vec::with_capacity(transactions.len());
        let mut matches = Vec::new();

        for (transaction, expense) in transactions.iter().zip(matched) {
            let mut transaction = transaction.clone();
            transaction.reported = expense.is_some();

            if let Some(expense) = expense {
                debug!(bank_id = %transaction.id, expense_id = %expense.id, "Matched transaction");
                matches.push(MatchLink {
                    bank_id: transaction.id.clone(),
                    expense_id: expense.id.clone(),
                });
            }

            classified.push(transaction);
        }

        let report = ReconciliationReport::new(classified, matches, expenses.len());

        info!(
            strategy = ?self.config.strategy,
            bank = report.summary.bank_count,
            expenses = report.summary.expense_count,
            reported = report.summary.reported,
            unreported = report.summary.unreported,
            "Reconciled bank statement"
        );

        report
    }
}

/// `|a - b| < tolerance`
pub fn amounts_within_tolerance(a: &BigDecimal, b: &BigDecimal, tolerance: &BigDecimal) -> bool {
    (a - b).abs() < *tolerance
}

/// Case-insensitive containment in either direction
///
/// An empty description is contained in everything. With `min_len > 0` the
/// contained side must be at least that many characters long.
pub fn descriptions_overlap(a: &str, b: &str, min_len: usize) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    (a.contains(&b) && b.chars().count() >= min_len)
        || (b.contains(&a) && a.chars().count() >= min_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn bank(id: &str, description: &str, amount: &str) -> BankTransaction {
        BankTransaction::new(
            id.to_string(),
            "2024-03-01".to_string(),
            description.to_string(),
            dec(amount),
        )
    }

    fn expense(id: &str, description: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            id.to_string(),
            "2024-03-01".to_string(),
            description.to_string(),
            dec(amount),
        )
    }

    #[test]
    fn test_tolerance_boundary() {
        let tolerance = dec("0.01");
        assert!(amounts_within_tolerance(&dec("10.00"), &dec("10.009"), &tolerance));
        assert!(!amounts_within_tolerance(&dec("10.00"), &dec("10.011"), &tolerance));
        assert!(!amounts_within_tolerance(&dec("10.00"), &dec("10.01"), &tolerance));
        assert!(amounts_within_tolerance(&dec("-5.00"), &dec("-5.005"), &tolerance));
    }

    #[test]
    fn test_substring_symmetry() {
        assert!(descriptions_overlap("HOME DEPOT #1234", "Home Depot", 0));
        assert!(descriptions_overlap("Home Depot", "HOME DEPOT #1234", 0));
        assert!(!descriptions_overlap("Lowe's", "Home Depot", 0));
    }

    #[test]
    fn test_empty_description_overlaps_everything() {
        assert!(descriptions_overlap("", "Anything", 0));
        assert!(descriptions_overlap("Anything", "", 0));
        assert!(descriptions_overlap("", "", 0));
    }

    #[test]
    fn test_min_description_len_guard() {
        assert!(descriptions_overlap("Monthly Fee", "Fee", 0));
        assert!(!descriptions_overlap("Monthly Fee", "Fee", 4));
        assert!(descriptions_overlap("Shell Gas", "Shell", 4));
    }

    #[test]
    fn test_substring_and_tolerance_match() {
        let matcher = Matcher::default();
        let result = matcher.classify(
            &[bank("bank-0", "Shell Gas", "42.50")],
            &[expense("jobber-0", "Shell", "42.50")],
        );
        assert!(result[0].reported);
    }

    #[test]
    fn test_amount_outside_tolerance() {
        let matcher = Matcher::default();
        let result = matcher.classify(
            &[bank("bank-0", "Staples", "15.00")],
            &[expense("jobber-0", "Staples", "16.00")],
        );
        assert!(!result[0].reported);
    }

    #[test]
    fn test_first_match_wins() {
        let matcher = Matcher::default();
        let expenses = [
            expense("jobber-0", "Costco", "20.00"),
            expense("jobber-1", "Costco Wholesale", "20.00"),
        ];
        let txn = bank("bank-0", "COSTCO WHOLESALE #42", "20.00");

        assert_eq!(matcher.find_match(&txn, &expenses).unwrap().id, "jobber-0");

        let report = matcher.reconcile(&[txn], &expenses);
        assert_eq!(report.matched_expense("bank-0"), Some("jobber-0"));
    }

    #[test]
    fn test_first_match_does_not_consume() {
        let matcher = Matcher::default();
        let result = matcher.classify(
            &[
                bank("bank-0", "Tolls", "25.00"),
                bank("bank-1", "Tolls", "25.00"),
            ],
            &[expense("jobber-0", "Tolls", "25.00")],
        );
        assert!(result.iter().all(|t| t.reported));
    }

    #[test]
    fn test_one_to_one_consumes() {
        let config = MatchConfig::default().with_strategy(MatchStrategy::OneToOne);
        let matcher = Matcher::new(config).unwrap();
        let report = matcher.reconcile(
            &[
                bank("bank-0", "Tolls", "25.00"),
                bank("bank-1", "Tolls", "25.00"),
                bank("bank-2", "Tolls", "25.00"),
            ],
            &[
                expense("jobber-0", "Tolls", "25.00"),
                expense("jobber-1", "Tolls", "25.00"),
            ],
        );

        let flags: Vec<bool> = report.transactions.iter().map(|t| t.reported).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(report.matched_expense("bank-0"), Some("jobber-0"));
        assert_eq!(report.matched_expense("bank-1"), Some("jobber-1"));
        assert_eq!(report.matched_expense("bank-2"), None);
    }

    #[test]
    fn test_reported_is_recomputed() {
        let matcher = Matcher::default();
        let mut stale = bank("bank-0", "Staples", "15.00");
        stale.reported = true;
        stale.employee_id = Some("emp-1".to_string());

        let result = matcher.classify(&[stale], &[]);
        assert!(!result[0].reported);
        assert_eq!(result[0].employee_id.as_deref(), Some("emp-1"));
    }

    #[test]
    fn test_idempotent() {
        let matcher = Matcher::default();
        let transactions = [
            bank("bank-0", "Shell Gas", "42.50"),
            bank("bank-1", "Staples", "15.00"),
        ];
        let expenses = [expense("jobber-0", "Shell", "42.50")];

        let first = matcher.classify(&transactions, &expenses);
        let second = matcher.classify(&first, &expenses);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_config_is_kept() {
        let config = MatchConfig::default()
            .with_tolerance(dec("0.05"))
            .with_min_description_len(3);
        let matcher = Matcher::new(config.clone()).unwrap();

        assert_eq!(matcher.config(), &config);
        assert!(matcher.is_match(
            &bank("bank-0", "Shell Gas", "42.50"),
            &expense("jobber-0", "Shell", "42.54"),
        ));
        assert!(!matcher.is_match(
            &bank("bank-0", "Gas Co", "42.50"),
            &expense("jobber-0", "Co", "42.50"),
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig::default().with_tolerance(dec("-0.01"));
        assert!(matches!(
            Matcher::new(config),
            Err(ReconcileError::Config(_))
        ));
    }
}
