//! Current bank/expense batches for a host that reloads ledgers over time

use tracing::info;

use crate::ingest::{load_ledger, RecordNormalizer, TabularParser};
use crate::notification::{build_request, dispatch, NotificationRequest};
use crate::reconciliation::{Matcher, ReconciliationReport, ReconciliationSummary};
use crate::traits::NotificationSender;
use crate::types::*;

/// Holds the latest batch of each ledger and the classification derived from them
///
/// Loading either ledger replaces that batch wholesale and reclassifies the
/// full bank batch. A failed load leaves both batches as they were.
#[derive(Debug, Clone)]
pub struct ReconciliationSession {
    parser: TabularParser,
    normalizer: RecordNormalizer,
    matcher: Matcher,
    expenses: Vec<ExpenseRecord>,
    report: ReconciliationReport,
}

impl Default for ReconciliationSession {
    fn default() -> Self {
        Self::new(Matcher::default())
    }
}

impl ReconciliationSession {
    /// Create an empty session with the default parser and today's date
    pub fn new(matcher: Matcher) -> Self {
        Self::with_components(TabularParser::new(), RecordNormalizer::today(), matcher)
    }

    /// Create an empty session from explicit components
    pub fn with_components(
        parser: TabularParser,
        normalizer: RecordNormalizer,
        matcher: Matcher,
    ) -> Self {
        Self {
            parser,
            normalizer,
            matcher,
            expenses: Vec::new(),
            report: ReconciliationReport::new(Vec::new(), Vec::new(), 0),
        }
    }

    /// Replace the bank batch and reclassify; returns the coerced-row diagnostics
    pub fn load_bank_statement(&mut self, content: &str) -> ReconcileResult<Vec<RowDiagnostic>> {
        let batch = load_ledger::<BankTransaction>(&self.parser, &self.normalizer, content)?;
        info!(
            transactions = batch.len(),
            coerced = batch.diagnostics.len(),
            "Loaded bank statement"
        );

        self.report = self.matcher.reconcile(&batch.records, &self.expenses);
        Ok(batch.diagnostics)
    }

    /// Replace the expense batch and reclassify; returns the coerced-row diagnostics
    pub fn load_expense_report(&mut self, content: &str) -> ReconcileResult<Vec<RowDiagnostic>> {
        let batch = load_ledger::<ExpenseRecord>(&self.parser, &self.normalizer, content)?;
        info!(
            expenses = batch.len(),
            coerced = batch.diagnostics.len(),
            "Loaded expense report"
        );

        self.expenses = batch.records;
        self.reclassify();
        Ok(batch.diagnostics)
    }

    /// Run the matcher again over the current batches
    pub fn reclassify(&mut self) -> &ReconciliationReport {
        self.report = self
            .matcher
            .reconcile(&self.report.transactions, &self.expenses);
        &self.report
    }

    /// Current bank batch, classified, in input order
    pub fn transactions(&self) -> &[BankTransaction] {
        &self.report.transactions
    }

    /// Current expense batch
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Latest classification, including match links
    pub fn report(&self) -> &ReconciliationReport {
        &self.report
    }

    /// Reported/unreported counts for the current batches
    pub fn summary(&self) -> ReconciliationSummary {
        self.report.summary
    }

    /// Get a bank transaction by ID, returning an error if not found
    pub fn transaction(&self, transaction_id: &str) -> ReconcileResult<&BankTransaction> {
        self.report
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| ReconcileError::TransactionNotFound(transaction_id.to_string()))
    }

    /// Build a reminder, send it, and on success record who was reminded
    pub async fn notify<N: NotificationSender + ?Sized>(
        &mut self,
        transaction_id: &str,
        employee_id: &str,
        employees: &[Employee],
        sender: &N,
    ) -> ReconcileResult<NotificationRequest> {
        let request = build_request(
            &self.report.transactions,
            transaction_id,
            employees,
            employee_id,
        )?;

        dispatch(sender, &request).await?;
        self.mark_notified(transaction_id, employee_id)?;

        Ok(request)
    }

    /// Record that a reminder went out for this transaction
    pub fn mark_notified(&mut self, transaction_id: &str, employee_id: &str) -> ReconcileResult<()> {
        let transaction = self
            .report
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| ReconcileError::TransactionNotFound(transaction_id.to_string()))?;

        transaction.employee_id = Some(employee_id.to_string());
        Ok(())
    }
}
