//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::traits::LedgerRecord;

/// A single charge or credit taken from the bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    /// Identifier unique within the loaded batch (`bank-0`, `bank-1`, ...)
    pub id: String,
    /// Calendar date as it appeared in the statement
    pub date: String,
    /// Payee or merchant label
    pub description: String,
    /// Signed amount in currency units
    pub amount: BigDecimal,
    /// Whether a qualifying expense record was found for this transaction
    pub reported: bool,
    /// Employee that was reminded about this charge, once a reminder went out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl BankTransaction {
    /// Create a new, unclassified bank transaction
    pub fn new(id: String, date: String, description: String, amount: BigDecimal) -> Self {
        Self {
            id,
            date,
            description,
            amount,
            reported: false,
            employee_id: None,
        }
    }
}

impl LedgerRecord for BankTransaction {
    const ID_PREFIX: &'static str = "bank-";
    const DATE_FIELDS: &'static [&'static str] = &["date", "transaction_date"];
    const DESCRIPTION_FIELDS: &'static [&'static str] = &["description", "payee", "merchant"];
    const AMOUNT_FIELDS: &'static [&'static str] = &["amount", "debit"];

    fn from_fields(id: String, date: String, description: String, amount: BigDecimal) -> Self {
        Self::new(id, date, description, amount)
    }
}

/// A single line from the operational expense report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Identifier unique within the loaded batch (`jobber-0`, `jobber-1`, ...)
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: BigDecimal,
}

impl ExpenseRecord {
    /// Create a new expense record
    pub fn new(id: String, date: String, description: String, amount: BigDecimal) -> Self {
        Self {
            id,
            date,
            description,
            amount,
        }
    }
}

impl LedgerRecord for ExpenseRecord {
    const ID_PREFIX: &'static str = "jobber-";
    const DATE_FIELDS: &'static [&'static str] = &["date", "expense_date"];
    const DESCRIPTION_FIELDS: &'static [&'static str] = &["description", "vendor", "category"];
    const AMOUNT_FIELDS: &'static [&'static str] = &["amount", "total"];

    fn from_fields(id: String, date: String, description: String, amount: BigDecimal) -> Self {
        Self::new(id, date, description, amount)
    }
}

/// Directory entry for someone who can be asked for a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// When the entry was added to the directory
    pub created_at: NaiveDateTime,
}

impl Employee {
    /// Create a new employee entry with a generated `emp-` identifier
    pub fn new(name: String, phone: String, email: Option<String>) -> Self {
        Self {
            id: format!("emp-{}", uuid::Uuid::new_v4()),
            name,
            phone,
            email,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Case-insensitive name match, or plain substring match on the phone number
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase()) || self.phone.contains(filter)
    }
}

/// What went wrong with a single field of a single input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The amount column held a value that is not a number; `0` was used instead
    AmountNotNumeric,
}

/// Non-fatal per-row problem found while normalizing a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    /// Zero-based data row index (the same index used in the record id)
    pub row: usize,
    /// Normalized source field name the value was read from
    pub field: String,
    /// Raw value as it appeared in the input
    pub value: String,
    pub kind: DiagnosticKind,
}

/// Typed records produced from one ledger, plus whatever was coerced along the way
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl<T> NormalizedBatch<T> {
    /// True when the ledger had no data rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Input is empty: no header line found")]
    EmptyInput,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl ReconcileError {
    /// True for either of the lookup failures (transaction or employee)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReconcileError::TransactionNotFound(_) | ReconcileError::EmployeeNotFound(_)
        )
    }
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
