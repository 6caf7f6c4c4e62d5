//! Traits for record normalization, storage abstraction and outbound notifications

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::notification::NotificationRequest;
use crate::types::*;

/// A typed ledger row that can be built from a parsed field mapping
///
/// Each candidate list is tried in order; the first field holding a non-empty
/// value wins.
pub trait LedgerRecord: Sized {
    /// Prefix for batch-local identifiers (`bank-`, `jobber-`)
    const ID_PREFIX: &'static str;
    /// Candidate source fields for the date
    const DATE_FIELDS: &'static [&'static str];
    /// Candidate source fields for the description, in priority order
    const DESCRIPTION_FIELDS: &'static [&'static str];
    /// Candidate source fields for the amount
    const AMOUNT_FIELDS: &'static [&'static str];

    /// Build the record once every attribute has been resolved
    fn from_fields(id: String, date: String, description: String, amount: BigDecimal) -> Self;
}

/// Storage abstraction for the employee directory
///
/// Lets the directory work with any backend (a database table, a remote
/// contacts service, in-memory, etc.) by implementing these methods.
#[async_trait]
pub trait EmployeeStorage: Send + Sync {
    /// Save an employee to storage
    async fn save_employee(&mut self, employee: &Employee) -> ReconcileResult<()>;

    /// Get an employee by ID
    async fn get_employee(&self, employee_id: &str) -> ReconcileResult<Option<Employee>>;

    /// List all employees in the order they were added
    async fn list_employees(&self) -> ReconcileResult<Vec<Employee>>;

    /// Delete an employee
    async fn delete_employee(&mut self, employee_id: &str) -> ReconcileResult<()>;
}

/// Trait for implementing custom employee validation rules
pub trait EmployeeValidator: Send + Sync {
    /// Validate an employee before saving
    fn validate_employee(&self, employee: &Employee) -> ReconcileResult<()>;
}

/// Default employee validator: name and phone are required
pub struct DefaultEmployeeValidator;

impl EmployeeValidator for DefaultEmployeeValidator {
    fn validate_employee(&self, employee: &Employee) -> ReconcileResult<()> {
        if employee.name.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Employee name cannot be empty".to_string(),
            ));
        }

        if employee.phone.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Employee phone cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outbound delivery of receipt reminders (SMS gateway, email, ...)
///
/// Implemented by the host. The crate only builds requests; whether a message
/// actually arrived is the sender's concern.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver a single reminder
    async fn send(&self, request: &NotificationRequest) -> ReconcileResult<()>;
}
