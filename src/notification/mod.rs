//! Receipt reminder requests for unreported bank transactions
//!
//! The crate stops at the request: delivery goes through a host-provided
//! [`NotificationSender`](crate::traits::NotificationSender).

use bigdecimal::RoundingMode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::traits::NotificationSender;
use crate::types::*;

/// Payload handed to the outbound messaging provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    recipient_phone: String,
    recipient_name: String,
    message_body: String,
}

impl NotificationRequest {
    /// Compose the reminder for one transaction and one employee
    pub fn new(transaction: &BankTransaction, employee: &Employee) -> Self {
        if transaction.reported {
            warn!(
                transaction_id = %transaction.id,
                "Building reminder for a transaction that is already reported"
            );
        }

        Self {
            recipient_phone: employee.phone.clone(),
            recipient_name: employee.name.clone(),
            message_body: reminder_message(transaction),
        }
    }

    /// Number the reminder is sent to
    pub fn recipient_phone(&self) -> &str {
        &self.recipient_phone
    }

    /// Name of the employee being reminded
    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    /// Rendered reminder text
    pub fn message_body(&self) -> &str {
        &self.message_body
    }
}

/// `Please submit receipt for: <description> - $<amount, 2 decimals>`
pub fn reminder_message(transaction: &BankTransaction) -> String {
    format!(
        "Please submit receipt for: {} - ${}",
        transaction.description,
        transaction.amount.with_scale_round(2, RoundingMode::HalfUp)
    )
}

/// Look up both parties by id and compose the reminder
pub fn build_request(
    transactions: &[BankTransaction],
    transaction_id: &str,
    employees: &[Employee],
    employee_id: &str,
) -> ReconcileResult<NotificationRequest> {
    let transaction = transactions
        .iter()
        .find(|t| t.id == transaction_id)
        .ok_or_else(|| ReconcileError::TransactionNotFound(transaction_id.to_string()))?;

    let employee = employees
        .iter()
        .find(|e| e.id == employee_id)
        .ok_or_else(|| ReconcileError::EmployeeNotFound(employee_id.to_string()))?;

    Ok(NotificationRequest::new(transaction, employee))
}

/// Hand a request to the sender, logging the outcome
pub async fn dispatch<N: NotificationSender + ?Sized>(
    sender: &N,
    request: &NotificationRequest,
) -> ReconcileResult<()> {
    match sender.send(request).await {
        Ok(()) => {
            info!(recipient = %request.recipient_name, "Receipt reminder dispatched");
            Ok(())
        }
        Err(e) => {
            warn!(recipient = %request.recipient_name, error = %e, "Receipt reminder failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn transaction(amount: &str) -> BankTransaction {
        BankTransaction::new(
            "bank-3".to_string(),
            "2024-03-04".to_string(),
            "Home Depot".to_string(),
            BigDecimal::from_str(amount).unwrap(),
        )
    }

    fn employee() -> Employee {
        Employee::new("Sam Ortiz".to_string(), "555-0199".to_string(), None)
    }

    #[test]
    fn test_message_two_decimals() {
        assert_eq!(
            reminder_message(&transaction("42.5")),
            "Please submit receipt for: Home Depot - $42.50"
        );
        assert_eq!(
            reminder_message(&transaction("7")),
            "Please submit receipt for: Home Depot - $7.00"
        );
        assert_eq!(
            reminder_message(&transaction("19.999")),
            "Please submit receipt for: Home Depot - $20.00"
        );
    }

    #[test]
    fn test_request_fields() {
        let request = NotificationRequest::new(&transaction("12.30"), &employee());
        assert_eq!(request.recipient_phone(), "555-0199");
        assert_eq!(request.recipient_name(), "Sam Ortiz");
        assert_eq!(
            request.message_body(),
            "Please submit receipt for: Home Depot - $12.30"
        );
    }

    #[test]
    fn test_build_request_not_found() {
        let transactions = vec![transaction("12.30")];
        let employee = employee();
        let employees = vec![employee.clone()];

        assert!(build_request(&transactions, "bank-3", &employees, &employee.id).is_ok());
        assert!(matches!(
            build_request(&transactions, "bank-99", &employees, &employee.id),
            Err(ReconcileError::TransactionNotFound(id)) if id == "bank-99"
        ));
        assert!(matches!(
            build_request(&transactions, "bank-3", &employees, "emp-missing"),
            Err(ReconcileError::EmployeeNotFound(id)) if id == "emp-missing"
        ));
    }
}
