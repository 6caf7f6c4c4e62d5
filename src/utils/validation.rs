//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that an employee name is valid
pub fn validate_employee_name(name: &str) -> ReconcileResult<()> {
    if name.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Employee name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 100 {
        return Err(ReconcileError::Validation(
            "Employee name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a phone number looks dialable
pub fn validate_phone(phone: &str) -> ReconcileResult<()> {
    if phone.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Employee phone cannot be empty".to_string(),
        ));
    }

    // Digits plus the usual separators
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'))
    {
        return Err(ReconcileError::Validation(format!(
            "Phone '{}' can only contain digits, spaces, and + - ( ) .",
            phone
        )));
    }

    if phone.chars().filter(char::is_ascii_digit).count() < 7 {
        return Err(ReconcileError::Validation(format!(
            "Phone '{}' must contain at least 7 digits",
            phone
        )));
    }

    Ok(())
}

/// Validate that an email address has a local part and a domain
pub fn validate_email(email: &str) -> ReconcileResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ReconcileError::Validation(format!(
            "Email '{}' is not a valid address",
            email
        ))),
    }
}

/// Stricter employee validator: checks phone format and email shape as well
pub struct EnhancedEmployeeValidator;

impl EmployeeValidator for EnhancedEmployeeValidator {
    fn validate_employee(&self, employee: &Employee) -> ReconcileResult<()> {
        validate_employee_name(&employee.name)?;
        validate_phone(&employee.phone)?;

        if let Some(ref email) = employee.email {
            validate_email(email)?;
        }

        Ok(())
    }
}
