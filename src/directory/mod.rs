//! Employee directory: the people receipt reminders can be sent to

use tracing::info;

use crate::traits::*;
use crate::types::*;

/// Directory manager for adding, removing and searching employees
pub struct EmployeeDirectory<S: EmployeeStorage> {
    storage: S,
    validator: Box<dyn EmployeeValidator>,
}

impl<S: EmployeeStorage> EmployeeDirectory<S> {
    /// Create a new directory
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultEmployeeValidator),
        }
    }

    /// Create a new directory with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn EmployeeValidator>) -> Self {
        Self { storage, validator }
    }

    /// Add an employee; name and phone are required, a blank email is dropped
    pub async fn add(
        &mut self,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> ReconcileResult<Employee> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        let employee = Employee::new(name.trim().to_string(), phone.trim().to_string(), email);

        self.validator.validate_employee(&employee)?;
        self.storage.save_employee(&employee).await?;

        info!(employee_id = %employee.id, "Added employee");
        Ok(employee)
    }

    /// Get an employee by ID, returning an error if not found
    pub async fn get(&self, employee_id: &str) -> ReconcileResult<Employee> {
        self.storage
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| ReconcileError::EmployeeNotFound(employee_id.to_string()))
    }

    /// Remove an employee
    pub async fn remove(&mut self, employee_id: &str) -> ReconcileResult<()> {
        if self.storage.get_employee(employee_id).await?.is_none() {
            return Err(ReconcileError::EmployeeNotFound(employee_id.to_string()));
        }

        self.storage.delete_employee(employee_id).await?;
        info!(employee_id, "Removed employee");
        Ok(())
    }

    /// List employees in insertion order, optionally narrowed by a search term
    pub async fn list(&self, filter: Option<&str>) -> ReconcileResult<Vec<Employee>> {
        let employees = self.storage.list_employees().await?;
        Ok(match filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(term) => employees
                .into_iter()
                .filter(|e| e.matches_filter(term))
                .collect(),
            None => employees,
        })
    }
}
