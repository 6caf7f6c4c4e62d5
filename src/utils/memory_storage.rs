//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory employee storage for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> ReconcileResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> ReconcileResult<RwLockReadGuard<'_, Vec<Employee>>> {
        self.employees
            .read()
            .map_err(|_| ReconcileError::Storage("employee store lock poisoned".to_string()))
    }

    fn write(&self) -> ReconcileResult<RwLockWriteGuard<'_, Vec<Employee>>> {
        self.employees
            .write()
            .map_err(|_| ReconcileError::Storage("employee store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EmployeeStorage for MemoryStorage {
    async fn save_employee(&mut self, employee: &Employee) -> ReconcileResult<()> {
        let mut employees = self.write()?;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => employees.push(employee.clone()),
        }
        Ok(())
    }

    async fn get_employee(&self, employee_id: &str) -> ReconcileResult<Option<Employee>> {
        Ok(self.read()?.iter().find(|e| e.id == employee_id).cloned())
    }

    async fn list_employees(&self) -> ReconcileResult<Vec<Employee>> {
        Ok(self.read()?.clone())
    }

    async fn delete_employee(&mut self, employee_id: &str) -> ReconcileResult<()> {
        let mut employees = self.write()?;
        let before = employees.len();
        employees.retain(|e| e.id != employee_id);

        if employees.len() == before {
            Err(ReconcileError::EmployeeNotFound(employee_id.to_string()))
        } else {
            Ok(())
        }
    }
}
