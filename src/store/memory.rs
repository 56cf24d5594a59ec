//! In-memory store double for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{EmployeeStore, SalaryStore};
use crate::model::employee::{Employee, NewEmployee};
use crate::model::salary::SalaryRecord;

#[derive(Default)]
pub struct MemoryStore {
    employees: Mutex<Vec<Employee>>,
    salaries: Mutex<Vec<SalaryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employee(self, id: u64, name: &str, email: &str) -> Self {
        self.employees.lock().unwrap().push(Employee {
            id,
            name: name.to_string(),
            email: email.to_string(),
        });
        self
    }

    pub fn with_salary(self, employee_id: u64, month: &str, amount: f64) -> Self {
        let mut salaries = self.salaries.lock().unwrap();
        let id = salaries.len() as u64 + 1;
        salaries.push(SalaryRecord {
            id,
            employee_id,
            month: month.to_string(),
            amount,
            payment_date: None,
        });
        drop(salaries);
        self
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().unwrap().len()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        let email = email.to_lowercase();
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email.to_lowercase() == email)
            .cloned())
    }

    async fn insert_or_get(&self, employee: NewEmployee) -> Result<Employee, sqlx::Error> {
        let mut employees = self.employees.lock().unwrap();
        if let Some(existing) = employees
            .iter()
            .find(|e| e.email.to_lowercase() == employee.email.to_lowercase())
        {
            return Ok(existing.clone());
        }

        let created = Employee {
            id: employees.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            name: employee.name,
            email: employee.email,
        };
        employees.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl SalaryStore for MemoryStore {
    async fn history_for(&self, employee_id: u64) -> Result<Vec<SalaryRecord>, sqlx::Error> {
        let mut rows: Vec<_> = self
            .salaries
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(rows)
    }
}
