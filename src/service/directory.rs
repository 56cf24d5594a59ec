use std::sync::Arc;

use tracing::debug;

use crate::error::ApiError;
use crate::model::employee::Employee;
use crate::models::SalaryEntry;
use crate::store::{EmployeeStore, SalaryStore};

/// Read-only employee and salary lookups. Absence is an empty result, never an error.
pub struct Directory {
    employees: Arc<dyn EmployeeStore>,
    salaries: Arc<dyn SalaryStore>,
}

impl Directory {
    pub fn new(employees: Arc<dyn EmployeeStore>, salaries: Arc<dyn SalaryStore>) -> Self {
        Self {
            employees,
            salaries,
        }
    }

    pub async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, ApiError> {
        let employee = self.employees.find_by_email(email).await?;
        debug!(found = employee.is_some(), "Employee lookup by email");
        Ok(employee)
    }

    pub async fn get_salary_history(&self, employee_id: u64) -> Result<Vec<SalaryEntry>, ApiError> {
        let rows = self.salaries.history_for(employee_id).await?;
        debug!(employee_id, rows = rows.len(), "Salary history fetched");
        Ok(rows.into_iter().map(SalaryEntry::from).collect())
    }
}
