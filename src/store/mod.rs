//! Persistence seams for employees and salary rows.
//!
//! Production uses [`MySqlStore`]; tests swap in the in-memory double.

use async_trait::async_trait;

use crate::model::employee::{Employee, NewEmployee};
use crate::model::salary::SalaryRecord;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Case-insensitive exact match on email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error>;

    /// Inserts the employee, or returns the row that already owns the email
    /// when a concurrent insert won the unique index.
    async fn insert_or_get(&self, employee: NewEmployee) -> Result<Employee, sqlx::Error>;
}

#[async_trait]
pub trait SalaryStore: Send + Sync {
    /// All salary rows of one employee, newest month first.
    async fn history_for(&self, employee_id: u64) -> Result<Vec<SalaryRecord>, sqlx::Error>;
}
