use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, info};

use super::{EmployeeStore, SalaryStore};
use crate::db::is_unique_violation;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::salary::SalaryRecord;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email
            FROM employees
            WHERE LOWER(email) = LOWER(?)
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_or_get(&self, employee: NewEmployee) -> Result<Employee, sqlx::Error> {
        let result = sqlx::query(r#"INSERT INTO employees (name, email) VALUES (?, ?)"#)
            .bind(&employee.name)
            .bind(&employee.email)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_id();
                info!(employee_id = id, "Employee created");
                Ok(Employee {
                    id,
                    name: employee.name,
                    email: employee.email,
                })
            }
            Err(e) if is_unique_violation(&e) => {
                debug!("Email already registered, re-reading existing employee");
                self.find_by_email(&employee.email)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SalaryStore for MySqlStore {
    async fn history_for(&self, employee_id: u64) -> Result<Vec<SalaryRecord>, sqlx::Error> {
        sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT id, employee_id, month, amount, payment_date
            FROM employee_salaries
            WHERE employee_id = ?
            ORDER BY month DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
    }
}
