use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::MySqlPool;

const DEMO_EMPLOYEES: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Smith", "bob@example.com"),
    ("Rahul Raman", "rahulraman2603@gmail.com"),
];

/// (employee id, month, amount); paid on the 25th.
const DEMO_SALARIES: &[(u64, &str, f64)] = &[
    (1, "2025-11", 5000.00),
    (1, "2025-10", 5000.00),
    (1, "2025-09", 4800.00),
    (1, "2025-08", 4800.00),
    (1, "2025-07", 4700.00),
    (1, "2025-06", 4700.00),
    (2, "2025-11", 4500.00),
    (2, "2025-10", 4500.00),
    (2, "2025-09", 4400.00),
];

fn pay_date(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-25"), "%Y-%m-%d").ok()
}

/// Inserts the demo directory when the tables are empty. Safe to run on every start.
pub async fn seed_demo_data(pool: &MySqlPool) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to open seed transaction")?;

    let employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(&mut *tx)
        .await?;

    if employees == 0 {
        for (name, email) in DEMO_EMPLOYEES {
            sqlx::query("INSERT INTO employees (name, email) VALUES (?, ?)")
                .bind(*name)
                .bind(*email)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to seed employee {email}"))?;
        }
        tracing::info!(count = DEMO_EMPLOYEES.len(), "Seeded demo employees");
    }

    let salaries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee_salaries")
        .fetch_one(&mut *tx)
        .await?;

    if salaries == 0 {
        for (employee_id, month, amount) in DEMO_SALARIES {
            sqlx::query(
                r#"
                INSERT INTO employee_salaries (employee_id, month, amount, payment_date)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(*employee_id)
            .bind(*month)
            .bind(*amount)
            .bind(pay_date(month))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to seed salary {month} for {employee_id}"))?;
        }
        tracing::info!(count = DEMO_SALARIES.len(), "Seeded demo salaries");
    }

    tx.commit().await.context("Failed to commit seed data")?;
    Ok(())
}


#[cfg(all(test, feature = "mysql-tests"))]
mod mysql_tests {
    use super::*;

    #[sqlx::test(migrations = false)]
    async fn seeding_without_schema_is_an_error(pool: MySqlPool) {
        assert!(seed_demo_data(&pool).await.is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn seeding_twice_keeps_one_copy(pool: MySqlPool) {
        seed_demo_data(&pool).await.unwrap();
        seed_demo_data(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, DEMO_EMPLOYEES.len() as i64);
    }
}
