use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One monthly payment row of `employee_salaries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalaryRecord {
    pub id: u64,
    pub employee_id: u64,
    /// `YYYY-MM`
    pub month: String,
    pub amount: f64,
    pub payment_date: Option<NaiveDate>,
}

impl SalaryRecord {
    /// Day of month shown when a record carries no payment date.
    pub const DEFAULT_PAY_DAY: u32 = 25;

    /// Payment date as shown to clients, falling back to the 25th of the month.
    pub fn paid_on(&self) -> String {
        match self.payment_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => format!("{}-{:02}", self.month, Self::DEFAULT_PAY_DAY),
        }
    }
}
