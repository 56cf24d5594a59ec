use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::salary::SalaryRecord;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleLoginReq {
    /// Google ID token obtained by the client.
    #[serde(rename = "idToken", default)]
    #[schema(example = "eyJhbGciOiJSUzI1NiIsImtpZCI6...")]
    pub id_token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// A salary history line as the client displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryEntry {
    #[schema(example = "2025-11")]
    pub month: String,
    #[schema(example = 5000.0)]
    pub amount: f64,
    #[schema(example = "2025-11-25", format = "date", value_type = String)]
    pub paid_on: String,
}

impl From<SalaryRecord> for SalaryEntry {
    fn from(record: SalaryRecord) -> Self {
        let paid_on = record.paid_on();
        Self {
            month: record.month,
            amount: record.amount,
            paid_on,
        }
    }
}

/// Profile returned by the Google login; `id` is present only for employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(example = 1, nullable = true)]
    pub id: Option<u64>,
    #[schema(example = "Alice Johnson")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserInfo,
    /// Opaque display token; the server never verifies it.
    #[schema(example = "demo-token-1-1764000000000")]
    pub token: String,
    pub registered: bool,
}
