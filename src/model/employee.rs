use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice Johnson",
        "email": "alice@example.com"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Alice Johnson")]
    pub name: String,

    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Fields needed to insert an employee; the id comes from the database.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
}
