use crate::error::ErrorBody;
use crate::model::employee::Employee;
use crate::models::{AuthResponse, GoogleLoginReq, SalaryEntry, UserInfo};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Directory API",
        version = "1.0.0",
        description = r#"
## Employee directory and payroll lookup

- **Employee lookup** by email (case-insensitive)
- **Salary history** per employee, newest month first
- **Login with Google**: the ID token is checked against Google's tokeninfo
  endpoint and matched to an employee record

The token returned by the login is an opaque display string, not a credential.

Errors share one body: `{"error", "message", "status"}`.
"#,
    ),
    paths(
        crate::api::employee::find_by_email,
        crate::api::employee::salary_history,
        crate::auth::handlers::google_login
    ),
    components(
        schemas(
            Employee,
            SalaryEntry,
            GoogleLoginReq,
            UserInfo,
            AuthResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory and salary APIs"),
        (name = "Auth", description = "Google login"),
    )
)]
pub struct ApiDoc;
