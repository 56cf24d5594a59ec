use actix_web::{HttpResponse, web};

use crate::error::ApiError;
use crate::models::EmployeeQuery;
use crate::service::directory::Directory;

/// Find an employee by email
#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("email", Query, description = "Employee email, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "The employee, or null when no employee has this email", body = crate::model::employee::Employee),
        (status = 422, description = "Missing email parameter", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn find_by_email(
    directory: web::Data<Directory>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee = directory.find_employee_by_email(&query.email).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Salary history of an employee, newest month first
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/salary",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Salary history, empty when there is none", body = [crate::models::SalaryEntry]),
        (status = 422, description = "Employee ID is not a number", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Employee"
)]
pub async fn salary_history(
    directory: web::Data<Directory>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let history = directory.get_salary_history(employee_id).await?;
    Ok(HttpResponse::Ok().json(history))
}
