use crate::{
    api::shared::ApiResponse,
    error::{AppError, AppResult},
    model::employee::Employee,
    store::{Store, StoreError},
    validation::employee::{validate_create, validate_update},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: Option<String>,
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: Option<String>,
    #[schema(example = "Engineering", value_type = String)]
    pub department: Option<String>,
}

/// `employee_id` cannot be changed; it is ignored if sent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee created successfully",
            "data": {
                "employee_id": "EMP-001",
                "full_name": "John Doe",
                "email": "john@email.com",
                "department": "Engineering"
            }
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": { "employee_id": ["Employee with this ID already exists."] }
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(store, payload))]
pub async fn create_employee<S: Store>(
    store: web::Data<S>,
    payload: web::Json<CreateEmployee>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();
    let employee = validate_create(store.get_ref(), &payload).await?;

    match store.insert_employee(&employee).await {
        Ok(()) => {}
        Err(StoreError::UniqueViolation) => {
            // Lost a race with a concurrent insert; validating again names the taken field
            validate_create(store.get_ref(), &payload).await?;
            return Err(AppError::UniqueViolation);
        }
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            return Err(e.into());
        }
    }

    info!(employee_id = %employee.employee_id, "Employee created");

    Ok(HttpResponse::Created().json(ApiResponse::with_data(
        "Employee created successfully",
        employee,
    )))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = Object, example = json!({
            "message": "Employees retrieved successfully",
            "count": 1,
            "data": [{
                "employee_id": "EMP-001",
                "full_name": "John Doe",
                "email": "john@email.com",
                "department": "Engineering"
            }]
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees<S: Store>(store: web::Data<S>) -> AppResult<HttpResponse> {
    let employees = store.list_employees().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        "Employees retrieved successfully",
        employees,
    )))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Object, example = json!({
            "message": "Employee retrieved successfully",
            "data": {
                "employee_id": "EMP-001",
                "full_name": "John Doe",
                "email": "john@email.com",
                "department": "Engineering"
            }
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee<S: Store>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();

    let employee = store
        .find_employee(&employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Employee retrieved successfully",
        employee,
    )))
}

/// Replace Employee details
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Employee updated successfully",
            "data": {
                "employee_id": "EMP-001",
                "full_name": "John Doe",
                "email": "john@email.com",
                "department": "Finance"
            }
        })),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn put_employee<S: Store>(
    store: web::Data<S>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> AppResult<HttpResponse> {
    update_employee(store.get_ref(), &path.into_inner(), &payload, false).await
}

/// Update some Employee details
#[utoipa::path(
    patch,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn patch_employee<S: Store>(
    store: web::Data<S>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> AppResult<HttpResponse> {
    update_employee(store.get_ref(), &path.into_inner(), &payload, true).await
}

async fn update_employee<S: Store>(
    store: &S,
    employee_id: &str,
    payload: &UpdateEmployee,
    partial: bool,
) -> AppResult<HttpResponse> {
    let existing = store
        .find_employee(employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    let employee = validate_update(existing, payload, partial)?;

    if !store.update_employee(&employee).await? {
        return Err(AppError::NotFound("Employee"));
    }

    info!(employee_id, partial, "Employee updated");

    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Employee updated successfully",
        employee,
    )))
}

/// Delete Employee
///
/// Every attendance record of the employee is deleted with it.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee 'John Doe' deleted successfully"
        })),
        (status = 400, description = "Deletion failed", body = Object, example = json!({
            "message": "Error deleting employee",
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee<S: Store>(store: web::Data<S>, path: web::Path<String>) -> HttpResponse {
    let employee_id = path.into_inner();

    match remove_employee(store.get_ref(), &employee_id).await {
        Ok(employee) => {
            info!(%employee_id, "Employee deleted");

            HttpResponse::Ok().json(ApiResponse::message(format!(
                "Employee '{}' deleted successfully",
                employee.full_name
            )))
        }
        Err(e) => {
            error!(error = %e, %employee_id, "Failed to delete employee");

            HttpResponse::BadRequest().json(json!({
                "message": "Error deleting employee",
                "error": e.to_string()
            }))
        }
    }
}

async fn remove_employee<S: Store>(store: &S, employee_id: &str) -> AppResult<Employee> {
    let employee = store
        .find_employee(employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    if !store.delete_employee(employee_id).await? {
        return Err(AppError::NotFound("Employee"));
    }

    Ok(employee)
}
