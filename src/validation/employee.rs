use tracing::debug;

use super::required_max;
use crate::{
    api::employee::{CreateEmployee, UpdateEmployee},
    error::{AppError, AppResult},
    model::employee::Employee,
    store::EmployeeStore,
};

/// Validates a new employee against the store.
///
/// Blank or overlong fields are reported first, one at a time. A taken
/// `employee_id` and a taken `email` are then reported together. Nothing is
/// written.
pub async fn validate_create<S>(store: &S, payload: &CreateEmployee) -> AppResult<Employee>
where
    S: EmployeeStore + ?Sized,
{
    let employee = Employee {
        employee_id: required_max(
            "employee_id",
            payload.employee_id.as_deref(),
            Employee::EMPLOYEE_ID_MAX_LEN,
        )?,
        full_name: required_max(
            "full_name",
            payload.full_name.as_deref(),
            Employee::FULL_NAME_MAX_LEN,
        )?,
        email: required_max(
            "email",
            payload.email.as_deref(),
            Employee::EMAIL_MAX_LEN,
        )?,
        department: required_max(
            "department",
            payload.department.as_deref(),
            Employee::DEPARTMENT_MAX_LEN,
        )?,
    };

    let mut taken = Vec::new();

    if store.employee_id_exists(&employee.employee_id).await? {
        debug!(employee_id = %employee.employee_id, "Employee id already taken");
        taken.push(AppError::DuplicateIdentifier);
    }

    if store.email_exists(&employee.email).await? {
        debug!(email = %employee.email, "Employee email already taken");
        taken.push(AppError::DuplicateEmail);
    }

    match AppError::combine(taken) {
        Some(err) => Err(err),
        None => Ok(employee),
    }
}

/// Applies an update onto the stored employee.
///
/// A full update needs every editable field; a partial one keeps whatever is
/// not supplied. Identifier and email uniqueness are not re-checked here.
pub fn validate_update(
    existing: Employee,
    payload: &UpdateEmployee,
    partial: bool,
) -> AppResult<Employee> {
    fn field(
        name: &'static str,
        value: Option<&str>,
        max_len: usize,
        current: String,
        partial: bool,
    ) -> AppResult<String> {
        match value {
            None if partial => Ok(current),
            value => required_max(name, value, max_len),
        }
    }

    Ok(Employee {
        full_name: field(
            "full_name",
            payload.full_name.as_deref(),
            Employee::FULL_NAME_MAX_LEN,
            existing.full_name,
            partial,
        )?,
        email: field(
            "email",
            payload.email.as_deref(),
            Employee::EMAIL_MAX_LEN,
            existing.email,
            partial,
        )?,
        department: field(
            "department",
            payload.department.as_deref(),
            Employee::DEPARTMENT_MAX_LEN,
            existing.department,
            partial,
        )?,
        employee_id: existing.employee_id,
    })
}
