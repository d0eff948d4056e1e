use crate::api::attendance::{AttendanceFilter, AttendancePayload};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "1.0.0",
        description = r#"
## Human Resource Management System

Record keeping for employees and their daily attendance.

### Features
- **Employees**
  - Create, list, view, update and delete employee records
  - `employee_id` and `email` are unique
- **Attendance**
  - One `Present` / `Absent` mark per employee per day
  - Dates in the future are rejected
  - Deleting an employee deletes their attendance

### Response Format
Every response is wrapped in an envelope:
`{ "message": string, "count"?: integer, "data"?: object|array, "errors"?: object }`.
Validation failures return `400` with `errors` mapping each field to its messages.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::put_employee,
        crate::api::employee::patch_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::put_attendance,
        crate::api::attendance::patch_attendance,
        crate::api::attendance::delete_attendance
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            Attendance,
            AttendanceStatus,
            AttendancePayload,
            AttendanceFilter
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
