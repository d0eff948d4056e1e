use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Business identifier, immutable once created
    #[schema(example = "EMP-001", max_length = 50)]
    pub employee_id: String,

    #[schema(example = "John Doe", max_length = 200)]
    pub full_name: String,

    #[schema(example = "john.doe@company.com", max_length = 200)]
    pub email: String,

    #[schema(example = "Engineering", max_length = 100)]
    pub department: String,
}

// Widths of the `employees` columns.
impl Employee {
    pub const EMPLOYEE_ID_MAX_LEN: usize = 50;
    pub const FULL_NAME_MAX_LEN: usize = 200;
    pub const EMAIL_MAX_LEN: usize = 200;
    pub const DEPARTMENT_MAX_LEN: usize = 100;
}
