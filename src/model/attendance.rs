use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, mysql::MySqlRow};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// The only two states an attendance record can be in.
///
/// Parsing is case-sensitive: `"present"` is not a valid status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee": "EMP-001",
        "employee_name": "John Doe",
        "date": "2024-06-01",
        "status": "Present"
    })
)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,

    /// `employee_id` of the referenced employee
    #[schema(example = "EMP-001")]
    pub employee: String,

    /// Name of the employee when the record was written
    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

/// A record that has passed validation but has no id yet.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn with_id(self, id: u64) -> Attendance {
        Attendance {
            id,
            employee: self.employee,
            employee_name: self.employee_name,
            date: self.date,
            status: self.status,
        }
    }
}

// status is a plain VARCHAR column, so the row is decoded by hand
impl<'r> FromRow<'r, MySqlRow> for Attendance {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = AttendanceStatus::from_str(&status).map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            employee: row.try_get("employee_id")?,
            employee_name: row.try_get("employee_name")?,
            date: row.try_get("date")?,
            status,
        })
    }
}
