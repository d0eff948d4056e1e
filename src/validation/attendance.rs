use chrono::NaiveDate;
use std::str::FromStr;
use tracing::debug;

use super::required;
use crate::{
    api::attendance::AttendancePayload,
    error::{AppError, AppResult},
    model::{
        attendance::{Attendance, AttendanceStatus},
        employee::Employee,
    },
    store::{AttendanceStore, EmployeeStore},
    utils::clock::Clock,
};

/// Attendance fields after presence checks, before the marking rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceInput {
    pub employee: String,
    pub date: NaiveDate,
    pub status: String,
}

impl AttendanceInput {
    /// Every field must be present and non-blank.
    pub fn from_payload(payload: &AttendancePayload) -> AppResult<Self> {
        Ok(Self {
            employee: required("employee", payload.employee.as_deref())?,
            date: payload.date.ok_or(AppError::MissingField("date"))?,
            status: required("status", payload.status.as_deref())?,
        })
    }

    /// Fields missing from the payload fall back to the stored record.
    pub fn merged(existing: &Attendance, payload: &AttendancePayload) -> AppResult<Self> {
        let employee = match payload.employee.as_deref() {
            Some(employee) => required("employee", Some(employee))?,
            None => existing.employee.clone(),
        };
        let status = match payload.status.as_deref() {
            Some(status) => required("status", Some(status))?,
            None => existing.status.to_string(),
        };

        Ok(Self {
            employee,
            date: payload.date.unwrap_or(existing.date),
            status,
        })
    }
}

/// Looks up the employee an attendance record points at.
pub async fn resolve_employee<S>(store: &S, employee_id: &str) -> AppResult<Employee>
where
    S: EmployeeStore + ?Sized,
{
    store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| AppError::UnknownEmployee(employee_id.to_string()))
}

/// Runs the attendance marking rules, stopping at the first failure:
///
/// 1. `date` must not be after `clock.today()`.
/// 2. No other record may exist for the same employee and date. On update
///    (`existing_id` set) the record being updated does not count.
/// 3. `status` must be exactly `Present` or `Absent`.
///
/// Only existence queries are issued against the store.
pub async fn validate<S>(
    store: &S,
    clock: &dyn Clock,
    input: &AttendanceInput,
    existing_id: Option<u64>,
) -> AppResult<AttendanceStatus>
where
    S: AttendanceStore + ?Sized,
{
    let today = clock.today();
    if input.date > today {
        debug!(date = %input.date, %today, "Attendance date is in the future");
        return Err(AppError::FutureDateRejected);
    }

    if store
        .attendance_exists(&input.employee, input.date, existing_id)
        .await?
    {
        return Err(AppError::DuplicateAttendance {
            on_update: existing_id.is_some(),
        });
    }

    AttendanceStatus::from_str(&input.status).map_err(|_| AppError::InvalidStatus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(employee: Option<&str>, date: Option<NaiveDate>, status: Option<&str>) -> AttendancePayload {
        AttendancePayload {
            employee: employee.map(str::to_string),
            date,
            status: status.map(str::to_string),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn create_payload_requires_every_field() {
        let err = AttendanceInput::from_payload(&payload(None, Some(june(1)), Some("Present")))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField("employee")));

        let err = AttendanceInput::from_payload(&payload(Some("E1"), None, Some("Present")))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField("date")));

        let err =
            AttendanceInput::from_payload(&payload(Some("E1"), Some(june(1)), Some(""))).unwrap_err();
        assert!(matches!(err, AppError::MissingField("status")));
    }

    #[test]
    fn status_is_trimmed_and_blank_counts_as_missing() {
        let input =
            AttendanceInput::from_payload(&payload(Some("E1"), Some(june(1)), Some(" Present ")))
                .unwrap();
        assert_eq!(input.status, "Present");

        let err = AttendanceInput::from_payload(&payload(Some("E1"), Some(june(1)), Some("   ")))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField("status")));
    }

    #[test]
    fn merged_payload_falls_back_to_stored_values() {
        let existing = Attendance {
            id: 3,
            employee: "E1".to_string(),
            employee_name: "Ada".to_string(),
            date: june(1),
            status: AttendanceStatus::Present,
        };

        let input = AttendanceInput::merged(&existing, &payload(None, None, Some("Absent"))).unwrap();
        assert_eq!(
            input,
            AttendanceInput {
                employee: "E1".to_string(),
                date: june(1),
                status: "Absent".to_string(),
            }
        );
    }
}
