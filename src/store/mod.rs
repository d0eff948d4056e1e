use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{
    attendance::{Attendance, NewAttendance},
    employee::Employee,
};

pub mod mysql;

pub use mysql::MySqlStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A storage-level unique key rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn employee_id_exists(&self, employee_id: &str) -> StoreResult<bool>;

    async fn email_exists(&self, email: &str) -> StoreResult<bool>;

    async fn insert_employee(&self, employee: &Employee) -> StoreResult<()>;

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// All employees ordered by `employee_id`.
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;

    /// Overwrites name, email and department. Returns false if no such employee.
    async fn update_employee(&self, employee: &Employee) -> StoreResult<bool>;

    /// Removes the employee and every attendance record referencing it.
    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Whether a record exists for `(employee_id, date)`, ignoring `exclude_id`.
    async fn attendance_exists(
        &self,
        employee_id: &str,
        date: NaiveDate,
        exclude_id: Option<u64>,
    ) -> StoreResult<bool>;

    async fn insert_attendance(&self, record: NewAttendance) -> StoreResult<Attendance>;

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<Attendance>>;

    /// Newest date first, optionally restricted to one employee.
    async fn list_attendance(&self, employee_id: Option<&str>) -> StoreResult<Vec<Attendance>>;

    async fn update_attendance(&self, record: &Attendance) -> StoreResult<bool>;

    async fn delete_attendance(&self, id: u64) -> StoreResult<bool>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: EmployeeStore + AttendanceStore + 'static {}

impl<T> Store for T where T: EmployeeStore + AttendanceStore + 'static {}
