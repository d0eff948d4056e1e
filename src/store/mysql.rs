use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{AttendanceStore, EmployeeStore, StoreError, StoreResult};
use crate::model::{
    attendance::{Attendance, NewAttendance},
    employee::Employee,
};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::UniqueViolation
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn employee_id_exists(&self, employee_id: &str) -> StoreResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE employee_id = ?",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn insert_employee(&self, employee: &Employee) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department
            FROM employees
            WHERE employee_id = ?
            "#,
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, full_name, email, department
            FROM employees
            ORDER BY employee_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn update_employee(&self, employee: &Employee) -> StoreResult<bool> {
        // MySQL reports 0 affected rows for an unchanged row, so existence is checked first
        if !self.employee_id_exists(&employee.employee_id).await? {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE employees
            SET full_name = ?, email = ?, department = ?
            WHERE employee_id = ?
            "#,
        )
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.employee_id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(true)
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool> {
        // attendance rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn attendance_exists(
        &self,
        employee_id: &str,
        date: NaiveDate,
        exclude_id: Option<u64>,
    ) -> StoreResult<bool> {
        let count = match exclude_id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ? AND id <> ?",
                )
                .bind(employee_id)
                .bind(date)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ?",
                )
                .bind(employee_id)
                .bind(date)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(count > 0)
    }

    async fn insert_attendance(&self, record: NewAttendance) -> StoreResult<Attendance> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, employee_name, date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.employee)
        .bind(&record.employee_name)
        .bind(record.date)
        .bind(record.status.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        let id = result.last_insert_id();
        debug!(id, employee_id = %record.employee, "Inserted attendance row");

        Ok(record.with_id(id))
    }

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<Attendance>> {
        let record = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, employee_id, employee_name, date, status
            FROM attendance
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_attendance(&self, employee_id: Option<&str>) -> StoreResult<Vec<Attendance>> {
        let records = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, Attendance>(
                    r#"
                    SELECT id, employee_id, employee_name, date, status
                    FROM attendance
                    WHERE employee_id = ?
                    ORDER BY date DESC, id DESC
                    "#,
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Attendance>(
                    r#"
                    SELECT id, employee_id, employee_name, date, status
                    FROM attendance
                    ORDER BY date DESC, id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    async fn update_attendance(&self, record: &Attendance) -> StoreResult<bool> {
        if self.find_attendance(record.id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE attendance
            SET employee_id = ?, employee_name = ?, date = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.employee)
        .bind(&record.employee_name)
        .bind(record.date)
        .bind(record.status.to_string())
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(true)
    }

    async fn delete_attendance(&self, id: u64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
