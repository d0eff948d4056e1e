#![allow(dead_code, unused_macros)]

use actix_web::web::Data;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hrms::model::attendance::{Attendance, AttendanceStatus, NewAttendance};
use hrms::model::employee::Employee;
use hrms::store::{AttendanceStore, EmployeeStore, StoreError, StoreResult};
use hrms::utils::clock::{Clock, FixedClock};

/// Store backed by maps, enforcing the same keys as the MySQL schema:
/// unique `employee_id`, unique `email`, unique `(employee, date)` and the
/// cascading foreign key from attendance to employee.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    employees: BTreeMap<String, Employee>,
    attendance: BTreeMap<u64, Attendance>,
    next_id: u64,
}

impl State {
    fn date_taken(&self, employee_id: &str, date: NaiveDate, exclude_id: Option<u64>) -> bool {
        self.attendance
            .values()
            .any(|a| a.employee == employee_id && a.date == date && Some(a.id) != exclude_id)
    }
}

fn missing_employee(employee_id: &str) -> StoreError {
    StoreError::Database(sqlx::Error::Protocol(format!(
        "foreign key constraint fails: no employee {employee_id}"
    )))
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn employee_id_exists(&self, employee_id: &str) -> StoreResult<bool> {
        Ok(self.state.lock().unwrap().employees.contains_key(employee_id))
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.employees.values().any(|e| e.email == email))
    }

    async fn insert_employee(&self, employee: &Employee) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.employees.contains_key(&employee.employee_id)
            || state.employees.values().any(|e| e.email == employee.email)
        {
            return Err(StoreError::UniqueViolation);
        }
        state
            .employees
            .insert(employee.employee_id.clone(), employee.clone());
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.state.lock().unwrap().employees.get(employee_id).cloned())
    }

    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.state.lock().unwrap().employees.values().cloned().collect())
    }

    async fn update_employee(&self, employee: &Employee) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state
            .employees
            .values()
            .any(|e| e.email == employee.email && e.employee_id != employee.employee_id)
        {
            return Err(StoreError::UniqueViolation);
        }
        match state.employees.get_mut(&employee.employee_id) {
            Some(stored) => {
                *stored = employee.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state.employees.remove(employee_id).is_none() {
            return Ok(false);
        }
        state.attendance.retain(|_, a| a.employee != employee_id);
        Ok(true)
    }
}

#[async_trait]
impl AttendanceStore for InMemoryStore {
    async fn attendance_exists(
        &self,
        employee_id: &str,
        date: NaiveDate,
        exclude_id: Option<u64>,
    ) -> StoreResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .date_taken(employee_id, date, exclude_id))
    }

    async fn insert_attendance(&self, record: NewAttendance) -> StoreResult<Attendance> {
        let mut state = self.state.lock().unwrap();
        if !state.employees.contains_key(&record.employee) {
            return Err(missing_employee(&record.employee));
        }
        if state.date_taken(&record.employee, record.date, None) {
            return Err(StoreError::UniqueViolation);
        }
        state.next_id += 1;
        let record = record.with_id(state.next_id);
        state.attendance.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<Attendance>> {
        Ok(self.state.lock().unwrap().attendance.get(&id).cloned())
    }

    async fn list_attendance(&self, employee_id: Option<&str>) -> StoreResult<Vec<Attendance>> {
        let state = self.state.lock().unwrap();
        let mut records: Vec<Attendance> = state
            .attendance
            .values()
            .filter(|a| employee_id.is_none_or(|id| a.employee == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn update_attendance(&self, record: &Attendance) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        if !state.attendance.contains_key(&record.id) {
            return Ok(false);
        }
        if !state.employees.contains_key(&record.employee) {
            return Err(missing_employee(&record.employee));
        }
        if state.date_taken(&record.employee, record.date, Some(record.id)) {
            return Err(StoreError::UniqueViolation);
        }
        state.attendance.insert(record.id, record.clone());
        Ok(true)
    }

    async fn delete_attendance(&self, id: u64) -> StoreResult<bool> {
        Ok(self.state.lock().unwrap().attendance.remove(&id).is_some())
    }
}

/// "Today" for every test unless a test picks its own clock.
pub fn today() -> NaiveDate {
    date(2024, 6, 10)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn employee(employee_id: &str, full_name: &str, email: &str) -> Employee {
    Employee {
        employee_id: employee_id.to_string(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        department: "Engineering".to_string(),
    }
}

pub struct TestContext {
    pub store: Data<InMemoryStore>,
    pub clock: Data<dyn Clock>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_today(today())
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            store: Data::new(InMemoryStore::default()),
            clock: Data::from(Arc::new(FixedClock(today)) as Arc<dyn Clock>),
        }
    }

    pub async fn seed_employee(&self, employee_id: &str, full_name: &str, email: &str) -> Employee {
        let employee = employee(employee_id, full_name, email);
        self.store.insert_employee(&employee).await.unwrap();
        employee
    }

    pub async fn seed_attendance(
        &self,
        employee: &Employee,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Attendance {
        self.store
            .insert_attendance(NewAttendance {
                employee: employee.employee_id.clone(),
                employee_name: employee.full_name.clone(),
                date,
                status,
            })
            .await
            .unwrap()
    }
}

/// Builds the routed app around a `TestContext`, the same way `main` does.
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data($ctx.store.clone())
                .app_data($ctx.clock.clone())
                .configure(|cfg| {
                    hrms::routes::configure::<crate::common::InMemoryStore>(cfg, "/api")
                }),
        )
        .await
    };
}

/// Sends a `TestRequest` and returns the status with the JSON body.
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
