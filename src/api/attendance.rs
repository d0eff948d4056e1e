use crate::{
    api::shared::ApiResponse,
    error::{AppError, AppResult},
    model::attendance::{Attendance, NewAttendance},
    store::{Store, StoreError},
    utils::clock::Clock,
    validation::attendance::{AttendanceInput, resolve_employee, validate},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::{IntoParams, ToSchema};

/// Body for marking or correcting attendance.
///
/// `employee_name` is filled in from the employee record, never from the body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AttendancePayload {
    /// `employee_id` of the employee
    #[schema(example = "EMP-001", value_type = String)]
    pub employee: Option<String>,
    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
    #[schema(example = "Present", value_type = String)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Only return records for this employee
    #[schema(example = "EMP-001")]
    pub employee_id: Option<String>,
}

fn duplicate_on(on_update: bool) -> impl FnOnce(StoreError) -> AppError {
    move |e| match e {
        StoreError::UniqueViolation => AppError::DuplicateAttendance { on_update },
        other => other.into(),
    }
}

/// Attendance list, newest date first
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Attendance records", body = Object, example = json!({
            "message": "Attendance records for employee EMP-001",
            "count": 1,
            "data": [{
                "id": 1,
                "employee": "EMP-001",
                "employee_name": "John Doe",
                "date": "2024-06-01",
                "status": "Present"
            }]
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance<S: Store>(
    store: web::Data<S>,
    query: web::Query<AttendanceFilter>,
) -> AppResult<HttpResponse> {
    let employee_id = query.employee_id.as_deref().filter(|id| !id.is_empty());

    let records = store.list_attendance(employee_id).await?;

    let message = match employee_id {
        Some(id) => format!("Attendance records for employee {}", id),
        None => "All attendance records retrieved".to_string(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::list(message, records)))
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Attendance marked successfully", body = Object, example = json!({
            "message": "Attendance marked successfully",
            "data": {
                "id": 1,
                "employee": "EMP-001",
                "employee_name": "John Doe",
                "date": "2024-06-01",
                "status": "Present"
            }
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": { "date": ["Attendance already marked for this employee on this date."] }
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_attendance", skip(store, clock, payload))]
pub async fn create_attendance<S: Store>(
    store: web::Data<S>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<AttendancePayload>,
) -> AppResult<HttpResponse> {
    let store = store.get_ref();
    let input = AttendanceInput::from_payload(&payload)?;
    let employee = resolve_employee(store, &input.employee).await?;
    let status = validate(store, clock.get_ref(), &input, None).await?;

    let record = store
        .insert_attendance(NewAttendance {
            employee: employee.employee_id,
            employee_name: employee.full_name,
            date: input.date,
            status,
        })
        .await
        .map_err(duplicate_on(false))?;

    info!(id = record.id, employee_id = %record.employee, date = %record.date, "Attendance marked");

    Ok(HttpResponse::Created().json(ApiResponse::with_data(
        "Attendance marked successfully",
        record,
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record found", body = Object),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "message": "Attendance record not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_attendance<S: Store>(
    store: web::Data<S>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let record = store
        .find_attendance(path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Attendance record"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Attendance record retrieved successfully",
        record,
    )))
}

/// Replace an attendance record
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Attendance updated successfully", body = Object),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": { "date": ["Cannot update: Attendance already exists for this employee on the selected date."] }
        })),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn put_attendance<S: Store>(
    store: web::Data<S>,
    clock: web::Data<dyn Clock>,
    path: web::Path<u64>,
    payload: web::Json<AttendancePayload>,
) -> AppResult<HttpResponse> {
    update_attendance(store.get_ref(), clock.get_ref(), path.into_inner(), &payload, false).await
}

/// Correct part of an attendance record
#[utoipa::path(
    patch,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = AttendancePayload,
    responses(
        (status = 200, description = "Attendance updated successfully", body = Object),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn patch_attendance<S: Store>(
    store: web::Data<S>,
    clock: web::Data<dyn Clock>,
    path: web::Path<u64>,
    payload: web::Json<AttendancePayload>,
) -> AppResult<HttpResponse> {
    update_attendance(store.get_ref(), clock.get_ref(), path.into_inner(), &payload, true).await
}

async fn update_attendance<S: Store>(
    store: &S,
    clock: &dyn Clock,
    id: u64,
    payload: &AttendancePayload,
    partial: bool,
) -> AppResult<HttpResponse> {
    let existing = store
        .find_attendance(id)
        .await?
        .ok_or(AppError::NotFound("Attendance record"))?;

    let input = if partial {
        AttendanceInput::merged(&existing, payload)?
    } else {
        AttendanceInput::from_payload(payload)?
    };

    // the name snapshot only changes when the record moves to another employee
    let employee_name = if input.employee == existing.employee {
        existing.employee_name
    } else {
        resolve_employee(store, &input.employee).await?.full_name
    };

    let status = validate(store, clock, &input, Some(id)).await?;

    let record = Attendance {
        id,
        employee: input.employee,
        employee_name,
        date: input.date,
        status,
    };

    if !store
        .update_attendance(&record)
        .await
        .map_err(duplicate_on(true))?
    {
        return Err(AppError::NotFound("Attendance record"));
    }

    info!(id, partial, "Attendance updated");

    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Attendance updated successfully",
        record,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record deleted", body = Object, example = json!({
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance<S: Store>(
    store: web::Data<S>,
    path: web::Path<u64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let deleted = store.delete_attendance(id).await.map_err(|e| {
        error!(error = %e, id, "Failed to delete attendance record");
        AppError::from(e)
    })?;

    if !deleted {
        return Err(AppError::NotFound("Attendance record"));
    }

    info!(id, "Attendance record deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Attendance record deleted successfully",
    )))
}
