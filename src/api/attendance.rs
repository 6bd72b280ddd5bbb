use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::store::AttendanceStore;

/// Body of `POST /attendance`. Fields are optional here so that a missing
/// field is answered with the API's own 400 message instead of a parse error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[serde(rename = "employeeName")]
    #[schema(example = "Alice Smith", value_type = String)]
    pub employee_name: Option<String>,
    #[serde(rename = "employeeID")]
    #[schema(example = "E1", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: Option<String>,
    #[schema(example = "Present", value_type = AttendanceStatus)]
    pub status: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Date must be in YYYY-MM-DD format"))
}

impl CreateAttendance {
    pub fn validate(self) -> Result<NewAttendance, ApiError> {
        let (Some(employee_name), Some(employee_id), Some(date), Some(status)) = (
            present(self.employee_name),
            present(self.employee_id),
            present(self.date),
            present(self.status),
        ) else {
            return Err(ApiError::validation("All fields are required"));
        };

        let status = AttendanceStatus::from_str(&status).map_err(|_| {
            ApiError::validation(format!("Status must be {}", AttendanceStatus::allowed()))
        })?;

        Ok(NewAttendance {
            employee_name,
            employee_id,
            date: parse_date(&date)?,
            status,
        })
    }
}

/// List all attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All records, newest date first", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Failed to fetch attendance records"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<dyn AttendanceStore>,
) -> Result<impl Responder, ApiError> {
    let records = store
        .list_all()
        .await
        .map_err(ApiError::store("list_all", "Failed to fetch attendance records"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance recorded successfully",
            "id": 1
        })),
        (status = 400, description = "Missing field or invalid status", body = Object, example = json!({
            "error": "All fields are required"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Failed to create attendance record"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<CreateAttendance>,
) -> Result<impl Responder, ApiError> {
    let record = payload.into_inner().validate()?;

    let id = store
        .insert(&record)
        .await
        .map_err(ApiError::store("insert", "Failed to create attendance record"))?;

    info!(id, employee_id = %record.employee_id, date = %record.date, status = %record.status, "Attendance recorded");

    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance recorded successfully",
        "id": id
    })))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = Object, example = json!({
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Record not found", body = Object, example = json!({
            "error": "Record not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    let affected = store
        .delete(id)
        .await
        .map_err(ApiError::store("delete", "Failed to delete attendance record"))?;

    if affected == 0 {
        return Err(ApiError::not_found("Record not found"));
    }

    info!(id, "Attendance record deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance record deleted successfully"
    })))
}

/// Attendance history of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee identifier, e.g. E1")
    ),
    responses(
        (status = 200, description = "Records of the employee, newest date first", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_employee(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let employee_id = path.into_inner();

    let records = store
        .list_by_employee(&employee_id)
        .await
        .map_err(ApiError::store("list_by_employee", "Failed to fetch employee attendance"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Attendance on one day
#[utoipa::path(
    get,
    path = "/api/attendance/date/{date}",
    params(
        ("date", Path, description = "Day in YYYY-MM-DD format")
    ),
    responses(
        (status = 200, description = "Records for the day, by employee name", body = [AttendanceRecord]),
        (status = 400, description = "Malformed date", body = Object, example = json!({
            "error": "Date must be in YYYY-MM-DD format"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_date(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let date = parse_date(&path.into_inner())?;

    let records = store
        .list_by_date(date)
        .await
        .map_err(ApiError::store("list_by_date", "Failed to fetch attendance for date"))?;

    Ok(HttpResponse::Ok().json(records))
}
