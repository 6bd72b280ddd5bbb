use actix_web::{HttpResponse, Responder, get, web};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use utoipa::ToSchema;

use crate::store::AttendanceStore;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "Employee Attendance API is running")]
    pub message: String,
    /// "Connected" or "Disconnected"
    #[schema(example = "Connected")]
    pub database: String,
    #[schema(example = "2024-01-01T09:00:00.000Z", format = "date-time", value_type = String)]
    pub timestamp: String,
}

/// Service and database liveness
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up; database state is reported in the body", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(store: web::Data<dyn AttendanceStore>) -> impl Responder {
    let database = match store.ping().await {
        Ok(()) => "Connected",
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            "Disconnected"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Employee Attendance API is running".to_string(),
        database: database.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Employee Attendance Tracker API is running!",
        "docs": "/swagger-ui/",
        "endpoints": {
            "health": "GET /api/health",
            "getAll": "GET /api/attendance",
            "post": "POST /api/attendance",
            "delete": "DELETE /api/attendance/:id",
            "byEmployee": "GET /api/attendance/employee/:employeeID",
            "byDate": "GET /api/attendance/date/:date",
            "stats": "GET /api/stats/dashboard",
            "trends": "GET /api/stats/monthly-trends"
        }
    }))
}
