use crate::api::attendance::CreateAttendance;
use crate::api::health::HealthResponse;
use crate::api::stats::DashboardStats;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MonthlyTrend};
use utoipa::OpenApi;
use utoipa::openapi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracker

Records daily attendance of employees and summarises it for a dashboard.

### 🔹 Features
- **Attendance records**
  - Record, list, and delete attendance entries
  - Filter by employee or by day
- **Statistics**
  - Dashboard totals for today and all time
  - Monthly Present/Absent trends over the last six months

### 📦 Response Format
- JSON bodies; errors are `{"error": "<message>"}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::attendance_by_employee,
        crate::api::attendance::attendance_by_date,

        crate::api::stats::dashboard,
        crate::api::stats::monthly_trends,

        crate::api::health::health
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            CreateAttendance,
            DashboardStats,
            MonthlyTrend,
            HealthResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance record APIs"),
        (name = "Stats", description = "Dashboard and trend APIs"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Prefix the route attributes are written against.
const DOCUMENTED_PREFIX: &str = "/api";

impl ApiDoc {
    /// The document with every path moved under `api_prefix`, so Swagger UI
    /// matches the routes actually mounted.
    pub fn with_prefix(api_prefix: &str) -> openapi::OpenApi {
        let mut doc = Self::openapi();
        let prefix = api_prefix.trim_end_matches('/');
        if prefix == DOCUMENTED_PREFIX {
            return doc;
        }

        doc.paths.paths = std::mem::take(&mut doc.paths.paths)
            .into_iter()
            .map(|(path, item)| {
                let rest = path.strip_prefix(DOCUMENTED_PREFIX).unwrap_or(&path);
                (format!("{prefix}{rest}"), item)
            })
            .collect();
        doc
    }
}
