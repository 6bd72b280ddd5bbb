use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{ApiError, StoreResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MonthlyTrend};
use crate::store::AttendanceStore;

pub const RECENT_ACTIVITY_LIMIT: u32 = 5;
pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "totalRecords": 120,
    "presentToday": 14,
    "absentToday": 2,
    "uniqueEmployees": 18,
    "recentActivity": []
}))]
pub struct DashboardStats {
    pub total_records: i64,
    pub present_today: i64,
    pub absent_today: i64,
    pub unique_employees: i64,
    pub recent_activity: Vec<AttendanceRecord>,
}

/// Falls back to the empty value when a dashboard sub-query failed.
fn settle<T: Default>(field: &'static str, result: StoreResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(error = %e, field, "Dashboard sub-query failed, using default");
        T::default()
    })
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    responses(
        (status = 200, description = "Aggregate counts and latest records. A failing sub-query reports 0 or [] for its field.", body = DashboardStats)
    ),
    tag = "Stats"
)]
pub async fn dashboard(store: web::Data<dyn AttendanceStore>) -> impl Responder {
    // Independent reads; no shared snapshot across them.
    let (total, present, absent, unique, recent) = futures::join!(
        store.count_all(),
        store.count_today(AttendanceStatus::Present),
        store.count_today(AttendanceStatus::Absent),
        store.count_unique_employees(),
        store.recent_activity(RECENT_ACTIVITY_LIMIT),
    );

    HttpResponse::Ok().json(DashboardStats {
        total_records: settle("totalRecords", total),
        present_today: settle("presentToday", present),
        absent_today: settle("absentToday", absent),
        unique_employees: settle("uniqueEmployees", unique),
        recent_activity: settle("recentActivity", recent),
    })
}

/// Monthly attendance trends
#[utoipa::path(
    get,
    path = "/api/stats/monthly-trends",
    responses(
        (status = 200, description = "Counts per month and status over the last six months", body = [MonthlyTrend]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Failed to fetch trends"
        }))
    ),
    tag = "Stats"
)]
pub async fn monthly_trends(
    store: web::Data<dyn AttendanceStore>,
) -> Result<impl Responder, ApiError> {
    let trends = store
        .monthly_trends(TREND_MONTHS)
        .await
        .map_err(ApiError::store("monthly_trends", "Failed to fetch trends"))?;

    Ok(HttpResponse::Ok().json(trends))
}
