use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::database::HasArguments;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySql, MySqlTypeInfo, MySqlValueRef};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Attendance status. Declaration order matches the `ENUM('Present', 'Absent')`
/// column, so the derived `Ord` sorts the same way MySQL does.
///
/// MySQL reports ENUM columns as text with an ENUM flag, so the status is
/// read and bound as a string rather than through a derived `sqlx::Type`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// "Present or Absent"
    pub fn allowed() -> String {
        AttendanceStatus::iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl sqlx::Type<MySql> for AttendanceStatus {
    fn type_info() -> MySqlTypeInfo {
        <str as sqlx::Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <str as sqlx::Type<MySql>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, MySql> for AttendanceStatus {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as sqlx::Decode<MySql>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

impl<'q> sqlx::Encode<'q, MySql> for AttendanceStatus {
    fn encode_by_ref(&self, buf: &mut <MySql as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
        <&str as sqlx::Encode<MySql>>::encode(self.as_ref(), buf)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employeeName": "Alice Smith",
        "employeeID": "E1",
        "date": "2024-01-01",
        "status": "Present",
        "created_at": "2024-01-01T09:00:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[serde(rename = "employeeName")]
    #[sqlx(rename = "employeeName")]
    #[schema(example = "Alice Smith")]
    pub employee_name: String,

    #[serde(rename = "employeeID")]
    #[sqlx(rename = "employeeID")]
    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A validated record waiting for the store to assign `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_name: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct MonthlyTrend {
    #[schema(example = "2024-01")]
    pub month: String,
    pub status: AttendanceStatus,
    #[schema(example = 42)]
    pub count: i64,
}
