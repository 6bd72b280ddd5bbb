use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreResult;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MonthlyTrend, NewAttendance};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlAttendanceStore;

/// Persistence for attendance records.
///
/// Every method is one independent statement against the store; callers that
/// combine several of them get no snapshot guarantee across calls. "Today" is
/// whatever date the store itself considers current.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// All records, newest `date` first, ties by creation time descending.
    async fn list_all(&self) -> StoreResult<Vec<AttendanceRecord>>;

    /// Inserts a record and returns its freshly assigned id.
    async fn insert(&self, record: &NewAttendance) -> StoreResult<u64>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete(&self, id: u64) -> StoreResult<u64>;

    async fn list_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records on `date`, ordered by employee name.
    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>>;

    async fn count_all(&self) -> StoreResult<i64>;

    async fn count_today(&self, status: AttendanceStatus) -> StoreResult<i64>;

    async fn count_unique_employees(&self) -> StoreResult<i64>;

    /// The `limit` most recently created records.
    async fn recent_activity(&self, limit: u32) -> StoreResult<Vec<AttendanceRecord>>;

    /// Per month and status counts for records dated within the trailing
    /// `months` months, month descending then status.
    async fn monthly_trends(&self, months: u32) -> StoreResult<Vec<MonthlyTrend>>;

    async fn ping(&self) -> StoreResult<()>;
}
