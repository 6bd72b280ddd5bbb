use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::AttendanceStore;
use crate::error::StoreResult;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MonthlyTrend, NewAttendance};

const SELECT_RECORD: &str = r#"
    SELECT id, employeeName, employeeID, date, status, created_at
    FROM Attendance
"#;

pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS Attendance (
        id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
        employeeName VARCHAR(255) NOT NULL,
        employeeID VARCHAR(100) NOT NULL,
        date DATE NOT NULL,
        status ENUM('Present', 'Absent') NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

#[derive(Clone, Debug)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_records(
        &self,
        sql: String,
        bind: Option<&str>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        debug!(sql = %sql, "Fetching attendance records");
        let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn list_all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        self.fetch_records(
            format!("{SELECT_RECORD} ORDER BY date DESC, created_at DESC, id DESC"),
            None,
        )
        .await
    }

    async fn insert(&self, record: &NewAttendance) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO Attendance (employeeName, employeeID, date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.employee_name)
        .bind(&record.employee_id)
        .bind(record.date)
        .bind(record.status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn delete(&self, id: u64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM Attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        self.fetch_records(
            format!("{SELECT_RECORD} WHERE employeeID = ? ORDER BY date DESC, created_at DESC, id DESC"),
            Some(employee_id),
        )
        .await
    }

    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("{SELECT_RECORD} WHERE date = ? ORDER BY employeeName");
        debug!(sql = %sql, %date, "Fetching attendance for date");

        Ok(sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Attendance")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn count_today(&self, status: AttendanceStatus) -> StoreResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM Attendance WHERE date = CURDATE() AND status = ?",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn count_unique_employees(&self) -> StoreResult<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT employeeID) FROM Attendance")
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn recent_activity(&self, limit: u32) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("{SELECT_RECORD} ORDER BY created_at DESC, id DESC LIMIT ?");

        Ok(sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn monthly_trends(&self, months: u32) -> StoreResult<Vec<MonthlyTrend>> {
        Ok(sqlx::query_as::<_, MonthlyTrend>(
            r#"
            SELECT
                DATE_FORMAT(date, '%Y-%m') AS month,
                status,
                COUNT(*) AS count
            FROM Attendance
            WHERE date >= DATE_SUB(CURDATE(), INTERVAL ? MONTH)
            GROUP BY month, status
            ORDER BY month DESC, status
            "#,
        )
        .bind(months)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
