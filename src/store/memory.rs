use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Months, NaiveDate, Utc};

use super::AttendanceStore;
use crate::error::{StoreError, StoreResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, MonthlyTrend, NewAttendance};

/// Store backed by a `Vec`, with a fixed "today" and per-operation failure
/// injection. Mirrors the ordering rules of the MySQL statements.
pub struct InMemoryAttendanceStore {
    today: NaiveDate,
    failing: HashSet<&'static str>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<AttendanceRecord>,
    last_id: u64,
}

impl InMemoryAttendanceStore {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            failing: HashSet::new(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Makes the named trait method fail on every call.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    fn check(&self, operation: &'static str) -> StoreResult<()> {
        if self.failing.contains(operation) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn select<F>(&self, keep: F) -> Vec<AttendanceRecord>
    where
        F: Fn(&AttendanceRecord) -> bool,
    {
        let inner = self.inner.lock().unwrap();
        inner.rows.iter().filter(|r| keep(r)).cloned().collect()
    }
}

fn newest_date_first(rows: &mut [AttendanceRecord]) {
    rows.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
            .then(b.id.cmp(&a.id))
    });
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn list_all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        self.check("list_all")?;
        let mut rows = self.select(|_| true);
        newest_date_first(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, record: &NewAttendance) -> StoreResult<u64> {
        self.check("insert")?;
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let id = inner.last_id;
        // One second apart so creation order is visible in `created_at`.
        let created_at: DateTime<Utc> =
            DateTime::from_timestamp(1_700_000_000 + id as i64, 0).unwrap();
        inner.rows.push(AttendanceRecord {
            id,
            employee_name: record.employee_name.clone(),
            employee_id: record.employee_id.clone(),
            date: record.date,
            status: record.status,
            created_at,
        });
        Ok(id)
    }

    async fn delete(&self, id: u64) -> StoreResult<u64> {
        self.check("delete")?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok((before - inner.rows.len()) as u64)
    }

    async fn list_by_employee(&self, employee_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        self.check("list_by_employee")?;
        let mut rows = self.select(|r| r.employee_id == employee_id);
        newest_date_first(&mut rows);
        Ok(rows)
    }

    async fn list_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        self.check("list_by_date")?;
        let mut rows = self.select(|r| r.date == date);
        rows.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
        Ok(rows)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        self.check("count_all")?;
        Ok(self.len() as i64)
    }

    async fn count_today(&self, status: AttendanceStatus) -> StoreResult<i64> {
        self.check("count_today")?;
        Ok(self
            .select(|r| r.date == self.today && r.status == status)
            .len() as i64)
    }

    async fn count_unique_employees(&self) -> StoreResult<i64> {
        self.check("count_unique_employees")?;
        let rows = self.select(|_| true);
        let ids: HashSet<&str> = rows.iter().map(|r| r.employee_id.as_str()).collect();
        Ok(ids.len() as i64)
    }

    async fn recent_activity(&self, limit: u32) -> StoreResult<Vec<AttendanceRecord>> {
        self.check("recent_activity")?;
        let mut rows = self.select(|_| true);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn monthly_trends(&self, months: u32) -> StoreResult<Vec<MonthlyTrend>> {
        self.check("monthly_trends")?;
        let cutoff = self
            .today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);

        let mut trends: Vec<MonthlyTrend> = Vec::new();
        for row in self.select(|r| r.date >= cutoff) {
            let month = row.date.format("%Y-%m").to_string();
            match trends
                .iter_mut()
                .find(|t| t.month == month && t.status == row.status)
            {
                Some(t) => t.count += 1,
                None => trends.push(MonthlyTrend {
                    month,
                    status: row.status,
                    count: 1,
                }),
            }
        }
        trends.sort_by(|a, b| b.month.cmp(&a.month).then(a.status.cmp(&b.status)));
        Ok(trends)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check("ping")
    }
}
