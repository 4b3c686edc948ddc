// PostgreSQL implementation of TimesheetRepository.
//
// Responsibilities
// - Own every SQL statement for timesheets and entries.
// - Classify store failures through SQLSTATE kinds, never through message text.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::error::ErrorKind;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{debug, error};

use crate::modules::timesheets::core::errors::TimesheetError;
use crate::modules::timesheets::core::ports::TimesheetRepository;
use crate::modules::timesheets::core::timesheet::{
    EntryDraft, Timesheet, TimesheetEntry, TimesheetFilter, TimesheetStats,
};

const SELECT_TIMESHEET: &str = "SELECT id, employee_name, department, month, year, \
     total_working_days, created_at FROM timesheets";

type TxFuture<'t, T> = Pin<Box<dyn Future<Output = Result<T, TimesheetError>> + Send + 't>>;

#[derive(sqlx::FromRow)]
struct TimesheetRow {
    id: i64,
    employee_name: String,
    department: String,
    month: i32,
    year: i32,
    total_working_days: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<TimesheetRow> for Timesheet {
    fn from(row: TimesheetRow) -> Self {
        Self {
            id: row.id,
            employee_name: row.employee_name,
            department: row.department,
            month: row.month,
            year: row.year,
            total_working_days: row.total_working_days,
            created_at: row.created_at,
            entries: Vec::new(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i64,
    timesheet_id: i64,
    work_date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    total_hours: Option<f64>,
    overtime_hours: Option<f64>,
    remarks: String,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for TimesheetEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            timesheet_id: row.timesheet_id,
            work_date: row.work_date,
            start_time: row.start_time,
            end_time: row.end_time,
            total_hours: row.total_hours,
            overtime_hours: row.overtime_hours,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    days_filled: i64,
    total_hours: f64,
    overtime_hours: f64,
}

pub struct PostgresTimesheetRepository {
    pool: PgPool,
}

impl PostgresTimesheetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs `work` inside one transaction: commit on `Ok`, rollback on `Err`.
    async fn with_transaction<T, F>(&self, work: F) -> Result<T, TimesheetError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> TxFuture<'t, T> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(classify)?;
        match work(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(classify)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Maps a store failure onto a domain error kind.
fn classify(err: sqlx::Error) -> TimesheetError {
    match &err {
        sqlx::Error::RowNotFound => TimesheetError::NotFound,
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation => TimesheetError::Duplicate,
            ErrorKind::ForeignKeyViolation => TimesheetError::NotFound,
            _ => {
                error!(code = ?db.code(), error = %db, "database error");
                TimesheetError::Backend(err.to_string())
            }
        },
        _ => {
            error!(error = %err, "storage error");
            TimesheetError::Backend(err.to_string())
        }
    }
}

fn affected_one(rows_affected: u64) -> Result<(), TimesheetError> {
    if rows_affected == 0 {
        return Err(TimesheetError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl TimesheetRepository for PostgresTimesheetRepository {
    async fn create(&self, timesheet: &mut Timesheet) -> Result<i64, TimesheetError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO timesheets (employee_name, department, month, year, total_working_days)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(&timesheet.employee_name)
        .bind(&timesheet.department)
        .bind(timesheet.month)
        .bind(timesheet.year)
        .bind(timesheet.total_working_days)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        timesheet.id = id;
        timesheet.created_at = created_at;
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Timesheet, TimesheetError> {
        let row: TimesheetRow = sqlx::query_as(&format!("{SELECT_TIMESHEET} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(TimesheetError::NotFound)?;

        let entries: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, timesheet_id, work_date, start_time, end_time,
                   total_hours::float8 AS total_hours,
                   overtime_hours::float8 AS overtime_hours,
                   remarks, created_at
            FROM timesheet_entries
            WHERE timesheet_id = $1
            ORDER BY work_date ASC, id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?;

        let mut timesheet = Timesheet::from(row);
        timesheet.entries = entries.into_iter().map(TimesheetEntry::from).collect();
        Ok(timesheet)
    }

    async fn list(&self, filter: &TimesheetFilter) -> Result<Vec<Timesheet>, TimesheetError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_TIMESHEET);
        builder.push(" WHERE TRUE");
        if let Some(employee_name) = &filter.employee_name {
            builder.push(" AND employee_name = ").push_bind(employee_name);
        }
        if let Some(month) = filter.month {
            builder.push(" AND month = ").push_bind(month);
        }
        if let Some(year) = filter.year {
            builder.push(" AND year = ").push_bind(year);
        }
        builder.push(" ORDER BY year DESC, month DESC, id DESC");

        let rows: Vec<TimesheetRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        debug!(count = rows.len(), "timesheets listed");
        Ok(rows.into_iter().map(Timesheet::from).collect())
    }

    async fn update(&self, timesheet: &Timesheet) -> Result<(), TimesheetError> {
        let result = sqlx::query(
            r#"
            UPDATE timesheets
            SET employee_name = $1, department = $2, month = $3, year = $4, total_working_days = $5
            WHERE id = $6
            "#,
        )
        .bind(&timesheet.employee_name)
        .bind(&timesheet.department)
        .bind(timesheet.month)
        .bind(timesheet.year)
        .bind(timesheet.total_working_days)
        .bind(timesheet.id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        affected_one(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<(), TimesheetError> {
        self.with_transaction(move |tx| {
            Box::pin(async move {
                let entries = sqlx::query("DELETE FROM timesheet_entries WHERE timesheet_id = $1")
                    .bind(id)
                    .execute(&mut **tx)
                    .await
                    .map_err(classify)?;
                let header = sqlx::query("DELETE FROM timesheets WHERE id = $1")
                    .bind(id)
                    .execute(&mut **tx)
                    .await
                    .map_err(classify)?;
                affected_one(header.rows_affected())?;
                debug!(id, entries = entries.rows_affected(), "timesheet and entries removed");
                Ok(())
            })
        })
        .await
    }

    async fn add_entry(&self, entry: &mut TimesheetEntry) -> Result<i64, TimesheetError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO timesheet_entries
                (timesheet_id, work_date, start_time, end_time, total_hours, overtime_hours, remarks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at
            "#,
        )
        .bind(entry.timesheet_id)
        .bind(entry.work_date)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.total_hours)
        .bind(entry.overtime_hours)
        .bind(&entry.remarks)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        entry.id = id;
        entry.created_at = created_at;
        Ok(id)
    }

    async fn update_entry(&self, id: i64, draft: &EntryDraft) -> Result<(), TimesheetError> {
        let result = sqlx::query(
            r#"
            UPDATE timesheet_entries
            SET work_date = COALESCE($1, work_date),
                start_time = $2,
                end_time = $3,
                total_hours = $4,
                overtime_hours = $5,
                remarks = $6
            WHERE id = $7
            "#,
        )
        .bind(draft.work_date)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.total_hours)
        .bind(draft.overtime_hours)
        .bind(&draft.remarks)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        affected_one(result.rows_affected())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), TimesheetError> {
        let result = sqlx::query("DELETE FROM timesheet_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        affected_one(result.rows_affected())
    }

    async fn stats(&self, timesheet_id: i64) -> Result<TimesheetStats, TimesheetError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT COUNT(total_hours) AS days_filled,
                   COALESCE(SUM(total_hours), 0)::float8 AS total_hours,
                   COALESCE(SUM(overtime_hours), 0)::float8 AS overtime_hours
            FROM timesheet_entries
            WHERE timesheet_id = $1
            "#,
        )
        .bind(timesheet_id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        Ok(TimesheetStats {
            days_filled: row.days_filled,
            total_hours: row.total_hours,
            overtime_hours: row.overtime_hours,
        })
    }

    async fn ping(&self) -> Result<(), TimesheetError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(classify)
    }
}
