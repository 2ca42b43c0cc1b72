use crate::error::ServiceError;
use crate::model::attendance::EmployeeAttendance;
use crate::utils::db_utils::{bind_values, build_update_sql};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct NewAttendance {
    pub employee_id: i64,
    #[schema(example = "2026-08-01", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    #[schema(example = "09:05:00", value_type = String, format = "time")]
    pub in_time: NaiveTime,
    #[schema(example = "17:10:00", value_type = String, format = "time")]
    pub out_time: NaiveTime,
    #[serde(default)]
    pub late_in_minutes: i64,
    #[serde(default)]
    pub early_out_minutes: i64,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub attendance: EmployeeAttendance,
    pub employee_name: Option<String>,
}

const UPDATE_COLUMNS: &[&str] = &[
    "employee_id",
    "attendance_date",
    "in_time",
    "out_time",
    "late_in_minutes",
    "early_out_minutes",
    "updated_by",
    "updated_at",
];

/// Insert a batch of attendance records in one transaction. All
/// (employee, date) pairs are checked against existing rows first so the
/// caller gets every duplicate named in one Conflict instead of tripping on
/// the first unique index hit.
pub async fn create(
    pool: &SqlitePool,
    records: &[NewAttendance],
    created_by: i64,
) -> Result<Vec<EmployeeAttendance>, ServiceError> {
    if records.is_empty() {
        return Err(ServiceError::Validation(
            "at least one attendance record is required".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    let mut duplicates = Vec::new();
    for record in records {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT employee_attendance_id FROM employee_attendances WHERE employee_id = ? AND attendance_date = ?",
        )
        .bind(record.employee_id)
        .bind(record.attendance_date)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_some() {
            duplicates.push(format!(
                "employee {} on {}",
                record.employee_id, record.attendance_date
            ));
        }
    }
    if !duplicates.is_empty() {
        return Err(ServiceError::Conflict(format!(
            "Attendance already recorded for: {}",
            duplicates.join(", ")
        )));
    }

    let mut inserted = Vec::with_capacity(records.len());
    for record in records {
        let result = sqlx::query(
            r#"
            INSERT INTO employee_attendances
            (employee_id, attendance_date, in_time, out_time, late_in_minutes,
             early_out_minutes, created_by)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.attendance_date)
        .bind(record.in_time)
        .bind(record.out_time)
        .bind(record.late_in_minutes)
        .bind(record.early_out_minutes)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, EmployeeAttendance>(
            "SELECT * FROM employee_attendances WHERE employee_attendance_id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(row);
    }

    tx.commit().await?;
    debug!(count = inserted.len(), "Recorded attendance batch");
    Ok(inserted)
}

pub async fn update(
    pool: &SqlitePool,
    employee_attendance_id: i64,
    fields: &Map<String, Value>,
    updated_by: i64,
) -> Result<EmployeeAttendance, ServiceError> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT employee_attendance_id FROM employee_attendances WHERE employee_attendance_id = ?",
    )
    .bind(employee_attendance_id)
    .fetch_optional(pool)
    .await?;
    if exists.is_none() {
        return Err(ServiceError::NotFound("Attendance record"));
    }

    let mut fields = fields.clone();
    fields.insert("updated_by".into(), Value::from(updated_by));
    fields.insert("updated_at".into(), Value::from(Utc::now().timestamp()));

    let update = build_update_sql(
        "employee_attendances",
        &fields,
        UPDATE_COLUMNS,
        "employee_attendance_id",
        employee_attendance_id,
    )?;
    bind_values(sqlx::query(&update.sql), update.values)
        .execute(pool)
        .await?;

    get_by_id(pool, employee_attendance_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AttendanceRow>, ServiceError> {
    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT a.*, e.full_name AS employee_name
        FROM employee_attendances a
        LEFT JOIN employees e ON a.employee_id = e.employee_id
        ORDER BY a.attendance_date DESC, a.employee_attendance_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_by_id(
    pool: &SqlitePool,
    employee_attendance_id: i64,
) -> Result<EmployeeAttendance, ServiceError> {
    sqlx::query_as::<_, EmployeeAttendance>(
        "SELECT * FROM employee_attendances WHERE employee_attendance_id = ?",
    )
    .bind(employee_attendance_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("Attendance record"))
}

pub async fn delete(pool: &SqlitePool, employee_attendance_id: i64) -> Result<(), ServiceError> {
    let result =
        sqlx::query("DELETE FROM employee_attendances WHERE employee_attendance_id = ?")
            .bind(employee_attendance_id)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Attendance record"));
    }
    Ok(())
}
