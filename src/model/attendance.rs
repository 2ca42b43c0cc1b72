use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeAttendance {
    #[schema(example = 1)]
    pub employee_attendance_id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2026-08-01", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,

    #[schema(example = "09:05:00", value_type = String, format = "time")]
    pub in_time: NaiveTime,

    #[schema(example = "17:10:00", value_type = String, format = "time")]
    pub out_time: NaiveTime,

    #[schema(example = 5)]
    pub late_in_minutes: i64,

    #[schema(example = 0)]
    pub early_out_minutes: i64,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
