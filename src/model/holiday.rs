use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Holiday {
    #[schema(example = 1)]
    pub holiday_id: i64,

    #[schema(example = "Eid-ul-Fitr")]
    pub holiday_name: String,

    #[schema(example = "2026-03-20", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-03-22", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = 3)]
    pub no_of_days: i64,

    pub description: Option<String>,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
