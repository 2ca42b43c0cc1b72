use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeType {
    #[schema(example = 1)]
    pub employee_type_id: i64,

    #[schema(example = "Permanent")]
    pub employee_type_name: String,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
