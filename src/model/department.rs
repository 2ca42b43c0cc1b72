use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = 1)]
    pub department_id: i64,

    #[schema(example = "Engineering")]
    pub department_name: String,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
