use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Designation {
    #[schema(example = 3)]
    pub designation_id: i64,

    #[schema(example = "Senior Engineer")]
    pub designation_name: String,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
