use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entry for an ad hoc salary component (bonus, arrear, deduction...).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct OtherSalaryComponent {
    #[schema(example = 1)]
    pub other_salary_component_id: i64,

    #[schema(example = "Festival Bonus")]
    pub component_name: String,

    #[schema(example = "Addition")]
    pub component_type: String,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
