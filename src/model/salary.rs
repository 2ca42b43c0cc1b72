use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Salary {
    #[schema(example = 1)]
    pub salary_id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 8)]
    pub salary_month: i64,

    #[schema(example = 2026)]
    pub salary_year: i64,

    #[schema(example = 1000.0)]
    pub basic_salary: f64,

    #[schema(example = 1200.0)]
    pub gross_salary: f64,

    /// Caller-computed; this layer never derives it.
    #[schema(example = 1150.0)]
    pub net_salary: f64,

    #[schema(example = "2024-01-01", value_type = String, format = "date", nullable = true)]
    pub doj: Option<NaiveDate>,

    pub department_id: Option<i64>,
    pub designation_id: Option<i64>,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}

/// One ad hoc component row belonging to an employee's (month, year) salary
/// period. Carries its own amount; not a pure join row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeOtherSalaryComponent {
    #[schema(example = 1)]
    pub employee_other_salary_component_id: i64,

    pub employee_id: i64,
    pub other_salary_component_id: i64,

    #[schema(example = 8)]
    pub salary_month: i64,

    #[schema(example = 2026)]
    pub salary_year: i64,

    #[schema(example = 150.0)]
    pub amount: f64,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
