use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[derive(Display, EnumString)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[derive(Display, EnumString)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    #[sqlx(rename = "A+")]
    #[strum(serialize = "A+")]
    #[schema(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    #[sqlx(rename = "A-")]
    #[strum(serialize = "A-")]
    #[schema(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    #[sqlx(rename = "B+")]
    #[strum(serialize = "B+")]
    #[schema(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    #[sqlx(rename = "B-")]
    #[strum(serialize = "B-")]
    #[schema(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    #[sqlx(rename = "AB+")]
    #[strum(serialize = "AB+")]
    #[schema(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    #[sqlx(rename = "AB-")]
    #[strum(serialize = "AB-")]
    #[schema(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    #[sqlx(rename = "O+")]
    #[strum(serialize = "O+")]
    #[schema(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    #[sqlx(rename = "O-")]
    #[strum(serialize = "O-")]
    #[schema(rename = "O-")]
    ONegative,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Employee {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "+8801712345678")]
    pub official_phone: String,

    pub personal_phone: Option<String>,

    #[schema(example = "221B Baker Street")]
    pub present_address: String,

    pub permanent_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub photo_url: Option<String>,
    pub cv_url: Option<String>,

    #[schema(example = "1990-01-01", value_type = String, format = "date")]
    pub dob: NaiveDate,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub doj: NaiveDate,

    pub gender: Gender,
    pub blood_group: Option<BloodGroup>,

    #[schema(example = 1000.0)]
    pub basic_salary: Option<f64>,

    #[schema(example = 1200.0)]
    pub gross_salary: f64,

    #[schema(example = 1)]
    pub is_active: i64,

    #[schema(example = "E100")]
    pub emp_code: String,

    pub department_id: i64,
    pub designation_id: i64,
    pub employee_type_id: i64,
    pub office_timing_id: Option<i64>,

    pub created_by: i64,
    pub created_at: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<i64>,
}
