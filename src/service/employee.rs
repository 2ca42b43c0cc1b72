use crate::error::ServiceError;
use crate::model::employee::{BloodGroup, Employee, Gender};
use crate::utils::db_utils::{bind_values, build_update_sql};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john@company.com", format = "email")]
    pub email: String,
    #[schema(example = "+8801712345678")]
    pub official_phone: String,
    #[serde(default)]
    pub personal_phone: Option<String>,
    #[schema(example = "221B Baker Street")]
    pub present_address: String,
    #[serde(default)]
    pub permanent_address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub cv_url: Option<String>,
    #[schema(example = "1990-01-01", value_type = String, format = "date")]
    pub dob: NaiveDate,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub doj: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[schema(example = 1000.0)]
    pub basic_salary: f64,
    #[schema(example = 1200.0)]
    pub gross_salary: f64,
    #[serde(default)]
    pub is_active: Option<i64>,
    #[schema(example = "E100")]
    pub emp_code: String,
    pub department_id: i64,
    pub designation_id: i64,
    pub employee_type_id: i64,
    #[serde(default)]
    pub office_timing_id: Option<i64>,
    /// Leave types assigned to this employee; foreign-key validity is left
    /// to the store.
    #[serde(default)]
    pub leave_type_ids: Vec<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_name: Option<String>,
    pub designation_name: Option<String>,
    pub employee_type_name: Option<String>,
    pub leave_type_ids: Vec<i64>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeListRow {
    pub employee_id: i64,
    pub full_name: String,
    pub email: String,
    pub official_phone: String,
    pub personal_phone: Option<String>,
    pub gender: Gender,
    pub emp_code: String,
    pub basic_salary: Option<f64>,
    pub gross_salary: f64,
    pub is_active: i64,
    pub department_id: i64,
    pub designation_id: i64,
    pub employee_type_id: i64,
    pub office_timing_id: Option<i64>,
    pub department_name: Option<String>,
    pub designation_name: Option<String>,
    pub employee_type_name: Option<String>,
}

/// Columns a partial update may touch. `employee_id`, `created_by` and
/// `created_at` are immutable after insert.
const UPDATE_COLUMNS: &[&str] = &[
    "full_name",
    "email",
    "official_phone",
    "personal_phone",
    "present_address",
    "permanent_address",
    "emergency_contact_name",
    "emergency_contact_phone",
    "photo_url",
    "cv_url",
    "dob",
    "doj",
    "gender",
    "blood_group",
    "basic_salary",
    "gross_salary",
    "is_active",
    "emp_code",
    "department_id",
    "designation_id",
    "employee_type_id",
    "office_timing_id",
    "updated_by",
    "updated_at",
];

fn validate(data: &NewEmployee) -> Result<(), ServiceError> {
    for (field, value) in [
        ("full_name", &data.full_name),
        ("email", &data.email),
        ("official_phone", &data.official_phone),
        ("present_address", &data.present_address),
        ("emp_code", &data.emp_code),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} is required")));
        }
    }
    if data.basic_salary < 0.0 || data.gross_salary < 0.0 {
        return Err(ServiceError::Validation(
            "Salary amounts must be non-negative".into(),
        ));
    }
    Ok(())
}

/// Insert the employee row plus one association row per assigned leave type,
/// all in one transaction. A duplicate email/phone/emp_code or a dangling
/// leave type id rolls the whole thing back.
pub async fn create(
    pool: &SqlitePool,
    data: &NewEmployee,
    created_by: i64,
) -> Result<Employee, ServiceError> {
    validate(data)?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (full_name, email, official_phone, personal_phone, present_address,
         permanent_address, emergency_contact_name, emergency_contact_phone,
         photo_url, cv_url, dob, doj, gender, blood_group, basic_salary,
         gross_salary, is_active, emp_code, department_id, designation_id,
         employee_type_id, office_timing_id, created_by)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.full_name)
    .bind(&data.email)
    .bind(&data.official_phone)
    .bind(&data.personal_phone)
    .bind(&data.present_address)
    .bind(&data.permanent_address)
    .bind(&data.emergency_contact_name)
    .bind(&data.emergency_contact_phone)
    .bind(&data.photo_url)
    .bind(&data.cv_url)
    .bind(data.dob)
    .bind(data.doj)
    .bind(data.gender)
    .bind(data.blood_group)
    .bind(data.basic_salary)
    .bind(data.gross_salary)
    .bind(data.is_active.unwrap_or(1))
    .bind(&data.emp_code)
    .bind(data.department_id)
    .bind(data.designation_id)
    .bind(data.employee_type_id)
    .bind(data.office_timing_id)
    .bind(created_by)
    .execute(&mut *tx)
    .await?;

    let employee_id = result.last_insert_rowid();
    debug!(employee_id, emp_code = %data.emp_code, "Inserted employee");

    for leave_type_id in &data.leave_type_ids {
        sqlx::query("INSERT INTO employee_leave_types (employee_id, leave_type_id) VALUES (?, ?)")
            .bind(employee_id)
            .bind(leave_type_id)
            .execute(&mut *tx)
            .await?;
    }

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(employee)
}

/// Partial update. Only keys present in `fields` are written; a present
/// empty value IS applied. When `leave_type_ids` is supplied (even empty)
/// the association set is replaced wholesale inside the same transaction;
/// when omitted the existing set is untouched.
pub async fn update(
    pool: &SqlitePool,
    employee_id: i64,
    fields: &Map<String, Value>,
    leave_type_ids: Option<&[i64]>,
    updated_by: i64,
) -> Result<Employee, ServiceError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT employee_id FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(ServiceError::NotFound("Employee"));
    }

    let mut fields = fields.clone();
    fields.insert("updated_by".into(), Value::from(updated_by));
    fields.insert("updated_at".into(), Value::from(Utc::now().timestamp()));

    let update = build_update_sql("employees", &fields, UPDATE_COLUMNS, "employee_id", employee_id)?;
    debug!(sql = %update.sql, employee_id, "Updating employee");
    bind_values(sqlx::query(&update.sql), update.values)
        .execute(&mut *tx)
        .await?;

    if let Some(ids) = leave_type_ids {
        sqlx::query("DELETE FROM employee_leave_types WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        for leave_type_id in ids {
            sqlx::query(
                "INSERT INTO employee_leave_types (employee_id, leave_type_id) VALUES (?, ?)",
            )
            .bind(employee_id)
            .bind(leave_type_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(employee)
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<EmployeeListRow>, ServiceError> {
    let rows = sqlx::query_as::<_, EmployeeListRow>(
        r#"
        SELECT e.employee_id, e.full_name, e.email, e.official_phone,
               e.personal_phone, e.gender, e.emp_code, e.basic_salary,
               e.gross_salary, e.is_active, e.department_id, e.designation_id,
               e.employee_type_id, e.office_timing_id,
               d.department_name, g.designation_name, t.employee_type_name
        FROM employees e
        LEFT JOIN departments d ON e.department_id = d.department_id
        LEFT JOIN designations g ON e.designation_id = g.designation_id
        LEFT JOIN employee_types t ON e.employee_type_id = t.employee_type_id
        ORDER BY e.employee_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_by_id(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<EmployeeDetail>, ServiceError> {
    #[derive(sqlx::FromRow)]
    struct DetailRow {
        #[sqlx(flatten)]
        employee: Employee,
        department_name: Option<String>,
        designation_name: Option<String>,
        employee_type_name: Option<String>,
    }

    let row = sqlx::query_as::<_, DetailRow>(
        r#"
        SELECT e.*, d.department_name, g.designation_name, t.employee_type_name
        FROM employees e
        LEFT JOIN departments d ON e.department_id = d.department_id
        LEFT JOIN designations g ON e.designation_id = g.designation_id
        LEFT JOIN employee_types t ON e.employee_type_id = t.employee_type_id
        WHERE e.employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else { return Ok(None) };

    let leave_type_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT leave_type_id FROM employee_leave_types WHERE employee_id = ? ORDER BY leave_type_id",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(EmployeeDetail {
        employee: row.employee,
        department_name: row.department_name,
        designation_name: row.designation_name,
        employee_type_name: row.employee_type_name,
        leave_type_ids,
    }))
}

/// Delete the employee; the store cascades the leave-type associations away.
/// Returns the pre-deletion snapshot for audit/confirmation.
pub async fn delete(pool: &SqlitePool, employee_id: i64) -> Result<Employee, ServiceError> {
    let mut tx = pool.begin().await?;

    let existing =
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(ServiceError::NotFound("Employee"))?;

    sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{memory_pool, seed_lookups};
    use serde_json::json;

    fn sample(emp_code: &str, email: &str, phone: &str) -> NewEmployee {
        NewEmployee {
            full_name: "John Doe".into(),
            email: email.into(),
            official_phone: phone.into(),
            personal_phone: None,
            present_address: "221B Baker Street".into(),
            permanent_address: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            photo_url: None,
            cv_url: None,
            dob: "1990-01-01".parse().unwrap(),
            doj: "2024-01-01".parse().unwrap(),
            gender: Gender::Male,
            blood_group: Some(BloodGroup::OPositive),
            basic_salary: 1000.0,
            gross_salary: 1200.0,
            is_active: None,
            emp_code: emp_code.into(),
            department_id: 1,
            designation_id: 1,
            employee_type_id: 1,
            office_timing_id: Some(1),
            leave_type_ids: vec![],
        }
    }

    async fn association_ids(pool: &SqlitePool, employee_id: i64) -> Vec<i64> {
        sqlx::query_scalar(
            "SELECT leave_type_id FROM employee_leave_types WHERE employee_id = ? ORDER BY leave_type_id",
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    async fn total_associations(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM employee_leave_types")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn create_then_replace_leave_types() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut data = sample("E100", "a@x.com", "+1");
        data.leave_type_ids = vec![1, 2];
        let employee = create(&pool, &data, 1).await.unwrap();
        assert!(employee.employee_id > 0);
        assert_eq!(employee.is_active, 1);
        assert_eq!(association_ids(&pool, employee.employee_id).await, vec![1, 2]);

        let updated = update(
            &pool,
            employee.employee_id,
            json!({ "full_name": "John D." }).as_object().unwrap(),
            Some(&[2, 3]),
            2,
        )
        .await
        .unwrap();
        assert_eq!(updated.full_name, "John D.");
        assert_eq!(updated.updated_by, Some(2));
        assert_eq!(association_ids(&pool, employee.employee_id).await, vec![2, 3]);
    }

    #[actix_web::test]
    async fn duplicate_emp_code_rolls_back_associations() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut first = sample("E100", "a@x.com", "+1");
        first.leave_type_ids = vec![1];
        create(&pool, &first, 1).await.unwrap();

        let mut dup = sample("E100", "b@x.com", "+2");
        dup.leave_type_ids = vec![1, 2, 3];
        let err = create(&pool, &dup, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // only the first employee's association row survives
        assert_eq!(total_associations(&pool).await, 1);
    }

    #[actix_web::test]
    async fn dangling_leave_type_rolls_back_employee() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut data = sample("E100", "a@x.com", "+1");
        data.leave_type_ids = vec![999];
        let err = create(&pool, &data, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::ReferentialViolation(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn full_replace_is_idempotent() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let employee = create(&pool, &sample("E100", "a@x.com", "+1"), 1)
            .await
            .unwrap();
        let fields = json!({ "is_active": 1 });

        for _ in 0..2 {
            update(
                &pool,
                employee.employee_id,
                fields.as_object().unwrap(),
                Some(&[1, 3]),
                1,
            )
            .await
            .unwrap();
            assert_eq!(association_ids(&pool, employee.employee_id).await, vec![1, 3]);
        }
    }

    #[actix_web::test]
    async fn omitted_field_kept_but_explicit_empty_applied() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let employee = create(&pool, &sample("E100", "a@x.com", "+1"), 1)
            .await
            .unwrap();

        // email omitted: unchanged
        let updated = update(
            &pool,
            employee.employee_id,
            json!({ "full_name": "Renamed" }).as_object().unwrap(),
            None,
            1,
        )
        .await
        .unwrap();
        assert_eq!(updated.email, "a@x.com");

        // email present but empty: applied
        let updated = update(
            &pool,
            employee.employee_id,
            json!({ "email": "" }).as_object().unwrap(),
            None,
            1,
        )
        .await
        .unwrap();
        assert_eq!(updated.email, "");
    }

    #[actix_web::test]
    async fn omitting_leave_type_ids_keeps_associations() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut data = sample("E100", "a@x.com", "+1");
        data.leave_type_ids = vec![1, 2];
        let employee = create(&pool, &data, 1).await.unwrap();

        update(
            &pool,
            employee.employee_id,
            json!({ "full_name": "X" }).as_object().unwrap(),
            None,
            1,
        )
        .await
        .unwrap();
        assert_eq!(association_ids(&pool, employee.employee_id).await, vec![1, 2]);

        // supplied-but-empty clears the set
        update(
            &pool,
            employee.employee_id,
            json!({ "full_name": "Y" }).as_object().unwrap(),
            Some(&[]),
            1,
        )
        .await
        .unwrap();
        assert!(association_ids(&pool, employee.employee_id).await.is_empty());
    }

    #[actix_web::test]
    async fn delete_cascades_and_returns_snapshot() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut data = sample("E100", "a@x.com", "+1");
        data.leave_type_ids = vec![1, 2, 3];
        let employee = create(&pool, &data, 1).await.unwrap();

        let snapshot = delete(&pool, employee.employee_id).await.unwrap();
        assert_eq!(snapshot.emp_code, "E100");
        assert_eq!(total_associations(&pool).await, 0);
        assert!(get_by_id(&pool, employee.employee_id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn missing_employee_is_not_found() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let err = update(&pool, 999, json!({ "email": "x@y.z" }).as_object().unwrap(), None, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = delete(&pool, 999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn get_by_id_joins_names_and_leave_types() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let mut data = sample("E100", "a@x.com", "+1");
        data.leave_type_ids = vec![2];
        let employee = create(&pool, &data, 1).await.unwrap();

        let detail = get_by_id(&pool, employee.employee_id).await.unwrap().unwrap();
        assert_eq!(detail.department_name.as_deref(), Some("Engineering"));
        assert_eq!(detail.designation_name.as_deref(), Some("Engineer"));
        assert_eq!(detail.employee_type_name.as_deref(), Some("Permanent"));
        assert_eq!(detail.leave_type_ids, vec![2]);
    }
}
