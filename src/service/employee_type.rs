use crate::error::ServiceError;
use crate::model::employee_type::EmployeeType;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct EmployeeTypeData {
    #[schema(example = "Permanent")]
    pub employee_type_name: String,
}

pub async fn create(
    pool: &SqlitePool,
    data: &EmployeeTypeData,
    created_by: i64,
) -> Result<EmployeeType, ServiceError> {
    validate(data)?;
    let result =
        sqlx::query("INSERT INTO employee_types (employee_type_name, created_by) VALUES (?, ?)")
            .bind(&data.employee_type_name)
            .bind(created_by)
            .execute(pool)
            .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

pub async fn update(
    pool: &SqlitePool,
    employee_type_id: i64,
    data: &EmployeeTypeData,
    updated_by: i64,
) -> Result<EmployeeType, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "UPDATE employee_types SET employee_type_name = ?, updated_by = ?, updated_at = ? WHERE employee_type_id = ?",
    )
    .bind(&data.employee_type_name)
    .bind(updated_by)
    .bind(Utc::now().timestamp())
    .bind(employee_type_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Employee type"));
    }
    get_by_id(pool, employee_type_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<EmployeeType>, ServiceError> {
    let rows =
        sqlx::query_as::<_, EmployeeType>("SELECT * FROM employee_types ORDER BY employee_type_id")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn get_by_id(
    pool: &SqlitePool,
    employee_type_id: i64,
) -> Result<EmployeeType, ServiceError> {
    sqlx::query_as::<_, EmployeeType>("SELECT * FROM employee_types WHERE employee_type_id = ?")
        .bind(employee_type_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Employee type"))
}

pub async fn delete(pool: &SqlitePool, employee_type_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM employee_types WHERE employee_type_id = ?")
        .bind(employee_type_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Employee type"));
    }
    Ok(())
}

fn validate(data: &EmployeeTypeData) -> Result<(), ServiceError> {
    if data.employee_type_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "employee_type_name must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;

    #[actix_web::test]
    async fn list_returns_rows_in_id_order() {
        let pool = memory_pool().await;
        for name in ["Permanent", "Contract", "Intern"] {
            create(
                &pool,
                &EmployeeTypeData {
                    employee_type_name: name.into(),
                },
                1,
            )
            .await
            .unwrap();
        }

        let all = get_all(&pool).await.unwrap();
        let names: Vec<&str> = all.iter().map(|t| t.employee_type_name.as_str()).collect();
        assert_eq!(names, vec!["Permanent", "Contract", "Intern"]);
    }

    #[actix_web::test]
    async fn update_of_missing_row_is_not_found() {
        let pool = memory_pool().await;
        let err = update(
            &pool,
            3,
            &EmployeeTypeData {
                employee_type_name: "X".into(),
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
