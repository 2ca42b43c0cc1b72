use crate::error::ServiceError;
use crate::model::department::Department;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct DepartmentData {
    #[schema(example = "Engineering")]
    pub department_name: String,
}

pub async fn create(
    pool: &SqlitePool,
    data: &DepartmentData,
    created_by: i64,
) -> Result<Department, ServiceError> {
    validate(data)?;
    let result =
        sqlx::query("INSERT INTO departments (department_name, created_by) VALUES (?, ?)")
            .bind(&data.department_name)
            .bind(created_by)
            .execute(pool)
            .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

pub async fn update(
    pool: &SqlitePool,
    department_id: i64,
    data: &DepartmentData,
    updated_by: i64,
) -> Result<Department, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "UPDATE departments SET department_name = ?, updated_by = ?, updated_at = ? WHERE department_id = ?",
    )
    .bind(&data.department_name)
    .bind(updated_by)
    .bind(Utc::now().timestamp())
    .bind(department_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Department"));
    }
    get_by_id(pool, department_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Department>, ServiceError> {
    let rows = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY department_id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_by_id(pool: &SqlitePool, department_id: i64) -> Result<Department, ServiceError> {
    sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE department_id = ?")
        .bind(department_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Department"))
}

/// Restricted deletes surface as ReferentialViolation when employees still
/// reference the department.
pub async fn delete(pool: &SqlitePool, department_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM departments WHERE department_id = ?")
        .bind(department_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Department"));
    }
    Ok(())
}

fn validate(data: &DepartmentData) -> Result<(), ServiceError> {
    if data.department_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "department_name must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;

    #[actix_web::test]
    async fn create_update_delete_cycle() {
        let pool = memory_pool().await;

        let created = create(
            &pool,
            &DepartmentData {
                department_name: "Engineering".into(),
            },
            1,
        )
        .await
        .unwrap();
        assert_eq!(created.department_name, "Engineering");
        assert_eq!(created.created_by, 1);

        let updated = update(
            &pool,
            created.department_id,
            &DepartmentData {
                department_name: "Platform".into(),
            },
            2,
        )
        .await
        .unwrap();
        assert_eq!(updated.department_name, "Platform");
        assert_eq!(updated.updated_by, Some(2));

        delete(&pool, created.department_id).await.unwrap();
        let err = get_by_id(&pool, created.department_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn update_of_missing_row_is_not_found() {
        let pool = memory_pool().await;
        let err = update(
            &pool,
            12,
            &DepartmentData {
                department_name: "X".into(),
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn empty_name_is_rejected() {
        let pool = memory_pool().await;
        let err = create(
            &pool,
            &DepartmentData {
                department_name: "  ".into(),
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
