use crate::error::ServiceError;
use crate::model::designation::Designation;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct DesignationData {
    #[schema(example = "Senior Engineer")]
    pub designation_name: String,
}

pub async fn create(
    pool: &SqlitePool,
    data: &DesignationData,
    created_by: i64,
) -> Result<Designation, ServiceError> {
    validate(data)?;
    let result =
        sqlx::query("INSERT INTO designations (designation_name, created_by) VALUES (?, ?)")
            .bind(&data.designation_name)
            .bind(created_by)
            .execute(pool)
            .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

pub async fn update(
    pool: &SqlitePool,
    designation_id: i64,
    data: &DesignationData,
    updated_by: i64,
) -> Result<Designation, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "UPDATE designations SET designation_name = ?, updated_by = ?, updated_at = ? WHERE designation_id = ?",
    )
    .bind(&data.designation_name)
    .bind(updated_by)
    .bind(Utc::now().timestamp())
    .bind(designation_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Designation"));
    }
    get_by_id(pool, designation_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Designation>, ServiceError> {
    let rows =
        sqlx::query_as::<_, Designation>("SELECT * FROM designations ORDER BY designation_id")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn get_by_id(
    pool: &SqlitePool,
    designation_id: i64,
) -> Result<Designation, ServiceError> {
    sqlx::query_as::<_, Designation>("SELECT * FROM designations WHERE designation_id = ?")
        .bind(designation_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Designation"))
}

pub async fn delete(pool: &SqlitePool, designation_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM designations WHERE designation_id = ?")
        .bind(designation_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Designation"));
    }
    Ok(())
}

fn validate(data: &DesignationData) -> Result<(), ServiceError> {
    if data.designation_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "designation_name must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;

    #[actix_web::test]
    async fn whole_value_update_rewrites_name() {
        let pool = memory_pool().await;
        let created = create(
            &pool,
            &DesignationData {
                designation_name: "Engineer".into(),
            },
            1,
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            created.designation_id,
            &DesignationData {
                designation_name: "Senior Engineer".into(),
            },
            2,
        )
        .await
        .unwrap();
        assert_eq!(updated.designation_name, "Senior Engineer");
        assert_eq!(updated.updated_by, Some(2));
    }

    #[actix_web::test]
    async fn delete_of_missing_row_is_not_found() {
        let pool = memory_pool().await;
        let err = delete(&pool, 9).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
