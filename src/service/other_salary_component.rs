use crate::error::ServiceError;
use crate::model::other_salary_component::OtherSalaryComponent;
use crate::utils::db_utils::{bind_values, build_update_sql};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct OtherSalaryComponentData {
    #[schema(example = "Festival Bonus")]
    pub component_name: String,
    #[schema(example = "Addition")]
    pub component_type: String,
}

const UPDATE_COLUMNS: &[&str] = &[
    "component_name",
    "component_type",
    "updated_by",
    "updated_at",
];

pub async fn create(
    pool: &SqlitePool,
    data: &OtherSalaryComponentData,
    created_by: i64,
) -> Result<OtherSalaryComponent, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "INSERT INTO other_salary_components (component_name, component_type, created_by) VALUES (?, ?, ?)",
    )
    .bind(&data.component_name)
    .bind(&data.component_type)
    .bind(created_by)
    .execute(pool)
    .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

/// Field-presence update: only the submitted keys are rewritten.
pub async fn update(
    pool: &SqlitePool,
    other_salary_component_id: i64,
    fields: &Map<String, Value>,
    updated_by: i64,
) -> Result<OtherSalaryComponent, ServiceError> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT other_salary_component_id FROM other_salary_components WHERE other_salary_component_id = ?",
    )
    .bind(other_salary_component_id)
    .fetch_optional(pool)
    .await?;
    if exists.is_none() {
        return Err(ServiceError::NotFound("Other salary component"));
    }

    let mut fields = fields.clone();
    fields.insert("updated_by".into(), Value::from(updated_by));
    fields.insert("updated_at".into(), Value::from(Utc::now().timestamp()));

    let update = build_update_sql(
        "other_salary_components",
        &fields,
        UPDATE_COLUMNS,
        "other_salary_component_id",
        other_salary_component_id,
    )?;
    bind_values(sqlx::query(&update.sql), update.values)
        .execute(pool)
        .await?;

    get_by_id(pool, other_salary_component_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<OtherSalaryComponent>, ServiceError> {
    let rows = sqlx::query_as::<_, OtherSalaryComponent>(
        "SELECT * FROM other_salary_components ORDER BY other_salary_component_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_by_id(
    pool: &SqlitePool,
    other_salary_component_id: i64,
) -> Result<OtherSalaryComponent, ServiceError> {
    sqlx::query_as::<_, OtherSalaryComponent>(
        "SELECT * FROM other_salary_components WHERE other_salary_component_id = ?",
    )
    .bind(other_salary_component_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ServiceError::NotFound("Other salary component"))
}

pub async fn delete(
    pool: &SqlitePool,
    other_salary_component_id: i64,
) -> Result<(), ServiceError> {
    let result =
        sqlx::query("DELETE FROM other_salary_components WHERE other_salary_component_id = ?")
            .bind(other_salary_component_id)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Other salary component"));
    }
    Ok(())
}

fn validate(data: &OtherSalaryComponentData) -> Result<(), ServiceError> {
    if data.component_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "component_name must not be empty".into(),
        ));
    }
    if data.component_type.trim().is_empty() {
        return Err(ServiceError::Validation(
            "component_type must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;
    use serde_json::json;

    #[actix_web::test]
    async fn partial_update_keeps_omitted_fields() {
        let pool = memory_pool().await;
        let created = create(
            &pool,
            &OtherSalaryComponentData {
                component_name: "Festival Bonus".into(),
                component_type: "Addition".into(),
            },
            1,
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            created.other_salary_component_id,
            json!({ "component_name": "Eid Bonus" }).as_object().unwrap(),
            2,
        )
        .await
        .unwrap();
        assert_eq!(updated.component_name, "Eid Bonus");
        assert_eq!(updated.component_type, "Addition");
        assert_eq!(updated.updated_by, Some(2));
    }

    #[actix_web::test]
    async fn update_of_missing_component_is_not_found() {
        let pool = memory_pool().await;
        let err = update(&pool, 4, json!({ "component_name": "X" }).as_object().unwrap(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn catalog_round_trip() {
        let pool = memory_pool().await;
        let created = create(
            &pool,
            &OtherSalaryComponentData {
                component_name: "Festival Bonus".into(),
                component_type: "Addition".into(),
            },
            1,
        )
        .await
        .unwrap();

        let fetched = get_by_id(&pool, created.other_salary_component_id)
            .await
            .unwrap();
        assert_eq!(fetched.component_name, "Festival Bonus");
        assert_eq!(fetched.component_type, "Addition");
    }

    #[actix_web::test]
    async fn blank_type_is_rejected() {
        let pool = memory_pool().await;
        let err = create(
            &pool,
            &OtherSalaryComponentData {
                component_name: "Fine".into(),
                component_type: "".into(),
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
