use crate::error::ServiceError;
use crate::model::holiday::Holiday;
use crate::utils::db_utils::{bind_values, build_update_sql};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct NewHoliday {
    #[schema(example = "Eid-ul-Fitr")]
    pub holiday_name: String,
    #[schema(example = "2026-03-20", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-22", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = 3)]
    pub no_of_days: i64,
    #[serde(default)]
    pub description: Option<String>,
}

const UPDATE_COLUMNS: &[&str] = &[
    "holiday_name",
    "start_date",
    "end_date",
    "no_of_days",
    "description",
    "updated_by",
    "updated_at",
];

pub async fn create(
    pool: &SqlitePool,
    data: &NewHoliday,
    created_by: i64,
) -> Result<Holiday, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        r#"
        INSERT INTO holidays (holiday_name, start_date, end_date, no_of_days, description, created_by)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.holiday_name)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.no_of_days)
    .bind(&data.description)
    .bind(created_by)
    .execute(pool)
    .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

/// Field-presence update: only the submitted keys are rewritten.
pub async fn update(
    pool: &SqlitePool,
    holiday_id: i64,
    fields: &Map<String, Value>,
    updated_by: i64,
) -> Result<Holiday, ServiceError> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT holiday_id FROM holidays WHERE holiday_id = ?")
            .bind(holiday_id)
            .fetch_optional(pool)
            .await?;
    if exists.is_none() {
        return Err(ServiceError::NotFound("Holiday"));
    }

    let mut fields = fields.clone();
    fields.insert("updated_by".into(), Value::from(updated_by));
    fields.insert("updated_at".into(), Value::from(Utc::now().timestamp()));

    let update = build_update_sql("holidays", &fields, UPDATE_COLUMNS, "holiday_id", holiday_id)?;
    debug!(sql = %update.sql, holiday_id, "Updating holiday");
    bind_values(sqlx::query(&update.sql), update.values)
        .execute(pool)
        .await?;

    get_by_id(pool, holiday_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Holiday>, ServiceError> {
    let rows = sqlx::query_as::<_, Holiday>("SELECT * FROM holidays ORDER BY start_date")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_by_id(pool: &SqlitePool, holiday_id: i64) -> Result<Holiday, ServiceError> {
    sqlx::query_as::<_, Holiday>("SELECT * FROM holidays WHERE holiday_id = ?")
        .bind(holiday_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Holiday"))
}

pub async fn delete(pool: &SqlitePool, holiday_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM holidays WHERE holiday_id = ?")
        .bind(holiday_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Holiday"));
    }
    Ok(())
}

fn validate(data: &NewHoliday) -> Result<(), ServiceError> {
    if data.holiday_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "holiday_name must not be empty".into(),
        ));
    }
    if data.end_date < data.start_date {
        return Err(ServiceError::Validation(
            "end_date must not precede start_date".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;
    use serde_json::json;

    fn eid() -> NewHoliday {
        NewHoliday {
            holiday_name: "Eid-ul-Fitr".into(),
            start_date: "2026-03-20".parse().unwrap(),
            end_date: "2026-03-22".parse().unwrap(),
            no_of_days: 3,
            description: None,
        }
    }

    #[actix_web::test]
    async fn partial_update_leaves_other_fields_alone() {
        let pool = memory_pool().await;
        let created = create(&pool, &eid(), 1).await.unwrap();

        let updated = update(
            &pool,
            created.holiday_id,
            json!({ "description": "Public holiday" }).as_object().unwrap(),
            2,
        )
        .await
        .unwrap();

        assert_eq!(updated.holiday_name, "Eid-ul-Fitr");
        assert_eq!(updated.description.as_deref(), Some("Public holiday"));
        assert_eq!(updated.no_of_days, 3);
        assert_eq!(updated.updated_by, Some(2));
    }

    #[actix_web::test]
    async fn inverted_date_range_is_rejected() {
        let pool = memory_pool().await;
        let mut data = eid();
        data.end_date = "2026-03-01".parse().unwrap();
        let err = create(&pool, &data, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[actix_web::test]
    async fn update_of_missing_holiday_is_not_found() {
        let pool = memory_pool().await;
        let err = update(&pool, 5, json!({ "no_of_days": 1 }).as_object().unwrap(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn list_orders_by_start_date() {
        let pool = memory_pool().await;
        let mut later = eid();
        later.holiday_name = "Victory Day".into();
        later.start_date = "2026-12-16".parse().unwrap();
        later.end_date = "2026-12-16".parse().unwrap();
        later.no_of_days = 1;
        create(&pool, &later, 1).await.unwrap();
        create(&pool, &eid(), 1).await.unwrap();

        let all = get_all(&pool).await.unwrap();
        assert_eq!(all[0].holiday_name, "Eid-ul-Fitr");
        assert_eq!(all[1].holiday_name, "Victory Day");
    }
}
