use crate::error::ServiceError;
use crate::model::leave_type::LeaveType;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LeaveTypeData {
    #[schema(example = "Casual Leave")]
    pub leave_type_name: String,
    #[schema(example = 10)]
    pub total_leaves: i64,
}

pub async fn create(
    pool: &SqlitePool,
    data: &LeaveTypeData,
    created_by: i64,
) -> Result<LeaveType, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "INSERT INTO leave_types (leave_type_name, total_leaves, created_by) VALUES (?, ?, ?)",
    )
    .bind(&data.leave_type_name)
    .bind(data.total_leaves)
    .bind(created_by)
    .execute(pool)
    .await?;
    get_by_id(pool, result.last_insert_rowid()).await
}

pub async fn update(
    pool: &SqlitePool,
    leave_type_id: i64,
    data: &LeaveTypeData,
    updated_by: i64,
) -> Result<LeaveType, ServiceError> {
    validate(data)?;
    let result = sqlx::query(
        "UPDATE leave_types SET leave_type_name = ?, total_leaves = ?, updated_by = ?, updated_at = ? WHERE leave_type_id = ?",
    )
    .bind(&data.leave_type_name)
    .bind(data.total_leaves)
    .bind(updated_by)
    .bind(Utc::now().timestamp())
    .bind(leave_type_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Leave type"));
    }
    get_by_id(pool, leave_type_id).await
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<LeaveType>, ServiceError> {
    let rows = sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types ORDER BY leave_type_id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_by_id(pool: &SqlitePool, leave_type_id: i64) -> Result<LeaveType, ServiceError> {
    sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types WHERE leave_type_id = ?")
        .bind(leave_type_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::NotFound("Leave type"))
}

/// Deleting a leave type also drops its employee associations (cascade on
/// the association table), never the employees themselves.
pub async fn delete(pool: &SqlitePool, leave_type_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM leave_types WHERE leave_type_id = ?")
        .bind(leave_type_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Leave type"));
    }
    Ok(())
}

fn validate(data: &LeaveTypeData) -> Result<(), ServiceError> {
    if data.leave_type_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "leave_type_name must not be empty".into(),
        ));
    }
    if data.total_leaves < 0 {
        return Err(ServiceError::Validation(
            "total_leaves must not be negative".into(),
        ));
    }
    Ok(())
}
