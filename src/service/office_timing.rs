use crate::error::ServiceError;
use crate::model::office_timing::OfficeTiming;
use crate::model::weekend::WeekDay;
use chrono::{NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct OfficeTimingData {
    #[schema(example = "09:00:00", value_type = String, format = "time")]
    pub start_time: NaiveTime,
    #[schema(example = "17:00:00", value_type = String, format = "time")]
    pub end_time: NaiveTime,
    /// Lookup ids into the seeded `weekends` table.
    #[serde(default)]
    pub weekend_ids: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfficeTimingDetail {
    #[serde(flatten)]
    pub timing: OfficeTiming,
    pub weekend_ids: Vec<i64>,
    #[schema(example = json!(["Saturday", "Sunday"]))]
    pub weekend_days: Vec<WeekDay>,
}

#[derive(sqlx::FromRow)]
struct TimingWeekendRow {
    weekend_id: i64,
    day: WeekDay,
}

/// Insert the timing row and one association row per weekend id, all in one
/// transaction. An unknown weekend id trips the foreign key and rolls the
/// timing back with it.
pub async fn create(
    pool: &SqlitePool,
    data: &OfficeTimingData,
    created_by: i64,
) -> Result<OfficeTimingDetail, ServiceError> {
    validate(data)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO office_timing (start_time, end_time, created_by) VALUES (?, ?, ?)",
    )
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(created_by)
    .execute(&mut *tx)
    .await?;

    let office_timing_id = result.last_insert_rowid();
    debug!(office_timing_id, "Inserted office timing");

    for weekend_id in &data.weekend_ids {
        sqlx::query(
            "INSERT INTO office_timing_weekends (office_timing_id, weekend_id, created_by) VALUES (?, ?, ?)",
        )
        .bind(office_timing_id)
        .bind(weekend_id)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;
    }

    let detail = read_detail(&mut tx, office_timing_id).await?;
    tx.commit().await?;
    Ok(detail)
}

/// Whole-value update: both times are rewritten and the weekend set is
/// replaced with the submitted one. NotFound when the id matches nothing.
pub async fn update(
    pool: &SqlitePool,
    office_timing_id: i64,
    data: &OfficeTimingData,
    updated_by: i64,
) -> Result<OfficeTimingDetail, ServiceError> {
    validate(data)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE office_timing SET start_time = ?, end_time = ?, updated_by = ?, updated_at = ? WHERE office_timing_id = ?",
    )
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(updated_by)
    .bind(Utc::now().timestamp())
    .bind(office_timing_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Office timing"));
    }

    sqlx::query("DELETE FROM office_timing_weekends WHERE office_timing_id = ?")
        .bind(office_timing_id)
        .execute(&mut *tx)
        .await?;

    for weekend_id in &data.weekend_ids {
        sqlx::query(
            "INSERT INTO office_timing_weekends (office_timing_id, weekend_id, created_by) VALUES (?, ?, ?)",
        )
        .bind(office_timing_id)
        .bind(weekend_id)
        .bind(updated_by)
        .execute(&mut *tx)
        .await?;
    }

    let detail = read_detail(&mut tx, office_timing_id).await?;
    tx.commit().await?;
    Ok(detail)
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<OfficeTimingDetail>, ServiceError> {
    let timings = sqlx::query_as::<_, OfficeTiming>(
        "SELECT * FROM office_timing ORDER BY office_timing_id",
    )
    .fetch_all(pool)
    .await?;

    #[derive(sqlx::FromRow)]
    struct AssocRow {
        office_timing_id: i64,
        weekend_id: i64,
        day: WeekDay,
    }

    let assocs = sqlx::query_as::<_, AssocRow>(
        r#"
        SELECT tw.office_timing_id, w.weekend_id, w.day
        FROM office_timing_weekends tw
        JOIN weekends w ON tw.weekend_id = w.weekend_id
        ORDER BY tw.office_timing_id, w.weekend_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut by_timing: HashMap<i64, Vec<(i64, WeekDay)>> = HashMap::new();
    for row in assocs {
        by_timing
            .entry(row.office_timing_id)
            .or_default()
            .push((row.weekend_id, row.day));
    }

    Ok(timings
        .into_iter()
        .map(|timing| {
            let pairs = by_timing
                .remove(&timing.office_timing_id)
                .unwrap_or_default();
            OfficeTimingDetail {
                weekend_ids: pairs.iter().map(|(id, _)| *id).collect(),
                weekend_days: pairs.into_iter().map(|(_, day)| day).collect(),
                timing,
            }
        })
        .collect())
}

pub async fn get_by_id(
    pool: &SqlitePool,
    office_timing_id: i64,
) -> Result<OfficeTimingDetail, ServiceError> {
    let mut tx = pool.begin().await?;
    let detail = read_detail(&mut tx, office_timing_id).await?;
    tx.commit().await?;
    Ok(detail)
}

/// Delete the timing row; association rows go with it via ON DELETE CASCADE.
/// Employees pointing at the timing keep their nullable reference nulled by
/// the schema's ON DELETE SET NULL.
pub async fn delete(pool: &SqlitePool, office_timing_id: i64) -> Result<(), ServiceError> {
    let result = sqlx::query("DELETE FROM office_timing WHERE office_timing_id = ?")
        .bind(office_timing_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("Office timing"));
    }
    Ok(())
}

fn validate(data: &OfficeTimingData) -> Result<(), ServiceError> {
    if data.start_time >= data.end_time {
        return Err(ServiceError::Validation(
            "start_time must be earlier than end_time".into(),
        ));
    }
    Ok(())
}

async fn read_detail(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    office_timing_id: i64,
) -> Result<OfficeTimingDetail, ServiceError> {
    let timing = sqlx::query_as::<_, OfficeTiming>(
        "SELECT * FROM office_timing WHERE office_timing_id = ?",
    )
    .bind(office_timing_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(ServiceError::NotFound("Office timing"))?;

    let rows = sqlx::query_as::<_, TimingWeekendRow>(
        r#"
        SELECT w.weekend_id, w.day
        FROM office_timing_weekends tw
        JOIN weekends w ON tw.weekend_id = w.weekend_id
        WHERE tw.office_timing_id = ?
        ORDER BY w.weekend_id
        "#,
    )
    .bind(office_timing_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(OfficeTimingDetail {
        timing,
        weekend_ids: rows.iter().map(|r| r.weekend_id).collect(),
        weekend_days: rows.into_iter().map(|r| r.day).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::memory_pool;

    fn data(start: &str, end: &str, weekend_ids: Vec<i64>) -> OfficeTimingData {
        OfficeTimingData {
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            weekend_ids,
        }
    }

    #[actix_web::test]
    async fn create_links_selected_weekends() {
        let pool = memory_pool().await;

        let detail = create(&pool, &data("09:00:00", "17:00:00", vec![1, 2]), 1)
            .await
            .unwrap();

        assert_eq!(detail.weekend_ids, vec![1, 2]);
        assert_eq!(
            detail.weekend_days,
            vec![WeekDay::Saturday, WeekDay::Sunday]
        );
    }

    #[actix_web::test]
    async fn create_with_unknown_weekend_rolls_back() {
        let pool = memory_pool().await;

        let err = create(&pool, &data("09:00:00", "17:00:00", vec![99]), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ReferentialViolation(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM office_timing")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn update_replaces_times_and_weekend_set() {
        let pool = memory_pool().await;
        let created = create(&pool, &data("09:00:00", "17:00:00", vec![1, 2]), 1)
            .await
            .unwrap();

        let updated = update(
            &pool,
            created.timing.office_timing_id,
            &data("10:00:00", "18:00:00", vec![7]),
            2,
        )
        .await
        .unwrap();

        assert_eq!(updated.timing.start_time, "10:00:00".parse().unwrap());
        assert_eq!(updated.weekend_days, vec![WeekDay::Friday]);
        assert_eq!(updated.timing.updated_by, Some(2));
    }

    #[actix_web::test]
    async fn update_of_missing_timing_is_not_found() {
        let pool = memory_pool().await;
        let err = update(&pool, 77, &data("09:00:00", "17:00:00", vec![]), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn inverted_times_are_rejected() {
        let pool = memory_pool().await;
        let err = create(&pool, &data("17:00:00", "09:00:00", vec![]), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[actix_web::test]
    async fn delete_cascades_associations() {
        let pool = memory_pool().await;
        let created = create(&pool, &data("09:00:00", "17:00:00", vec![1]), 1)
            .await
            .unwrap();

        delete(&pool, created.timing.office_timing_id).await.unwrap();

        let assocs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM office_timing_weekends")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(assocs, 0);

        let err = delete(&pool, created.timing.office_timing_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn delete_nulls_out_employee_references() {
        use crate::model::employee::Gender;
        use crate::service::employee::{self, NewEmployee};
        use crate::service::test_support::seed_lookups;

        let pool = memory_pool().await;
        seed_lookups(&pool).await;
        let timing = create(&pool, &data("09:00:00", "17:00:00", vec![1]), 1)
            .await
            .unwrap();

        let employee_id = employee::create(
            &pool,
            &NewEmployee {
                full_name: "John Doe".into(),
                email: "a@x.com".into(),
                official_phone: "+1".into(),
                personal_phone: None,
                present_address: "221B".into(),
                permanent_address: None,
                emergency_contact_name: None,
                emergency_contact_phone: None,
                photo_url: None,
                cv_url: None,
                dob: "1990-01-01".parse().unwrap(),
                doj: "2024-01-01".parse().unwrap(),
                gender: Gender::Male,
                blood_group: None,
                basic_salary: 1000.0,
                gross_salary: 1200.0,
                is_active: None,
                emp_code: "E100".into(),
                department_id: 1,
                designation_id: 1,
                employee_type_id: 1,
                office_timing_id: Some(timing.timing.office_timing_id),
                leave_type_ids: vec![],
            },
            1,
        )
        .await
        .unwrap()
        .employee_id;

        delete(&pool, timing.timing.office_timing_id).await.unwrap();

        let remaining: Option<i64> = sqlx::query_scalar(
            "SELECT office_timing_id FROM employees WHERE employee_id = ?",
        )
        .bind(employee_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(remaining, None);
    }

    #[actix_web::test]
    async fn get_all_groups_weekends_per_timing() {
        let pool = memory_pool().await;
        create(&pool, &data("09:00:00", "17:00:00", vec![1, 2]), 1)
            .await
            .unwrap();
        create(&pool, &data("08:00:00", "16:00:00", vec![]), 1)
            .await
            .unwrap();

        let all = get_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].weekend_ids.len(), 2);
        assert!(all[1].weekend_ids.is_empty());
    }
}
