use crate::error::ServiceError;
use crate::model::weekend::Weekend;
use sqlx::SqlitePool;

/// The seven seeded day rows. Read-only lookup for the office timing forms.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Weekend>, ServiceError> {
    let rows = sqlx::query_as::<_, Weekend>("SELECT * FROM weekends ORDER BY weekend_id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::weekend::WeekDay;
    use crate::service::test_support::memory_pool;

    #[actix_web::test]
    async fn seed_covers_all_seven_days() {
        let pool = memory_pool().await;
        let days = get_all(&pool).await.unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day, WeekDay::Saturday);
        assert_eq!(days[6].day, WeekDay::Friday);
    }
}
