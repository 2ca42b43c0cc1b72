pub mod attendance;
pub mod department;
pub mod designation;
pub mod employee;
pub mod employee_type;
pub mod holiday;
pub mod leave_type;
pub mod office_timing;
pub mod other_salary_component;
pub mod salary;
pub mod weekend;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::apply_schema;
    use sqlx::SqlitePool;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    /// In-memory store with the full schema applied. A single connection so
    /// every statement sees the same database.
    pub async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        apply_schema(&pool).await.unwrap();
        pool
    }

    /// Seed the lookup tables the composite managers reference: one
    /// department/designation/employee type (id 1 each), three leave types
    /// (ids 1-3) and one office timing (id 1).
    pub async fn seed_lookups(pool: &SqlitePool) {
        sqlx::query("INSERT INTO departments (department_name, created_by) VALUES ('Engineering', 1)")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO designations (designation_name, created_by) VALUES ('Engineer', 1)")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO employee_types (employee_type_name, created_by) VALUES ('Permanent', 1)",
        )
        .execute(pool)
        .await
        .unwrap();
        for (name, total) in [("Casual", 10), ("Sick", 14), ("Earned", 20)] {
            sqlx::query(
                "INSERT INTO leave_types (leave_type_name, total_leaves, created_by) VALUES (?, ?, 1)",
            )
            .bind(name)
            .bind(total)
            .execute(pool)
            .await
            .unwrap();
        }
        sqlx::query(
            "INSERT INTO office_timing (start_time, end_time, created_by) VALUES ('09:00:00', '17:00:00', 1)",
        )
        .execute(pool)
        .await
        .unwrap();
    }
}
