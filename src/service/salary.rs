use crate::error::ServiceError;
use crate::model::salary::{EmployeeOtherSalaryComponent, Salary};
use crate::utils::db_utils::{bind_values, build_update_sql};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct NewSalary {
    pub employee_id: i64,
    #[schema(example = 8)]
    pub salary_month: i64,
    #[schema(example = 2026)]
    pub salary_year: i64,
    #[schema(example = 1000.0)]
    pub basic_salary: f64,
    #[schema(example = 1200.0)]
    pub gross_salary: f64,
    /// Caller-computed; never derived here.
    #[schema(example = 1150.0)]
    pub net_salary: f64,
    #[serde(default)]
    #[schema(example = "2024-01-01", value_type = String, format = "date", nullable = true)]
    pub doj: Option<NaiveDate>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub designation_id: Option<i64>,
}

/// Component rows carry only the catalog reference and the amount; the
/// (employee, month, year) key is owned by the parent salary so the two can
/// never disagree.
#[derive(Deserialize, ToSchema)]
pub struct NewSalaryComponent {
    pub other_salary_component_id: i64,
    #[schema(example = 150.0)]
    pub amount: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSalaryPayload {
    pub salary: NewSalary,
    #[serde(default)]
    pub other_salary: Vec<NewSalaryComponent>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateSalaryPayload {
    /// Partial field set for the salary row; only present keys are written.
    pub salary: Map<String, Value>,
    #[serde(default)]
    pub other_salary: Vec<NewSalaryComponent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryWithComponents {
    pub salary: Salary,
    pub other_salary: Vec<EmployeeOtherSalaryComponent>,
}

/// Header of one grouped `list()` entry: salary scalars plus denormalized
/// display names from the joined lookups.
#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryView {
    pub salary_id: i64,
    pub salary_month: i64,
    pub salary_year: i64,
    pub basic_salary: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    #[schema(value_type = Option<String>, format = "date")]
    pub doj: Option<NaiveDate>,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub designation_id: Option<i64>,
    pub designation_name: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryComponentView {
    pub other_salary_component_id: i64,
    pub amount: f64,
    pub component_name: Option<String>,
    pub component_type: Option<String>,
    pub salary_month: i64,
    pub salary_year: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupedSalary {
    pub salary: SalaryView,
    pub other_salary: Vec<SalaryComponentView>,
}

/// One row of the flat six-way join; repeats the salary header once per
/// matching component, with the component side all-null when nothing matched.
#[derive(Debug, sqlx::FromRow)]
pub struct SalaryJoinRow {
    pub salary_id: i64,
    pub salary_month: i64,
    pub salary_year: i64,
    pub basic_salary: f64,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub doj: Option<NaiveDate>,
    pub created_at: Option<i64>,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub designation_id: Option<i64>,
    pub designation_name: Option<String>,
    pub other_salary_component_id: Option<i64>,
    pub other_amount: Option<f64>,
    pub component_name: Option<String>,
    pub component_type: Option<String>,
}

const UPDATE_COLUMNS: &[&str] = &[
    "employee_id",
    "salary_month",
    "salary_year",
    "basic_salary",
    "gross_salary",
    "net_salary",
    "doj",
    "department_id",
    "designation_id",
    "updated_by",
    "updated_at",
];

/// Insert the salary row and its component rows in one transaction. The
/// component rows inherit the parent's (employee, month, year) key.
pub async fn create(
    pool: &SqlitePool,
    payload: &CreateSalaryPayload,
    created_by: i64,
) -> Result<SalaryWithComponents, ServiceError> {
    let mut tx = pool.begin().await?;

    let salary = &payload.salary;
    let result = sqlx::query(
        r#"
        INSERT INTO salaries
        (employee_id, salary_month, salary_year, basic_salary, gross_salary,
         net_salary, doj, department_id, designation_id, created_by)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(salary.employee_id)
    .bind(salary.salary_month)
    .bind(salary.salary_year)
    .bind(salary.basic_salary)
    .bind(salary.gross_salary)
    .bind(salary.net_salary)
    .bind(salary.doj)
    .bind(salary.department_id)
    .bind(salary.designation_id)
    .bind(created_by)
    .execute(&mut *tx)
    .await?;

    let salary_id = result.last_insert_rowid();
    debug!(salary_id, employee_id = salary.employee_id, "Inserted salary");

    for component in &payload.other_salary {
        sqlx::query(
            r#"
            INSERT INTO employee_other_salary_components
            (employee_id, other_salary_component_id, salary_month, salary_year,
             amount, created_by)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(salary.employee_id)
        .bind(component.other_salary_component_id)
        .bind(salary.salary_month)
        .bind(salary.salary_year)
        .bind(component.amount)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;
    }

    let persisted = sqlx::query_as::<_, Salary>("SELECT * FROM salaries WHERE salary_id = ?")
        .bind(salary_id)
        .fetch_one(&mut *tx)
        .await?;

    let components = components_for_period(
        &mut tx,
        persisted.employee_id,
        persisted.salary_month,
        persisted.salary_year,
    )
    .await?;

    tx.commit().await?;
    Ok(SalaryWithComponents {
        salary: persisted,
        other_salary: components,
    })
}

/// Update the salary fields in place, then replace every component row keyed
/// by the *updated* row's (employee, month, year) with the new list. The
/// whole thing is one transaction; NotFound when the parent row cannot be
/// read back after the update.
pub async fn update(
    pool: &SqlitePool,
    salary_id: i64,
    payload: &UpdateSalaryPayload,
    updated_by: i64,
) -> Result<SalaryWithComponents, ServiceError> {
    let mut tx = pool.begin().await?;

    let mut fields = payload.salary.clone();
    fields.insert("updated_by".into(), Value::from(updated_by));
    fields.insert("updated_at".into(), Value::from(Utc::now().timestamp()));

    let update = build_update_sql("salaries", &fields, UPDATE_COLUMNS, "salary_id", salary_id)?;
    debug!(sql = %update.sql, salary_id, "Updating salary");
    bind_values(sqlx::query(&update.sql), update.values)
        .execute(&mut *tx)
        .await?;

    let salary = sqlx::query_as::<_, Salary>("SELECT * FROM salaries WHERE salary_id = ?")
        .bind(salary_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::NotFound("Salary"))?;

    sqlx::query(
        r#"
        DELETE FROM employee_other_salary_components
        WHERE employee_id = ? AND salary_month = ? AND salary_year = ?
        "#,
    )
    .bind(salary.employee_id)
    .bind(salary.salary_month)
    .bind(salary.salary_year)
    .execute(&mut *tx)
    .await?;

    for component in &payload.other_salary {
        sqlx::query(
            r#"
            INSERT INTO employee_other_salary_components
            (employee_id, other_salary_component_id, salary_month, salary_year,
             amount, created_by)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(salary.employee_id)
        .bind(component.other_salary_component_id)
        .bind(salary.salary_month)
        .bind(salary.salary_year)
        .bind(component.amount)
        .bind(updated_by)
        .execute(&mut *tx)
        .await?;
    }

    let components = components_for_period(
        &mut tx,
        salary.employee_id,
        salary.salary_month,
        salary.salary_year,
    )
    .await?;

    tx.commit().await?;
    Ok(SalaryWithComponents {
        salary,
        other_salary: components,
    })
}

/// Delete the component rows for the salary's period, then the salary row.
/// Fail-fast on a missing id, same policy as the other composite managers.
pub async fn delete(pool: &SqlitePool, salary_id: i64) -> Result<(), ServiceError> {
    let mut tx = pool.begin().await?;

    let salary = sqlx::query_as::<_, Salary>("SELECT * FROM salaries WHERE salary_id = ?")
        .bind(salary_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::NotFound("Salary"))?;

    sqlx::query(
        r#"
        DELETE FROM employee_other_salary_components
        WHERE employee_id = ? AND salary_month = ? AND salary_year = ?
        "#,
    )
    .bind(salary.employee_id)
    .bind(salary.salary_month)
    .bind(salary.salary_year)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM salaries WHERE salary_id = ?")
        .bind(salary_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Grouped read view: every salary with its component entries attached.
/// Ordered by salary_id so the output order is a contract, not an accident
/// of the store's execution plan.
pub async fn list(pool: &SqlitePool) -> Result<Vec<GroupedSalary>, ServiceError> {
    let rows = sqlx::query_as::<_, SalaryJoinRow>(
        r#"
        SELECT s.salary_id, s.salary_month, s.salary_year, s.basic_salary,
               s.gross_salary, s.net_salary, s.doj, s.created_at,
               e.employee_id, e.full_name AS employee_name,
               d.department_id, d.department_name,
               g.designation_id, g.designation_name,
               c.other_salary_component_id, c.amount AS other_amount,
               o.component_name, o.component_type
        FROM salaries s
        LEFT JOIN employees e ON s.employee_id = e.employee_id
        LEFT JOIN departments d ON s.department_id = d.department_id
        LEFT JOIN designations g ON s.designation_id = g.designation_id
        LEFT JOIN employee_other_salary_components c
            ON s.employee_id = c.employee_id
            AND s.salary_month = c.salary_month
            AND s.salary_year = c.salary_year
        LEFT JOIN other_salary_components o
            ON c.other_salary_component_id = o.other_salary_component_id
        ORDER BY s.salary_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(group_rows(rows))
}

/// Fold the flat join rows into one entry per salary id, in arrival order.
/// The first sighting of an id materializes the header; a non-null component
/// id appends a component entry. Null component columns (the left join's
/// no-match case) contribute nothing.
pub fn group_rows(rows: Vec<SalaryJoinRow>) -> Vec<GroupedSalary> {
    let mut grouped: Vec<GroupedSalary> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = match index.get(&row.salary_id) {
            Some(&i) => i,
            None => {
                index.insert(row.salary_id, grouped.len());
                grouped.push(GroupedSalary {
                    salary: SalaryView {
                        salary_id: row.salary_id,
                        salary_month: row.salary_month,
                        salary_year: row.salary_year,
                        basic_salary: row.basic_salary,
                        gross_salary: row.gross_salary,
                        net_salary: row.net_salary,
                        doj: row.doj,
                        employee_id: row.employee_id,
                        employee_name: row.employee_name.clone(),
                        department_id: row.department_id,
                        department_name: row.department_name.clone(),
                        designation_id: row.designation_id,
                        designation_name: row.designation_name.clone(),
                        created_at: row.created_at,
                    },
                    other_salary: Vec::new(),
                });
                grouped.len() - 1
            }
        };

        if let Some(component_id) = row.other_salary_component_id {
            grouped[slot].other_salary.push(SalaryComponentView {
                other_salary_component_id: component_id,
                amount: row.other_amount.unwrap_or(0.0),
                component_name: row.component_name,
                component_type: row.component_type,
                salary_month: row.salary_month,
                salary_year: row.salary_year,
                employee_id: row.employee_id,
                employee_name: row.employee_name,
            });
        }
    }

    grouped
}

async fn components_for_period(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    employee_id: i64,
    salary_month: i64,
    salary_year: i64,
) -> Result<Vec<EmployeeOtherSalaryComponent>, ServiceError> {
    let components = sqlx::query_as::<_, EmployeeOtherSalaryComponent>(
        r#"
        SELECT * FROM employee_other_salary_components
        WHERE employee_id = ? AND salary_month = ? AND salary_year = ?
        ORDER BY employee_other_salary_component_id
        "#,
    )
    .bind(employee_id)
    .bind(salary_month)
    .bind(salary_year)
    .fetch_all(&mut **tx)
    .await?;
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Gender;
    use crate::service::employee::{self, NewEmployee};
    use crate::service::test_support::{memory_pool, seed_lookups};
    use serde_json::json;

    fn join_row(salary_id: i64, component_id: Option<i64>) -> SalaryJoinRow {
        SalaryJoinRow {
            salary_id,
            salary_month: 8,
            salary_year: 2026,
            basic_salary: 1000.0,
            gross_salary: 1200.0,
            net_salary: 1150.0,
            doj: None,
            created_at: Some(1),
            employee_id: Some(1),
            employee_name: Some("John Doe".into()),
            department_id: Some(1),
            department_name: Some("Engineering".into()),
            designation_id: Some(1),
            designation_name: Some("Engineer".into()),
            other_salary_component_id: component_id,
            other_amount: component_id.map(|_| 50.0),
            component_name: component_id.map(|_| "Bonus".into()),
            component_type: component_id.map(|_| "Addition".into()),
        }
    }

    #[test]
    fn grouping_collapses_repeated_headers() {
        let rows = vec![
            join_row(1, Some(1)),
            join_row(1, Some(2)),
            join_row(1, Some(3)),
            join_row(2, None),
        ];
        let grouped = group_rows(rows);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].salary.salary_id, 1);
        assert_eq!(grouped[0].other_salary.len(), 3);
        // the no-match row contributes no placeholder entry
        assert_eq!(grouped[1].salary.salary_id, 2);
        assert!(grouped[1].other_salary.is_empty());
    }

    #[test]
    fn grouping_preserves_arrival_order() {
        let grouped = group_rows(vec![join_row(5, None), join_row(2, None), join_row(9, None)]);
        let ids: Vec<i64> = grouped.iter().map(|g| g.salary.salary_id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    async fn seed_employee(pool: &SqlitePool) -> i64 {
        let data = NewEmployee {
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
            office_timing_id: Some(1),
            leave_type_ids: vec![],
        };
        employee::create(pool, &data, 1).await.unwrap().employee_id
    }

    async fn seed_components(pool: &SqlitePool) {
        for (name, kind) in [("Festival Bonus", "Addition"), ("Arrear", "Addition"), ("Fine", "Deduction")] {
            sqlx::query(
                "INSERT INTO other_salary_components (component_name, component_type, created_by) VALUES (?, ?, 1)",
            )
            .bind(name)
            .bind(kind)
            .execute(pool)
            .await
            .unwrap();
        }
    }

    fn payload(employee_id: i64, components: Vec<NewSalaryComponent>) -> CreateSalaryPayload {
        CreateSalaryPayload {
            salary: NewSalary {
                employee_id,
                salary_month: 8,
                salary_year: 2026,
                basic_salary: 1000.0,
                gross_salary: 1200.0,
                net_salary: 1150.0,
                doj: None,
                department_id: Some(1),
                designation_id: Some(1),
            },
            other_salary: components,
        }
    }

    fn component(id: i64, amount: f64) -> NewSalaryComponent {
        NewSalaryComponent {
            other_salary_component_id: id,
            amount,
        }
    }

    #[actix_web::test]
    async fn create_persists_salary_with_components() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;
        seed_components(&pool).await;
        let employee_id = seed_employee(&pool).await;

        let created = create(
            &pool,
            &payload(employee_id, vec![component(1, 50.0), component(2, 25.0)]),
            1,
        )
        .await
        .unwrap();

        assert!(created.salary.salary_id > 0);
        assert_eq!(created.salary.net_salary, 1150.0);
        assert_eq!(created.other_salary.len(), 2);
        assert!(created.other_salary.iter().all(|c| {
            c.employee_id == employee_id && c.salary_month == 8 && c.salary_year == 2026
        }));
    }

    #[actix_web::test]
    async fn update_replaces_component_set_for_period() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;
        seed_components(&pool).await;
        let employee_id = seed_employee(&pool).await;

        let created = create(
            &pool,
            &payload(employee_id, vec![component(1, 50.0), component(2, 25.0)]),
            1,
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            created.salary.salary_id,
            &UpdateSalaryPayload {
                salary: json!({ "net_salary": 1100.0 }).as_object().unwrap().clone(),
                other_salary: vec![component(3, 100.0)],
            },
            2,
        )
        .await
        .unwrap();

        assert_eq!(updated.salary.net_salary, 1100.0);
        assert_eq!(updated.other_salary.len(), 1);
        assert_eq!(updated.other_salary[0].other_salary_component_id, 3);

        // no stale rows survive in the store either
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employee_other_salary_components")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[actix_web::test]
    async fn update_of_missing_salary_is_not_found() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;

        let err = update(
            &pool,
            999,
            &UpdateSalaryPayload {
                salary: json!({ "net_salary": 1.0 }).as_object().unwrap().clone(),
                other_salary: vec![],
            },
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn delete_removes_salary_and_components() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;
        seed_components(&pool).await;
        let employee_id = seed_employee(&pool).await;

        let created = create(&pool, &payload(employee_id, vec![component(1, 50.0)]), 1)
            .await
            .unwrap();
        delete(&pool, created.salary.salary_id).await.unwrap();

        let salaries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM salaries")
            .fetch_one(&pool)
            .await
            .unwrap();
        let components: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employee_other_salary_components")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!((salaries, components), (0, 0));
    }

    #[actix_web::test]
    async fn delete_of_missing_salary_is_not_found() {
        let pool = memory_pool().await;
        let err = delete(&pool, 42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[actix_web::test]
    async fn list_groups_components_under_their_salary() {
        let pool = memory_pool().await;
        seed_lookups(&pool).await;
        seed_components(&pool).await;
        let employee_id = seed_employee(&pool).await;

        create(
            &pool,
            &payload(
                employee_id,
                vec![component(1, 50.0), component(2, 25.0), component(3, 10.0)],
            ),
            1,
        )
        .await
        .unwrap();

        let grouped = list(&pool).await.unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].other_salary.len(), 3);
        assert_eq!(grouped[0].salary.employee_name.as_deref(), Some("John Doe"));
        assert_eq!(
            grouped[0].salary.department_name.as_deref(),
            Some("Engineering")
        );
    }
}
