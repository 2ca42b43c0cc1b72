use crate::auth::auth::AuthUser;
use crate::service::salary::{self, CreateSalaryPayload, UpdateSalaryPayload};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Salary
///
/// Inserts the monthly salary row and its ad hoc component rows atomically.
/// Component rows take their (employee, month, year) key from the salary.
#[utoipa::path(
    post,
    path = "/api/v1/salaries",
    request_body = CreateSalaryPayload,
    responses(
        (status = 201, description = "Salary with persisted components", body = Object),
        (status = 400, description = "Referenced employee or component missing")
    ),
    tag = "Salary",
    security(("bearer_auth" = []))
)]
pub async fn create_salary(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateSalaryPayload>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_salary")?;
    let created = salary::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Salaries
///
/// One entry per salary with employee, department and designation names and
/// the component entries grouped under it.
#[utoipa::path(
    get,
    path = "/api/v1/salaries",
    responses((status = 200, description = "Grouped salary list", body = Object)),
    tag = "Salary",
    security(("bearer_auth" = []))
)]
pub async fn get_salaries(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_salary")?;
    let salaries = salary::list(&pool).await?;
    Ok(HttpResponse::Ok().json(salaries))
}

/// Update Salary
///
/// Partially updates the salary row, then replaces the component set for the
/// updated row's period with the submitted list.
#[utoipa::path(
    put,
    path = "/api/v1/salaries/{id}",
    params(("id" = i64, Path, description = "Salary id")),
    request_body = UpdateSalaryPayload,
    responses(
        (status = 200, description = "Updated salary with components", body = Object),
        (status = 404, description = "Unknown salary id")
    ),
    tag = "Salary",
    security(("bearer_auth" = []))
)]
pub async fn update_salary(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateSalaryPayload>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_salary")?;
    let updated = salary::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Salary
#[utoipa::path(
    delete,
    path = "/api/v1/salaries/{id}",
    params(("id" = i64, Path, description = "Salary id")),
    responses(
        (status = 200, description = "Salary and its components removed"),
        (status = 404, description = "Unknown salary id")
    ),
    tag = "Salary",
    security(("bearer_auth" = []))
)]
pub async fn delete_salary(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_salary")?;
    salary::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Salary deleted" })))
}
