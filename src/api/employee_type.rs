use crate::auth::auth::AuthUser;
use crate::service::employee_type::{self, EmployeeTypeData};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Employee Type
#[utoipa::path(
    post,
    path = "/api/v1/employee-types",
    request_body = EmployeeTypeData,
    responses(
        (status = 201, description = "Employee type created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "EmployeeType",
    security(("bearer_auth" = []))
)]
pub async fn create_employee_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeeTypeData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_employee_type")?;
    let created = employee_type::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Employee Types
#[utoipa::path(
    get,
    path = "/api/v1/employee-types",
    responses((status = 200, description = "All employee types", body = Object)),
    tag = "EmployeeType",
    security(("bearer_auth" = []))
)]
pub async fn get_employee_types(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_employee_type")?;
    let types = employee_type::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(types))
}

/// Update Employee Type
#[utoipa::path(
    put,
    path = "/api/v1/employee-types/{id}",
    params(("id" = i64, Path, description = "Employee type id")),
    request_body = EmployeeTypeData,
    responses(
        (status = 200, description = "Updated employee type", body = Object),
        (status = 404, description = "Unknown employee type id")
    ),
    tag = "EmployeeType",
    security(("bearer_auth" = []))
)]
pub async fn update_employee_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<EmployeeTypeData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_employee_type")?;
    let updated = employee_type::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Employee Type
#[utoipa::path(
    delete,
    path = "/api/v1/employee-types/{id}",
    params(("id" = i64, Path, description = "Employee type id")),
    responses(
        (status = 200, description = "Employee type removed"),
        (status = 404, description = "Unknown employee type id")
    ),
    tag = "EmployeeType",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_employee_type")?;
    employee_type::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Employee type deleted" })))
}
