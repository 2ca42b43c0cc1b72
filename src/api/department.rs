use crate::auth::auth::AuthUser;
use crate::service::department::{self, DepartmentData};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Department
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = DepartmentData,
    responses(
        (status = 201, description = "Department created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "Department",
    security(("bearer_auth" = []))
)]
pub async fn create_department(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<DepartmentData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_department")?;
    let created = department::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Departments
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses((status = 200, description = "All departments", body = Object)),
    tag = "Department",
    security(("bearer_auth" = []))
)]
pub async fn get_departments(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_department")?;
    let departments = department::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(departments))
}

/// Update Department
#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    params(("id" = i64, Path, description = "Department id")),
    request_body = DepartmentData,
    responses(
        (status = 200, description = "Updated department", body = Object),
        (status = 404, description = "Unknown department id")
    ),
    tag = "Department",
    security(("bearer_auth" = []))
)]
pub async fn update_department(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<DepartmentData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_department")?;
    let updated = department::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Department
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{id}",
    params(("id" = i64, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department removed"),
        (status = 400, description = "Employees still reference this department"),
        (status = 404, description = "Unknown department id")
    ),
    tag = "Department",
    security(("bearer_auth" = []))
)]
pub async fn delete_department(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_department")?;
    department::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Department deleted" })))
}
