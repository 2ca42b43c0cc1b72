use crate::auth::auth::AuthUser;
use crate::service::leave_type::{self, LeaveTypeData};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Leave Type
#[utoipa::path(
    post,
    path = "/api/v1/leave-types",
    request_body = LeaveTypeData,
    responses(
        (status = 201, description = "Leave type created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "LeaveType",
    security(("bearer_auth" = []))
)]
pub async fn create_leave_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<LeaveTypeData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_leave_type")?;
    let created = leave_type::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Leave Types
#[utoipa::path(
    get,
    path = "/api/v1/leave-types",
    responses((status = 200, description = "All leave types", body = Object)),
    tag = "LeaveType",
    security(("bearer_auth" = []))
)]
pub async fn get_leave_types(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_leave_type")?;
    let types = leave_type::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(types))
}

/// Update Leave Type
#[utoipa::path(
    put,
    path = "/api/v1/leave-types/{id}",
    params(("id" = i64, Path, description = "Leave type id")),
    request_body = LeaveTypeData,
    responses(
        (status = 200, description = "Updated leave type", body = Object),
        (status = 404, description = "Unknown leave type id")
    ),
    tag = "LeaveType",
    security(("bearer_auth" = []))
)]
pub async fn update_leave_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<LeaveTypeData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_leave_type")?;
    let updated = leave_type::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Leave Type
#[utoipa::path(
    delete,
    path = "/api/v1/leave-types/{id}",
    params(("id" = i64, Path, description = "Leave type id")),
    responses(
        (status = 200, description = "Leave type removed, associations cascaded"),
        (status = 404, description = "Unknown leave type id")
    ),
    tag = "LeaveType",
    security(("bearer_auth" = []))
)]
pub async fn delete_leave_type(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_leave_type")?;
    leave_type::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Leave type deleted" })))
}
