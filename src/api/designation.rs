use crate::auth::auth::AuthUser;
use crate::service::designation::{self, DesignationData};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Designation
#[utoipa::path(
    post,
    path = "/api/v1/designations",
    request_body = DesignationData,
    responses(
        (status = 201, description = "Designation created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "Designation",
    security(("bearer_auth" = []))
)]
pub async fn create_designation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<DesignationData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_designation")?;
    let created = designation::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Designations
#[utoipa::path(
    get,
    path = "/api/v1/designations",
    responses((status = 200, description = "All designations", body = Object)),
    tag = "Designation",
    security(("bearer_auth" = []))
)]
pub async fn get_designations(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_designation")?;
    let designations = designation::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(designations))
}

/// Update Designation
#[utoipa::path(
    put,
    path = "/api/v1/designations/{id}",
    params(("id" = i64, Path, description = "Designation id")),
    request_body = DesignationData,
    responses(
        (status = 200, description = "Updated designation", body = Object),
        (status = 404, description = "Unknown designation id")
    ),
    tag = "Designation",
    security(("bearer_auth" = []))
)]
pub async fn update_designation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<DesignationData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_designation")?;
    let updated = designation::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Designation
#[utoipa::path(
    delete,
    path = "/api/v1/designations/{id}",
    params(("id" = i64, Path, description = "Designation id")),
    responses(
        (status = 200, description = "Designation removed"),
        (status = 404, description = "Unknown designation id")
    ),
    tag = "Designation",
    security(("bearer_auth" = []))
)]
pub async fn delete_designation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_designation")?;
    designation::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Designation deleted" })))
}
