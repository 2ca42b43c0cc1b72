use crate::auth::auth::AuthUser;
use crate::service::office_timing::{self, OfficeTimingData};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Office Timing
///
/// Inserts the timing and links the selected weekend days in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/office-timings",
    request_body = OfficeTimingData,
    responses(
        (status = 201, description = "Timing with weekend ids and day names", body = Object),
        (status = 400, description = "Inverted times or unknown weekend id")
    ),
    tag = "OfficeTiming",
    security(("bearer_auth" = []))
)]
pub async fn create_office_timing(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<OfficeTimingData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_office_timing")?;
    let created = office_timing::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Office Timings
#[utoipa::path(
    get,
    path = "/api/v1/office-timings",
    responses((status = 200, description = "Timings with their weekend sets", body = Object)),
    tag = "OfficeTiming",
    security(("bearer_auth" = []))
)]
pub async fn get_office_timings(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_office_timing")?;
    let timings = office_timing::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(timings))
}

/// Get Office Timing
#[utoipa::path(
    get,
    path = "/api/v1/office-timings/{id}",
    params(("id" = i64, Path, description = "Office timing id")),
    responses(
        (status = 200, description = "Timing with weekend set", body = Object),
        (status = 404, description = "Unknown timing id")
    ),
    tag = "OfficeTiming",
    security(("bearer_auth" = []))
)]
pub async fn get_office_timing(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_office_timing")?;
    let timing = office_timing::get_by_id(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(timing))
}

/// Update Office Timing
///
/// Whole-value: both times are rewritten and the weekend set is replaced.
#[utoipa::path(
    put,
    path = "/api/v1/office-timings/{id}",
    params(("id" = i64, Path, description = "Office timing id")),
    request_body = OfficeTimingData,
    responses(
        (status = 200, description = "Updated timing", body = Object),
        (status = 404, description = "Unknown timing id")
    ),
    tag = "OfficeTiming",
    security(("bearer_auth" = []))
)]
pub async fn update_office_timing(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<OfficeTimingData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_office_timing")?;
    let updated = office_timing::update(&pool, path.into_inner(), &payload, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Office Timing
#[utoipa::path(
    delete,
    path = "/api/v1/office-timings/{id}",
    params(("id" = i64, Path, description = "Office timing id")),
    responses(
        (status = 200, description = "Timing removed, associations cascaded"),
        (status = 404, description = "Unknown timing id")
    ),
    tag = "OfficeTiming",
    security(("bearer_auth" = []))
)]
pub async fn delete_office_timing(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_office_timing")?;
    office_timing::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Office timing deleted" })))
}
