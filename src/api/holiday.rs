use crate::auth::auth::AuthUser;
use crate::error::ServiceError;
use crate::service::holiday::{self, NewHoliday};
use actix_web::{HttpResponse, web};
use serde_json::Value;
use sqlx::SqlitePool;

/// Create Holiday
#[utoipa::path(
    post,
    path = "/api/v1/holidays",
    request_body = NewHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "Holiday",
    security(("bearer_auth" = []))
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewHoliday>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_holiday")?;
    let created = holiday::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Holidays
#[utoipa::path(
    get,
    path = "/api/v1/holidays",
    responses((status = 200, description = "Holidays ordered by start date", body = Object)),
    tag = "Holiday",
    security(("bearer_auth" = []))
)]
pub async fn get_holidays(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_holiday")?;
    let holidays = holiday::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(holidays))
}

/// Update Holiday
///
/// Field-presence semantics: only submitted keys are rewritten.
#[utoipa::path(
    put,
    path = "/api/v1/holidays/{id}",
    params(("id" = i64, Path, description = "Holiday id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated holiday", body = Object),
        (status = 400, description = "Empty or unknown fields"),
        (status = 404, description = "Unknown holiday id")
    ),
    tag = "Holiday",
    security(("bearer_auth" = []))
)]
pub async fn update_holiday(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_holiday")?;
    let fields = match payload.into_inner() {
        Value::Object(map) => map,
        _ => return Err(ServiceError::Validation("expected a JSON object".into()).into()),
    };
    let updated = holiday::update(&pool, path.into_inner(), &fields, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Holiday
#[utoipa::path(
    delete,
    path = "/api/v1/holidays/{id}",
    params(("id" = i64, Path, description = "Holiday id")),
    responses(
        (status = 200, description = "Holiday removed"),
        (status = 404, description = "Unknown holiday id")
    ),
    tag = "Holiday",
    security(("bearer_auth" = []))
)]
pub async fn delete_holiday(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_holiday")?;
    holiday::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Holiday deleted" })))
}
