use crate::auth::auth::AuthUser;
use crate::error::ServiceError;
use crate::service::attendance::{self, NewAttendance};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// Accepts a single record or a whole day's batch in one request.
#[derive(Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AttendancePayload {
    One(NewAttendance),
    Many(Vec<NewAttendance>),
}

/// Record Attendance
///
/// Single record or batch; duplicates against existing (employee, date)
/// pairs are all reported in one 409 and nothing is written.
#[utoipa::path(
    post,
    path = "/api/v1/attendances",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Inserted attendance rows", body = Object),
        (status = 409, description = "One or more (employee, date) pairs already recorded")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
pub async fn create_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<AttendancePayload>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_attendance")?;
    let records = match payload.into_inner() {
        AttendancePayload::One(record) => vec![record],
        AttendancePayload::Many(records) => records,
    };
    let inserted = attendance::create(&pool, &records, auth.user_id).await?;
    Ok(HttpResponse::Created().json(inserted))
}

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/v1/attendances",
    responses((status = 200, description = "Attendance rows with employee names", body = Object)),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
pub async fn get_attendances(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_attendance")?;
    let rows = attendance::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Update Attendance
///
/// Field-presence semantics: only submitted keys are rewritten.
#[utoipa::path(
    put,
    path = "/api/v1/attendances/{id}",
    params(("id" = i64, Path, description = "Attendance record id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated attendance row", body = Object),
        (status = 400, description = "Empty or unknown fields"),
        (status = 404, description = "Unknown attendance id")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
pub async fn update_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_attendance")?;
    let fields = match payload.into_inner() {
        Value::Object(map) => map,
        _ => return Err(ServiceError::Validation("expected a JSON object".into()).into()),
    };
    let updated = attendance::update(&pool, path.into_inner(), &fields, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Attendance
#[utoipa::path(
    delete,
    path = "/api/v1/attendances/{id}",
    params(("id" = i64, Path, description = "Attendance record id")),
    responses(
        (status = 200, description = "Attendance row removed"),
        (status = 404, description = "Unknown attendance id")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
pub async fn delete_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_attendance")?;
    attendance::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Attendance deleted" })))
}
