use crate::auth::auth::AuthUser;
use crate::error::ServiceError;
use crate::service::other_salary_component::{self, OtherSalaryComponentData};
use actix_web::{HttpResponse, web};
use serde_json::Value;
use sqlx::SqlitePool;

/// Create Other Salary Component
#[utoipa::path(
    post,
    path = "/api/v1/other-salary-components",
    request_body = OtherSalaryComponentData,
    responses(
        (status = 201, description = "Catalog entry created", body = Object),
        (status = 400, description = "Validation failure")
    ),
    tag = "OtherSalaryComponent",
    security(("bearer_auth" = []))
)]
pub async fn create_other_salary_component(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<OtherSalaryComponentData>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_other_salary_component")?;
    let created = other_salary_component::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Other Salary Components
#[utoipa::path(
    get,
    path = "/api/v1/other-salary-components",
    responses((status = 200, description = "Component catalog", body = Object)),
    tag = "OtherSalaryComponent",
    security(("bearer_auth" = []))
)]
pub async fn get_other_salary_components(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_other_salary_component")?;
    let components = other_salary_component::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(components))
}

/// Update Other Salary Component
///
/// Field-presence semantics: only submitted keys are rewritten.
#[utoipa::path(
    put,
    path = "/api/v1/other-salary-components/{id}",
    params(("id" = i64, Path, description = "Component id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated catalog entry", body = Object),
        (status = 400, description = "Empty or unknown fields"),
        (status = 404, description = "Unknown component id")
    ),
    tag = "OtherSalaryComponent",
    security(("bearer_auth" = []))
)]
pub async fn update_other_salary_component(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_other_salary_component")?;
    let fields = match payload.into_inner() {
        Value::Object(map) => map,
        _ => return Err(ServiceError::Validation("expected a JSON object".into()).into()),
    };
    let updated =
        other_salary_component::update(&pool, path.into_inner(), &fields, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Other Salary Component
#[utoipa::path(
    delete,
    path = "/api/v1/other-salary-components/{id}",
    params(("id" = i64, Path, description = "Component id")),
    responses(
        (status = 200, description = "Catalog entry removed"),
        (status = 404, description = "Unknown component id")
    ),
    tag = "OtherSalaryComponent",
    security(("bearer_auth" = []))
)]
pub async fn delete_other_salary_component(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_other_salary_component")?;
    other_salary_component::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Component deleted" })))
}
