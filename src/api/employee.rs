use crate::auth::auth::AuthUser;
use crate::error::ServiceError;
use crate::service::employee::{self, NewEmployee};
use actix_web::{HttpResponse, web};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

/// Create Employee
///
/// Inserts the employee and its leave type associations in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Duplicate email, phone or employee code")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewEmployee>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("create_employee")?;
    let created = employee::create(&pool, &payload, auth.user_id).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses((status = 200, description = "All employees with lookup names", body = Object)),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employees(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_employee")?;
    let employees = employee::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee with leave type ids", body = Object),
        (status = 404, description = "Unknown employee id")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_employee")?;
    let detail = employee::get_by_id(&pool, path.into_inner())
        .await?
        .ok_or(ServiceError::NotFound("Employee"))?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Update Employee
///
/// Field-presence semantics: only the submitted keys are rewritten. A
/// `leave_type_ids` array, when present, replaces the association set
/// wholesale ([] clears it; omitting the key leaves it alone).
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = Object,
    responses(
        (status = 200, description = "Updated employee", body = Object),
        (status = 400, description = "Empty or unknown fields"),
        (status = 404, description = "Unknown employee id")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("edit_employee")?;

    let mut fields: Map<String, Value> = match payload.into_inner() {
        Value::Object(map) => map,
        _ => {
            return Err(ServiceError::Validation("expected a JSON object".into()).into());
        }
    };

    let leave_type_ids: Option<Vec<i64>> = match fields.remove("leave_type_ids") {
        Some(value) => Some(
            serde_json::from_value(value)
                .map_err(|_| ServiceError::Validation("leave_type_ids must be an array of ids".into()))?,
        ),
        None => None,
    };

    let updated = employee::update(
        &pool,
        path.into_inner(),
        &fields,
        leave_type_ids.as_deref(),
        auth.user_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted employee snapshot", body = Object),
        (status = 404, description = "Unknown employee id")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("delete_employee")?;
    let deleted = employee::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deleted))
}
