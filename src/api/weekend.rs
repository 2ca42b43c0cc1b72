use crate::auth::auth::AuthUser;
use crate::service::weekend;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// List Weekends
///
/// The seven seeded day rows, for office timing forms.
#[utoipa::path(
    get,
    path = "/api/v1/weekends",
    responses((status = 200, description = "Day-of-week lookup rows", body = Object)),
    tag = "Weekend",
    security(("bearer_auth" = []))
)]
pub async fn get_weekends(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<HttpResponse> {
    auth.require_permission("view_weekend")?;
    let days = weekend::get_all(&pool).await?;
    Ok(HttpResponse::Ok().json(days))
}
