use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy shared by every manager. All variants are terminal for
/// the call; nothing is retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation (duplicate email/phone/emp_code, overlapping
    /// attendance date).
    #[error("{0}")]
    Conflict(String),

    /// A referenced id (department, designation, leave type, ...) does not
    /// exist.
    #[error("{0}")]
    ReferentialViolation(String),

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

// SQLite extended result codes, see https://sqlite.org/rescode.html
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_CHECK: &str = "275";
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(SQLITE_CONSTRAINT_UNIQUE) | Some(SQLITE_CONSTRAINT_PRIMARYKEY) => {
                    return ServiceError::Conflict(db_err.message().to_string());
                }
                Some(SQLITE_CONSTRAINT_FOREIGNKEY) => {
                    return ServiceError::ReferentialViolation(db_err.message().to_string());
                }
                Some(SQLITE_CONSTRAINT_CHECK) => {
                    return ServiceError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        ServiceError::Database(err)
    }
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::ReferentialViolation(_) | ServiceError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Database(e) = self {
            tracing::error!(error = %e, "Database failure");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }));
        }
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}
