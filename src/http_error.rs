use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sqlx::Error as SqlxError;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: u16,
    status: &'static str,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, AUTHENTICATION_FAILED)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Maps a store error the usual way, replacing the message for the two
    /// constraint kinds callers can word for their own entity.
    pub fn from_constraint(e: SqlxError, missing_reference: &str, duplicate: &str) -> Self {
        let err = Self::from(e);
        match err.status {
            StatusCode::NOT_FOUND => err.with_message(missing_reference),
            StatusCode::BAD_REQUEST => err.with_message(duplicate),
            _ => err,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody { message: self.message, code: self.status.as_u16(), status: "error" };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<SqlxError> for AppError {
    fn from(e: SqlxError) -> Self {
        match e {
            SqlxError::RowNotFound => AppError::new(StatusCode::NOT_FOUND, "Not found"),
            SqlxError::Database(db) => match db.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) => AppError::new(StatusCode::NOT_FOUND, db.message().to_string()),
                Some(UNIQUE_VIOLATION) => AppError::bad_request(db.message().to_string()),
                _ => {
                    tracing::error!(error = %db, "unhandled database error");
                    AppError::internal()
                }
            },
            other => {
                tracing::error!(error = %other, "store failure");
                AppError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn error_body_mirrors_status() {
        let (status, body) = body_json(AppError::unauthorized()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({ "message": "Authentication failed", "code": 401, "status": "error" })
        );
    }

    #[tokio::test]
    async fn row_not_found_is_404() {
        let (status, body) = body_json(AppError::from(SqlxError::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn repeated_page_parameter_gets_the_error_body() {
        use crate::pagination::PageQuery;
        use axum::extract::Query;

        let uri: axum::http::Uri = "/api/travels?page=1&page=2".parse().unwrap();
        let rejection = Query::<PageQuery>::try_from_uri(&uri).unwrap_err();
        let (status, body) = body_json(AppError::from(rejection)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["status"], "error");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[test]
    fn uncategorized_store_errors_become_500() {
        let err = AppError::from(SqlxError::PoolTimedOut);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn constraint_messages_only_replace_constraint_kinds() {
        let err = AppError::from_constraint(SqlxError::PoolClosed, "missing", "duplicate");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");

        let err = AppError::from_constraint(SqlxError::RowNotFound, "missing", "duplicate");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "missing");
    }
}
