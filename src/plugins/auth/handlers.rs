use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::http_error::AppError;
use crate::plugins::auth::models::{ConnectRequest, ConnectResponse};
use crate::plugins::auth::{api_key, repo};

/// Exchanges an email and password for the user's API key.
pub async fn connect(
    Extension(pool): Extension<PgPool>,
    payload: Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<ConnectResponse>, AppError> {
    let Json(payload) = payload?;
    let credentials = repo::find_credentials_by_email(&pool, &payload.email)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    let valid = verify(&payload.password, &credentials.password_hash).map_err(|e| {
        tracing::error!(error = %e, id_user = credentials.id_user, "stored password hash is unreadable");
        AppError::internal()
    })?;
    if !valid {
        return Err(AppError::unauthorized());
    }

    Ok(Json(ConnectResponse { api_key: api_key::key_from_uuid(credentials.uuid) }))
}
