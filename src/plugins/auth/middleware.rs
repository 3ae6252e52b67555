use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use sqlx::PgPool;
use tracing::warn;

use crate::http_error::AppError;
use crate::plugins::auth::{api_key, repo};

pub const API_KEY_HEADER: &str = "x-api-key";

/// User an API key resolved to, available to handlers as a request extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Principal {
    pub id_user: i32,
}

pub async fn require_api_key(State(pool): State<PgPool>, mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let uuid = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(api_key::uuid_from_key)
        .ok_or_else(|| {
            warn!(path = %req.uri().path(), "missing or malformed api key");
            AppError::unauthorized()
        })?;

    let id_user = repo::find_user_by_uuid(&pool, uuid).await?.ok_or_else(|| {
        warn!(path = %req.uri().path(), "api key does not match any user");
        AppError::unauthorized()
    })?;

    req.extensions_mut().insert(Principal { id_user });
    Ok(next.run(req).await)
}
