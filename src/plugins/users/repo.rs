use axum::http::StatusCode;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::pagination::{offset, PAGE_SIZE};
use crate::plugins::users::models::UserDto;

fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn list_users(pool: &PgPool, page: i64) -> Result<(Vec<UserDto>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id_user) FROM users")
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let rows = sqlx::query_as::<_, UserDto>("SELECT id_user, email FROM users ORDER BY id_user LIMIT $1 OFFSET $2")
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

pub async fn get_user(pool: &PgPool, id: i32) -> Result<(Vec<UserDto>, i64), AppError> {
    let rows = sqlx::query_as::<_, UserDto>("SELECT id_user, email FROM users WHERE id_user = $1")
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    let total = rows.len() as i64;
    Ok((rows, total))
}

/// Stores a new user with a hashed password and a fresh UUID; returns both ids.
pub async fn insert_user(pool: &PgPool, email: &str, password: &str) -> Result<(i32, Uuid), AppError> {
    let password_hash = hash_password(password)?;
    let uuid = Uuid::new_v4();
    let id = sqlx::query_scalar::<_, i32>("INSERT INTO users (email, password, uuid) VALUES ($1, $2, $3) RETURNING id_user")
        .bind(email)
        .bind(&password_hash)
        .bind(uuid)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Referenced row does not exist", "A user already uses this email"))?;

    Ok((id, uuid))
}

pub async fn update_user(pool: &PgPool, id: i32, email: Option<&str>, password: Option<&str>) -> Result<u64, AppError> {
    let password_hash = password.map(hash_password).transpose()?;
    // A new password also issues a new API key.
    let result = sqlx::query(
        "UPDATE users SET email = COALESCE($1, email), password = COALESCE($2, password), \
         uuid = CASE WHEN $2 IS NULL THEN uuid ELSE $3 END WHERE id_user = $4",
    )
    .bind(email)
    .bind(password_hash)
    .bind(Uuid::new_v4())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| AppError::from_constraint(e, "Referenced row does not exist", "A user already uses this email"))?;

    Ok(result.rows_affected())
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id_user = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn clear_users(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM users").execute(pool).await.map_err(AppError::from)?;
    Ok(result.rows_affected())
}
