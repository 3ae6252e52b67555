use sqlx::PgPool;
use uuid::Uuid;

use crate::http_error::AppError;

pub struct Credentials {
    pub id_user: i32,
    pub password_hash: String,
    pub uuid: Uuid,
}

pub async fn find_user_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<i32>, AppError> {
    let id = sqlx::query_scalar::<_, i32>("SELECT id_user FROM users WHERE uuid = $1")
        .bind(uuid)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)?;
    Ok(id)
}

pub async fn find_credentials_by_email(pool: &PgPool, email: &str) -> Result<Option<Credentials>, AppError> {
    let row = sqlx::query_as::<_, (i32, String, Uuid)>("SELECT id_user, password, uuid FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)?;

    Ok(row.map(|(id_user, password_hash, uuid)| Credentials { id_user, password_hash, uuid }))
}
