use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use sqlx::PgPool;

use crate::http_error::AppError;
use crate::plugins::auth::Principal;
use crate::pagination::{ListEnvelope, PageQuery};
use crate::plugins::shared::{affected, inserted, listing, lookup, AffectedRows, InsertResponse};
use crate::plugins::users::models::{CreateUser, UpdateUser, UserDto};
use crate::plugins::users::repo;

const MIN_PASSWORD_LEN: usize = 4;

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(AppError::bad_request("invalid email"))
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AppError::bad_request("password too short"))
    }
}

pub async fn list_users(
    Extension(pool): Extension<PgPool>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ListEnvelope<UserDto>>, AppError> {
    let Query(q) = q?;
    let page = q.current();
    let (rows, total) = repo::list_users(&pool, page).await?;
    Ok(listing(rows, page, total))
}

pub async fn get_user(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<UserDto>>), AppError> {
    let Path(id) = id?;
    let (rows, total) = repo::get_user(&pool, id).await?;
    Ok(lookup(rows, total))
}

pub async fn create_user(
    Extension(pool): Extension<PgPool>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<Json<InsertResponse>, AppError> {
    let Json(payload) = payload?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let (id, _uuid) = repo::insert_user(&pool, &payload.email, &payload.password).await?;
    tracing::info!(id_user = id, created_by = principal.id_user, "user created");
    Ok(inserted(id))
}

pub async fn update_user(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    if let Some(password) = &payload.password {
        validate_password(password)?;
    }

    let rows = repo::update_user(&pool, id, payload.email.as_deref(), payload.password.as_deref()).await?;
    Ok(affected(rows))
}

pub async fn delete_user(
    Extension(pool): Extension<PgPool>,
    Extension(principal): Extension<Principal>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let rows = repo::delete_user(&pool, id).await?;
    if rows == 1 {
        tracing::info!(id_user = id, deleted_by = principal.id_user, "user deleted");
    }
    Ok(affected(rows))
}
