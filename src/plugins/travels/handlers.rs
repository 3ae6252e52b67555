use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{ListEnvelope, PageQuery};
use crate::plugins::shared::{affected, inserted, listing, lookup, AffectedRows, InsertResponse};
use crate::plugins::travels::models::{TravelCreate, TravelDto, TravelUpdate};
use crate::plugins::travels::repo;

pub async fn list_travels(
    Extension(pool): Extension<PgPool>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ListEnvelope<TravelDto>>, AppError> {
    let Query(q) = q?;
    let page = q.current();
    let (rows, total) = repo::list_travels(&pool, page).await?;
    Ok(listing(rows, page, total))
}

pub async fn get_travel(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<TravelDto>>), AppError> {
    let Path(id) = id?;
    let (rows, total) = repo::get_travel(&pool, id).await?;
    Ok(lookup(rows, total))
}

pub async fn create_travel(
    Extension(pool): Extension<PgPool>,
    payload: Result<Json<TravelCreate>, JsonRejection>,
) -> Result<Json<InsertResponse>, AppError> {
    let Json(payload) = payload?;
    let id = repo::insert_travel(&pool, &payload).await?;
    Ok(inserted(id))
}

pub async fn update_travel(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TravelUpdate>, JsonRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let rows = repo::update_travel(&pool, id, payload).await?;
    Ok(affected(rows))
}

pub async fn delete_travel(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let rows = repo::delete_travel(&pool, id).await?;
    Ok(affected(rows))
}
