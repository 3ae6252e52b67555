use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{ListEnvelope, PageQuery};
use crate::plugins::shared::{affected, inserted, listing, lookup, AffectedRows, InsertResponse};
use crate::plugins::stays::models::{BindCustomers, StayCreate, StayDto, StayUpdate};
use crate::plugins::stays::repo;

fn validate_period(start_at: NaiveDate, end_at: NaiveDate) -> Result<(), AppError> {
    if end_at < start_at {
        return Err(AppError::bad_request("end_at must not precede start_at"));
    }
    Ok(())
}

pub async fn list_stays(
    Extension(pool): Extension<PgPool>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ListEnvelope<StayDto>>, AppError> {
    let Query(q) = q?;
    let page = q.current();
    let (rows, total) = repo::list_stays(&pool, page).await?;
    Ok(listing(rows, page, total))
}

pub async fn get_stay(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<StayDto>>), AppError> {
    let Path(id) = id?;
    let (rows, total) = repo::get_stay(&pool, id).await?;
    Ok(lookup(rows, total))
}

pub async fn create_stay(
    Extension(pool): Extension<PgPool>,
    payload: Result<Json<StayCreate>, JsonRejection>,
) -> Result<Json<InsertResponse>, AppError> {
    let Json(payload) = payload?;
    validate_period(payload.start_at, payload.end_at)?;
    let id = repo::insert_stay(&pool, &payload).await?;
    Ok(inserted(id))
}

pub async fn update_stay(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StayUpdate>, JsonRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    if let (Some(start_at), Some(end_at)) = (payload.start_at, payload.end_at) {
        validate_period(start_at, end_at)?;
    }
    let rows = repo::update_stay(&pool, id, payload).await?;
    Ok(affected(rows))
}

pub async fn delete_stay(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let rows = repo::delete_stay(&pool, id).await?;
    Ok(affected(rows))
}

pub async fn bind_customers(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BindCustomers>, JsonRejection>,
) -> Result<Json<AffectedRows>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    if payload.customers.is_empty() {
        return Err(AppError::bad_request("no customers to bind"));
    }
    let affected_rows = repo::bind_customers(&pool, id, &payload.customers).await?;
    Ok(Json(AffectedRows { affected_rows }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_must_not_run_backwards() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert!(validate_period(start, end).is_ok());
        assert!(validate_period(start, start).is_ok());
        assert_eq!(validate_period(end, start).unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
