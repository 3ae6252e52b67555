use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{coerce_page, ListEnvelope, PageQuery};
use crate::plugins::customers::models::{
    CustomerCreate, CustomerDto, CustomerStayPeriod, CustomerUpdate, PeriodQuery, StayTraveller,
};
use crate::plugins::customers::repo::{self, BookingKind};
use crate::plugins::shared::{affected, filtered, inserted, listing, lookup, AffectedRows, InsertResponse};

fn validate_create(customer: &CustomerCreate) -> Result<(), AppError> {
    if customer.is_companion && customer.id_user.is_some() {
        return Err(AppError::bad_request("A companion cannot be bound to a user"));
    }
    Ok(())
}

pub async fn list_customers(
    Extension(pool): Extension<PgPool>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ListEnvelope<CustomerDto>>, AppError> {
    let Query(q) = q?;
    let page = q.current();
    let (rows, total) = repo::list_customers(&pool, page).await?;
    Ok(listing(rows, page, total))
}

pub async fn get_customer(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<CustomerDto>>), AppError> {
    let Path(id) = id?;
    let (rows, total) = repo::get_customer(&pool, id).await?;
    Ok(lookup(rows, total))
}

pub async fn create_customer(
    Extension(pool): Extension<PgPool>,
    payload: Result<Json<CustomerCreate>, JsonRejection>,
) -> Result<Json<InsertResponse>, AppError> {
    let Json(payload) = payload?;
    validate_create(&payload)?;
    let id = repo::insert_customer(&pool, &payload).await?;
    Ok(inserted(id))
}

pub async fn update_customer(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CustomerUpdate>, JsonRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let rows = repo::update_customer(&pool, id, payload).await?;
    Ok(affected(rows))
}

pub async fn delete_customer(
    Extension(pool): Extension<PgPool>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, Json<AffectedRows>), AppError> {
    let Path(id) = id?;
    let rows = repo::delete_customer(&pool, id).await?;
    Ok(affected(rows))
}

pub async fn customers_by_period(
    Extension(pool): Extension<PgPool>,
    q: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<CustomerStayPeriod>>), AppError> {
    let Query(q) = q?;
    if q.to < q.from {
        return Err(AppError::bad_request("to must not precede from"));
    }
    let page = coerce_page(q.page.as_deref());
    let (rows, total) = repo::customers_by_stay_period(&pool, q.from, q.to, page).await?;
    Ok(filtered(rows, page, total))
}

async fn travellers(
    pool: PgPool,
    kind: BookingKind,
    id_booking: String,
    page: i64,
) -> Result<(StatusCode, Json<ListEnvelope<StayTraveller>>), AppError> {
    let (rows, total) = repo::travellers_by_booking(&pool, kind, &id_booking, page).await?;
    Ok(filtered(rows, page, total))
}

pub async fn customers_by_hotel_booking(
    Extension(pool): Extension<PgPool>,
    id_booking: Result<Path<String>, PathRejection>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<StayTraveller>>), AppError> {
    let Path(id_booking) = id_booking?;
    let Query(q) = q?;
    travellers(pool, BookingKind::Hotel, id_booking, q.current()).await
}

pub async fn customers_by_plane_booking(
    Extension(pool): Extension<PgPool>,
    id_booking: Result<Path<String>, PathRejection>,
    q: Result<Query<PageQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ListEnvelope<StayTraveller>>), AppError> {
    let Path(id_booking) = id_booking?;
    let Query(q) = q?;
    travellers(pool, BookingKind::Plane, id_booking, q.current()).await
}
