use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{offset, PAGE_SIZE};
use crate::plugins::stays::models::{StayCreate, StayDto, StayUpdate};

const STAY_COLUMNS: &str = "id_stay, id_travel, start_at, end_at, id_main_customer";
const MISSING_REFERENCE: &str = "Specified travel or customer does not exist";

pub async fn list_stays(pool: &PgPool, page: i64) -> Result<(Vec<StayDto>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id_stay) FROM stay")
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let sql = format!("SELECT {STAY_COLUMNS} FROM stay ORDER BY id_stay LIMIT $1 OFFSET $2");
    let rows = sqlx::query_as::<_, StayDto>(&sql)
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

pub async fn get_stay(pool: &PgPool, id: i32) -> Result<(Vec<StayDto>, i64), AppError> {
    let sql = format!("SELECT {STAY_COLUMNS} FROM stay WHERE id_stay = $1");
    let rows = sqlx::query_as::<_, StayDto>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    let total = rows.len() as i64;
    Ok((rows, total))
}

pub async fn insert_stay(pool: &PgPool, stay: &StayCreate) -> Result<i32, AppError> {
    let id = sqlx::query_scalar::<_, i32>("INSERT INTO stay (id_travel, start_at, end_at, id_main_customer) VALUES ($1, $2, $3, $4) RETURNING id_stay")
        .bind(stay.id_travel)
        .bind(stay.start_at)
        .bind(stay.end_at)
        .bind(stay.id_main_customer)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::from_constraint(e, MISSING_REFERENCE, "Stay already exists"))?;
    Ok(id)
}

pub async fn update_stay(pool: &PgPool, id: i32, stay: StayUpdate) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE stay SET id_travel = COALESCE($1, id_travel), start_at = COALESCE($2, start_at), end_at = COALESCE($3, end_at), id_main_customer = COALESCE($4, id_main_customer) WHERE id_stay = $5")
        .bind(stay.id_travel)
        .bind(stay.start_at)
        .bind(stay.end_at)
        .bind(stay.id_main_customer)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| AppError::from_constraint(e, MISSING_REFERENCE, "Stay already exists"))?;
    Ok(result.rows_affected())
}

pub async fn delete_stay(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM stay WHERE id_stay = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

/// Binds every customer to the stay in one transaction, one insert after the
/// other. Either all rows are written or none.
pub async fn bind_customers(pool: &PgPool, id_stay: i32, customers: &[i32]) -> Result<u64, AppError> {
    let mut tx = pool.begin().await.map_err(AppError::from)?;
    let mut affected = 0;
    for id_customer in customers {
        let result = sqlx::query("INSERT INTO stay_customer (id_stay, id_customer) VALUES ($1, $2)")
            .bind(id_stay)
            .bind(*id_customer)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_constraint(e, "Specified stay or customer does not exist", "Customer is already bound to this stay"))?;
        affected += result.rows_affected();
    }
    tx.commit().await.map_err(AppError::from)?;
    Ok(affected)
}

pub async fn bind_hotel_booking(pool: &PgPool, id_customer: i32, id_booking: &str) -> Result<String, AppError> {
    let id = sqlx::query_scalar::<_, String>("INSERT INTO hotel_booking (id_hotel_booking, id_customer) VALUES ($1, $2) RETURNING id_hotel_booking")
        .bind(id_booking)
        .bind(id_customer)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;
    Ok(id)
}

pub async fn bind_plane_booking(pool: &PgPool, id_customer: i32, id_booking: &str) -> Result<String, AppError> {
    let id = sqlx::query_scalar::<_, String>("INSERT INTO plane_booking (id_plane_booking, id_customer) VALUES ($1, $2) RETURNING id_plane_booking")
        .bind(id_booking)
        .bind(id_customer)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;
    Ok(id)
}
