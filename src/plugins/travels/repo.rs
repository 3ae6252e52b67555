use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{offset, PAGE_SIZE};
use crate::plugins::travels::models::{TravelCreate, TravelDto, TravelUpdate};

const TRAVEL_COLUMNS: &str = "id_travel, destination, id_hotel, board_type, margin, reduction";

pub async fn list_travels(pool: &PgPool, page: i64) -> Result<(Vec<TravelDto>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id_travel) FROM travel")
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let sql = format!("SELECT {TRAVEL_COLUMNS} FROM travel ORDER BY id_travel LIMIT $1 OFFSET $2");
    let rows = sqlx::query_as::<_, TravelDto>(&sql)
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

pub async fn get_travel(pool: &PgPool, id: i32) -> Result<(Vec<TravelDto>, i64), AppError> {
    let sql = format!("SELECT {TRAVEL_COLUMNS} FROM travel WHERE id_travel = $1");
    let rows = sqlx::query_as::<_, TravelDto>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    let total = rows.len() as i64;
    Ok((rows, total))
}

pub async fn insert_travel(pool: &PgPool, travel: &TravelCreate) -> Result<i32, AppError> {
    let id = sqlx::query_scalar::<_, i32>("INSERT INTO travel (destination, id_hotel, board_type, margin, reduction) VALUES ($1, $2, $3, $4, $5) RETURNING id_travel")
        .bind(&travel.destination)
        .bind(travel.id_hotel)
        .bind(&travel.board_type)
        .bind(travel.margin)
        .bind(travel.reduction)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;
    Ok(id)
}

pub async fn update_travel(pool: &PgPool, id: i32, travel: TravelUpdate) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE travel SET destination = COALESCE($1, destination), id_hotel = COALESCE($2, id_hotel), board_type = COALESCE($3, board_type), margin = COALESCE($4, margin), reduction = COALESCE($5, reduction) WHERE id_travel = $6")
        .bind(travel.destination)
        .bind(travel.id_hotel)
        .bind(travel.board_type)
        .bind(travel.margin)
        .bind(travel.reduction)
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn delete_travel(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM travel WHERE id_travel = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn clear_travels(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM travel").execute(pool).await.map_err(AppError::from)?;
    Ok(result.rows_affected())
}
