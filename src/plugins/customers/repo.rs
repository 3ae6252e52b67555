use sqlx::PgPool;

use crate::http_error::AppError;
use crate::pagination::{offset, PAGE_SIZE};
use crate::plugins::customers::models::{CustomerCreate, CustomerDto, CustomerStayPeriod, CustomerUpdate, StayTraveller};
use chrono::NaiveDate;

const CUSTOMER_COLUMNS: &str = "id_customer, firstname, lastname, birthdate, email, is_companion, id_user";
const UNKNOWN_USER: &str = "Specified user does not exist";
const USER_ALREADY_BOUND: &str = "A customer is already bind to the given user";

/// Stays overlapping `[$1, $2]`: one bound inside the stay, or the stay inside the period.
const PERIOD_FILTER: &str = "FROM customer c JOIN stay s ON c.id_customer = s.id_main_customer \
     WHERE ($1 >= s.start_at AND $1 <= s.end_at) OR ($2 >= s.start_at AND $2 <= s.end_at) OR ($1 < s.start_at AND $2 > s.end_at)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Hotel,
    Plane,
}

impl BookingKind {
    fn table(self) -> &'static str {
        match self {
            BookingKind::Hotel => "hotel_booking",
            BookingKind::Plane => "plane_booking",
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            BookingKind::Hotel => "id_hotel_booking",
            BookingKind::Plane => "id_plane_booking",
        }
    }

    fn travellers_filter(self) -> String {
        format!(
            "FROM {table} AS b \
             INNER JOIN stay_customer AS sc ON sc.id_customer = b.id_customer \
             INNER JOIN stay_customer AS sc2 ON sc.id_stay = sc2.id_stay \
             INNER JOIN customer AS c ON sc2.id_customer = c.id_customer \
             WHERE b.{id} = $1",
            table = self.table(),
            id = self.id_column(),
        )
    }
}

pub async fn list_customers(pool: &PgPool, page: i64) -> Result<(Vec<CustomerDto>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id_customer) FROM customer")
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customer ORDER BY id_customer LIMIT $1 OFFSET $2");
    let rows = sqlx::query_as::<_, CustomerDto>(&sql)
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

pub async fn get_customer(pool: &PgPool, id: i32) -> Result<(Vec<CustomerDto>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(id_customer) FROM customer WHERE id_customer = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id_customer = $1");
    let rows = sqlx::query_as::<_, CustomerDto>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

/// Inserts a main customer with its email and user, or a companion without them.
pub async fn insert_customer(pool: &PgPool, customer: &CustomerCreate) -> Result<i32, AppError> {
    let query = if customer.is_companion {
        sqlx::query_scalar::<_, i32>("INSERT INTO customer (firstname, lastname, birthdate, is_companion) VALUES ($1, $2, $3, TRUE) RETURNING id_customer")
            .bind(&customer.firstname)
            .bind(&customer.lastname)
            .bind(customer.birthdate)
    } else {
        sqlx::query_scalar::<_, i32>("INSERT INTO customer (firstname, lastname, birthdate, email, is_companion, id_user) VALUES ($1, $2, $3, $4, FALSE, $5) RETURNING id_customer")
            .bind(&customer.firstname)
            .bind(&customer.lastname)
            .bind(customer.birthdate)
            .bind(&customer.email)
            .bind(customer.id_user)
    };

    query
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::from_constraint(e, UNKNOWN_USER, USER_ALREADY_BOUND))
}

pub async fn update_customer(pool: &PgPool, id: i32, customer: CustomerUpdate) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE customer SET firstname = COALESCE($1, firstname), lastname = COALESCE($2, lastname), birthdate = COALESCE($3, birthdate), email = COALESCE($4, email) WHERE id_customer = $5")
        .bind(customer.firstname)
        .bind(customer.lastname)
        .bind(customer.birthdate)
        .bind(customer.email)
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn delete_customer(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM customer WHERE id_customer = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn clear_customers(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM customer").execute(pool).await.map_err(AppError::from)?;
    Ok(result.rows_affected())
}

pub async fn customers_by_stay_period(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
    page: i64,
) -> Result<(Vec<CustomerStayPeriod>, i64), AppError> {
    let count_sql = format!("SELECT COUNT(c.id_customer) {PERIOD_FILTER}");
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let rows_sql = format!(
        "SELECT c.id_customer, c.email, s.id_travel, s.start_at, s.end_at {PERIOD_FILTER} \
         ORDER BY s.start_at, c.id_customer LIMIT $3 OFFSET $4"
    );
    let rows = sqlx::query_as::<_, CustomerStayPeriod>(&rows_sql)
        .bind(from)
        .bind(to)
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

pub async fn travellers_by_booking(
    pool: &PgPool,
    kind: BookingKind,
    id_booking: &str,
    page: i64,
) -> Result<(Vec<StayTraveller>, i64), AppError> {
    let filter = kind.travellers_filter();

    let count_sql = format!("SELECT COUNT(c.id_customer) {filter}");
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(id_booking)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)?;

    let rows_sql = format!("SELECT sc2.id_stay, c.firstname, c.lastname {filter} ORDER BY sc2.id_stay, c.id_customer LIMIT $2 OFFSET $3");
    let rows = sqlx::query_as::<_, StayTraveller>(&rows_sql)
        .bind(id_booking)
        .bind(i64::from(PAGE_SIZE.get()))
        .bind(offset(page, PAGE_SIZE))
        .fetch_all(pool)
        .await
        .map_err(AppError::from)?;

    Ok((rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_filters_target_their_own_table() {
        let hotel = BookingKind::Hotel.travellers_filter();
        assert!(hotel.contains("FROM hotel_booking AS b"));
        assert!(hotel.ends_with("WHERE b.id_hotel_booking = $1"));

        let plane = BookingKind::Plane.travellers_filter();
        assert!(plane.contains("FROM plane_booking AS b"));
        assert!(plane.ends_with("WHERE b.id_plane_booking = $1"));
    }
}
