use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CustomerDto {
    pub id_customer: i32,
    pub firstname: String,
    pub lastname: String,
    pub birthdate: NaiveDate,
    pub email: Option<String>,
    pub is_companion: bool,
    pub id_user: Option<i32>,
}

/// Companions travel with a main customer and carry neither an email nor a
/// user account.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CustomerCreate {
    pub firstname: String,
    pub lastname: String,
    pub birthdate: NaiveDate,
    pub email: Option<String>,
    #[serde(default, alias = "isCompanion")]
    pub is_companion: bool,
    #[serde(default, alias = "idUser")]
    pub id_user: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CustomerUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub email: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PeriodQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub page: Option<String>,
}

/// Main customer of a stay overlapping a requested period.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CustomerStayPeriod {
    pub id_customer: i32,
    pub email: Option<String>,
    pub id_travel: i32,
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
}

/// Traveller sharing a stay with the holder of a booking.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StayTraveller {
    pub id_stay: i32,
    pub firstname: String,
    pub lastname: String,
}
