use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StayDto {
    pub id_stay: i32,
    pub id_travel: i32,
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
    pub id_main_customer: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StayCreate {
    pub id_travel: i32,
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
    pub id_main_customer: i32,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct StayUpdate {
    pub id_travel: Option<i32>,
    pub start_at: Option<NaiveDate>,
    pub end_at: Option<NaiveDate>,
    pub id_main_customer: Option<i32>,
}

/// Customers travelling on a stay, the main customer included.
#[derive(Serialize, Deserialize, Debug)]
pub struct BindCustomers {
    pub customers: Vec<i32>,
}
