use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TravelDto {
    pub id_travel: i32,
    pub destination: String,
    pub id_hotel: i32,
    pub board_type: String,
    pub margin: i32,
    pub reduction: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TravelCreate {
    pub destination: String,
    pub id_hotel: i32,
    pub board_type: String,
    pub margin: i32,
    pub reduction: i32,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TravelUpdate {
    pub destination: Option<String>,
    pub id_hotel: Option<i32>,
    pub board_type: Option<String>,
    pub margin: Option<i32>,
    pub reduction: Option<i32>,
}
