use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user as exposed by the API. Neither the password hash nor the UUID behind
/// the API key leaves the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserDto {
    pub id_user: i32,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password: Option<String>,
}
