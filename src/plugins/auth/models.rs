use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}
