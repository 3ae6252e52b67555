use axum::{middleware, routing::get, Extension, Router};
use sqlx::PgPool;

use crate::kernel::Plugin;
use crate::plugins::auth::require_api_key;
use crate::plugins::travels::handlers::*;

pub struct TravelsPlugin {
    pub pool: PgPool,
}

impl TravelsPlugin {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Plugin for TravelsPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(list_travels).post(create_travel))
            .route("/:id", get(get_travel).put(update_travel).delete(delete_travel))
            .route_layer(middleware::from_fn_with_state(self.pool.clone(), require_api_key))
            .layer(Extension(self.pool.clone()))
    }

    fn name(&self) -> &'static str {
        "travels"
    }
}
