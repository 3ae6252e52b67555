use axum::{middleware, routing::{get, post}, Extension, Router};
use sqlx::PgPool;

use crate::kernel::Plugin;
use crate::plugins::auth::require_api_key;
use crate::plugins::stays::handlers::*;

pub struct StaysPlugin {
    pub pool: PgPool,
}

impl StaysPlugin {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Plugin for StaysPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(list_stays).post(create_stay))
            .route("/:id", get(get_stay).put(update_stay).delete(delete_stay))
            .route("/:id/customers", post(bind_customers))
            .route_layer(middleware::from_fn_with_state(self.pool.clone(), require_api_key))
            .layer(Extension(self.pool.clone()))
    }

    fn name(&self) -> &'static str {
        "stays"
    }
}
