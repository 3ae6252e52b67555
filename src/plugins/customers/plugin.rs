use axum::{middleware, routing::get, Extension, Router};
use sqlx::PgPool;

use crate::kernel::Plugin;
use crate::plugins::auth::require_api_key;
use crate::plugins::customers::handlers::*;

pub struct CustomersPlugin {
    pub pool: PgPool,
}

impl CustomersPlugin {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Plugin for CustomersPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(list_customers).post(create_customer))
            .route("/period", get(customers_by_period))
            .route("/hotel-booking/:id_booking", get(customers_by_hotel_booking))
            .route("/plane-booking/:id_booking", get(customers_by_plane_booking))
            .route("/:id", get(get_customer).put(update_customer).delete(delete_customer))
            .route_layer(middleware::from_fn_with_state(self.pool.clone(), require_api_key))
            .layer(Extension(self.pool.clone()))
    }

    fn name(&self) -> &'static str {
        "customers"
    }
}
