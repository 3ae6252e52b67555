use axum::{middleware, routing::{get, post}, Extension, Router};
use sqlx::PgPool;

use crate::kernel::Plugin;
use crate::plugins::auth::handlers::connect;
use crate::plugins::auth::require_api_key;
use crate::plugins::users::handlers::{create_user, delete_user, get_user, list_users, update_user};

pub struct UsersPlugin {
    pub pool: PgPool,
}

impl UsersPlugin {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Plugin for UsersPlugin {
    async fn router(&self) -> Router {
        let public = Router::new().route("/connect", post(connect));

        let protected = Router::new()
            .route("/", get(list_users).post(create_user))
            .route("/:id", get(get_user).put(update_user).delete(delete_user))
            .route_layer(middleware::from_fn_with_state(self.pool.clone(), require_api_key));

        public.merge(protected).layer(Extension(self.pool.clone()))
    }

    fn name(&self) -> &'static str {
        "users"
    }
}
