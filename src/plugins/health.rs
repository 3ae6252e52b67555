use crate::kernel::Plugin;
use axum::{routing::any, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Probe {
    test: &'static str,
}

/// Unauthenticated liveness probe answering every method on `/api/test`.
pub struct HealthPlugin;

#[axum::debug_handler]
async fn probe_handler() -> Json<Probe> {
    Json(Probe { test: "test" })
}

#[async_trait::async_trait]
impl Plugin for HealthPlugin {
    async fn router(&self) -> Router {
        Router::new().route("/", any(probe_handler))
    }

    fn name(&self) -> &'static str {
        "test"
    }

    async fn on_start(&self) {
        tracing::info!("health probe mounted");
    }
}
