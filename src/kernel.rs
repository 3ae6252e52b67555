use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use tracing::info;

use crate::plugins::metrics::MetricsPlugin;

/// Prefix every plugin is mounted under.
pub const API_PREFIX: &str = "/api";

#[async_trait]
pub trait Plugin: Send + Sync {
    async fn router(&self) -> Router;

    fn name(&self) -> &'static str;
    /// Optional lifecycle hook called when the kernel starts.
    async fn on_start(&self) {}
    /// Optional lifecycle hook called on shutdown.
    async fn on_shutdown(&self) {}
}

/// Builds the application router by mounting each plugin under `/api/{plugin.name()}`.
/// With `metrics`, every plugin router is instrumented under its own name.
pub async fn build_app(plugins: &[Box<dyn Plugin>], metrics: Option<MetricsPlugin>) -> Router {
    let mut api = Router::new();

    for plugin in plugins.iter() {
        info!("starting plugin {}", plugin.name());
        plugin.on_start().await;
        let mut router = plugin.router().await;
        if let Some(metrics) = &metrics {
            router = metrics.instrument(plugin.name(), router);
        }
        api = api.nest(&format!("/{}", plugin.name()), router);
    }

    Router::new().nest(API_PREFIX, api).fallback(not_found)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
