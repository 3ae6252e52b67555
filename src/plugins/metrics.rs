use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{routing::get, Router};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct MetricsPlugin {
    registry: Arc<Registry>,
    pub request_counter: Arc<IntCounterVec>,
    pub request_duration: Arc<HistogramVec>,
}

#[derive(Clone)]
struct RouteMetrics {
    plugin: &'static str,
    metrics: MetricsPlugin,
}

impl MetricsPlugin {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let counter = IntCounterVec::new(
            Opts::new("api_requests_total", "Total API requests"),
            &["plugin", "method", "status"],
        )?;
        registry.register(Box::new(counter.clone()))?;

        let histogram = HistogramVec::new(
            HistogramOpts::new("api_request_duration_seconds", "API request latencies in seconds"),
            &["plugin", "method"],
        )?;
        registry.register(Box::new(histogram.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))?;

        Ok(MetricsPlugin {
            registry: Arc::new(registry),
            request_counter: Arc::new(counter),
            request_duration: Arc::new(histogram),
        })
    }

    /// Wraps the matched routes of `router` so each request is counted under `plugin`.
    pub fn instrument(&self, plugin: &'static str, router: Router) -> Router {
        let state = RouteMetrics { plugin, metrics: self.clone() };
        router.route_layer(middleware::from_fn_with_state(state, track))
    }

    pub fn render(&self) -> Result<String, StatusCode> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn router(&self) -> Router {
        let metrics = self.clone();
        Router::new().route("/", get(move || {
            let metrics = metrics.clone();
            async move { metrics.render() }
        }))
    }
}

async fn track(State(route): State<RouteMetrics>, req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let started = Instant::now();
    let response = next.run(req).await;

    route
        .metrics
        .request_duration
        .with_label_values(&[route.plugin, method.as_str()])
        .observe(started.elapsed().as_secs_f64());
    route
        .metrics
        .request_counter
        .with_label_values(&[route.plugin, method.as_str(), response.status().as_str()])
        .inc();
    response
}
