use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use travel_agency_api::config::Config;
use travel_agency_api::db;
use travel_agency_api::kernel::{build_app, Plugin};
use travel_agency_api::plugins::customers::CustomersPlugin;
use travel_agency_api::plugins::health::HealthPlugin;
use travel_agency_api::plugins::metrics::MetricsPlugin;
use travel_agency_api::plugins::stays::StaysPlugin;
use travel_agency_api::plugins::travels::TravelsPlugin;
use travel_agency_api::plugins::users::UsersPlugin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let pool = db::init_db(&config.database_url, config.max_connections).await?;

    let metrics_plugin = MetricsPlugin::new()?;
    let plugins_vec: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin),
        Box::new(CustomersPlugin::new(pool.clone())),
        Box::new(TravelsPlugin::new(pool.clone())),
        Box::new(StaysPlugin::new(pool.clone())),
        Box::new(UsersPlugin::new(pool.clone())),
    ];

    let plugin_names: Vec<&'static str> = plugins_vec.iter().map(|p| p.name()).collect();
    tracing::info!("mounting plugins: {:?}", plugin_names);

    let app = build_app(&plugins_vec, Some(metrics_plugin.clone()))
        .await
        .nest("/metrics", metrics_plugin.router());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            for p in plugins_vec.iter() {
                p.on_shutdown().await;
            }
        })
        .await?;

    Ok(())
}
