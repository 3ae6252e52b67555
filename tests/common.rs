#![allow(dead_code)]

use std::env;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use sqlx::{Connection, PgConnection, PgPool};
use tokio::net::TcpListener;

use travel_agency_api::db;
use travel_agency_api::kernel::{build_app, Plugin};
use travel_agency_api::plugins::auth::api_key::key_from_uuid;
use travel_agency_api::plugins::customers::CustomersPlugin;
use travel_agency_api::plugins::health::HealthPlugin;
use travel_agency_api::plugins::metrics::MetricsPlugin;
use travel_agency_api::plugins::stays::StaysPlugin;
use travel_agency_api::plugins::travels::TravelsPlugin;
use travel_agency_api::plugins::users::repo::insert_user;
use travel_agency_api::plugins::users::UsersPlugin;

pub const ADMIN_EMAIL: &str = "admin@agency.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Database created for a single test, force-dropped when the test ends.
pub struct TestDatabase {
    maintenance_url: String,
    name: String,
}

impl TestDatabase {
    /// Creates a uniquely named database next to the one `base_url` points at
    /// and returns it with its connection URL.
    async fn create(base_url: &str) -> anyhow::Result<(Self, String)> {
        let maintenance_url = replace_db_name(base_url, "postgres");
        let name = format!("travel_agency_test_{}", uuid::Uuid::new_v4().simple());

        let mut conn = PgConnection::connect(&maintenance_url).await?;
        sqlx::query(&format!("CREATE DATABASE \"{name}\"")).execute(&mut conn).await?;
        conn.close().await?;

        let url = replace_db_name(base_url, &name);
        Ok((Self { maintenance_url, name }, url))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let maintenance_url = self.maintenance_url.clone();
        let statement = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
        // Drop cannot await, so the statement runs on a throwaway runtime.
        let dropped = std::thread::spawn(move || -> anyhow::Result<()> {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(async {
                let mut conn = PgConnection::connect(&maintenance_url).await?;
                sqlx::query(&statement).execute(&mut conn).await?;
                conn.close().await?;
                Ok(())
            })
        })
        .join();
        if let Ok(Err(e)) = dropped {
            eprintln!("could not drop test database {}: {e}", self.name);
        }
    }
}

pub struct TestApp {
    pub base: String,
    pub pool: PgPool,
    pub client: Client,
    /// Key of the bootstrap user every protected request authenticates with.
    pub api_key: String,
    pub id_admin: i32,
    server: tokio::task::JoinHandle<()>,
    _database: TestDatabase,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn replace_db_name(url: &str, name: &str) -> String {
    let mut out = url.to_string();
    if let Some(idx) = out.rfind('/') {
        let query = out[idx..].find('?').map(|q| out[idx + q..].to_string()).unwrap_or_default();
        out.replace_range(idx + 1.., &format!("{name}{query}"));
    }
    out
}

/// Spawns the full application on an ephemeral port over a fresh database.
/// Returns `None` when `TEST_DATABASE_URL` is unset so the suite can run
/// without Postgres.
pub async fn spawn_app() -> anyhow::Result<Option<TestApp>> {
    let Ok(test_db) = env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return Ok(None);
    };

    let (database, url) = TestDatabase::create(&test_db).await?;
    let pool = db::init_db(&url, 5).await?;
    let (id_admin, uuid) = insert_user(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await?;

    let metrics = MetricsPlugin::new()?;
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin),
        Box::new(CustomersPlugin::new(pool.clone())),
        Box::new(TravelsPlugin::new(pool.clone())),
        Box::new(StaysPlugin::new(pool.clone())),
        Box::new(UsersPlugin::new(pool.clone())),
    ];
    let app = build_app(&plugins, Some(metrics.clone())).await.nest("/metrics", metrics.router());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    Ok(Some(TestApp {
        base: format!("http://{addr}"),
        pool,
        client: Client::new(),
        api_key: key_from_uuid(uuid),
        id_admin,
        server,
        _database: database,
    }))
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("x-api-key", &self.api_key)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Response> {
        Ok(self.authed(self.client.get(self.url(path))).send().await?)
    }

    pub async fn post(&self, path: &str, body: Value) -> anyhow::Result<Response> {
        Ok(self.authed(self.client.post(self.url(path))).json(&body).send().await?)
    }

    pub async fn put(&self, path: &str, body: Value) -> anyhow::Result<Response> {
        Ok(self.authed(self.client.put(self.url(path))).json(&body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Response> {
        Ok(self.authed(self.client.delete(self.url(path))).send().await?)
    }

    /// POSTs `body` and returns the `insertId` of the created row.
    pub async fn create(&self, path: &str, body: Value) -> anyhow::Result<i64> {
        let resp = self.post(path, body).await?;
        anyhow::ensure!(resp.status().is_success(), "create {path} failed with {}", resp.status());
        let json: Value = resp.json().await?;
        json["insertId"].as_i64().ok_or_else(|| anyhow::anyhow!("no insertId in {json}"))
    }

    pub async fn create_travel(&self, destination: &str) -> anyhow::Result<i64> {
        self.create(
            "/api/travels",
            serde_json::json!({
                "destination": destination,
                "id_hotel": 12,
                "board_type": "half-stay",
                "margin": 10,
                "reduction": 5
            }),
        )
        .await
    }

    pub async fn create_customer(&self, firstname: &str, id_user: Option<i64>) -> anyhow::Result<i64> {
        self.create(
            "/api/customers",
            serde_json::json!({
                "firstname": firstname,
                "lastname": "Traveller",
                "birthdate": "1990-12-10",
                "email": format!("{}@agency.test", firstname.to_lowercase()),
                "is_companion": false,
                "id_user": id_user
            }),
        )
        .await
    }

    pub async fn create_companion(&self, firstname: &str) -> anyhow::Result<i64> {
        self.create(
            "/api/customers",
            serde_json::json!({
                "firstname": firstname,
                "lastname": "Companion",
                "birthdate": "2001-03-04",
                "is_companion": true
            }),
        )
        .await
    }

    pub async fn create_stay(&self, id_travel: i64, id_customer: i64, start_at: &str, end_at: &str) -> anyhow::Result<i64> {
        self.create(
            "/api/stays",
            serde_json::json!({
                "id_travel": id_travel,
                "start_at": start_at,
                "end_at": end_at,
                "id_main_customer": id_customer
            }),
        )
        .await
    }
}
