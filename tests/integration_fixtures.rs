mod common;

use reqwest::StatusCode;
use serde_json::Value;

use travel_agency_api::fixtures;

#[tokio::test]
async fn seeded_chains_are_reachable_through_the_api() -> anyhow::Result<()> {
    let Some(app) = common::spawn_app().await? else { return Ok(()) };

    let chains = fixtures::seed(&app.pool, 4).await?;
    assert_eq!(chains.len(), 4);

    let travels: Value = app.get("/api/travels").await?.json().await?;
    assert_eq!(travels["nbRecords"], 4);

    for chain in &chains {
        // Each seeded user can authenticate with its own key.
        let resp = app
            .client
            .get(app.url(&format!("/api/stays/{}", chain.id_stay)))
            .header("x-api-key", &chain.api_key)
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.get(&format!("/api/customers/hotel-booking/{}", chain.hotel_booking)).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await?;
        assert_eq!(body["nbRecords"], i64::try_from(chain.companions.len() + 1)?);
    }

    // Clearing removes every user too, the bootstrap one included.
    fixtures::clear(&app.pool).await?;
    for table in ["users", "travel", "customer", "stay", "stay_customer", "hotel_booking", "plane_booking"] {
        let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}")).fetch_one(&app.pool).await?;
        assert_eq!(rows, 0, "{table}");
    }
    assert_eq!(app.get("/api/travels").await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
