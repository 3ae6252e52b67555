mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn connect_hands_out_the_api_key() -> anyhow::Result<()> {
    let Some(app) = common::spawn_app().await? else { return Ok(()) };

    let resp = app
        .client
        .post(app.url("/api/users/connect"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["apiKey"], app.api_key.as_str());

    let resp = app
        .client
        .post(app.url("/api/users/connect"))
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .post(app.url("/api/users/connect"))
        .json(&json!({ "email": "nobody@agency.test", "password": "whatever" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await?;
    assert_eq!(body["message"], "Authentication failed");
    Ok(())
}

#[tokio::test]
async fn user_crud_never_exposes_passwords() -> anyhow::Result<()> {
    let Some(app) = common::spawn_app().await? else { return Ok(()) };

    let id = app.create("/api/users", json!({ "email": "clerk@agency.test", "password": "s3cret" })).await?;

    let resp = app.get(&format!("/api/users/{id}")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["nbRecords"], 1);
    assert_eq!(body["page"], json!({ "current": 0, "previous": null, "next": null, "last": 1 }));
    let user = &body["records"][0];
    assert_eq!(user["email"], "clerk@agency.test");
    assert!(user.get("password").is_none());
    assert!(user.get("uuid").is_none());

    let list: Value = app.get("/api/users").await?.json().await?;
    assert_eq!(list["nbRecords"], 2);
    for listed in list["records"].as_array().unwrap() {
        assert!(listed.get("password").is_none());
        assert!(listed.get("uuid").is_none());
        assert_eq!(listed.as_object().unwrap().len(), 2);
    }

    let resp = app
        .client
        .post(app.url("/api/users/connect"))
        .json(&json!({ "email": "clerk@agency.test", "password": "s3cret" }))
        .send()
        .await?;
    let old_key = resp.json::<Value>().await?["apiKey"].as_str().unwrap().to_string();
    let resp = app.client.get(app.url("/api/travels")).header("x-api-key", &old_key).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.put(&format!("/api/users/{id}"), json!({ "password": "rotated" })).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!({ "affectedRows": 1 }));

    // A password change retires the previous key.
    let resp = app.client.get(app.url("/api/travels")).header("x-api-key", &old_key).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .post(app.url("/api/users/connect"))
        .json(&json!({ "email": "clerk@agency.test", "password": "rotated" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let key = resp.json::<Value>().await?["apiKey"].as_str().unwrap().to_string();
    assert_ne!(key, old_key);

    // Changing only the email keeps the key.
    let resp = app.put(&format!("/api/users/{id}"), json!({ "email": "desk@agency.test" })).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.client.get(app.url("/api/travels")).header("x-api-key", &key).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.delete(&format!("/api/users/{id}")).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    // The key dies with its user.
    let resp = app.client.get(app.url("/api/travels")).header("x-api-key", key).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app.delete(&format!("/api/users/{id}")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>().await?, json!({ "affectedRows": 0 }));
    Ok(())
}

#[tokio::test]
async fn user_validation_and_duplicates() -> anyhow::Result<()> {
    let Some(app) = common::spawn_app().await? else { return Ok(()) };

    let resp = app.post("/api/users", json!({ "email": "not-an-email", "password": "s3cret" })).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.post("/api/users", json!({ "email": "short@agency.test", "password": "abc" })).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.post("/api/users", json!({ "email": common::ADMIN_EMAIL, "password": "s3cret" })).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["code"], 400);
    assert_eq!(body["status"], "error");
    assert!(!body["message"].as_str().unwrap().is_empty());
    Ok(())
}
