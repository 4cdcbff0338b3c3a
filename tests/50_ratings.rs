mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn ratings_are_stored_as_submitted() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .post("/ratings", json!({ "name": "Ada", "rating": 5, "comment": "Sturdy" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], json!(true));
    let inserted_id = body["insertedId"].as_str().expect("insertedId").to_string();

    let (status, ratings) = app.get("/ratings").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ratings,
        json!([{ "_id": inserted_id, "name": "Ada", "rating": 5, "comment": "Sturdy" }])
    );
    Ok(())
}

#[tokio::test]
async fn ratings_need_no_fields() -> Result<()> {
    let app = TestApp::new();

    let (status, _) = app.post("/ratings", json!({})).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, ratings) = app.get("/ratings").await?;
    assert_eq!(ratings.as_array().map(Vec::len), Some(1));
    Ok(())
}
