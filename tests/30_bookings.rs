mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{sample_booking, TestApp};

#[tokio::test]
async fn bookings_are_created_listed_and_deleted() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.post("/bookings", sample_booking("ada@example.com")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (_, bookings) = app.get("/bookings").await?;
    let bookings = bookings.as_array().cloned().unwrap_or_default();
    assert_eq!(bookings.len(), 1);
    let id = bookings[0]["_id"].as_str().expect("_id").to_string();

    let (status, _) = app.delete(&format!("/bookings/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/bookings/{}", id)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("something went wrong"));

    let (status, body) = app.delete("/bookings/xyz").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid id"));
    Ok(())
}

#[tokio::test]
async fn incomplete_bookings_are_rejected() -> Result<()> {
    let app = TestApp::new();
    let mut booking = sample_booking("ada@example.com");
    booking["phone"] = json!(null);

    let (status, body) = app.post("/bookings", booking).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Please Provide all Information"));

    let (_, bookings) = app.get("/bookings").await?;
    assert_eq!(bookings, json!([]));
    Ok(())
}

#[tokio::test]
async fn my_items_returns_only_the_callers_bookings() -> Result<()> {
    let app = TestApp::new();
    app.post("/bookings", sample_booking("ada@example.com")).await?;
    app.post("/bookings", sample_booking("ada@example.com")).await?;
    app.post("/bookings", sample_booking("bob@example.com")).await?;

    let token = app.register_and_login("ada@example.com", "pw-1").await?;
    let (status, body) = app
        .get_with_token("/myitem?email=ada@example.com", &token)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["email"] == json!("ada@example.com")));
    Ok(())
}

#[tokio::test]
async fn my_items_for_someone_else_is_forbidden() -> Result<()> {
    let app = TestApp::new();
    app.post("/bookings", sample_booking("bob@example.com")).await?;
    let token = app.register_and_login("ada@example.com", "pw-1").await?;

    let (status, body) = app
        .get_with_token("/myitem?email=bob@example.com", &token)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("Forbidden Access"));

    let (status, _) = app.get_with_token("/myitem", &token).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/myitem?email=ada@example.com").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
