mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{record_body, TestApp};
use serde_json::{json, Value};

const MISSING_ID: &str = "65f0c0ffee0000000000abcd";

fn emails(body: &Value) -> Vec<String> {
    let mut e: Vec<String> = body
        .as_array()
        .expect("filter returns an array")
        .iter()
        .map(|r| r["email"].as_str().unwrap().to_string())
        .collect();
    e.sort();
    e
}

#[tokio::test]
async fn created_record_can_be_retrieved() {
    let app = TestApp::spawn();

    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(created["inserted_date"], today);

    let (status, fetched) = app.get(&format!("/retrieve_item/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_requires_email_and_location() {
    let app = TestApp::spawn();

    let (status, _) = app
        .send_json("POST", "/create_clock_record/", &json!({ "email": "a@example.com" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send_json("POST", "/create_clock_record/", &json!({ "location": null }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_strings_are_accepted_on_create() {
    let app = TestApp::spawn();

    let created = app.create_record("", "").await;
    assert_eq!(created["email"], "");
    assert_eq!(created["location"], "");

    let id = created["_id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/retrieve_item/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn patch_writes_empty_string() {
    let app = TestApp::spawn();
    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = app
        .send_json("PUT", &format!("/items/{}", id), &json!({ "location": "" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["item"]["email"], "ada@example.com");
    assert_eq!(body["item"]["location"], "");

    let (_, fetched) = app.get(&format!("/retrieve_item/{}", id)).await;
    assert_eq!(fetched["location"], "");
}

#[tokio::test]
async fn create_reports_store_failure_as_server_error() {
    let app = TestApp::spawn_failing("connection reset");

    let (status, body) = app
        .send_json("POST", "/create_clock_record/", &record_body("a@example.com", "Rome"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "connection reset");
}

#[tokio::test]
async fn retrieve_validates_id_then_existence() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/retrieve_item/nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ObjectId format");

    let (status, body) = app.get(&format!("/retrieve_item/{}", MISSING_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");
}

#[tokio::test]
async fn partial_update_merges_present_fields() {
    let app = TestApp::spawn();
    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = app
        .send_json(
            "PUT",
            &format!("/items/{}", id),
            &json!({ "email": null, "location": "Paris" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "Item updated successfully");
    assert_eq!(body["item"]["_id"], created["_id"]);
    assert_eq!(body["item"]["email"], "ada@example.com");
    assert_eq!(body["item"]["location"], "Paris");
    assert_eq!(body["item"]["inserted_date"], created["inserted_date"]);
}

#[tokio::test]
async fn update_with_identical_values_succeeds() {
    let app = TestApp::spawn();
    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = app
        .send_json(
            "PUT",
            &format!("/items/{}", id),
            &record_body("ada@example.com", "London"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"], created);
}

#[tokio::test]
async fn empty_patch_is_rejected_without_touching_store() {
    let (app, mock) = TestApp::spawn_with_mock();
    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();
    let calls_before = mock.calls();

    for body in [json!({}), json!({ "email": null, "location": null })] {
        let (status, response) = app.send_json("PUT", &format!("/items/{}", id), &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "No fields to update");
    }

    assert_eq!(mock.calls(), calls_before);
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let app = TestApp::spawn();

    let (status, _) = app
        .send_json(
            "PUT",
            &format!("/items/{}", MISSING_ID),
            &json!({ "location": "Oslo" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send_json("PUT", "/items/bad-id", &json!({ "location": "Oslo" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn second_delete_of_same_record_is_not_found() {
    let app = TestApp::spawn();
    let created = app.create_record("ada@example.com", "London").await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = app.delete(&format!("/items/{}/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detail"], "Item deleted successfully");

    let (status, _) = app.delete(&format!("/items/{}/", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_rejects_invalid_id() {
    let app = TestApp::spawn();

    let (status, body) = app.delete("/items/1234/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ObjectId format");
}

#[tokio::test]
async fn filter_matches_on_equality() {
    let app = TestApp::spawn();
    app.create_record("a@example.com", "London").await;
    app.create_record("a@example.com", "Paris").await;
    app.create_record("b@example.com", "London").await;

    let (status, body) = app.get("/items/filter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = app.get("/items/filter?location=London").await;
    assert_eq!(emails(&body), vec!["a@example.com", "b@example.com"]);

    let (_, body) = app
        .get("/items/filter?email=a@example.com&location=Paris")
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["location"], "Paris");

    let (_, body) = app.get("/items/filter?email=&location=").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn filter_store_failure_is_server_error() {
    let app = TestApp::spawn_failing("cursor killed");

    let (status, body) = app.get("/items/filter?location=London").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "cursor killed");
}

#[tokio::test]
async fn clock_service_has_no_count_route() {
    let app = TestApp::spawn();

    let (status, _) = app.get("/items/count_by_email").await;
    assert_ne!(status, StatusCode::OK);
}
