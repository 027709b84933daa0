//! Collection endpoint tests (services, doctors, reviews, faqs).
//!
//! Tests verify:
//! - Create appends a record with a fresh numeric id
//! - Update merges supplied fields and keeps the id
//! - Delete is idempotent
//! - Unknown ids on update are 404 with the collection's label

use axum::http::{Method, StatusCode};
use serde_json::json;

use clinic_cms::content::Collection;

use super::test_utils::{delete, get, json_request, TestApp};

#[tokio::test]
async fn test_create_then_list_includes_new_service() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, created) = app
        .send(json_request(
            Method::POST,
            "/api/services",
            Some(&token),
            json!({ "title": "X", "description": "Y", "icon": "Z" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].is_u64());
    assert_eq!(created["title"], "X");
    assert_eq!(created["description"], "Y");
    assert_eq!(created["icon"], "Z");

    let (status, services) = app.send(get("/api/services")).await;
    assert_eq!(status, StatusCode::OK);

    let services = services.as_array().unwrap();
    assert_eq!(services.len(), 4);
    assert_eq!(services.last().unwrap(), &created);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, created) = app
        .send(json_request(
            Method::POST,
            "/api/faqs",
            Some(&token),
            json!({ "id": 1, "question": "Q?", "answer": "A." }),
        ))
        .await;

    assert_ne!(created["id"], 1);

    let (_, faqs) = app.send(get("/api/faqs")).await;
    let ones = faqs
        .as_array()
        .unwrap()
        .iter()
        .filter(|faq| faq["id"] == 1)
        .count();
    assert_eq!(ones, 1);
}

#[tokio::test]
async fn test_rapid_creates_get_unique_increasing_ids() {
    let app = TestApp::new();
    let token = app.login().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, created) = app
            .send(json_request(
                Method::POST,
                "/api/reviews",
                Some(&token),
                json!({ "name": format!("Reviewer {}", i) }),
            ))
            .await;
        ids.push(created["id"].as_u64().unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, doctors) = app.send(get("/api/doctors")).await;
    let before = doctors[0].clone();

    let (status, updated) = app
        .send(json_request(
            Method::PUT,
            "/api/doctors/1",
            Some(&token),
            json!({ "name": "Dr. Nair", "id": 42 }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Dr. Nair");
    assert_eq!(updated["description"], before["description"]);
    assert_eq!(updated["image"], before["image"]);

    let (_, doctors) = app.send(get("/api/doctors")).await;
    assert_eq!(doctors[0], updated);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/services/999",
            Some(&token),
            json!({ "title": "Ghost" }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Service not found");

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/faqs/999",
            Some(&token),
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "FAQ not found");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app.send(delete("/api/services/2", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service deleted successfully");

    let (_, services) = app.send(get("/api/services")).await;
    let ids: Vec<u64> = services
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_delete_nonexistent_id_succeeds_and_changes_nothing() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, before) = app.send(get("/api/faqs")).await;
    let (status, body) = app.send(delete("/api/faqs/123456", &token)).await;
    let (_, after) = app.send(get("/api/faqs")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FAQ deleted successfully");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app.send(delete("/api/doctors/abc", &token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_body_must_be_an_object() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/services",
            Some(&token),
            json!(["not", "an", "object"]),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_every_collection_supports_crud() {
    let app = TestApp::new();
    let token = app.login().await;

    for collection in Collection::ALL {
        let route = collection.route();
        let (_, before) = app.send(get(route)).await;
        let count = before.as_array().unwrap().len();

        let (status, created) = app
            .send(json_request(
                Method::POST,
                route,
                Some(&token),
                json!({ "label": "new" }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", collection);
        let id = created["id"].as_u64().unwrap();

        let (status, updated) = app
            .send(json_request(
                Method::PUT,
                &format!("{}/{}", route, id),
                Some(&token),
                json!({ "label": "edited" }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", collection);
        assert_eq!(updated["label"], "edited");

        let (status, _) = app
            .send(delete(&format!("{}/{}", route, id), &token))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", collection);

        let (_, after) = app.send(get(route)).await;
        assert_eq!(after.as_array().unwrap().len(), count, "{}", collection);
    }
}
