//! Content endpoint tests.
//!
//! Tests verify:
//! - `GET /api/content` serves every section and never the users
//! - Singletons merge, stats and visibility maps are replaced
//! - Writes land in the JSON file and survive a restart
//! - Persistence failures follow the configured policy
//! - An unreadable file is never replaced by a write

use axum::http::{Method, StatusCode};
use serde_json::json;
use tempfile::TempDir;

use clinic_cms::content::{Breakpoint, Document};
use clinic_cms::store::{
    ContentRepository, ContentStore, JsonFileRepository, MemoryRepository, PersistencePolicy,
};

use super::test_utils::{get, json_request, seeded_document, TestApp};

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_content_has_every_section_and_no_users() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/api/content")).await;

    assert_eq!(status, StatusCode::OK);
    for key in [
        "hero",
        "stats",
        "statsDescription",
        "services",
        "doctors",
        "reviews",
        "faqs",
        "contact",
        "servicesPage",
        "contactPage",
        "siteSettings",
        "headerVisibility",
        "footerVisibility",
    ] {
        assert!(body.get(key).is_some(), "missing section {}", key);
    }
    assert!(body.get("users").is_none());

    assert_eq!(body["services"].as_array().unwrap().len(), 3);
    assert_eq!(body["faqs"].as_array().unwrap().len(), 6);
    assert_eq!(body["headerVisibility"]["logo"]["480"], true);
}

// =============================================================================
// Singletons
// =============================================================================

#[tokio::test]
async fn test_hero_update_merges() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, before) = app.send(get("/api/content")).await;

    let (status, hero) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "Heal with us", "badge": "New" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hero["heading"], "Heal with us");
    assert_eq!(hero["badge"], "New");
    assert_eq!(hero["ctaPrimary"], before["hero"]["ctaPrimary"]);

    let (_, after) = app.send(get("/api/content")).await;
    assert_eq!(after["hero"], hero);
}

#[tokio::test]
async fn test_every_singleton_merges() {
    let app = TestApp::new();
    let token = app.login().await;

    for (route, key, kept) in [
        ("/api/contact", "contact", "email"),
        ("/api/services-page", "servicesPage", "heroTitle"),
        ("/api/contact-page", "contactPage", "title"),
        ("/api/site-settings", "siteSettings", "clinicName"),
    ] {
        let (_, before) = app.send(get("/api/content")).await;

        let (status, merged) = app
            .send(json_request(
                Method::PUT,
                route,
                Some(&token),
                json!({ "extraField": route }),
            ))
            .await;

        assert_eq!(status, StatusCode::OK, "{}", route);
        assert_eq!(merged["extraField"], route);
        assert_eq!(merged[kept], before[key][kept], "{}", route);
    }
}

// =============================================================================
// Stats
// =============================================================================

#[tokio::test]
async fn test_stats_are_replaced_not_merged() {
    let app = TestApp::new();
    let token = app.login().await;

    let (_, before) = app.send(get("/api/content")).await;
    assert_eq!(before["stats"].as_array().unwrap().len(), 3);

    let stats = json!([
        { "value": "10", "suffix": "+", "label": "Years" },
        { "value": "2k", "suffix": "", "label": "Patients" }
    ]);
    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/stats",
            Some(&token),
            json!({ "stats": stats }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"], stats);
    assert_eq!(body["statsDescription"], before["statsDescription"]);

    let (_, after) = app.send(get("/api/content")).await;
    assert_eq!(after["stats"], stats);
    assert_eq!(after["statsDescription"], before["statsDescription"]);
}

#[tokio::test]
async fn test_stats_description_replaced_when_given() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/stats",
            Some(&token),
            json!({ "stats": [], "statsDescription": "Coming soon" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"], json!([]));
    assert_eq!(body["statsDescription"], "Coming soon");
}

// =============================================================================
// Visibility
// =============================================================================

#[tokio::test]
async fn test_visibility_is_replaced() {
    let app = TestApp::new();
    let token = app.login().await;

    let visibility = json!({ "logo": { "1600": true, "480": false } });
    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/footer-visibility",
            Some(&token),
            visibility.clone(),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, visibility);

    let (_, content) = app.send(get("/api/content")).await;
    assert_eq!(content["footerVisibility"], visibility);
    assert_eq!(
        content["headerVisibility"].as_object().unwrap().len(),
        3,
        "header map untouched"
    );

    let document = app.state.store.snapshot().await;
    assert!(!document
        .content
        .footer_visibility
        .is_visible("logo", Breakpoint::W480));
    // Absent elements default to visible
    assert!(document
        .content
        .footer_visibility
        .is_visible("socialIcons", Breakpoint::W480));
}

#[tokio::test]
async fn test_visibility_rejects_unknown_breakpoint() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app
        .send(json_request(
            Method::PUT,
            "/api/header-visibility",
            Some(&token),
            json!({ "logo": { "1920": false } }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, content) = app.send(get("/api/content")).await;
    assert_eq!(content["headerVisibility"]["logo"]["1600"], true);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_writes_reach_the_file_and_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let store = ContentStore::new(JsonFileRepository::new(&path), seeded_document());
    assert!(store.initialize().await.unwrap());
    let app = TestApp::with_store(store);
    let token = app.login().await;

    let (status, _) = app
        .send(json_request(
            Method::PUT,
            "/api/contact",
            Some(&token),
            json!({ "phone": "0487 000 000" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk["contact"]["phone"], "0487 000 000");
    assert_eq!(on_disk["users"][0]["username"], "admin");
    assert!(on_disk["users"][0]["password"]
        .as_str()
        .unwrap()
        .starts_with("$2b$"));

    // A fresh process over the same file sees the edit
    let restarted = TestApp::with_store(ContentStore::new(
        JsonFileRepository::new(&path),
        seeded_document(),
    ));
    let (_, content) = restarted.send(get("/api/content")).await;
    assert_eq!(content["contact"]["phone"], "0487 000 000");
}

#[tokio::test]
async fn test_stale_file_gets_missing_sections_from_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let stale = json!({
        "users": seeded_document().users,
        "hero": { "heading": "Old" },
        "services": [],
        "promoBanner": { "text": "Kept" }
    });
    std::fs::write(&path, serde_json::to_vec(&stale).unwrap()).unwrap();

    let app = TestApp::with_store(ContentStore::new(
        JsonFileRepository::new(&path),
        seeded_document(),
    ));
    let (_, content) = app.send(get("/api/content")).await;

    assert_eq!(content["hero"]["heading"], "Old");
    assert_eq!(content["services"], json!([]));
    assert_eq!(content["siteSettings"]["clinicName"], "Punarjani");
    assert_eq!(content["contactPage"]["title"], "Contact Us");
    assert_eq!(content["promoBanner"]["text"], "Kept");

    // Unknown sections survive a rewrite
    let token = app.login().await;
    app.send(json_request(
        Method::PUT,
        "/api/hero",
        Some(&token),
        json!({ "heading": "New" }),
    ))
    .await;
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk["promoBanner"]["text"], "Kept");
}

#[tokio::test]
async fn test_corrupt_file_serves_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let app = TestApp::with_store(ContentStore::new(
        JsonFileRepository::new(&path),
        seeded_document(),
    ));
    let (status, content) = app.send(get("/api/content")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content["services"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failed_save_reports_success_by_default() {
    let app = TestApp::new();
    let token = app.login().await;
    app.state.store.repository().set_fail_saves(true);

    let (status, hero) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "Not durable" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hero["heading"], "Not durable");

    // The edit never landed
    let (_, content) = app.send(get("/api/content")).await;
    assert_ne!(content["hero"]["heading"], "Not durable");
}

#[tokio::test]
async fn test_failed_save_is_500_when_strict() {
    let store = ContentStore::new(MemoryRepository::new(), seeded_document())
        .with_policy(PersistencePolicy::Strict);
    let app = TestApp::with_store(store);
    let token = app.login().await;
    app.state.store.repository().set_fail_saves(true);

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "Lost" }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "persistence_error");
}

fn custom_services(count: u64) -> serde_json::Value {
    (1..=count)
        .map(|id| json!({ "id": id, "title": format!("Custom {}", id) }))
        .collect()
}

fn titles_on_disk(path: &std::path::Path) -> Vec<String> {
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
    on_disk["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_string_ids_from_older_files_survive_an_edit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let older = json!({
        "users": seeded_document().users,
        "services": custom_services(7),
        "faqs": [{ "id": "1", "question": "Q?", "answer": "A." }]
    });
    std::fs::write(&path, serde_json::to_vec(&older).unwrap()).unwrap();

    let store = ContentStore::new(JsonFileRepository::new(&path), seeded_document());
    assert!(!store.initialize().await.unwrap());
    let app = TestApp::with_store(store);
    let token = app.login().await;

    let (status, _) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "New" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let titles = titles_on_disk(&path);
    assert_eq!(titles.len(), 7);
    assert_eq!(titles[6], "Custom 7");

    // The string id is now addressable by number
    let (status, faq) = app
        .send(json_request(
            Method::PUT,
            "/api/faqs/1",
            Some(&token),
            json!({ "answer": "B." }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(faq["id"], 1);
    assert_eq!(faq["question"], "Q?");
}

#[tokio::test]
async fn test_unreadable_file_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let unreadable = json!({
        "users": seeded_document().users,
        "services": custom_services(7),
        "faqs": [{ "id": "not-a-number", "question": "Q?" }]
    });
    let original = serde_json::to_vec(&unreadable).unwrap();
    std::fs::write(&path, &original).unwrap();

    let store = ContentStore::new(JsonFileRepository::new(&path), seeded_document());
    assert!(!store.initialize().await.unwrap());
    let app = TestApp::with_store(store);
    let token = app.login().await;

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "New" }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "persistence_error");
    assert_eq!(std::fs::read(&path).unwrap(), original);

    // Reads keep serving the defaults
    let (status, content) = app.send(get("/api/content")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content["services"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_seeded_document_round_trips_through_the_file() {
    let dir = TempDir::new().unwrap();
    let repository = JsonFileRepository::new(dir.path().join("nested").join("data.json"));
    let document: Document = seeded_document();

    repository.save(&document).await.unwrap();
    assert_eq!(repository.load().await.unwrap(), Some(document));
}
