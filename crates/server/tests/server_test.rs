//! # General Server and Session Lifecycle Tests

mod common;

use anyhow::Result;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_root_and_health() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;

    // --- 2. Act ---
    let root = app.client.get(app.url("/")).send().await?;
    let health = app.client.get(app.url("/health")).send().await?;

    // --- 3. Assert ---
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(root.text().await?, "comms911 server is running.");
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn test_policy_catalogue() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;

    // --- 2. Act ---
    let list: Value = app
        .client
        .get(app.url("/policies"))
        .send()
        .await?
        .json()
        .await?;
    let tert: Value = app
        .client
        .get(app.url("/policies/tert"))
        .send()
        .await?
        .json()
        .await?;

    // --- 3. Assert ---
    let kinds: Vec<&str> = list["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["tert", "ng911"]);

    let result = &tert["result"];
    assert_eq!(result["kind"], "tert");
    let sections = result["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 6);
    assert_eq!(sections[0]["title"], "Section 1.0: Purpose, Scope, and Authority");
    assert_eq!(
        result["default_inputs"]["agency_name"],
        "City of Willow Creek 9-1-1 Emergency Communications Center"
    );
    assert_eq!(
        result["default_inputs"]["ahj_name"],
        "Willow Creek County Public Safety Commission"
    );
    assert_eq!(result["export_file_name"], "draft_tert_policy.md");
    assert_eq!(result["input_fields"][0], "agency_name");
    Ok(())
}

#[tokio::test]
async fn test_unknown_policy_kind_is_rejected() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;

    // --- 2. Act ---
    let response = app.client.get(app.url("/policies/fire")).send().await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_session_lifecycle() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let session_id = app.create_session(json!({ "kind": "ng911" })).await?;

    // --- 2. Act ---
    let status: Value = app
        .client
        .get(app.url(&format!("/sessions/{session_id}")))
        .send()
        .await?
        .json()
        .await?;
    let deleted = app
        .client
        .delete(app.url(&format!("/sessions/{session_id}")))
        .send()
        .await?;
    let after_delete = app
        .client
        .get(app.url(&format!("/sessions/{session_id}")))
        .send()
        .await?;

    // --- 3. Assert ---
    assert_eq!(status["result"]["kind"], "ng911");
    assert_eq!(status["result"]["context_characters"], 0);
    assert_eq!(status["result"]["sections"], json!([]));
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await?;
    assert_eq!(body["result"]["message"], "Session deleted.");
    assert_eq!(after_delete.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_qa_session_reports_its_mode() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;

    // --- 2. Act ---
    let response = app
        .client
        .post(app.url("/sessions"))
        .json(&json!({ "kind": "qa" }))
        .send()
        .await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["kind"], "qa");
    assert_eq!(body["result"]["qa_mode"], "single_shot");
    Ok(())
}

#[tokio::test]
async fn test_qa_mode_on_policy_session_is_rejected() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;

    // --- 2. Act ---
    let response = app
        .client
        .post(app.url("/sessions"))
        .json(&json!({ "kind": "tert", "qa_mode": "retrieval" }))
        .send()
        .await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["code"], "bad_request");
    Ok(())
}

#[tokio::test]
async fn test_unknown_session_is_not_found() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let missing = Uuid::new_v4();

    // --- 2. Act ---
    let response = app
        .generate(&missing.to_string(), "General", json!({}))
        .await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await?;
    assert_eq!(body["code"], "session_not_found");
    Ok(())
}

#[tokio::test]
async fn test_wrong_session_kind_is_a_conflict() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let qa_session = app.create_session(json!({ "kind": "qa" })).await?;
    let policy_session = app.create_session(json!({ "kind": "tert" })).await?;

    // --- 2. Act ---
    let generate_on_qa = app.generate(&qa_session, "General", json!({})).await?;
    let ask_on_policy = app
        .client
        .post(app.url(&format!("/sessions/{policy_session}/ask")))
        .json(&json!({ "question": "Who approves TERT deployments?" }))
        .send()
        .await?;

    // --- 3. Assert ---
    assert_eq!(generate_on_qa.status(), StatusCode::CONFLICT);
    let body: Value = generate_on_qa.json().await?;
    assert_eq!(body["code"], "wrong_session_kind");
    assert_eq!(body["error"], "This action requires a policy session.");

    assert_eq!(ask_on_policy.status(), StatusCode::CONFLICT);
    let body: Value = ask_on_policy.json().await?;
    assert_eq!(body["error"], "This action requires a Q&A session.");
    Ok(())
}

#[tokio::test]
async fn test_clear_sessions_discards_everything() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let policy_session = app.create_session(json!({ "kind": "tert" })).await?;
    app.create_session(json!({ "kind": "qa" })).await?;

    // --- 2. Act ---
    let removed = app.app_state.clear_sessions().await;

    // --- 3. Assert ---
    assert_eq!(removed, 2);
    let response = app
        .client
        .get(app.url(&format!("/sessions/{policy_session}")))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
