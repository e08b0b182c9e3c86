use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use configs::{AppConfig, ErrorStatusMode};

async fn build_app(mode: ErrorStatusMode) -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "group-flow-secret".into();
    cfg.api.error_status = mode;
    Ok(server::startup::build_app(db, &cfg))
}

async fn call(app: &Router, method: Method, uri: &str, token: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri).header(header::AUTHORIZATION, format!("Bearer {token}"));
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

/// Register + login; returns (user id, token).
async fn sign_up(app: &Router, email: &str, name: &str) -> anyhow::Result<(String, String)> {
    let (status, _) = call(app, Method::POST, "/auth/register", "", Some(json!({"email": email, "name": name, "password": "Passw0rd!"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, session) = call(app, Method::POST, "/auth/login", "", Some(json!({"email": email, "password": "Passw0rd!"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let id = session["userId"].as_str().unwrap_or_default().to_string();
    let token = session["token"].as_str().unwrap_or_default().to_string();
    Ok((id, token))
}

#[tokio::test]
async fn test_group_lifecycle() -> anyhow::Result<()> {
    let app = build_app(ErrorStatusMode::Conventional).await?;
    let (alice, alice_token) = sign_up(&app, "alice@example.com", "Alice").await?;
    let (bob, bob_token) = sign_up(&app, "bob@example.com", "Bob").await?;

    // Create
    let (status, created) = call(&app, Method::POST, "/groups", &alice_token, Some(json!({"name": "Trip", "type": "travel"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Trip");
    assert_eq!(created["type"], "travel");
    assert_eq!(created["createdBy"], alice);
    let gid = created["id"].as_str().unwrap_or_default().to_string();

    // Creator is listed as admin
    let (status, groups) = call(&app, Method::GET, "/groups?page=1&limit=10&filter=all", &alice_token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups.as_array().map(Vec::len), Some(1));
    assert_eq!(groups[0]["groupId"], gid);
    assert_eq!(groups[0]["isAdmin"], true);

    // Add member, then again
    let members_uri = format!("/groups/{gid}/members");
    let (status, added) = call(&app, Method::POST, &members_uri, &alice_token, Some(json!({"userId": bob}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["message"], "User added to group successfully");
    assert_eq!(added["data"]["userId"], bob);
    assert_eq!(added["data"]["isAdmin"], false);
    let (status, dup) = call(&app, Method::POST, &members_uri, &alice_token, Some(json!({"userId": bob}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["message"], "User is already a member of the group");

    let (_, members) = call(&app, Method::GET, &members_uri, &bob_token, None).await?;
    assert_eq!(members.as_array().map(Vec::len), Some(2));

    // Update ignores empty name
    let (status, updated) = call(&app, Method::PUT, &format!("/groups/{gid}"), &alice_token, Some(json!({"name": "", "type": "new"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["group"]["name"], "Trip");
    assert_eq!(updated["group"]["type"], "new");

    // Payments
    let payments_uri = format!("/groups/{gid}/payments");
    let (status, payment) = call(&app, Method::POST, &payments_uri, &bob_token, Some(json!({"payeeId": alice, "amount": 12.5}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["status"], "pending");
    assert_eq!(payment["payerId"], bob);
    let (_, payments) = call(&app, Method::GET, &payments_uri, &alice_token, None).await?;
    assert_eq!(payments[0]["amount"].as_f64(), Some(12.5));

    // Expenses, listed by query and by body
    let (status, expense) = call(&app, Method::POST, "/expenses", &alice_token, Some(json!({"groupId": gid, "amount": 30.5, "description": "Fuel", "splitType": "equal"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["splitType"], "equal");
    let (_, by_query) = call(&app, Method::GET, &format!("/expenses?groupId={gid}"), &alice_token, None).await?;
    let (_, by_body) = call(&app, Method::GET, "/expenses", &alice_token, Some(json!({"groupId": gid}))).await?;
    assert_eq!(by_query, by_body);
    assert_eq!(by_query[0]["description"], "Fuel");

    // Bob leaves; leaving twice fails
    let leave_uri = format!("/groups/{gid}/leave");
    let (status, left) = call(&app, Method::POST, &leave_uri, &bob_token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(left["message"], "You have left the group");
    let (status, again) = call(&app, Method::POST, &leave_uri, &bob_token, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["message"], "You are not a member of this group");

    // Removing a non-member fails
    let (status, missing) = call(&app, Method::DELETE, &format!("/groups/{gid}/members/{bob}"), &alice_token, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "User not found in the group");

    // Delete; the orphaned membership no longer shows up
    let (status, deleted) = call(&app, Method::DELETE, &format!("/groups/{gid}"), &alice_token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Group deleted successfully");
    let (status, groups) = call(&app, Method::GET, "/groups", &alice_token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_remove_member_by_other_user() -> anyhow::Result<()> {
    let app = build_app(ErrorStatusMode::Conventional).await?;
    let (_, owner_token) = sign_up(&app, "owner@example.com", "Owner").await?;
    let (guest, _) = sign_up(&app, "guest@example.com", "Guest").await?;

    let (_, created) = call(&app, Method::POST, "/groups", &owner_token, Some(json!({"name": "Flat", "type": "home"}))).await?;
    let gid = created["id"].as_str().unwrap_or_default().to_string();
    call(&app, Method::POST, &format!("/groups/{gid}/members"), &owner_token, Some(json!({"userId": guest}))).await?;

    let (status, removed) = call(&app, Method::DELETE, &format!("/groups/{gid}/members/{guest}"), &owner_token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["message"], "User removed from the group");
    Ok(())
}

#[tokio::test]
async fn test_group_list_pagination_and_filter() -> anyhow::Result<()> {
    let app = build_app(ErrorStatusMode::Conventional).await?;
    let (_, token) = sign_up(&app, "pager@example.com", "Pager").await?;
    for i in 0..3 {
        call(&app, Method::POST, "/groups", &token, Some(json!({"name": format!("G{i}"), "type": "other"}))).await?;
    }

    let (_, page1) = call(&app, Method::GET, "/groups?page=1&limit=2", &token, None).await?;
    let (_, page2) = call(&app, Method::GET, "/groups?page=2&limit=2", &token, None).await?;
    assert_eq!(page1.as_array().map(Vec::len), Some(2));
    assert_eq!(page2.as_array().map(Vec::len), Some(1));

    let (_, owe) = call(&app, Method::GET, "/groups?filter=owe", &token, None).await?;
    let (_, owed) = call(&app, Method::GET, "/groups?filter=owed", &token, None).await?;
    assert_eq!(owe, owed);

    let (status, bad) = call(&app, Method::GET, "/groups?filter=mine", &token, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bad["message"].as_str().is_some_and(|m| m.contains("invalid filter")));
    Ok(())
}

#[tokio::test]
async fn test_error_status_modes() -> anyhow::Result<()> {
    let missing = Uuid::new_v4();

    let app = build_app(ErrorStatusMode::Conventional).await?;
    let (_, token) = sign_up(&app, "conv@example.com", "Conv").await?;
    let (status, body) = call(&app, Method::DELETE, &format!("/groups/{missing}"), &token, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Group not found");

    let app = build_app(ErrorStatusMode::Legacy).await?;
    let (_, token) = sign_up(&app, "legacy@example.com", "Legacy").await?;
    let (status, body) = call(&app, Method::DELETE, &format!("/groups/{missing}"), &token, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Group not found");

    let (status, body) = call(&app, Method::POST, "/expenses", &token, Some(json!({"groupId": missing, "amount": 5.5, "description": "x", "splitType": "equal"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Group not found");
    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_reports_requests() -> anyhow::Result<()> {
    let app = build_app(ErrorStatusMode::Conventional).await?;
    app.clone().oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
    let resp = app.oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("split_ledger_requests_total"));
    Ok(())
}

/// Sends `body` verbatim, with an optional content type.
async fn call_raw(app: &Router, method: Method, uri: &str, token: &str, content_type: Option<&str>, body: &str) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri).header(header::AUTHORIZATION, format!("Bearer {token}"));
    if let Some(ct) = content_type {
        req = req.header(header::CONTENT_TYPE, ct);
    }
    let resp = app.clone().oneshot(req.body(Body::from(body.to_string()))?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn assert_message(body: &Value) {
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()), "expected {{message}} body, got {body}");
}

#[tokio::test]
async fn test_malformed_requests_answer_with_message() -> anyhow::Result<()> {
    for (mode, expected) in [(ErrorStatusMode::Conventional, StatusCode::BAD_REQUEST), (ErrorStatusMode::Legacy, StatusCode::OK)] {
        let app = build_app(mode).await?;
        let (_, token) = sign_up(&app, "parser@example.com", "Parser").await?;
        let (_, created) = call(&app, Method::POST, "/groups", &token, Some(json!({"name": "Parse", "type": "other"}))).await?;
        let gid = created["id"].as_str().unwrap_or_default().to_string();

        // Path segment that is not a UUID
        let (status, body) = call(&app, Method::DELETE, "/groups/not-a-uuid", &token, None).await?;
        assert_eq!(status, expected);
        assert_message(&body);

        let (status, body) = call(&app, Method::DELETE, &format!("/groups/{gid}/members/nope"), &token, None).await?;
        assert_eq!(status, expected);
        assert_message(&body);

        // Body field with the wrong type
        let (status, body) = call(&app, Method::POST, &format!("/groups/{gid}/members"), &token, Some(json!({"userId": "nope"}))).await?;
        assert_eq!(status, expected);
        assert_message(&body);

        // Required field missing
        let (status, body) = call(&app, Method::POST, &format!("/groups/{gid}/payments"), &token, Some(json!({"payeeId": Uuid::new_v4()}))).await?;
        assert_eq!(status, expected);
        assert_message(&body);

        // No Content-Type header
        let (status, body) = call_raw(&app, Method::POST, "/groups", &token, None, r#"{"name":"x","type":"y"}"#).await?;
        assert_eq!(status, expected);
        assert!(body["message"].as_str().is_some_and(|m| m.contains("Content-Type")));

        // Broken JSON
        let (status, body) = call_raw(&app, Method::POST, "/groups", &token, Some("application/json"), "{").await?;
        assert_eq!(status, expected);
        assert_message(&body);

        // Query value of the wrong type
        let (status, body) = call(&app, Method::GET, "/groups?page=abc", &token, None).await?;
        assert_eq!(status, expected);
        assert_message(&body);
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_answers_with_message() -> anyhow::Result<()> {
    let app = build_app(ErrorStatusMode::Conventional).await?;
    let (status, body) = call(&app, Method::GET, "/no/such/route", "", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");

    let app = build_app(ErrorStatusMode::Legacy).await?;
    let (status, body) = call(&app, Method::GET, "/no/such/route", "", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Route not found");
    Ok(())
}
