mod common;

use std::sync::Arc;

use account_service::config::Platform;
use auth::clock::FixedClock;
use auth::Authenticator;
use chrono::Duration;
use common::TestApp;
use common::TEST_SECRET;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["user_name"], "");
    assert_eq!(body["data"]["dob"], "");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert!(body["data"]["access_token"].as_str().unwrap().split('.').count() == 3);
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("hashed_password").is_none());
}

#[tokio::test]
async fn test_register_empty_fields() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "email": "", "password": "pass_word!" }),
        json!({ "email": "nicola@example.com", "password": "" }),
    ] {
        let response = app
            .post("/api/auth/register")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("cannot be empty"));
    }
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "another_pass"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let registered = app.register("nicola@example.com", "pass_word!").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], registered["data"]["id"]);

    let token = body["data"]["access_token"].as_str().unwrap();
    let account_id = Authenticator::new(TEST_SECRET, Duration::hours(1))
        .unwrap()
        .validate_token(token)
        .unwrap();
    assert_eq!(Some(account_id), registered["data"]["id"].as_i64());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let mut messages = Vec::new();
    for payload in [
        json!({ "email": "nicola@example.com", "password": "wrong_pass" }),
        json!({ "email": "ghost@example.com", "password": "pass_word!" }),
    ] {
        let response = app
            .post("/api/auth/login")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        messages.push(body["data"]["message"].as_str().unwrap().to_string());
    }

    assert_eq!(messages[0], messages[1]);
    assert!(messages[0].contains("Incorrect email or password"));
}

#[tokio::test]
async fn test_login_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nicola@example.com", "password": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_me_success() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert!(body["data"].get("access_token").is_none());
}

#[tokio::test]
async fn test_get_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_me_with_basic_scheme() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .get("/api/users/me")
        .header("Authorization", format!("Basic {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_me_with_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let (signed, signature) = token.rsplit_once('.').unwrap();
    let mut signature: Vec<char> = signature.chars().collect();
    signature[4] = if signature[4] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}.{}", signed, signature.into_iter().collect::<String>());

    let response = app
        .get_authenticated("/api/users/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_me_with_expired_token() {
    let app = TestApp::spawn().await;
    let registered = app.register("nicola@example.com", "pass_word!").await;
    let account_id = registered["data"]["id"].as_i64().unwrap();

    let clock = Arc::new(FixedClock::now());
    clock.advance(Duration::hours(-3));
    let issuer = Authenticator::new(TEST_SECRET, Duration::hours(1))
        .unwrap()
        .with_clock(clock);
    let expired = issuer.issue_token(account_id).unwrap();

    let response = app
        .get_authenticated("/api/users/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_me_with_foreign_secret() {
    let app = TestApp::spawn().await;
    let registered = app.register("nicola@example.com", "pass_word!").await;
    let account_id = registered["data"]["id"].as_i64().unwrap();

    let forged = Authenticator::new(b"some-other-secret", Duration::hours(1))
        .unwrap()
        .issue_token(account_id)
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_update_profile_success() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .put_authenticated("/api/users/me", &token)
        .json(&json!({
            "full_name": "Nicola B",
            "user_name": "nicola",
            "dob": "1990-04-21"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["full_name"], "Nicola B");
    assert_eq!(body["data"]["user_name"], "nicola");
    assert_eq!(body["data"]["dob"], "1990-04-21");

    let fresh = body["data"]["access_token"].as_str().unwrap();
    let response = app
        .get_authenticated("/api/users/me", fresh)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_name"], "nicola");
}

#[tokio::test]
async fn test_update_profile_missing_field() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .put_authenticated("/api/users/me", &token)
        .json(&json!({
            "full_name": "Nicola B",
            "dob": "1990-04-21"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_bad_dob() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .put_authenticated("/api/users/me", &token)
        .json(&json!({
            "full_name": "Nicola B",
            "user_name": "nicola",
            "dob": "21/04/1990"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_update_profile_invalid_user_name() {
    let app = TestApp::spawn().await;
    let token = app.register_token("nicola@example.com", "pass_word!").await;

    let response = app
        .put_authenticated("/api/users/me", &token)
        .json(&json!({
            "full_name": "Nicola B",
            "user_name": "n",
            "dob": "1990-04-21"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_update_profile_duplicate_user_name() {
    let app = TestApp::spawn().await;
    let first = app.register_token("nicola@example.com", "pass_word!").await;
    let second = app.register_token("marco@example.com", "pass_word!").await;

    let profile = json!({
        "full_name": "Nicola B",
        "user_name": "nicola",
        "dob": "1990-04-21"
    });

    let response = app
        .put_authenticated("/api/users/me", &first)
        .json(&profile)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .put_authenticated("/api/users/me", &second)
        .json(&profile)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_profile_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .put(format!("{}/api/users/me", app.address))
        .json(&json!({
            "full_name": "Nicola B",
            "user_name": "nicola",
            "dob": "1990-04-21"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_in_dev() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    app.register("marco@example.com", "pass_word!").await;

    let response = app
        .post("/api/reset")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["deleted_accounts"], 2);

    // The email is free again once the store is cleared.
    app.register("nicola@example.com", "pass_word!").await;
}

#[tokio::test]
async fn test_reset_outside_dev() {
    let app = TestApp::spawn_on(Platform::Production).await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app
        .post("/api/reset")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
