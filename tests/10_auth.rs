mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.get("/health", None).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], true);
    assert_eq!(body["database"], "in-memory");
    Ok(())
}

#[tokio::test]
async fn register_returns_user_and_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.register("a@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["token"].as_str().map(|t| t.split('.').count()), Some(3));
    Ok(())
}

#[tokio::test]
async fn register_without_token_when_disabled() -> Result<()> {
    let mut config = common::test_config();
    config.security.issue_token_on_register = false;
    let server = common::spawn_server_with(config).await?;

    let body = server.register("a@x.com", "pw1").await?.json::<Value>().await?;
    assert_eq!(body["status"], true);
    assert!(body.get("token").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_conflict() -> Result<()> {
    let server = common::spawn_server().await?;

    assert_eq!(server.register("a@x.com", "pw1").await?.status(), StatusCode::OK);

    let res = server.register("a@x.com", "pw2").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], false);
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn register_rejects_bad_bodies() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .post("/register", None)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = server.post("/register", None).json(&json!({ "email": "a@x.com" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");

    let res = server.register("", "pw1").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn login_returns_token() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("a@x.com", "pw1").await?;

    let res = server.login("a@x.com", "pw1").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Login Successful");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("a@x.com", "pw1").await?;

    let wrong_password = server.login("a@x.com", "wrong").await?;
    let unknown_email = server.login("nobody@x.com", "pw1").await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>().await?,
        unknown_email.json::<Value>().await?
    );
    Ok(())
}

#[tokio::test]
async fn logout_acknowledges_and_keeps_token_valid() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let res = server.post("/logout", Some(token.as_str())).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "status": true, "message": "Logout Successful" })
    );

    // Stateless: the token still works afterwards.
    let res = server.get("/notes", Some(token.as_str())).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // No token is fine too.
    let res = server.post("/logout", None).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
