#![allow(dead_code)]

use anyhow::{Context, Result};
use notes_api::config::AppConfig;
use notes_api::AppState;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        with_token(self.client.get(self.url(path)), token)
    }

    pub fn post(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        with_token(self.client.post(self.url(path)), token)
    }

    pub fn put(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        with_token(self.client.put(self.url(path)), token)
    }

    pub fn delete(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        with_token(self.client.delete(self.url(path)), token)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .post("/register", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .post("/login", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register and log in, returning the login token.
    pub async fn user_token(&self, email: &str, password: &str) -> Result<String> {
        self.register(email, password).await?.error_for_status()?;
        let body: Value = self.login(email, password).await?.error_for_status()?.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub async fn create_note(&self, token: &str, title: &str, body: &str) -> Result<Value> {
        let res: Value = self
            .post("/notes", Some(token))
            .json(&json!({ "title": title, "body": body }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(res["note"].clone())
    }
}

fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

/// Serve the router with in-memory stores on an ephemeral port. Each test
/// gets its own server since it lives on that test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(test_config()).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    spawn_state(AppState::in_memory(config)?).await
}

/// Serve an already-built state, e.g. one backed by PostgreSQL.
pub async fn spawn_state(state: AppState) -> Result<TestServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, notes_api::app(state)).await.ok();
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: Client::new(),
    })
}
