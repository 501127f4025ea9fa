mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn notes_require_a_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let missing = server.get("/notes", None).send().await?;
    let garbage = server.get("/notes", Some("not-a-token")).send().await?;
    let wrong_scheme = server
        .get("/notes", None)
        .header("authorization", "Basic dXNlcjpwdw==")
        .send()
        .await?;

    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);

    // Same body regardless of why the credential was rejected.
    let missing = missing.json::<Value>().await?;
    assert_eq!(missing, garbage.json::<Value>().await?);
    assert_eq!(missing, wrong_scheme.json::<Value>().await?);
    assert_eq!(missing["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn token_from_another_secret_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("a@x.com", "pw1").await?;

    let mut other_config = common::test_config();
    other_config.security.jwt_secret = "some-other-secret".to_string();
    let other = common::spawn_server_with(other_config).await?;
    let foreign_token = other.user_token("a@x.com", "pw1").await?;

    let res = server.get("/notes", Some(foreign_token.as_str())).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_for_unknown_account_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    // Same secret, but the account only exists on the other server.
    let other = common::spawn_server().await?;
    let token = other.user_token("ghost@x.com", "pw1").await?;

    let res = server
        .post("/notes", Some(token.as_str()))
        .json(&json!({ "title": "T", "body": "B" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn crud_round_trip() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let list = server.get("/notes", Some(token.as_str())).send().await?.json::<Value>().await?;
    assert_eq!(list["status"], true);
    assert_eq!(list["notes"], json!([]));

    let note = server.create_note(&token, "T", "B").await?;
    let id = note["id"].as_str().expect("note id").to_string();
    assert_eq!(note["title"], "T");
    assert_eq!(note["body"], "B");
    assert_eq!(note["created_at"], note["updated_at"]);

    let fetched = server.get(&format!("/notes/{}", id), Some(token.as_str())).send().await?;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>().await?["note"], note);

    let updated = server
        .put(&format!("/notes/{}", id), Some(token.as_str()))
        .json(&json!({ "title": "T2", "body": "B2" }))
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = updated.json::<Value>().await?["note"].clone();
    assert_eq!(updated["title"], "T2");
    assert_eq!(updated["body"], "B2");
    assert_eq!(updated["created_at"], note["created_at"]);
    assert_eq!(updated["user_id"], note["user_id"]);

    let list = server.get("/notes", Some(token.as_str())).send().await?.json::<Value>().await?;
    assert_eq!(list["notes"], json!([updated]));

    let deleted = server.delete(&format!("/notes/{}", id), Some(token.as_str())).send().await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(deleted.json::<Value>().await?["status"], true);

    let gone = server.get(&format!("/notes/{}", id), Some(token.as_str())).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn other_users_get_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user_token("a@x.com", "pw1").await?;
    let bob = server.user_token("b@x.com", "pw2").await?;

    let note = server.create_note(&alice, "T", "B").await?;
    let path = format!("/notes/{}", note["id"].as_str().expect("note id"));

    let get = server.get(&path, Some(bob.as_str())).send().await?;
    let put = server
        .put(&path, Some(bob.as_str()))
        .json(&json!({ "title": "hijack", "body": "x" }))
        .send()
        .await?;
    let delete = server.delete(&path, Some(bob.as_str())).send().await?;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(put.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    // Indistinguishable from a note that never existed.
    let absent = server
        .get(&format!("/notes/{}", uuid_like()), Some(bob.as_str()))
        .send()
        .await?;
    assert_eq!(get.json::<Value>().await?, absent.json::<Value>().await?);

    let bobs = server.get("/notes", Some(bob.as_str())).send().await?.json::<Value>().await?;
    assert_eq!(bobs["notes"], json!([]));

    // Alice's note survived untouched.
    let mine = server.get(&path, Some(alice.as_str())).send().await?.json::<Value>().await?;
    assert_eq!(mine["note"], note);
    Ok(())
}

#[tokio::test]
async fn invalid_note_id_is_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    for res in [
        server.get("/notes/not-an-id", Some(token.as_str())).send().await?,
        server.delete("/notes/not-an-id", Some(token.as_str())).send().await?,
        server
            .put("/notes/not-an-id", Some(token.as_str()))
            .json(&json!({ "title": "T", "body": "B" }))
            .send()
            .await?,
    ] {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_note_body_is_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let res = server
        .post("/notes", Some(token.as_str()))
        .json(&json!({ "title": "only a title" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() -> Result<()> {
    let mut config = common::test_config();
    config.api.max_request_size_bytes = 1024;
    let server = common::spawn_server_with(config).await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let res = server
        .post("/notes", Some(token.as_str()))
        .json(&json!({ "title": "T", "body": "x".repeat(4096) }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], false);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");

    // Nothing was stored, and bodies under the limit still go through.
    let list = server.get("/notes", Some(token.as_str())).send().await?.json::<Value>().await?;
    assert_eq!(list["notes"], json!([]));
    server.create_note(token.as_str(), "T", "small").await?;

    let res = server
        .post("/register", None)
        .json(&json!({ "email": "b@x.com", "password": "p".repeat(4096) }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    Ok(())
}

#[tokio::test]
async fn end_to_end_scenario() -> Result<()> {
    let server = common::spawn_server().await?;

    assert_eq!(server.register("a@x.com", "pw1").await?.status(), StatusCode::OK);
    assert_eq!(server.register("a@x.com", "pw2").await?.status(), StatusCode::BAD_REQUEST);

    let login = server.login("a@x.com", "pw1").await?;
    assert_eq!(login.status(), StatusCode::OK);
    let token = login.json::<Value>().await?["token"].as_str().expect("token").to_string();

    let created = server
        .post("/notes", Some(token.as_str()))
        .json(&json!({ "title": "T", "body": "B" }))
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::OK);
    let id = created.json::<Value>().await?["note"]["id"]
        .as_str()
        .expect("generated id")
        .to_string();

    let intruder = server.user_token("b@x.com", "pw3").await?;
    let res = server.get(&format!("/notes/{}", id), Some(intruder.as_str())).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

fn uuid_like() -> &'static str {
    "00000000-0000-4000-8000-000000000000"
}
