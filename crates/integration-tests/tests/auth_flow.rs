//! Accounts and profiles over HTTP.

use mirror_integration_tests::{TestServer, json};
use reqwest::StatusCode;
use serde_json::{Value, json as body};

fn registration(email: &str, password: &str, confirm: &str) -> Value {
    body!({
        "email": email,
        "password": password,
        "password_confirm": confirm,
        "accept_terms": true
    })
}

async fn registered(server: &TestServer, email: &str) {
    let resp = server
        .post(
            "/auth/register",
            &registration(email, "hunter22", "hunter22"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let server = TestServer::spawn().await;

    let resp = server
        .post(
            "/auth/register",
            &registration("ada@shop.test", "abc123", "abc124"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["error"], "Passwords do not match.");

    // Nothing was created, so the same email can still register.
    registered(&server, "ada@shop.test").await;
}

#[tokio::test]
async fn test_register_requires_terms() {
    let server = TestServer::spawn().await;
    let mut form = registration("ada@shop.test", "hunter22", "hunter22");
    form["accept_terms"] = body!(false);

    let resp = server.post("/auth/register", &form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_surfaces_store_rejections() {
    let server = TestServer::spawn().await;

    let resp = server
        .post(
            "/auth/register",
            &registration("ada@localhost", "hunter22", "hunter22"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    registered(&server, "ada@shop.test").await;
    let resp = server
        .post(
            "/auth/register",
            &registration("ada@shop.test", "hunter22", "hunter22"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        json(resp).await["error"],
        "An account with this email already exists."
    );
}

#[tokio::test]
async fn test_sign_out_then_sign_in() {
    let server = TestServer::spawn().await;
    registered(&server, "ada@shop.test").await;

    let resp = server.post_empty("/auth/logout").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = server.get("/account/profile").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = server
        .post(
            "/auth/login",
            &body!({"email": "ada@shop.test", "password": "wrong-one"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = server
        .post(
            "/auth/login",
            &body!({"email": "ada@shop.test", "password": "hunter22"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["email"], "ada@shop.test");
}

#[tokio::test]
async fn test_password_reset() {
    let server = TestServer::spawn().await;

    let resp = server
        .post("/auth/password-reset", &body!({"email": "nobody@shop.test"}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    registered(&server, "ada@shop.test").await;
    let resp = server
        .post("/auth/password-reset", &body!({"email": "ada@shop.test"}))
        .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let resp = server
        .post("/auth/password-reset", &body!({"email": ""}))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_requires_sign_in() {
    let server = TestServer::spawn().await;
    assert_eq!(
        server.get("/account/profile").await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        server
            .patch("/account/profile", &body!({"name": "Ada"}))
            .await
            .status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_complete_then_update_profile() {
    let server = TestServer::spawn().await;
    registered(&server, "ada@shop.test").await;

    assert_eq!(
        server.get("/account/profile").await.status(),
        StatusCode::NOT_FOUND
    );

    let resp = server
        .post("/account/profile/complete", &body!({"name": "  "}))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = server
        .post(
            "/account/profile/complete",
            &body!({"name": "Ada Buyer", "phone": "555-0100", "gender": "female"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let profile = json(
        server
            .patch("/account/profile", &body!({"phone": "555-0199"}))
            .await,
    )
    .await;
    assert_eq!(profile["name"], "Ada Buyer");
    assert_eq!(profile["phone"], "555-0199");
    assert_eq!(profile["gender"], "female");
    assert_eq!(profile["email"], "ada@shop.test");

    let profile = json(server.get("/account/profile").await).await;
    assert_eq!(profile["phone"], "555-0199");
}
