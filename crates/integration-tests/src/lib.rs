//! End-to-end tests for the Mirror storefront API.
//!
//! Each test starts the full router on an ephemeral port and drives it over
//! HTTP with a cookie-keeping `reqwest` client, so session state carries
//! across requests the way it does for a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mirror-integration-tests
//! ```

use std::net::SocketAddr;

use argon2::{Algorithm, Argon2, Params, Version};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

use mirror_storefront::catalog::Catalog;
use mirror_storefront::config::StorefrontConfig;
use mirror_storefront::identity::MemoryIdentityStore;
use mirror_storefront::state::AppState;

/// A storefront running in the background plus a client bound to it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        Self::spawn_with(StorefrontConfig::default()).await
    }

    /// Start a storefront with `config`.
    ///
    /// Passwords are hashed with the cheapest Argon2 parameters.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn spawn_with(config: StorefrontConfig) -> Self {
        let params = Params::new(8, 1, 1, None).unwrap();
        let identity = MemoryIdentityStore::with_hasher(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            params,
        ));
        let catalog = Catalog::seeded(config.currency);
        let app = mirror_storefront::app(AppState::with_parts(config, catalog, identity));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Self::new_client(),
        }
    }

    /// A fresh client with its own cookie jar (a second browser).
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn new_client() -> Client {
        Client::builder().cookie_store(true).build().unwrap()
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// # Panics
    ///
    /// Panics if the request fails to send.
    #[allow(clippy::unwrap_used)]
    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// # Panics
    ///
    /// Panics if the request fails to send.
    #[allow(clippy::unwrap_used)]
    pub async fn post(&self, path: &str, body: &impl Serialize) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// POST with no body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails to send.
    #[allow(clippy::unwrap_used)]
    pub async fn post_empty(&self, path: &str) -> Response {
        self.client.post(self.url(path)).send().await.unwrap()
    }

    /// # Panics
    ///
    /// Panics if the request fails to send.
    #[allow(clippy::unwrap_used)]
    pub async fn patch(&self, path: &str, body: &impl Serialize) -> Response {
        self.client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// # Panics
    ///
    /// Panics if the request fails to send.
    #[allow(clippy::unwrap_used)]
    pub async fn delete(&self, path: &str) -> Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
#[allow(clippy::unwrap_used)]
pub async fn json(response: Response) -> Value {
    response.json().await.unwrap()
}
