//! Integration tests for OwnShop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ownshop-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral port with a fresh
//! catalog and an in-memory session store. [`TestContext`] keeps a cookie jar
//! so consecutive requests share one session, like a browser tab.

use std::collections::HashMap;
use std::net::SocketAddr;

use ownshop_storefront::config::StorefrontConfig;
use ownshop_storefront::state::AppState;
use ownshop_storefront::store::{Catalog, SharedCatalog};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Errors while starting or talking to a test server.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A running storefront and a cookie-keeping client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    /// Start a storefront over the seeded demo catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind or the client cannot be built.
    pub async fn new() -> Result<Self, BoxError> {
        Self::with_catalog(SharedCatalog::seeded()).await
    }

    /// Start a storefront over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind or the client cannot be built.
    pub async fn with_catalog(catalog: SharedCatalog) -> Result<Self, BoxError> {
        let vars = HashMap::from([("OWNSHOP_AUTH_LATENCY_MS".to_string(), "0".to_string())]);
        let config = StorefrontConfig::from_vars(&vars)?;
        let state = AppState::with_catalog(config, catalog)?;

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let app = ownshop_storefront::app(state.clone(), false);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: format!("http://{addr}"),
            state,
        })
    }

    /// Start a storefront over exactly `products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot start.
    pub async fn with_products(
        products: impl IntoIterator<Item = ownshop_core::Product>,
    ) -> Result<Self, BoxError> {
        Self::with_catalog(SharedCatalog::new(Catalog::new(products))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn reply(response: reqwest::Response) -> Result<Reply, BoxError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok(Reply { status, body })
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> Result<Reply, BoxError> {
        Self::reply(self.client.get(self.url(path)).send().await?).await
    }

    /// POST `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Reply, BoxError> {
        Self::reply(self.client.post(self.url(path)).json(body).send().await?).await
    }

    /// PUT `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Reply, BoxError> {
        Self::reply(self.client.put(self.url(path)).json(body).send().await?).await
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, path: &str) -> Result<Reply, BoxError> {
        Self::reply(self.client.delete(self.url(path)).send().await?).await
    }

    /// Sign in as a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_in_customer(&self, email: &str) -> Result<Reply, BoxError> {
        self.post("/auth/signin", &serde_json::json!({ "email": email })).await
    }

    /// Sign in with credentials at `/auth/{kind}/signin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_in_with(&self, kind: &str, email: &str, password: &str) -> Result<Reply, BoxError> {
        self.post(
            &format!("/auth/{kind}/signin"),
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }
}

/// Build a product for custom catalogs.
///
/// # Panics
///
/// Panics if `price` is not a positive decimal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, price: &str, published: bool, store: &str) -> ownshop_core::Product {
    let mut product = ownshop_core::Product::from_draft(
        ownshop_core::ProductId::new(id),
        ownshop_core::NewProduct {
            name: format!("Product {id}"),
            description: "A product".to_string(),
            price: ownshop_core::Price::parse(price).unwrap(),
            original_price: None,
            category: "Electronics".to_string(),
            image_url: "https://img.example/p.jpg".to_string(),
        },
        ownshop_core::StoreRef::new(store),
    );
    product.published = published;
    product
}
