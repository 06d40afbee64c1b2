//! Seller product management and admin banner over HTTP.

#![allow(clippy::unwrap_used)]

use ownshop_integration_tests::TestContext;
use ownshop_storefront::services::auth::{DEMO_ADMIN_EMAIL, DEMO_PASSWORD};
use reqwest::StatusCode;
use serde_json::json;

fn draft(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": "Compact mirrorless camera",
        "price": "5",
        "category": "Electronics",
        "imageUrl": "https://img.example/x.jpg",
    })
}

// =============================================================================
// Seller
// =============================================================================

#[tokio::test]
async fn test_seller_adds_unpublished_product() {
    let ctx = TestContext::new().await.unwrap();
    let reply = ctx
        .sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["storeName"], "Tech Wonders");

    let before = ctx.state.catalog().read().len();
    let reply = ctx.post("/seller/products", &draft("X")).await.unwrap();
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["published"], false);
    assert_eq!(reply.body["sold"], 0);
    assert_eq!(reply.body["rating"], 0.0);
    assert_eq!(reply.body["store"]["name"], "Tech Wonders");

    let id = reply.body["id"].as_str().unwrap().to_string();
    {
        let catalog = ctx.state.catalog().read();
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.iter().filter(|p| p.id.as_str() == id).count(), 1);
    }

    // Not visible to customers until published.
    let reply = ctx.get(&format!("/products/{id}")).await.unwrap();
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let own = ctx.get("/seller/products").await.unwrap().body;
    assert!(own.as_array().unwrap().iter().any(|p| p["id"] == id.as_str()));
}

#[tokio::test]
async fn test_toggle_twice_restores_publication() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();

    let first = ctx.post("/seller/products/2/toggle", &json!({})).await.unwrap();
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["published"], false);
    assert_eq!(ctx.get("/products/2").await.unwrap().status, StatusCode::NOT_FOUND);

    let second = ctx.post("/seller/products/2/toggle", &json!({})).await.unwrap();
    assert_eq!(second.body["published"], true);
    assert_eq!(ctx.get("/products/2").await.unwrap().status, StatusCode::OK);
}

#[tokio::test]
async fn test_seller_cannot_touch_other_store() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();

    // Product 1 belongs to SoundScape.
    let reply = ctx.post("/seller/products/1/toggle", &json!({})).await.unwrap();
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    let reply = ctx.delete("/seller/products/1").await.unwrap();
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert!(ctx.state.catalog().read().get(&"1".into()).is_some());
}

#[tokio::test]
async fn test_seller_deletes_own_product() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();

    let reply = ctx.delete("/seller/products/10").await.unwrap();
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let reply = ctx.delete("/seller/products/10").await.unwrap();
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_cannot_add_products() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_customer("shopper@example.com").await.unwrap();

    let reply = ctx.post("/seller/products", &draft("X")).await.unwrap();
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_new_seller_lists_under_default_store_name() {
    let ctx = TestContext::new().await.unwrap();
    let reply = ctx
        .sign_in_with("seller", "maker@example.com", DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["storeName"], "maker@example.com's Store");

    let own = ctx.get("/seller/products").await.unwrap();
    assert_eq!(own.status, StatusCode::OK);
    assert!(own.body.as_array().unwrap().is_empty());

    let reply = ctx.post("/seller/products", &draft("Handmade Mug")).await.unwrap();
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["store"]["name"], "maker@example.com's Store");
}

#[tokio::test]
async fn test_seller_wrong_password() {
    let ctx = TestContext::new().await.unwrap();
    let reply = ctx
        .sign_in_with("seller", "seller@soundscape.com", "nope")
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_describe_without_ai_is_unavailable() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();
    let reply = ctx
        .post("/seller/describe", &json!({"title": "Camera", "keywords": "4k"}))
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_sign_in() {
    let ctx = TestContext::new().await.unwrap();

    let reply = ctx.sign_in_with("admin", "x@x.com", "wrong").await.unwrap();
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.get("/auth/me").await.unwrap().body["signedIn"], false);

    let reply = ctx
        .sign_in_with("admin", DEMO_ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["role"], "admin");
}

#[tokio::test]
async fn test_failed_admin_sign_in_keeps_existing_role() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_customer("shopper@example.com").await.unwrap();

    let reply = ctx.sign_in_with("admin", "x@x.com", "wrong").await.unwrap();
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.get("/auth/me").await.unwrap().body["role"], "user");
}

#[tokio::test]
async fn test_admin_updates_banner() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("admin", DEMO_ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let reply = ctx
        .put(
            "/admin/banner",
            &json!({"title": "Autumn Sale", "imageUrl": "https://img.example/autumn.jpg"}),
        )
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::OK);

    let home = ctx.get("/").await.unwrap().body;
    assert_eq!(home["banner"]["title"], "Autumn Sale");

    let reply = ctx
        .put("/admin/banner", &json!({"title": "Bad", "imageUrl": "not a url"}))
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_cannot_update_banner() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_customer("shopper@example.com").await.unwrap();

    let reply = ctx
        .put(
            "/admin/banner",
            &json!({"title": "Mine", "imageUrl": "https://img.example/x.jpg"}),
        )
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_every_product() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("admin", DEMO_ADMIN_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let reply = ctx.get("/admin/products").await.unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    let products = reply.body.as_array().unwrap();
    assert_eq!(products.len(), ctx.state.catalog().read().len());
    assert!(
        products
            .iter()
            .any(|p| p["id"] == "14" && p["published"] == false)
    );
}

#[tokio::test]
async fn test_seller_cannot_list_admin_products() {
    let ctx = TestContext::new().await.unwrap();
    ctx.sign_in_with("seller", "seller@techwonders.com", DEMO_PASSWORD)
        .await
        .unwrap();

    let reply = ctx.get("/admin/products").await.unwrap();
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}
