//! Cart route handlers.
//!
//! The cart lives in the session and is rebuilt with the store on each
//! request. Guests have an empty cart and cannot add to it.

use axum::Json;
use ownshop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentStore;
use crate::store::StoreError;

use super::views::CartView;

/// Add to cart request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Update quantity request. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub product_id: String,
}

/// Display the cart.
pub async fn show(CurrentStore(store): CurrentStore) -> Json<CartView> {
    Json(CartView::from(store.cart()))
}

/// Add a product to the cart.
#[instrument(skip(store))]
pub async fn add(
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(request.product_id);
    let product = store
        .product(&id)
        .ok_or_else(|| AppError::from(StoreError::NotFound(id.to_string())))?;

    store.add_to_cart(&product, request.quantity).await?;
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    Ok(Json(CartView::from(store.cart())))
}

/// Set a line's quantity.
#[instrument(skip(store))]
pub async fn update(
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(request.product_id);
    store.update_cart_quantity(&id, request.quantity).await?;
    Ok(Json(CartView::from(store.cart())))
}

/// Remove a line. Removing an absent product is not an error.
#[instrument(skip(store))]
pub async fn remove(
    CurrentStore(mut store): CurrentStore,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(request.product_id);
    store.remove_from_cart(&id).await?;
    Ok(Json(CartView::from(store.cart())))
}
