//! Seller dashboard route handlers.
//!
//! Sellers manage only products listed under their own store name. The
//! store enforces ownership; these handlers translate the results.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use ownshop_core::{NewProduct, ProductId, Role};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::genai::{DescriptionRequest, DescriptionResponse};
use crate::middleware::{CurrentStore, SessionStore};
use crate::state::AppState;
use crate::store::StoreError;

use super::views::{ProductView, product_views};

fn require_seller(store: &SessionStore) -> Result<()> {
    match store.role() {
        None => Err(StoreError::Unauthenticated.into()),
        Some(Role::Seller) => Ok(()),
        Some(_) => Err(StoreError::Unauthorized.into()),
    }
}

fn not_found(id: &ProductId) -> AppError {
    StoreError::NotFound(id.to_string()).into()
}

/// The seller's own products, published or not.
pub async fn index(CurrentStore(store): CurrentStore) -> Result<Json<Vec<ProductView>>> {
    Ok(Json(product_views(store.seller_products()?)))
}

/// List a new product under the seller's store.
#[instrument(skip(store, draft), fields(name = %draft.name))]
pub async fn create(
    CurrentStore(store): CurrentStore,
    Json(draft): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductView>)> {
    let product = store.add_product(draft)?;
    Ok((StatusCode::CREATED, Json(ProductView::from(product))))
}

/// Flip a product between published and unpublished.
#[instrument(skip(store))]
pub async fn toggle(
    CurrentStore(store): CurrentStore,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    let product = store
        .toggle_product_publication(&id)?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(ProductView::from(product)))
}

/// Delete a product from the catalog.
#[instrument(skip(store))]
pub async fn destroy(
    CurrentStore(store): CurrentStore,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = ProductId::new(id);
    store.remove_product(&id)?.ok_or_else(|| not_found(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Draft a product description with the text generator.
#[instrument(skip(state, store))]
pub async fn describe(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>> {
    require_seller(&store)?;
    let response = state.assistant()?.generate_description(&request).await?;
    Ok(Json(response))
}
