//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use ownshop_core::{Category, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::{CatalogFilter, MORE_TO_LOVE_PAGE_SIZE, RELATED_PRODUCTS_LIMIT};

use super::views::{ProductView, product_views};

/// Largest page a client may request.
const MAX_PAGE_SIZE: usize = 100;

/// Query parameters for product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Category display name or slug.
    pub category: Option<String>,
    /// Only discounted products.
    #[serde(default)]
    pub deals: bool,
    /// Search term.
    pub q: Option<String>,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

/// A page of products.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Product detail with related products.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: ProductView,
    pub related: Vec<ProductView>,
}

/// Resolve a category given as display name or slug.
fn resolve_category(value: &str) -> Result<&'static Category> {
    Category::by_name(value)
        .or_else(|| Category::by_slug(value))
        .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {value}")))
}

/// List visible products, paged like the "More to love" feed.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductPage>> {
    let filter = CatalogFilter {
        category: query
            .category
            .as_deref()
            .map(|value| resolve_category(value).map(|category| category.name.to_string()))
            .transpose()?,
        discounted: query.deals,
        search: query.q.filter(|term| !term.trim().is_empty()),
    };
    let limit = query.limit.unwrap_or(MORE_TO_LOVE_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let matching = state.catalog().read().visible_products(&filter);
    let total = matching.len();
    let products: Vec<_> = matching.into_iter().skip(query.offset).take(limit).collect();

    Ok(Json(ProductPage {
        has_more: query.offset.saturating_add(products.len()) < total,
        products: product_views(products),
        total,
        offset: query.offset,
        limit,
    }))
}

/// Display a published product with up to ten related products.
///
/// Unpublished products are not found.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductDetail>> {
    let id = ProductId::new(id);
    let catalog = state.catalog().read();
    let product = catalog
        .visible_product(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let related = catalog.related_products(&id, RELATED_PRODUCTS_LIMIT);

    Ok(Json(ProductDetail {
        product: product.into(),
        related: product_views(related),
    }))
}
