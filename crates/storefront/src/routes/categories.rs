//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use ownshop_core::{CATEGORIES, Category, CategoryListing};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::CatalogFilter;

use super::views::{ProductView, product_views};

/// A category listing page.
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub title: &'static str,
    pub slug: String,
    pub products: Vec<ProductView>,
}

/// List all categories.
pub async fn index() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

/// Published products of a category, or every discounted product for
/// `superdeals`.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<CategoryPage>> {
    let listing = CategoryListing::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;
    let products = state
        .catalog()
        .read()
        .visible_products(&CatalogFilter::for_listing(listing));

    Ok(Json(CategoryPage {
        title: listing.title(),
        slug,
        products: product_views(products),
    }))
}
