//! Admin route handlers.

use axum::{Json, extract::State};
use ownshop_core::Banner;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::CurrentStore;
use crate::state::AppState;

use super::views::{ProductView, product_views};

/// Banner update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    pub title: String,
    pub image_url: String,
}

/// Current home-page banner.
pub async fn banner(State(state): State<AppState>) -> Json<Banner> {
    Json(state.catalog().read().banner().clone())
}

/// Replace the home-page banner. Admin only.
#[instrument(skip(store))]
pub async fn update_banner(
    CurrentStore(store): CurrentStore,
    Json(request): Json<BannerRequest>,
) -> Result<Json<Banner>> {
    let banner = store.set_banner(&request.title, &request.image_url)?;
    Ok(Json(banner))
}

/// Every product in the catalog, including unpublished ones. Admin only.
pub async fn products(CurrentStore(store): CurrentStore) -> Result<Json<Vec<ProductView>>> {
    Ok(Json(product_views(store.all_products()?)))
}
