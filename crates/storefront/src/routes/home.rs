//! Home page and static lookup tables.

use axum::{Json, extract::State};
use ownshop_core::{Banner, CATEGORIES, COUNTRIES, Category, Country, LANGUAGES, Language};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;
use crate::store::TODAYS_DEALS_LIMIT;

use super::views::{ProductView, product_views};

/// Home page payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub banner: Banner,
    pub todays_deals: Vec<ProductView>,
    pub categories: &'static [Category],
}

/// Language and country tables.
#[derive(Debug, Serialize)]
pub struct LocalesView {
    pub languages: &'static [Language],
    pub countries: &'static [Country],
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let catalog = state.catalog().read();
    Json(HomeView {
        banner: catalog.banner().clone(),
        todays_deals: product_views(catalog.todays_deals(TODAYS_DEALS_LIMIT)),
        categories: CATEGORIES,
    })
}

/// List supported languages and countries.
pub async fn locales() -> Json<LocalesView> {
    Json(LocalesView {
        languages: LANGUAGES,
        countries: COUNTRIES,
    })
}

/// Liveness health check. Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
