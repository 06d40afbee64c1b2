//! Search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::genai::SearchSummaryRequest;
use crate::state::AppState;
use crate::store::CatalogFilter;

use super::views::{ProductView, product_views};

/// Results included in the text sent for summarization.
const SUMMARY_RESULT_LIMIT: usize = 20;

/// Query parameters for search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<ProductView>,
    /// AI summary, when text generation is configured and succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Search published products, with an optional AI summary.
///
/// Summary failures are logged and the results are returned without one.
#[instrument(skip(state), fields(query = %query.q))]
pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Json<SearchResults> {
    let term = query.q.trim().to_string();
    if term.is_empty() {
        return Json(SearchResults {
            query: term,
            products: Vec::new(),
            summary: None,
        });
    }

    let products = state
        .catalog()
        .read()
        .visible_products(&CatalogFilter::search(term.clone()));

    let summary = match state.assistant() {
        Ok(assistant) if !products.is_empty() => {
            let request = SearchSummaryRequest {
                query: term.clone(),
                search_results: render_results(&products),
            };
            match assistant.summarize_search(&request).await {
                Ok(response) => Some(response.summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Search summary failed");
                    None
                }
            }
        }
        _ => None,
    };

    Json(SearchResults {
        query: term,
        products: product_views(products),
        summary,
    })
}

/// Render results as lines of `name (category, price): description`.
fn render_results(products: &[ownshop_core::Product]) -> String {
    products
        .iter()
        .take(SUMMARY_RESULT_LIMIT)
        .map(|p| {
            format!(
                "- {} ({}, {}): {}",
                p.name,
                p.category,
                p.price.display(),
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
