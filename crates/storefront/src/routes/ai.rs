//! Text-generation route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::genai::{
    DEFAULT_RECOMMENDATIONS, RecommendationRequest, RecommendationResponse, SearchSummaryRequest, SearchSummaryResponse,
};
use crate::middleware::CurrentStore;
use crate::state::AppState;

/// Recommendation request from the browser.
///
/// The cart half of the prompt comes from the session, not the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsBody {
    #[serde(default)]
    pub browsing_history: Vec<String>,
    pub number_of_recommendations: Option<u32>,
}

/// Suggest product ids from browsing history and the session cart.
#[instrument(skip(state, store, body), fields(history = body.browsing_history.len()))]
pub async fn recommendations(
    State(state): State<AppState>,
    CurrentStore(store): CurrentStore,
    Json(body): Json<RecommendationsBody>,
) -> Result<Json<RecommendationResponse>> {
    let assistant = state.assistant()?;
    let request = RecommendationRequest {
        browsing_history: body.browsing_history,
        current_cart: store
            .cart()
            .items()
            .map(|item| item.product.id.to_string())
            .collect(),
        number_of_recommendations: body
            .number_of_recommendations
            .unwrap_or(DEFAULT_RECOMMENDATIONS),
    };

    Ok(Json(assistant.recommend_products(&request).await?))
}

/// Summarize a block of search results.
#[instrument(skip(state, request), fields(query = %request.query))]
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SearchSummaryRequest>,
) -> Result<Json<SearchSummaryResponse>> {
    Ok(Json(state.assistant()?.summarize_search(&request).await?))
}
