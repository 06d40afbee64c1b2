//! Text-generation commands.
//!
//! # Usage
//!
//! ```bash
//! ownshop describe "Noise-cancelling headphones" --keywords "wireless, 30h battery"
//! ownshop summarize "headphones"
//! ownshop recommend --viewed 1 --viewed 3 --cart 13 -n 3
//! ```
//!
//! # Environment Variables
//!
//! - `GENAI_API_KEY` - Required
//! - `GENAI_MODEL`, `GENAI_BASE_URL` - Optional overrides

use ownshop_storefront::config::StorefrontConfig;
use ownshop_storefront::genai::{
    Assistant, DEFAULT_RECOMMENDATIONS, DescriptionRequest, GenAiClient, RecommendationRequest,
    SearchSummaryRequest,
};
use ownshop_storefront::store::{CatalogFilter, SharedCatalog};
use tracing::info;

use super::{CommandError, print_json};

fn assistant() -> Result<Assistant<GenAiClient>, CommandError> {
    let config = StorefrontConfig::from_env()?;
    let genai = config.genai.ok_or(CommandError::GenAiDisabled)?;
    let client = GenAiClient::new(&genai)?;
    info!(model = client.model(), "Text generation client ready");
    Ok(Assistant::new(client))
}

/// Generate a product description.
///
/// # Errors
///
/// Returns an error if text generation is not configured or fails.
pub async fn describe(title: String, keywords: String) -> Result<(), CommandError> {
    let response = assistant()?
        .generate_description(&DescriptionRequest { title, keywords })
        .await?;
    print_json(&response)
}

/// Summarize seed-catalog search results for `query`.
///
/// # Errors
///
/// Returns an error if text generation is not configured or fails.
pub async fn summarize(query: String) -> Result<(), CommandError> {
    let products = SharedCatalog::seeded()
        .read()
        .visible_products(&CatalogFilter::search(query.clone()));
    info!(results = products.len(), "Searched seed catalog");

    let search_results = products
        .iter()
        .map(|p| format!("{}: {} ({})", p.name, p.description, p.price))
        .collect::<Vec<_>>()
        .join("\n");

    let response = assistant()?
        .summarize_search(&SearchSummaryRequest {
            query,
            search_results,
        })
        .await?;
    print_json(&response)
}

/// Recommend product ids from viewed and carted ids.
///
/// # Errors
///
/// Returns an error if text generation is not configured or fails.
pub async fn recommend(
    viewed: Vec<String>,
    cart: Vec<String>,
    count: Option<u32>,
) -> Result<(), CommandError> {
    let response = assistant()?
        .recommend_products(&RecommendationRequest {
            browsing_history: viewed,
            current_cart: cart,
            number_of_recommendations: count.unwrap_or(DEFAULT_RECOMMENDATIONS),
        })
        .await?;
    print_json(&response)
}
