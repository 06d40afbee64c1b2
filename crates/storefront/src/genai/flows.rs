//! The three text-generation flows.
//!
//! Each flow renders a prompt, asks the generator for JSON matching a fixed
//! schema, and validates the answer into a typed response.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use super::error::GenAiError;

/// Recommendations returned when the caller does not ask for a count.
pub const DEFAULT_RECOMMENDATIONS: u32 = 5;

/// Upper bound on requested recommendations.
pub const MAX_RECOMMENDATIONS: u32 = 20;

/// Sentences allowed in a search summary.
pub const SUMMARY_MAX_SENTENCES: usize = 2;

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;

/// A structured-output prompt.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub system: String,
    pub prompt: String,
    /// Response JSON schema.
    pub schema: Value,
}

/// Something that turns a prompt into JSON text.
pub trait TextGenerator: Send + Sync {
    /// Generate a JSON document for `prompt`.
    fn generate_json(
        &self,
        prompt: PromptRequest,
    ) -> impl Future<Output = Result<String, GenAiError>> + Send;
}

// =============================================================================
// Contracts
// =============================================================================

/// Input of the recommendation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Product ids the customer viewed.
    #[serde(default)]
    pub browsing_history: Vec<String>,
    /// Product ids in the customer's cart.
    #[serde(default)]
    pub current_cart: Vec<String>,
    #[serde(default = "default_recommendations")]
    pub number_of_recommendations: u32,
}

const fn default_recommendations() -> u32 {
    DEFAULT_RECOMMENDATIONS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_products: Vec<String>,
}

/// Input of the search summary flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummaryRequest {
    pub query: String,
    /// Search results rendered as text.
    pub search_results: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummaryResponse {
    pub summary: String,
}

/// Input of the description flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescriptionRequest {
    pub title: String,
    /// Comma separated keywords.
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Summary(SearchSummaryRequest),
    Description(DescriptionRequest),
}

// =============================================================================
// Assistant
// =============================================================================

/// Runs the flows against a [`TextGenerator`].
///
/// Summaries and descriptions are cached for five minutes.
#[derive(Clone)]
pub struct Assistant<G> {
    generator: G,
    cache: Cache<CacheKey, String>,
}

impl<G> std::fmt::Debug for Assistant<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("cached", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl<G: TextGenerator> Assistant<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Recommend product ids from browsing history and cart contents.
    ///
    /// The answer is de-duplicated and cut to the requested count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero or excessive count, or any generator
    /// or schema error.
    #[instrument(skip(self, request), fields(count = request.number_of_recommendations))]
    pub async fn recommend_products(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, GenAiError> {
        let count = request.number_of_recommendations;
        if count == 0 || count > MAX_RECOMMENDATIONS {
            return Err(GenAiError::InvalidInput(format!(
                "numberOfRecommendations must be between 1 and {MAX_RECOMMENDATIONS}"
            )));
        }

        let prompt = PromptRequest {
            system: "You are an expert e-commerce product recommendation engine.".to_string(),
            prompt: format!(
                "Based on the customer's browsing history and current cart, recommend products \
                 that the customer might be interested in.\nReturn only product IDs.\n\n\
                 Browsing History: {}\nCurrent Cart: {}\nNumber of Recommendations: {count}",
                request.browsing_history.join(", "),
                request.current_cart.join(", "),
            ),
            schema: object_schema(
                "recommendedProducts",
                json!({
                    "type": "ARRAY",
                    "items": {"type": "STRING"},
                    "description": "Product IDs recommended for the customer."
                }),
            ),
        };

        let mut response: RecommendationResponse = self.run(prompt).await?;
        response.recommended_products = dedupe(response.recommended_products, count as usize);
        Ok(response)
    }

    /// Summarize search results in at most two sentences.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query, `Schema` for an empty
    /// summary, or any generator error.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn summarize_search(
        &self,
        request: &SearchSummaryRequest,
    ) -> Result<SearchSummaryResponse, GenAiError> {
        if request.query.trim().is_empty() {
            return Err(GenAiError::InvalidInput("query is required".to_string()));
        }
        let key = CacheKey::Summary(request.clone());
        if let Some(summary) = self.cache.get(&key).await {
            return Ok(SearchSummaryResponse { summary });
        }

        let prompt = PromptRequest {
            system: "You are an AI assistant summarizing search results from an e-commerce platform."
                .to_string(),
            prompt: format!(
                "The user searched for \"{}\".\nHere are the search results:\n\"\"\"\n{}\n\"\"\"\n\
                 Provide a concise summary of the search results, highlighting key themes and \
                 relevant products.\nThe summary should be no more than two sentences.",
                request.query.trim(),
                request.search_results,
            ),
            schema: object_schema(
                "summary",
                json!({"type": "STRING", "description": "A concise summary of the search results."}),
            ),
        };

        let response: SearchSummaryResponse = self.run(prompt).await?;
        let summary = limit_sentences(&response.summary, SUMMARY_MAX_SENTENCES);
        if summary.is_empty() {
            return Err(GenAiError::Schema("summary is empty".to_string()));
        }

        self.cache.insert(key, summary.clone()).await;
        Ok(SearchSummaryResponse { summary })
    }

    /// Write a product description from a title and keywords.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty title, `Schema` for an empty
    /// description, or any generator error.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn generate_description(
        &self,
        request: &DescriptionRequest,
    ) -> Result<DescriptionResponse, GenAiError> {
        if request.title.trim().is_empty() {
            return Err(GenAiError::InvalidInput("title is required".to_string()));
        }
        let key = CacheKey::Description(request.clone());
        if let Some(description) = self.cache.get(&key).await {
            return Ok(DescriptionResponse { description });
        }

        let prompt = PromptRequest {
            system: "You are an AI assistant that generates product descriptions based on a title \
                     and keywords."
                .to_string(),
            prompt: format!(
                "Title: {}\nKeywords: {}\n\nGenerate a compelling and informative product description.",
                request.title.trim(),
                request.keywords.trim(),
            ),
            schema: object_schema(
                "description",
                json!({"type": "STRING", "description": "The generated product description."}),
            ),
        };

        let response: DescriptionResponse = self.run(prompt).await?;
        let description = response.description.trim().to_string();
        if description.is_empty() {
            return Err(GenAiError::Schema("description is empty".to_string()));
        }

        self.cache.insert(key, description.clone()).await;
        Ok(DescriptionResponse { description })
    }

    async fn run<T: DeserializeOwned>(&self, prompt: PromptRequest) -> Result<T, GenAiError> {
        let text = self.generator.generate_json(prompt).await?;
        serde_json::from_str(strip_fences(&text)).map_err(|e| GenAiError::Schema(e.to_string()))
    }
}

/// Single-property object schema.
fn object_schema(property: &str, schema: Value) -> Value {
    json!({
        "type": "OBJECT",
        "properties": { property: schema },
        "required": [property],
    })
}

/// Models sometimes wrap JSON in a Markdown code fence.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

/// Drop blanks and repeats, keeping first-seen order, and cap at `max`.
fn dedupe(ids: Vec<String>, max: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .take(max)
        .collect()
}

/// Keep at most `max` sentences. A sentence ends at `.`, `!` or `?`
/// followed by whitespace or the end of the text.
fn limit_sentences(text: &str, max: usize) -> String {
    let text = text.trim();
    let mut count = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if chars.peek().is_none_or(|(_, next)| next.is_whitespace()) {
            count += 1;
            if count == max {
                return text[..index + ch.len_utf8()].to_string();
            }
        }
    }
    text.to_string()
}
