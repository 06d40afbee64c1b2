//! Text-generation collaborator.
//!
//! A client for a Gemini-style `generateContent` API plus the three
//! structured flows the storefront uses: product recommendations, search
//! summaries and product descriptions.

mod client;
mod error;
mod flows;
pub mod types;

pub use client::GenAiClient;
pub use error::GenAiError;
pub use flows::{
    Assistant, DEFAULT_RECOMMENDATIONS, DescriptionRequest, DescriptionResponse,
    MAX_RECOMMENDATIONS, PromptRequest, RecommendationRequest, RecommendationResponse,
    SearchSummaryRequest, SearchSummaryResponse, TextGenerator,
};
