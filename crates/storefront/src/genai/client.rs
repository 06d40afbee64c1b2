//! HTTP client for a Gemini-style `generateContent` API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::GenAiConfig;

use super::error::{ApiErrorResponse, GenAiError};
use super::flows::{PromptRequest, TextGenerator};
use super::types::{Content, GenerateRequest, GenerateResponse, GenerationConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Text-generation API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct GenAiClient {
    inner: Arc<GenAiClientInner>,
}

struct GenAiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("model", &self.inner.model)
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}

impl GenAiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::NotConfigured` if the API key is empty or not a
    /// valid header value, or `GenAiError::Http` if the client cannot be built.
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        if !config.has_key() {
            return Err(GenAiError::NotConfigured("API key is empty".to_string()));
        }

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret().trim())
            .map_err(|_| GenAiError::NotConfigured("API key is not a valid header".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-goog-api-key", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(GenAiClientInner {
                client,
                model: config.model.clone(),
                endpoint: format!(
                    "{}/v1beta/models/{}:generateContent",
                    config.base_url, config.model
                ),
            }),
        })
    }

    /// Model name requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a raw `generateContent` request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with an error.
    #[instrument(skip(self, request), fields(model = %self.inner.model))]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenAiError> {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateResponse, GenAiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let parsed: GenerateResponse = serde_json::from_str(&body)
                .map_err(|e| GenAiError::Parse(format!("Failed to parse response: {e}")))?;
            if let Some(usage) = parsed.usage_metadata {
                tracing::debug!(
                    prompt_tokens = usage.prompt_token_count,
                    output_tokens = usage.candidates_token_count,
                    "Generation complete"
                );
            }
            Ok(parsed)
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(&self, status: StatusCode, response: reqwest::Response) -> GenAiError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return GenAiError::RateLimited(retry_after);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return GenAiError::Unauthorized("API key rejected".to_string());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => GenAiError::Api {
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
                Err(_) => GenAiError::Api {
                    status: status.to_string(),
                    message: body,
                },
            },
            Err(e) => GenAiError::Http(e),
        }
    }
}

impl TextGenerator for GenAiClient {
    async fn generate_json(&self, prompt: PromptRequest) -> Result<String, GenAiError> {
        let request = GenerateRequest {
            contents: vec![Content::user(prompt.prompt)],
            system_instruction: Some(Content::system(prompt.system)),
            generation_config: GenerationConfig::json(prompt.schema),
        };

        self.generate(&request)
            .await?
            .first_text()
            .ok_or(GenAiError::EmptyResponse)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::Router;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode as AxumStatus};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> GenAiClient {
        GenAiClient::new(&GenAiConfig {
            api_key: SecretString::from("k3y-Zq8vB2mN8pL4tR6wY1"),
            model: "test-model".to_string(),
            base_url,
        })
        .unwrap()
    }

    fn prompt() -> PromptRequest {
        PromptRequest {
            system: "be brief".to_string(),
            prompt: "hi".to_string(),
            schema: json!({"type": "OBJECT"}),
        }
    }

    #[tokio::test]
    async fn test_generate_json_returns_first_candidate_text() {
        let router = Router::new().route(
            "/v1beta/models/test-model:generateContent",
            post(|headers: AxumHeaders| async move {
                assert_eq!(headers["x-goog-api-key"], "k3y-Zq8vB2mN8pL4tR6wY1");
                axum::Json(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "{\"summary\":\"ok\"}"}]},
                        "finishReason": "STOP"
                    }]
                }))
            }),
        );
        let client = client(serve(router).await);

        let text = client.generate_json(prompt()).await.unwrap();
        assert_eq!(text, r#"{"summary":"ok"}"#);
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let router = Router::new().fallback(|| async {
            (AxumStatus::TOO_MANY_REQUESTS, [("Retry-After", "12")], "slow down").into_response()
        });
        let client = client(serve(router).await);

        let err = client.generate_json(prompt()).await.unwrap_err();
        assert!(matches!(err, GenAiError::RateLimited(12)));
    }

    #[tokio::test]
    async fn test_api_error_body() {
        let router = Router::new().fallback(|| async {
            (
                AxumStatus::BAD_REQUEST,
                axum::Json(json!({"error": {"code": 400, "message": "bad", "status": "INVALID_ARGUMENT"}})),
            )
        });
        let client = client(serve(router).await);

        let err = client.generate_json(prompt()).await.unwrap_err();
        assert!(matches!(err, GenAiError::Api { status, .. } if status == "INVALID_ARGUMENT"));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let router = Router::new().fallback(|| async { axum::Json(json!({"candidates": []})) });
        let client = client(serve(router).await);

        let err = client.generate_json(prompt()).await.unwrap_err();
        assert!(matches!(err, GenAiError::EmptyResponse));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = GenAiClient::new(&GenAiConfig {
            api_key: SecretString::from("  "),
            model: "m".to_string(),
            base_url: "http://localhost".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, GenAiError::NotConfigured(_)));
    }
}
