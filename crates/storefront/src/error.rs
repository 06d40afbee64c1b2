//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::genai::GenAiError;
use crate::store::StoreError;

/// Where clients should send a guest that tried a signed-in action.
pub const SIGN_IN_URL: &str = "/auth/signin";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Text generation failed.
    #[error("Text generation error: {0}")]
    GenAi(#[from] GenAiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign_in_url: Option<&'static str>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::Unauthenticated | StoreError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                StoreError::Unauthorized => StatusCode::FORBIDDEN,
                StoreError::ProductUnavailable => StatusCode::CONFLICT,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::InvalidQuantity
                | StoreError::InvalidProduct(_)
                | StoreError::InvalidBanner(_)
                | StoreError::InvalidEmail(_)
                | StoreError::MissingStoreName => StatusCode::BAD_REQUEST,
                StoreError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::GenAi(err) => match err {
                GenAiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                GenAiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                GenAiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                GenAiError::Http(_)
                | GenAiError::Api { .. }
                | GenAiError::Unauthorized(_)
                | GenAiError::Parse(_)
                | GenAiError::Schema(_)
                | GenAiError::EmptyResponse => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::Session(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Store(StoreError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::Store(err) => capitalize(&err.to_string()),
            Self::GenAi(GenAiError::NotConfigured(_)) => {
                "AI features are not available".to_string()
            }
            Self::GenAi(GenAiError::RateLimited(_)) => {
                "AI service is busy, please try again shortly".to_string()
            }
            Self::GenAi(GenAiError::InvalidInput(msg)) => capitalize(msg),
            Self::GenAi(_) => "External service error".to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.public_message(),
            sign_in_url: matches!(self, Self::Store(StoreError::Unauthenticated))
                .then_some(SIGN_IN_URL),
        };
        let mut response = (status, Json(body)).into_response();

        if let Self::GenAi(GenAiError::RateLimited(secs)) = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after a successful sign-in to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on sign-out to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
