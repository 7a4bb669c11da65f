//! Error types for the Webex Calling client.
//!
//! # Design
//! `NotFound`, `Unauthorized` and `RateLimited` get dedicated variants because
//! callers branch on them. Every other non-2xx response lands in `HttpError`
//! with the raw status, body and the tracking id echoed by the server.

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by `ApiCall::parse`, transports and configuration loading.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the access token.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// The server returned 429. `retry_after` is in seconds.
    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        body: String,
        tracking_id: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The transport failed before any response was received.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        401 => Err(ApiError::Unauthorized {
            body: response.body.clone(),
        }),
        429 => {
            let retry_after = response
                .header("retry-after")
                .and_then(|v| v.trim().parse::<u64>().ok());
            tracing::warn!(?retry_after, "rate limited by server");
            Err(ApiError::RateLimited { retry_after })
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
            tracking_id: response.header("trackingid").map(str::to_string),
        }),
    }
}
