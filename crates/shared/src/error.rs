//! Shared error types for the HTTP client and the realtime stream.
//!
//! All variants carry owned strings so errors can be cloned into published
//! UI state alongside the data they relate to.

use thiserror::Error;

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error on {endpoint}: {message}")]
    Network { endpoint: String, message: String },
    #[error("Failed to fetch {endpoint}: {status} {status_text}")]
    Http {
        endpoint: String,
        status: u16,
        status_text: String,
    },
    #[error("Deserialization error on {endpoint}: {message}")]
    Deserialize { endpoint: String, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Network { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Deserialize { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors recorded by the realtime analytics client.
///
/// These never propagate to callers; they are stored as the "last error" of
/// the connection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealtimeError {
    #[error("WebSocket transport error: {0}")]
    Transport(String),
    #[error("Failed to parse realtime message: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_names_endpoint_and_status_text() {
        let err = ApiError::Http {
            endpoint: "/api/analytics/stats".to_string(),
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch /api/analytics/stats: 503 Service Unavailable"
        );
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.endpoint(), "/api/analytics/stats");
    }
}
