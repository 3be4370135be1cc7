use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::provider::ProviderKind;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Missing text")]
    MissingInput,

    #[error("No provider configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY.")]
    NoProviderConfigured,

    /// Non-2xx answer from the provider. The body is kept as an opaque string.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Empty response from {}", .0.display_name())]
    EmptyUpstreamResponse(ProviderKind),

    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Coarse classification of a failure. The server derives it from the error
/// value, the client from the response status it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    NoProviderConfigured,
    UpstreamAuth,
    UpstreamRateLimited,
    UpstreamOther,
    EmptyUpstreamResponse,
}

impl ErrorKind {
    /// Classify an upstream HTTP status.
    pub fn from_upstream_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::UpstreamAuth,
            429 => Self::UpstreamRateLimited,
            _ => Self::UpstreamOther,
        }
    }

    /// Classify a status returned by the translate endpoint.
    pub fn from_response_status(status: u16) -> Self {
        match status {
            400 => Self::MissingInput,
            503 => Self::NoProviderConfigured,
            _ => Self::from_upstream_status(status),
        }
    }
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput => ErrorKind::MissingInput,
            Self::NoProviderConfigured => ErrorKind::NoProviderConfigured,
            Self::Upstream { status, .. } => ErrorKind::from_upstream_status(*status),
            Self::EmptyUpstreamResponse(_) => ErrorKind::EmptyUpstreamResponse,
            Self::Transport(_) => ErrorKind::UpstreamOther,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput => StatusCode::BAD_REQUEST,
            Self::NoProviderConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::EmptyUpstreamResponse(_) | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(TranslateError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(TranslateError::NoProviderConfigured.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            TranslateError::EmptyUpstreamResponse(ProviderKind::OpenAI).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let upstream = TranslateError::Upstream { status: 429, message: "slow down".to_string() };
        assert_eq!(upstream.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream.kind(), ErrorKind::UpstreamRateLimited);
        assert_eq!(upstream.to_string(), "slow down");
    }

    #[test]
    fn out_of_range_status_becomes_500() {
        let err = TranslateError::Upstream { status: 42, message: "odd".to_string() };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), ErrorKind::UpstreamOther);
    }

    #[test]
    fn auth_statuses_classify_together() {
        assert_eq!(ErrorKind::from_upstream_status(401), ErrorKind::UpstreamAuth);
        assert_eq!(ErrorKind::from_upstream_status(403), ErrorKind::UpstreamAuth);
        assert_eq!(ErrorKind::from_upstream_status(502), ErrorKind::UpstreamOther);
    }

    #[test]
    fn response_status_round_trips_server_statuses() {
        for err in [
            TranslateError::MissingInput,
            TranslateError::NoProviderConfigured,
            TranslateError::Upstream { status: 401, message: String::new() },
            TranslateError::Upstream { status: 429, message: String::new() },
        ] {
            assert_eq!(ErrorKind::from_response_status(err.status().as_u16()), err.kind());
        }
        assert_eq!(ErrorKind::from_response_status(500), ErrorKind::UpstreamOther);
    }

    #[test]
    fn empty_response_names_provider() {
        let err = TranslateError::EmptyUpstreamResponse(ProviderKind::Anthropic);
        assert_eq!(err.to_string(), "Empty response from Anthropic");
    }
}
