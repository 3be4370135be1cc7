use async_trait::async_trait;

use crate::error::TranslateError;
use crate::provider::ProviderKind;

/// Interface for a stateless, single-turn language model.
/// Nothing is remembered between calls.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Send one prompt and return the trimmed text of the first answer.
    async fn complete(&self, prompt: &str) -> Result<String, TranslateError>;
}

/// Turn a non-2xx provider response into an upstream error, keeping the
/// status and the raw body.
pub(crate) async fn upstream_error(response: reqwest::Response) -> TranslateError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Upstream error")
        ),
        text => text.to_string(),
    };
    TranslateError::Upstream { status: status.as_u16(), message }
}
