use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::status::Condition;
use crate::provider::ProviderKind;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid backend response")]
    InvalidResponse,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of one client-side translation attempt, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslateOutcome {
    /// Blank input; nothing was sent.
    Empty,
    Translated(String),
    Failed { condition: Condition, display: String },
}

impl TranslateOutcome {
    /// Text shown in the translation pane.
    pub fn display(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Translated(text) => text,
            Self::Failed { display, .. } => display,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Translated(_))
    }
}

/// HTTP client for the translation backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Provider the backend relays to. Any failure reads as offline.
    pub async fn provider(&self) -> Option<ProviderKind> {
        let url = format!("{}/", self.base_url);
        let response = match self.client.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("Provider check returned {}", r.status());
                return None;
            }
            Err(e) => {
                debug!("Provider check failed: {}", e);
                return None;
            }
        };

        let body: Value = response.json().await.ok()?;
        serde_json::from_value(body.get("provider")?.clone()).ok()
    }

    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ClientError> {
        let url = format!("{}/translate", self.base_url);
        let body = json!({
            "text": text,
            "sourceLang": source_lang,
            "targetLang": target_lang,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let data: Value = response.json().await.map_err(|_| ClientError::InvalidResponse)?;
        data.get("translation")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(ClientError::InvalidResponse)
    }

    /// Translate for display. Blank input short-circuits; failures become a
    /// classified `[tag] text` string instead of an error.
    pub async fn translate_text(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslateOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TranslateOutcome::Empty;
        }

        match self.translate(trimmed, source_lang, target_lang).await {
            Ok(translation) => TranslateOutcome::Translated(translation),
            Err(e) => {
                warn!("Translation failed: {}", e);
                let condition = Condition::from_error(&e);
                TranslateOutcome::Failed {
                    condition,
                    display: condition.render(text),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_trimmed_text() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({ "text": "hola", "sourceLang": "es", "targetLang": "en" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translation": "hello", "provider": "openai" })))
            .expect(1)
            .mount(&backend)
            .await;

        let client = BackendClient::new(backend.uri());
        let outcome = client.translate_text("  hola ", "es", "en").await;
        assert_eq!(outcome, TranslateOutcome::Translated("hello".to_string()));
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let backend = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&backend).await;

        let client = BackendClient::new(backend.uri());
        assert_eq!(client.translate_text(" \t", "es", "en").await, TranslateOutcome::Empty);
    }

    #[tokio::test]
    async fn classifies_failures() {
        let cases = [
            (503u16, "[not-configured] hi"),
            (401, "[unauthorized] hi"),
            (403, "[unauthorized] hi"),
            (429, "[rate-limited] hi"),
            (500, "[unavailable] hi"),
        ];

        for (status, expected) in cases {
            let backend = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": "nope" })))
                .mount(&backend)
                .await;

            let outcome = BackendClient::new(backend.uri()).translate_text("hi", "en", "es").await;
            assert_eq!(outcome.display(), expected);
            assert!(!outcome.is_success());
        }
    }

    #[tokio::test]
    async fn body_without_translation_is_invalid() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translation": 7 })))
            .mount(&backend)
            .await;

        let err = BackendClient::new(backend.uri()).translate("hi", "en", "es").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse));
    }

    #[tokio::test]
    async fn provider_detection() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "provider": "anthropic" })))
            .mount(&backend)
            .await;
        assert_eq!(BackendClient::new(backend.uri()).provider().await, Some(ProviderKind::Anthropic));

        let offline = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "provider": null })))
            .mount(&offline)
            .await;
        assert_eq!(BackendClient::new(offline.uri()).provider().await, None);
    }
}
