use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{upstream_error, StatelessLLMInterface};
use super::TRANSLATION_TEMPERATURE;
use crate::error::TranslateError;
use crate::provider::ProviderKind;

const SYSTEM_PROMPT: &str = "You are a helpful translation assistant.";

/// OpenAI chat-completions client
pub struct OpenAILLM {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAILLM {
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        info!("Initialized OpenAILLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAILLM {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn complete(&self, prompt: &str) -> Result<String, TranslateError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: TRANSLATION_TEMPERATURE,
        };

        debug!("POST {} (model={})", url, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let result: ChatResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TranslateError::EmptyUpstreamResponse(ProviderKind::OpenAI))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn llm(server: &MockServer) -> OpenAILLM {
        OpenAILLM::new(
            Client::new(),
            server.uri(),
            "sk-test".to_string(),
            "gpt-4o-mini".to_string(),
        )
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.2,
                "messages": [{ "role": "system", "content": SYSTEM_PROMPT }, { "role": "user", "content": "hola" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  hello \n" } },
                    { "message": { "role": "assistant", "content": "ignored" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = llm(&server).complete("hola").await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn missing_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = llm(&server).complete("hola").await.unwrap_err();
        assert!(matches!(err, TranslateError::EmptyUpstreamResponse(ProviderKind::OpenAI)));
    }

    #[tokio::test]
    async fn passes_status_and_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
            .mount(&server)
            .await;

        match llm(&server).complete("hola").await.unwrap_err() {
            TranslateError::Upstream { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
