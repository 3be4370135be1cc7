use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{upstream_error, StatelessLLMInterface};
use super::TRANSLATION_TEMPERATURE;
use crate::error::TranslateError;
use crate::provider::ProviderKind;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Claude LLM implementation over the Anthropic messages API
pub struct ClaudeLLM {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ClaudeLLM {
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        info!("Initialized ClaudeLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for ClaudeLLM {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(&self, prompt: &str) -> Result<String, TranslateError> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TRANSLATION_TEMPERATURE,
            messages: vec![MessageParam { role: "user", content: prompt }],
        };

        debug!("POST {} (model={})", url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let result: MessagesResponse = response.json().await?;
        // Non-text blocks are skipped; text blocks are joined line by line.
        let output = result
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let output = output.trim();
        if output.is_empty() {
            return Err(TranslateError::EmptyUpstreamResponse(ProviderKind::Anthropic));
        }
        Ok(output.to_string())
    }
}
