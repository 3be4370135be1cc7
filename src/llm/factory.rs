use std::sync::Arc;
use reqwest::Client;
use tracing::info;

use super::claude_llm::ClaudeLLM;
use super::openai_llm::OpenAILLM;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::config::Settings;
use crate::error::TranslateError;
use crate::provider::ProviderKind;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create the LLM client for `provider` from the settings.
    ///
    /// Fails with `NoProviderConfigured` when the provider's API key is unset.
    pub fn create_llm(
        provider: ProviderKind,
        settings: &Settings,
        client: Client,
    ) -> Result<Arc<dyn StatelessLLMInterface>, TranslateError> {
        info!("Initializing LLM: {}", provider);

        match provider {
            ProviderKind::OpenAI => {
                let api_key = settings
                    .openai_api_key
                    .clone()
                    .ok_or(TranslateError::NoProviderConfigured)?;
                Ok(Arc::new(OpenAILLM::new(
                    client,
                    settings.openai_base_url.clone(),
                    api_key,
                    settings.openai_model.clone(),
                )))
            }
            ProviderKind::Anthropic => {
                let api_key = settings
                    .anthropic_api_key
                    .clone()
                    .ok_or(TranslateError::NoProviderConfigured)?;
                Ok(Arc::new(ClaudeLLM::new(
                    client,
                    settings.anthropic_base_url.clone(),
                    api_key,
                    settings.anthropic_model.clone(),
                )))
            }
        }
    }
}
