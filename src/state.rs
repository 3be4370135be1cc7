use std::sync::Arc;
use reqwest::Client;

use crate::config::Settings;
use crate::error::TranslateError;
use crate::llm::StatelessLLMFactory;
use crate::provider::ProviderKind;
use crate::translate::TranslationRelay;

/// Immutable state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http: Client,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            settings: Arc::new(settings),
            http,
        })
    }

    pub fn provider(&self) -> Option<ProviderKind> {
        self.settings.provider()
    }

    /// Relay bound to the currently selected provider.
    pub fn relay(&self) -> Result<TranslationRelay, TranslateError> {
        let provider = self.provider().ok_or(TranslateError::NoProviderConfigured)?;
        let llm = StatelessLLMFactory::create_llm(provider, &self.settings, self.http.clone())?;
        Ok(TranslationRelay::new(llm))
    }
}
