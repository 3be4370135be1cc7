use std::sync::Arc;
use tracing::{debug, error};

use super::interface::{TranslationRequest, TranslationResult};
use super::prompt::build_prompt;
use crate::error::TranslateError;
use crate::llm::StatelessLLMInterface;

/// Turns one translation request into exactly one upstream completion call.
pub struct TranslationRelay {
    llm: Arc<dyn StatelessLLMInterface>,
}

impl TranslationRelay {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self { llm }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslateError> {
        let provider = self.llm.provider();
        let prompt = build_prompt(&request.text, &request.source_lang, &request.target_lang);
        debug!(
            "Relaying translation to {} ({} -> {}, {} chars)",
            provider,
            request.source_lang,
            request.target_lang,
            request.text.chars().count()
        );

        match self.llm.complete(&prompt).await {
            Ok(translation) => Ok(TranslationResult { translation, provider }),
            Err(e) => {
                error!("Translate error ({:?}): {} {}", e.kind(), e.status().as_u16(), e);
                Err(e)
            }
        }
    }
}
