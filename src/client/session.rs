use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use super::api::{BackendClient, TranslateOutcome};
use super::history::{History, HistoryEntry, LocalStorage};
use crate::provider::ProviderKind;

/// Quiet period after the last keystroke before a request is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(400);

struct Completed {
    generation: u64,
    source_text: String,
    source_lang: String,
    target_lang: String,
    outcome: TranslateOutcome,
}

/// Client-side translation state: current input, language pair, the single
/// pending request and the persisted history.
///
/// Every new request bumps `generation`; a completion is applied only if it
/// still carries the current generation.
pub struct TranslatorSession {
    client: Arc<BackendClient>,
    storage: LocalStorage,
    history: History,
    source_lang: String,
    target_lang: String,
    source_text: String,
    translated_text: String,
    debounce: Duration,
    generation: u64,
    in_flight: Option<AbortHandle>,
    tx: mpsc::UnboundedSender<Completed>,
    rx: mpsc::UnboundedReceiver<Completed>,
}

impl TranslatorSession {
    pub fn new(client: BackendClient, storage: LocalStorage) -> Self {
        let history = History::load(&storage);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            storage,
            history,
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            source_text: String::new(),
            translated_text: String::new(),
            debounce: DEBOUNCE,
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub async fn provider(&self) -> Option<ProviderKind> {
        self.client.provider().await
    }

    /// Change the language pair and re-translate the current input.
    pub fn set_languages(&mut self, source_lang: &str, target_lang: &str) {
        self.source_lang = source_lang.to_string();
        self.target_lang = target_lang.to_string();
        let text = self.source_text.clone();
        self.input(&text);
    }

    /// Swap the language pair. The last translation, if any, becomes the new
    /// input.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        let text = if self.translated_text.is_empty() {
            self.source_text.clone()
        } else {
            std::mem::take(&mut self.translated_text)
        };
        self.translated_text.clear();
        self.input(&text);
    }

    /// Record a keystroke. Cancels whatever is pending and schedules a
    /// request once the debounce period elapses without further input.
    pub fn input(&mut self, text: &str) {
        self.source_text = text.to_string();
        self.cancel_pending();

        if text.trim().is_empty() {
            self.translated_text.clear();
            return;
        }

        let generation = self.generation;
        let client = self.client.clone();
        let tx = self.tx.clone();
        let debounce = self.debounce;
        let source_text = self.source_text.clone();
        let source_lang = self.source_lang.clone();
        let target_lang = self.target_lang.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let outcome = client.translate_text(&source_text, &source_lang, &target_lang).await;
            let _ = tx.send(Completed {
                generation,
                source_text,
                source_lang,
                target_lang,
                outcome,
            });
        });
        self.in_flight = Some(handle.abort_handle());
    }

    /// Wait for the pending request and apply it. Returns `None` when nothing
    /// is pending.
    pub async fn next_outcome(&mut self) -> Option<TranslateOutcome> {
        while self.in_flight.is_some() {
            let completed = self.rx.recv().await?;
            if let Some(outcome) = self.apply(completed) {
                return Some(outcome);
            }
        }
        None
    }

    /// Translate the current input immediately, skipping the debounce.
    pub async fn translate_now(&mut self) -> TranslateOutcome {
        self.cancel_pending();
        let generation = self.generation;
        let outcome = self
            .client
            .translate_text(&self.source_text, &self.source_lang, &self.target_lang)
            .await;

        let completed = Completed {
            generation,
            source_text: self.source_text.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            outcome: outcome.clone(),
        };
        self.apply(completed);
        outcome
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    fn apply(&mut self, completed: Completed) -> Option<TranslateOutcome> {
        if completed.generation != self.generation {
            debug!("Dropping stale translation (generation {})", completed.generation);
            return None;
        }

        self.in_flight = None;
        self.translated_text = completed.outcome.display().to_string();

        if let TranslateOutcome::Translated(translation) = &completed.outcome {
            self.history.record(HistoryEntry::new(
                completed.source_text.trim(),
                translation,
                &completed.source_lang,
                &completed.target_lang,
            ));
            self.persist_history();
        }

        Some(completed.outcome)
    }

    fn persist_history(&self) {
        if let Err(e) = self.history.save(&self.storage) {
            warn!("Failed to persist history: {}", e);
        }
    }
}

impl Drop for TranslatorSession {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
