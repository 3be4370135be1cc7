use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TranslateError;
use crate::provider::ProviderKind;

pub const DEFAULT_SOURCE_LANG: &str = "auto";
pub const DEFAULT_TARGET_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub provider: ProviderKind,
}

impl TranslationRequest {
    /// Validate a loosely-typed request body.
    ///
    /// `text` must be a string with non-whitespace content. Missing or falsy
    /// language fields fall back to their defaults.
    pub fn from_payload(payload: Option<&Value>) -> Result<Self, TranslateError> {
        let text = payload
            .and_then(|p| p.get("text"))
            .and_then(|v| v.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslateError::MissingInput)?;

        Ok(Self {
            text: text.to_string(),
            source_lang: lang_or(payload, "sourceLang", DEFAULT_SOURCE_LANG),
            target_lang: lang_or(payload, "targetLang", DEFAULT_TARGET_LANG),
        })
    }
}

// Falsy values (missing, null, false, 0, "") take the default; other
// scalars are used in their string form.
fn lang_or(payload: Option<&Value>, field: &str, default: &str) -> String {
    let lang = match payload.and_then(|p| p.get(field)) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        Some(Value::Number(n)) if n.as_f64().map_or(true, |f| f != 0.0) => Some(n.to_string()),
        _ => None,
    };
    lang.unwrap_or_else(|| default.to_string())
}
