use serde::{Deserialize, Serialize};

/// Upstream LLM providers a translation can be relayed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the provider to relay to.
///
/// A preference wins only when its credential is present; otherwise OpenAI is
/// tried before Anthropic. Returns `None` when neither credential is set.
pub fn choose_provider(
    preferred: Option<&str>,
    has_openai: bool,
    has_anthropic: bool,
) -> Option<ProviderKind> {
    match preferred.and_then(ProviderKind::from_name) {
        Some(ProviderKind::OpenAI) if has_openai => return Some(ProviderKind::OpenAI),
        Some(ProviderKind::Anthropic) if has_anthropic => return Some(ProviderKind::Anthropic),
        _ => {}
    }

    if has_openai {
        Some(ProviderKind::OpenAI)
    } else if has_anthropic {
        Some(ProviderKind::Anthropic)
    } else {
        None
    }
}
