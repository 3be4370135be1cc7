use serde::{Deserialize, Serialize};
use anyhow::Result;
use tracing::debug;

use crate::provider::{choose_provider, ProviderKind};

const DEFAULT_CONFIG_NAME: &str = "translator";

/// Runtime settings, layered from defaults, an optional config file and the
/// process environment (highest priority).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub preferred_provider: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
    /// Directory with a prebuilt UI, served under `/app`.
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

impl Settings {
    /// Load settings from `CONFIG_PATH` (or `translator.*` in the working
    /// directory, if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        debug!("Loading settings (config file: {})", path);
        Self::build(&path, config::Environment::default().ignore_empty(true))
    }

    /// Build settings from an explicit variable map instead of the process
    /// environment. Keys use the environment spelling, e.g. `OPENAI_API_KEY`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let environment = config::Environment::default()
            .ignore_empty(true)
            .source(Some(source));
        Self::build(DEFAULT_CONFIG_NAME, environment)
    }

    fn build(path: &str, environment: config::Environment) -> Result<Self> {
        let raw = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(environment)
            .build()?;
        let mut settings: Settings = raw.try_deserialize()?;
        settings.normalize();
        Ok(settings)
    }

    // Blank values count as unset, same as a missing variable.
    fn normalize(&mut self) {
        for value in [
            &mut self.preferred_provider,
            &mut self.openai_api_key,
            &mut self.anthropic_api_key,
            &mut self.static_dir,
        ] {
            if value.as_deref().map_or(false, |v| v.trim().is_empty()) {
                *value = None;
            }
        }
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.is_some()
    }

    /// The provider that requests are relayed to, if any is configured.
    pub fn provider(&self) -> Option<ProviderKind> {
        choose_provider(
            self.preferred_provider.as_deref(),
            self.has_openai(),
            self.has_anthropic(),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            preferred_provider: None,
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            anthropic_api_key: None,
            anthropic_model: default_anthropic_model(),
            anthropic_base_url: default_anthropic_base_url(),
            static_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_variables() {
        let settings = Settings::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(settings.port, 8787);
        assert_eq!(settings.openai_model, "gpt-4o-mini");
        assert_eq!(settings.anthropic_model, "claude-3-haiku-20240307");
        assert_eq!(settings.provider(), None);
    }

    #[test]
    fn reads_environment_spelling() {
        let settings = Settings::from_vars([
            ("PORT", "9000"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("ANTHROPIC_API_KEY", "ak-test"),
            ("PREFERRED_PROVIDER", "Anthropic"),
        ])
        .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.openai_model, "gpt-4o");
        assert_eq!(settings.provider(), Some(ProviderKind::Anthropic));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = Settings::from_vars([("OPENAI_API_KEY", "  "), ("ANTHROPIC_API_KEY", "ak")]).unwrap();
        assert!(!settings.has_openai());
        assert_eq!(settings.provider(), Some(ProviderKind::Anthropic));
    }
}
