//! Configuration structures for label capture.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::providers::ProviderKind;

/// Main configuration for geolabel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Vision provider configuration.
    pub providers: ProvidersConfig,

    /// Comparison harness configuration.
    pub compare: CompareConfig,

    /// Estimated cost per image, in USD.
    pub costs: CostConfig,
}

/// Vision provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Provider used when neither the request nor `OCR_PROVIDER` names one.
    pub default_provider: Option<String>,

    /// HTTP timeout applied to every backend request.
    pub request_timeout_secs: Option<u64>,

    pub claude: ModelSettings,
    pub openai: ModelSettings,
    pub gemini: ModelSettings,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            default_provider: None,
            request_timeout_secs: None,
            claude: ModelSettings::new("claude-3-5-haiku-20241022"),
            openai: ModelSettings::new("gpt-4o-mini"),
            gemini: ModelSettings::new("gemini-2.0-flash"),
        }
    }
}

impl ProvidersConfig {
    /// Settings for one provider.
    pub fn settings(&self, kind: ProviderKind) -> &ModelSettings {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Claude => &self.claude,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Model and response bound for one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model identifier sent to the backend.
    pub model: String,

    /// Upper bound on the length of the reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    1024
}

impl ModelSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Comparison harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Run providers at the same time instead of one after another.
    pub concurrent: bool,

    /// Per-provider bound; an exceeded bound is recorded as a failure.
    pub timeout_secs: Option<u64>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            concurrent: true,
            timeout_secs: None,
        }
    }
}

/// Static cost-per-image estimates, in USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub gemini: f64,
    pub openai: f64,
    pub claude: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            gemini: 0.00005,
            openai: 0.00035,
            claude: 0.00105,
        }
    }
}

impl CostConfig {
    pub fn for_kind(&self, kind: ProviderKind) -> f64 {
        match kind {
            ProviderKind::Gemini => self.gemini,
            ProviderKind::OpenAi => self.openai,
            ProviderKind::Claude => self.claude,
        }
    }
}

impl LabelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Environment variable naming the default provider.
pub const PROVIDER_ENV_VAR: &str = "OCR_PROVIDER";

/// Read-only snapshot of provider credentials.
///
/// Taken once and passed by reference; nothing in the library reads the
/// process environment behind the caller's back. Empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    gemini_api_key: Option<String>,
    openai_api_key: Option<String>,
    anthropic_api_key: Option<String>,
    default_provider: Option<String>,
}

impl Credentials {
    /// Snapshot credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            gemini_api_key: read(ProviderKind::Gemini.credential_variable()),
            openai_api_key: read(ProviderKind::OpenAi.credential_variable()),
            anthropic_api_key: read(ProviderKind::Claude.credential_variable()),
            default_provider: read(PROVIDER_ENV_VAR),
        }
    }

    /// Set the key for one provider.
    pub fn with_key(mut self, kind: ProviderKind, key: impl Into<String>) -> Self {
        let key = Some(key.into()).filter(|k| !k.trim().is_empty());
        match kind {
            ProviderKind::Gemini => self.gemini_api_key = key,
            ProviderKind::OpenAi => self.openai_api_key = key,
            ProviderKind::Claude => self.anthropic_api_key = key,
        }
        self
    }

    /// Set the environment-level default provider hint.
    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = Some(provider.into());
        self
    }

    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
            ProviderKind::Claude => self.anthropic_api_key.as_deref(),
        }
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.api_key(kind).is_some()
    }

    pub fn default_provider(&self) -> Option<&str> {
        self.default_provider.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LabelConfig::default();
        assert_eq!(config.providers.claude.model, "claude-3-5-haiku-20241022");
        assert_eq!(config.providers.gemini.max_tokens, 1024);
        assert!(config.compare.concurrent);
        assert_eq!(config.costs.for_kind(ProviderKind::OpenAi), 0.00035);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: LabelConfig = serde_json::from_str(
            r#"{"providers":{"openai":{"model":"gpt-4o"}},"compare":{"timeout_secs":30}}"#,
        )
        .unwrap();

        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.providers.openai.max_tokens, 1024);
        assert_eq!(config.providers.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.compare.timeout_secs, Some(30));
        assert!(config.compare.concurrent);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("OPENAI_API_KEY", "  "),
            ("OCR_PROVIDER", "gemini"),
        ]
        .into_iter()
        .collect();

        let credentials = Credentials::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(credentials.api_key(ProviderKind::Claude), Some("sk-ant"));
        assert!(!credentials.has(ProviderKind::OpenAi));
        assert!(!credentials.has(ProviderKind::Gemini));
        assert_eq!(credentials.default_provider(), Some("gemini"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LabelConfig::default();
        config.providers.default_provider = Some("openai".to_string());
        config.save(&path).unwrap();

        let loaded = LabelConfig::from_file(&path).unwrap();
        assert_eq!(loaded.providers.default_provider.as_deref(), Some("openai"));
    }
}
