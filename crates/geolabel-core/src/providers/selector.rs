//! Provider selection.

use tracing::debug;

use super::{ClaudeProvider, GeminiProvider, OpenAiProvider, ProviderKind, VisionProvider};
use crate::error::{ConfigError, Result};
use crate::models::config::{Credentials, LabelConfig};

/// Chooses one provider from an explicit request, the environment default,
/// or the hard-coded fallback, and refuses to build one without its key.
pub struct ProviderSelector<'a> {
    credentials: &'a Credentials,
    config: &'a LabelConfig,
}

impl<'a> ProviderSelector<'a> {
    pub fn new(credentials: &'a Credentials, config: &'a LabelConfig) -> Self {
        Self { credentials, config }
    }

    /// Decide which provider to use and verify its credential.
    ///
    /// Unrecognized hints fall through to the next step. Performs no I/O.
    pub fn resolve(&self, requested: Option<&str>) -> std::result::Result<ProviderKind, ConfigError> {
        let kind = self.resolve_kind(requested);

        if self.credentials.has(kind) {
            Ok(kind)
        } else {
            Err(ConfigError::MissingCredential {
                variable: kind.credential_variable().to_string(),
            })
        }
    }

    /// Resolve and construct the provider.
    pub fn select(&self, requested: Option<&str>) -> Result<Box<dyn VisionProvider>> {
        let kind = self.resolve(requested)?;
        debug!("Selected provider {}", kind);
        build_provider(kind, self.credentials, self.config)
    }

    fn resolve_kind(&self, requested: Option<&str>) -> ProviderKind {
        let environment = self
            .credentials
            .default_provider()
            .or(self.config.providers.default_provider.as_deref());

        for hint in [requested, environment].into_iter().flatten() {
            match hint.parse::<ProviderKind>() {
                Ok(kind) => return kind,
                Err(_) => debug!("Ignoring unknown provider hint '{}'", hint),
            }
        }

        // Only one key configured: use it rather than failing on the fallback.
        if self.credentials.has(ProviderKind::FALLBACK) {
            return ProviderKind::FALLBACK;
        }
        ProviderKind::ALL
            .into_iter()
            .find(|kind| self.credentials.has(*kind))
            .unwrap_or(ProviderKind::FALLBACK)
    }
}

/// Construct the adapter for `kind`, failing if its credential is absent.
pub fn build_provider(
    kind: ProviderKind,
    credentials: &Credentials,
    config: &LabelConfig,
) -> Result<Box<dyn VisionProvider>> {
    let api_key = credentials
        .api_key(kind)
        .ok_or_else(|| ConfigError::MissingCredential {
            variable: kind.credential_variable().to_string(),
        })?;

    let settings = config.providers.settings(kind);
    let timeout = config.providers.request_timeout();

    let provider: Box<dyn VisionProvider> = match kind {
        ProviderKind::Gemini => Box::new(GeminiProvider::new(api_key, settings, timeout)?),
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(api_key, settings, timeout)?),
        ProviderKind::Claude => Box::new(ClaudeProvider::new(api_key, settings, timeout)?),
    };
    Ok(provider)
}
