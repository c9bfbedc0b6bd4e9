//! OpenAI adapter over the Chat Completions API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geolabel_vision::{http_client, ImageSource, OpenAiClient, VisionBackend};

use super::{ask_backend, ProviderKind, VisionProvider};
use crate::error::ProviderError;
use crate::models::config::ModelSettings;

/// OpenAI vision provider. The data URL is forwarded unchanged.
pub struct OpenAiProvider {
    backend: Arc<dyn VisionBackend>,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, settings: &ModelSettings, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let client = OpenAiClient::new(api_key, settings.model.clone()).with_http_client(http_client(timeout)?);
        Ok(Self::with_backend(Arc::new(client), settings.max_tokens))
    }

    pub fn with_backend(backend: Arc<dyn VisionBackend>, max_tokens: u32) -> Self {
        Self { backend, max_tokens }
    }
}

#[async_trait]
impl VisionProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn transcribe(&self, image: &str) -> Result<Option<String>, ProviderError> {
        let source = ImageSource::DataUrl(image.to_string());
        ask_backend(self.backend.as_ref(), self.name(), source, self.max_tokens).await
    }
}
