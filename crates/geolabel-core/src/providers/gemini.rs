//! Gemini adapter over the `generateContent` API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geolabel_vision::{http_client, GeminiClient, ImageSource, VisionBackend};

use super::{ask_backend, ProviderKind, VisionProvider};
use crate::contract::InlineImage;
use crate::error::ProviderError;
use crate::models::config::ModelSettings;

/// Gemini vision provider. The payload travels as `inline_data`.
pub struct GeminiProvider {
    backend: Arc<dyn VisionBackend>,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(api_key: &str, settings: &ModelSettings, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let client = GeminiClient::new(api_key, settings.model.clone()).with_http_client(http_client(timeout)?);
        Ok(Self::with_backend(Arc::new(client), settings.max_tokens))
    }

    pub fn with_backend(backend: Arc<dyn VisionBackend>, max_tokens: u32) -> Self {
        Self { backend, max_tokens }
    }
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn transcribe(&self, image: &str) -> Result<Option<String>, ProviderError> {
        let inline = InlineImage::parse(image)?;
        let source = ImageSource::Base64 {
            media_type: inline.media_type.to_string(),
            data: inline.data.to_string(),
        };
        ask_backend(self.backend.as_ref(), self.name(), source, self.max_tokens).await
    }
}
