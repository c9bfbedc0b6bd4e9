//! Claude adapter over the Anthropic Messages API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use geolabel_vision::{http_client, AnthropicClient, ImageSource, VisionBackend};

use super::{ask_backend, ProviderKind, VisionProvider};
use crate::contract::InlineImage;
use crate::error::ProviderError;
use crate::models::config::ModelSettings;

/// Claude vision provider.
///
/// Anthropic takes the media type and payload as separate fields, so the
/// inline image is split before sending.
pub struct ClaudeProvider {
    backend: Arc<dyn VisionBackend>,
    max_tokens: u32,
}

impl ClaudeProvider {
    pub fn new(api_key: &str, settings: &ModelSettings, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let client = AnthropicClient::new(api_key, settings.model.clone()).with_http_client(http_client(timeout)?);
        Ok(Self::with_backend(Arc::new(client), settings.max_tokens))
    }

    pub fn with_backend(backend: Arc<dyn VisionBackend>, max_tokens: u32) -> Self {
        Self { backend, max_tokens }
    }
}

#[async_trait]
impl VisionProvider for ClaudeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::EXTRACTION_PROMPT;
    use crate::providers::testing::ScriptedBackend;
    use pretty_assertions::assert_eq;

    const IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

    #[tokio::test]
    async fn test_recognize_splits_inline_image() {
        let backend = Arc::new(ScriptedBackend::replying(
            r#"{"well":"Tapis B-12","company":"PETRONAS","depthFrom":2480,"depthTo":2490,"boxCode":"040.BB.020"}"#,
        ));
        let provider = ClaudeProvider::with_backend(backend.clone(), 512);

        let fields = provider.recognize(IMAGE).await.unwrap();
        assert_eq!(fields.well, "Tapis B-12");
        assert_eq!(fields.depth_to, Some(2490.0));

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].image,
            ImageSource::Base64 {
                media_type: "image/jpeg".to_string(),
                data: "/9j/4AAQSkZJRg==".to_string(),
            }
        );
        assert_eq!(requests[0].prompt, EXTRACTION_PROMPT);
        assert_eq!(requests[0].max_tokens, 512);
    }

    #[tokio::test]
    async fn test_malformed_image_never_reaches_backend() {
        let backend = Arc::new(ScriptedBackend::replying("{}"));
        let provider = ClaudeProvider::with_backend(backend.clone(), 1024);

        let err = provider.recognize("/9j/4AAQSkZJRg==").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidImageFormat));
        assert_eq!(err.to_string(), "invalid image format");
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_names_provider() {
        let provider = ClaudeProvider::with_backend(Arc::new(ScriptedBackend::silent()), 1024);

        let err = provider.recognize(IMAGE).await.unwrap_err();
        assert_eq!(err.to_string(), "no text response from claude");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let provider = ClaudeProvider::with_backend(Arc::new(ScriptedBackend::failing(401)), 1024);

        let err = provider.recognize(IMAGE).await.unwrap_err();
        assert!(matches!(err, ProviderError::Backend(_)));
        assert!(err.to_string().contains("401"));
    }
}
