//! Anthropic Messages API backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_response, VisionBackend};
use crate::{ImageSource, Result, VisionError, VisionRequest};

const BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn build_body(&self, request: &VisionRequest) -> Result<MessagesRequest> {
        let (media_type, data) = match &request.image {
            ImageSource::Base64 { media_type, data } => (media_type.clone(), data.clone()),
            ImageSource::DataUrl(_) => {
                return Err(VisionError::InvalidInput(
                    "Anthropic expects media type and payload separately".to_string(),
                ))
            }
        };

        Ok(MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Image {
                        source: ImageBlockSource {
                            kind: "base64",
                            media_type,
                            data,
                        },
                    },
                    ContentPart::Text {
                        text: request.prompt.clone(),
                    },
                ],
            }],
        })
    }
}

#[async_trait]
impl VisionBackend for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &VisionRequest) -> Result<Option<String>> {
        let body = self.build_body(request)?;
        debug!("Sending {} byte image to Anthropic model {}", request.image.encoded_len(), self.model);

        let response = self
            .http
            .post(format!("{}/v1/messages", BASE_URL))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let parsed: MessagesResponse = decode_response(response).await?;
        Ok(parsed.first_text())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Image { source: ImageBlockSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageBlockSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    fn first_text(self) -> Option<String> {
        self.content.into_iter().find_map(|block| match block {
            ResponseBlock::Text { text } => Some(text),
            ResponseBlock::Other => None,
        })
    }
}
