//! OpenAI Chat Completions backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_response, VisionBackend};
use crate::{Result, VisionRequest};

const BASE_URL: &str = "https://api.openai.com";

/// Client for the OpenAI Chat Completions API.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
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

    fn build_body(&self, request: &VisionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ChatPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image.to_data_url(),
                            detail: "high",
                        },
                    },
                    ChatPart::Text {
                        text: request.prompt.clone(),
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl VisionBackend for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &VisionRequest) -> Result<Option<String>> {
        let body = self.build_body(request);
        debug!("Sending {} byte image to OpenAI model {}", request.image.encoded_len(), self.model);

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", BASE_URL))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = decode_response(response).await?;
        Ok(parsed.first_content())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ChatPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ChatPart {
    ImageUrl { image_url: ImageUrl },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::ImageSource;

    #[test]
    fn test_body_forwards_data_url_with_high_detail() {
        let client = OpenAiClient::new("key", "gpt-4o-mini");
        let request = VisionRequest::new(
            ImageSource::DataUrl("data:image/png;base64,AAAA".to_string()),
            "Read the label",
            512,
        );

        let json = serde_json::to_value(client.build_body(&request)).unwrap();
        let content = &json["messages"][0]["content"];
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(content[0]["type"], "image_url");
        assert_eq!(content[0]["image_url"]["url"], "data:image/png;base64,AAAA");
        assert_eq!(content[0]["image_url"]["detail"], "high");
        assert_eq!(content[1]["text"], "Read the label");
    }

    #[test]
    fn test_null_content_is_none() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(response.first_content(), None);

        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.first_content(), None);
    }

    #[test]
    fn test_backend_identity() {
        let backend: &dyn VisionBackend = &OpenAiClient::new("key", "gpt-4o-mini");
        assert_eq!(backend.name(), "openai");
        assert_eq!(backend.model(), "gpt-4o-mini");
    }
}
