//! Vision backend implementations.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{Result, VisionError, VisionRequest};

/// Trait for vision-capable completion backends.
///
/// A backend takes one image and one instruction and returns the model's
/// textual answer, or `None` when the response carried no text at all.
/// Each call is a single attempt; retries belong to the caller.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Short backend identifier, used in logs.
    fn name(&self) -> &str;

    /// Model the backend is configured to call.
    fn model(&self) -> &str;

    /// Send the request and return the answer text.
    async fn complete(&self, request: &VisionRequest) -> Result<Option<String>>;
}

/// Build an HTTP client, optionally bounding every request.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Check the status and decode a JSON response body.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(VisionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| VisionError::Decode(e.to_string()))
}
