//! HTTP transport layer for geolabel's vision backends.
//!
//! This crate provides a unified interface for sending one image plus one
//! instruction to a vision-capable language model and getting free text back:
//! - `AnthropicClient` for the Anthropic Messages API
//! - `OpenAiClient` for the OpenAI Chat Completions API
//! - `GeminiClient` for the Google Gemini `generateContent` API
//!
//! Interpreting the reply is left to the caller.

mod backend;
mod error;
mod request;

pub use backend::anthropic::AnthropicClient;
pub use backend::gemini::GeminiClient;
pub use backend::openai::OpenAiClient;
pub use backend::{http_client, VisionBackend};
pub use error::VisionError;
pub use request::{ImageSource, VisionRequest};

/// Result type for vision backend operations.
pub type Result<T> = std::result::Result<T, VisionError>;
