//! Error types for the geolabel-core library.

use thiserror::Error;

/// Main error type for the geolabel library.
#[derive(Error, Debug)]
pub enum LabelError {
    /// A provider could not produce a well-typed result.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration or credential problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No image was supplied.
    #[error("image is required")]
    MissingImage,

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors raised by a provider adapter while recognizing one image.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The inline image did not match `data:<mime>;base64,<payload>`.
    #[error("invalid image format")]
    InvalidImageFormat,

    /// The backend answered without any text.
    #[error("no text response from {provider}")]
    EmptyResponse { provider: String },

    /// No `{...}` span could be located in the reply.
    #[error("could not parse JSON from response")]
    NoJsonObject,

    /// The located span is not a valid label object.
    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),

    /// The backend call itself failed.
    #[error(transparent)]
    Backend(#[from] geolabel_vision::VisionError),

    /// The call did not finish within the configured bound.
    #[error("provider timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Errors related to configuration and credentials.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider's credential is absent.
    #[error("{variable} is not configured")]
    MissingCredential { variable: String },

    /// Identifier does not name a known provider.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// Config file could not be read or written.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons extracted fields are refused as a complete sample record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Well name is empty.
    #[error("Well name is required")]
    MissingWell,

    /// One or both depths are absent.
    #[error("Depth From and Depth To must be numbers")]
    MissingDepth,

    /// Depth range is inverted.
    #[error("Depth From must be less than or equal to Depth To")]
    InvertedDepth { from: f64, to: f64 },
}

/// Result type for the geolabel library.
pub type Result<T> = std::result::Result<T, LabelError>;
