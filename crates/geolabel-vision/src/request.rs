//! Request types shared by all vision backends.

/// How the image travels to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A complete `data:<mime>;base64,<payload>` URL, forwarded as-is.
    DataUrl(String),
    /// Media type and base64 payload, already separated.
    Base64 { media_type: String, data: String },
}

impl ImageSource {
    /// Render the source as a data URL.
    pub fn to_data_url(&self) -> String {
        match self {
            ImageSource::DataUrl(url) => url.clone(),
            ImageSource::Base64 { media_type, data } => {
                format!("data:{};base64,{}", media_type, data)
            }
        }
    }

    /// Length of the encoded payload in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            ImageSource::DataUrl(url) => url.len(),
            ImageSource::Base64 { data, .. } => data.len(),
        }
    }
}

/// One image plus one instruction, answered with bounded-length text.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub image: ImageSource,
    pub prompt: String,
    pub max_tokens: u32,
}

impl VisionRequest {
    pub fn new(image: ImageSource, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            max_tokens,
        }
    }
}
