//! Vision providers: one adapter per backend behind a common capability.

mod claude;
mod gemini;
mod openai;
mod selector;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use selector::{build_provider, ProviderSelector};

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use geolabel_vision::{ImageSource, VisionBackend, VisionRequest};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contract::{coerce_reply, EXTRACTION_PROMPT};
use crate::error::{ConfigError, ProviderError};
use crate::models::fields::ExtractedFields;

/// Known vision providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Claude,
}

impl ProviderKind {
    /// Every provider, in the order comparisons report them.
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Gemini, ProviderKind::OpenAi, ProviderKind::Claude];

    /// Provider used when nothing else decides.
    pub const FALLBACK: ProviderKind = ProviderKind::Claude;

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn credential_variable(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Claude => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "claude" => Ok(ProviderKind::Claude),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// A vision provider turning one label image into extracted fields.
///
/// `image` is a `data:<mime>;base64,<payload>` string. Every call is a
/// single attempt against the backend.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Send the image with the extraction prompt and return the raw reply.
    async fn transcribe(&self, image: &str) -> Result<Option<String>, ProviderError>;

    /// Recognize the label and coerce the reply into [`ExtractedFields`].
    async fn recognize(&self, image: &str) -> Result<ExtractedFields, ProviderError> {
        let reply = self.transcribe(image).await?;
        coerce_reply(self.name(), reply)
    }
}

/// Send the extraction prompt through a backend.
pub(crate) async fn ask_backend(
    backend: &dyn VisionBackend,
    provider: &str,
    image: ImageSource,
    max_tokens: u32,
) -> Result<Option<String>, ProviderError> {
    info!(
        "Recognizing label with {} via {} ({}), {} byte payload",
        provider,
        backend.name(),
        backend.model(),
        image.encoded_len()
    );

    let request = VisionRequest::new(image, EXTRACTION_PROMPT, max_tokens);
    Ok(backend.complete(&request).await?)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted backend for adapter tests.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use geolabel_vision::{VisionBackend, VisionError, VisionRequest};

    enum Script {
        Reply(Option<String>),
        Status(u16),
    }

    pub(crate) struct ScriptedBackend {
        script: Script,
        requests: Mutex<Vec<VisionRequest>>,
    }

    impl ScriptedBackend {
        fn with_script(script: Script) -> Self {
            Self {
                script,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn replying(text: &str) -> Self {
            Self::with_script(Script::Reply(Some(text.to_string())))
        }

        pub(crate) fn silent() -> Self {
            Self::with_script(Script::Reply(None))
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self::with_script(Script::Status(status))
        }

        pub(crate) fn requests(&self) -> Vec<VisionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VisionBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn complete(&self, request: &VisionRequest) -> geolabel_vision::Result<Option<String>> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.script {
                Script::Reply(reply) => Ok(reply.clone()),
                Script::Status(status) => Err(VisionError::Status {
                    status: *status,
                    body: "scripted failure".to_string(),
                }),
            }
        }
    }
}
