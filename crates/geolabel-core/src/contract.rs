//! The extraction contract shared by every vision provider.
//!
//! All providers receive the same instruction text and must answer with one
//! JSON object shaped like [`ExtractedFields`].

use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{LabelError, ProviderError};
use crate::models::fields::ExtractedFields;

/// Instruction sent with every label image. Identical for all providers so
/// that comparison runs stay meaningful.
pub const EXTRACTION_PROMPT: &str = r#"You are an OCR assistant specialized in reading geological sample labels.

Extract the following information from this label image:
- Well name (after "Well:")
- Company name (after "Company:")
- Depth range (after "Depth:" - extract the two numbers)
- Box code (format like XXX.XX.XXX, e.g., 040.BB.020)

Return ONLY a JSON object in this exact format, no other text:
{
  "well": "extracted well name or empty string",
  "company": "extracted company name or empty string",
  "depthFrom": number or null,
  "depthTo": number or null,
  "boxCode": "extracted box code or empty string"
}

If you cannot read a field clearly, use empty string or null as appropriate.
Be careful with handwritten text - read it as accurately as possible."#;

lazy_static! {
    static ref DATA_URL: Regex = Regex::new(r"^data:(.+);base64,(.+)$").unwrap();
}

/// An inline-encoded image split into media type and base64 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineImage<'a> {
    pub media_type: &'a str,
    pub data: &'a str,
}

impl<'a> InlineImage<'a> {
    /// Split `data:<mime>;base64,<payload>`.
    pub fn parse(image: &'a str) -> Result<Self, ProviderError> {
        let caps = DATA_URL
            .captures(image)
            .ok_or(ProviderError::InvalidImageFormat)?;

        match (caps.get(1), caps.get(2)) {
            (Some(media_type), Some(data)) => Ok(Self {
                media_type: media_type.as_str(),
                data: data.as_str(),
            }),
            _ => Err(ProviderError::InvalidImageFormat),
        }
    }
}

/// Encode raw image bytes as a data URL, detecting the format from content.
pub fn encode_data_url(bytes: &[u8]) -> Result<String, LabelError> {
    let format = image::guess_format(bytes)?;
    let payload = general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", format.to_mime_type(), payload))
}

/// Locate the first balanced top-level `{...}` span.
///
/// Braces inside JSON string literals are ignored. This is a scanner, not a
/// parser: the span still has to be decoded.
pub fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Coerce a provider's free-text reply into the canonical schema.
pub fn coerce_reply(provider: &str, reply: Option<String>) -> Result<ExtractedFields, ProviderError> {
    let text = reply
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ProviderError::EmptyResponse {
            provider: provider.to_string(),
        })?;

    let span = locate_json_object(&text).ok_or(ProviderError::NoJsonObject)?;
    debug!("Located {} byte JSON object in {} reply", span.len(), provider);

    serde_json::from_str(span).map_err(|e| ProviderError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_image_split() {
        let image = InlineImage::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(image.media_type, "image/jpeg");
        assert_eq!(image.data, "/9j/4AAQ");
    }

    #[test]
    fn test_inline_image_rejects_other_shapes() {
        for bad in ["", "/9j/4AAQ", "data:image/png,abc", "data:;base64,", "http://x/y.png"] {
            assert!(
                matches!(InlineImage::parse(bad), Err(ProviderError::InvalidImageFormat)),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_encode_png_bytes() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let url = encode_data_url(&png).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let image = InlineImage::parse(&url).unwrap();
        assert_eq!(image.media_type, "image/png");
    }

    #[test]
    fn test_encode_unknown_bytes_fails() {
        assert!(encode_data_url(b"plain text").is_err());
    }

    #[test]
    fn test_locate_plain_object() {
        assert_eq!(locate_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_locate_inside_prose_and_fences() {
        let reply = "Here is the data:\n```json\n{\"well\": \"A\", \"nested\": {\"x\": 1}}\n```\nDone. {\"second\": true}";
        assert_eq!(
            locate_json_object(reply),
            Some("{\"well\": \"A\", \"nested\": {\"x\": 1}}")
        );
    }

    #[test]
    fn test_locate_ignores_braces_in_strings() {
        let reply = r#"{"well": "A} {B", "company": "say \"}\""} trailing"#;
        assert_eq!(
            locate_json_object(reply),
            Some(r#"{"well": "A} {B", "company": "say \"}\""}"#)
        );
    }

    #[test]
    fn test_locate_unbalanced() {
        assert_eq!(locate_json_object("{\"well\": \"A\""), None);
        assert_eq!(locate_json_object("no json here"), None);
    }

    #[test]
    fn test_coerce_reply() {
        let reply = "Sure!\n{\"well\":\"Tapis B-12\",\"company\":\"\",\"depthFrom\":2480,\"depthTo\":null,\"boxCode\":\"040.BB.020\"}";
        let fields = coerce_reply("claude", Some(reply.to_string())).unwrap();

        assert_eq!(
            fields,
            ExtractedFields {
                well: "Tapis B-12".to_string(),
                company: String::new(),
                depth_from: Some(2480.0),
                depth_to: None,
                box_code: "040.BB.020".to_string(),
            }
        );
    }

    #[test]
    fn test_coerce_reply_errors() {
        assert!(matches!(
            coerce_reply("openai", None),
            Err(ProviderError::EmptyResponse { provider }) if provider == "openai"
        ));
        assert!(matches!(
            coerce_reply("openai", Some("  \n".to_string())),
            Err(ProviderError::EmptyResponse { .. })
        ));
        assert!(matches!(
            coerce_reply("gemini", Some("I cannot read this label.".to_string())),
            Err(ProviderError::NoJsonObject)
        ));
        assert!(matches!(
            coerce_reply("gemini", Some("{well: A}".to_string())),
            Err(ProviderError::InvalidJson(_))
        ));
        assert!(matches!(
            coerce_reply("gemini", Some(r#"{"depthFrom": "deep"}"#.to_string())),
            Err(ProviderError::InvalidJson(_))
        ));
    }
}
