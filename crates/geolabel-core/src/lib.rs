//! Core library for geological sample label capture.
//!
//! This crate provides:
//! - Regex field extraction from raw label text (well, company, depth, box code)
//! - The extraction prompt and reply coercion shared by all vision providers
//! - Claude, OpenAI and Gemini provider adapters plus provider selection
//! - A comparison harness running every provider on one image

pub mod compare;
pub mod contract;
pub mod error;
pub mod label;
pub mod models;
pub mod providers;

pub use compare::{ComparisonHarness, ComparisonReport, ComparisonSummary, ProviderOutcome};
pub use contract::{encode_data_url, EXTRACTION_PROMPT};
pub use error::{ConfigError, LabelError, ProviderError, RecordError, Result};
pub use label::{parse_sample_label, validate, LabelParser, ParseResult};
pub use models::config::{Credentials, LabelConfig};
pub use models::fields::{ExtractedFields, FieldIssue};
pub use models::sample::SampleRecord;
pub use providers::{build_provider, ProviderKind, ProviderSelector, VisionProvider};
