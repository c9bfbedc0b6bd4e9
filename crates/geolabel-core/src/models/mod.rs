//! Data models for label capture.

pub mod config;
pub mod fields;
pub mod sample;
