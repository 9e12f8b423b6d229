//! Shared data models for the ReelForge pipeline.
//!
//! This crate provides the types passed between pipeline stages:
//! - Narration scripts and caption intervals
//! - Content segments and background categories
//! - Background strategy and speech engine selection
//! - Encoding configuration

pub mod caption;
pub mod encoding;
pub mod script;
pub mod segment;
pub mod strategy;
pub mod timestamp;

// Re-export common types
pub use caption::CaptionInterval;
pub use encoding::EncodingConfig;
pub use script::Script;
pub use segment::{Category, ContentSegment};
pub use strategy::{BackgroundKind, KindParseError, TtsEngine};
pub use timestamp::format_srt_timestamp;
