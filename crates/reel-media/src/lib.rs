//! FFmpeg CLI wrapper and media assembly core.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with timeout and cancellation
//! - FFprobe metadata probing (narration duration is always measured)
//! - A typed filter-graph builder with named pins, validated before
//!   serialization
//! - Caption timing and SRT rendering
//! - Content segmentation, asset resolution, and background strategies
//! - The final composite builder (scale, caption burn-in, logo overlay,
//!   narration/music mix with sidechain ducking)

pub mod assets;
pub mod background;
pub mod captions;
pub mod command;
pub mod composite;
pub mod error;
pub mod graph;
pub mod probe;
pub mod segments;

pub use assets::AssetLibrary;
pub use background::{strategy_for, BackgroundStrategy, RenderContext};
pub use captions::{caption_intervals, render_srt, write_caption_file, DEFAULT_WORDS_PER_CAPTION};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use composite::{render_composite, CompositeSpec};
pub use error::{MediaError, MediaResult};
pub use graph::{escape_filter_path, FilterGraph, InputFile, RenderSpec};
pub use probe::{probe_duration, probe_media, MediaInfo};
pub use segments::{segment_script, DEFAULT_SEGMENT_COUNT};
