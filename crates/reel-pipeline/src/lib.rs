//! Topic-to-video assembly pipeline.
//!
//! Drives the sequential stages: script generation, speech synthesis,
//! duration probing, background creation, caption timing, and the final
//! composite. Each stage blocks on the artifact of the previous one.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod workspace;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::{init_tracing, StageLogger};
pub use pipeline::Pipeline;
pub use workspace::Workspace;
