//! Error types for the generation engines.

use thiserror::Error;

pub type SynthResult<T> = Result<T, SynthError>;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Text generation failed: {0}")]
    GenerationFailed(String),

    #[error("Text generation returned an empty completion")]
    EmptyCompletion,

    #[error("Text generation timed out after {0} seconds")]
    GenerationTimeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Speech engine '{0}' not found in PATH")]
    EngineNotFound(&'static str),

    #[error("Speech synthesis failed ({engine}): {message}")]
    SynthesisFailed {
        engine: &'static str,
        message: String,
    },

    #[error("Speech synthesis timed out after {0} seconds")]
    SynthesisTimeout(u64),

    #[error("All speech engines failed")]
    AllEnginesFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Create a generation failure error.
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed(message.into())
    }

    /// Create a synthesis failure error.
    pub fn synthesis_failed(engine: &'static str, message: impl Into<String>) -> Self {
        Self::SynthesisFailed {
            engine,
            message: message.into(),
        }
    }
}
