//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// A fatal pipeline failure, tagged with the stage that produced it.
///
/// Degraded paths (asset render fallback, concat fallback, speech engine
/// fallback) are handled inside their stages and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Script generation failed: {0}")]
    ScriptGeneration(#[source] reel_synth::SynthError),

    #[error("Speech synthesis failed: {0}")]
    SpeechSynthesis(#[source] reel_synth::SynthError),

    #[error("Narration probe failed: {0}")]
    NarrationProbe(#[source] reel_media::MediaError),

    #[error("Background creation failed: {0}")]
    Background(#[source] reel_media::MediaError),

    #[error("Caption generation failed: {0}")]
    Captions(#[source] reel_media::MediaError),

    #[error("Composite render failed: {0}")]
    Composite(#[source] reel_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Name of the failing stage, for operator-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::ScriptGeneration(_) => "script_generation",
            PipelineError::SpeechSynthesis(_) => "speech_synthesis",
            PipelineError::NarrationProbe(_) => "narration_probe",
            PipelineError::Background(_) => "background",
            PipelineError::Captions(_) => "captions",
            PipelineError::Composite(_) => "composite",
            PipelineError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let err = PipelineError::ScriptGeneration(reel_synth::SynthError::EmptyCompletion);
        assert_eq!(err.stage(), "script_generation");
        assert!(err.to_string().contains("empty completion"));

        let err = PipelineError::Composite(reel_media::MediaError::FfmpegNotFound);
        assert_eq!(err.stage(), "composite");
    }
}
