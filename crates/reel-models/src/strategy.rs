//! Background strategy and speech engine selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Background creation strategy.
///
/// The three paths the pipeline can take to produce the background track,
/// selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    /// Static two-color gradient blend
    Gradient,
    /// Procedural animated gradient source
    Motion,
    /// Content-aware segmented backgrounds driven by script keywords
    Content,
}

impl BackgroundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundKind::Gradient => "gradient",
            BackgroundKind::Motion => "motion",
            BackgroundKind::Content => "content",
        }
    }
}

impl Default for BackgroundKind {
    fn default() -> Self {
        BackgroundKind::Content
    }
}

impl fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackgroundKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gradient" => Ok(BackgroundKind::Gradient),
            "motion" => Ok(BackgroundKind::Motion),
            "content" => Ok(BackgroundKind::Content),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}

/// Speech synthesis engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsEngine {
    /// Coqui TTS (primary, falls back to eSpeak on failure)
    Coqui,
    /// eSpeak NG only
    Espeak,
}

impl TtsEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsEngine::Coqui => "coqui",
            TtsEngine::Espeak => "espeak",
        }
    }
}

impl Default for TtsEngine {
    fn default() -> Self {
        TtsEngine::Coqui
    }
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TtsEngine {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coqui" => Ok(TtsEngine::Coqui),
            "espeak" => Ok(TtsEngine::Espeak),
            _ => Err(KindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown variant: {0}")]
pub struct KindParseError(String);
