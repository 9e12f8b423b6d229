//! Speech synthesis engines.
//!
//! A named primary engine and a named fallback engine are tried in order;
//! first success wins. Every invocation is bounded by a timeout, and a
//! timed-out process is killed, not abandoned.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use reel_models::TtsEngine;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{SynthError, SynthResult};

/// Coqui synthesis timeout (model loading dominates).
const COQUI_TIMEOUT_SECS: u64 = 180;

/// eSpeak synthesis timeout.
const ESPEAK_TIMEOUT_SECS: u64 = 30;

/// A speech synthesis engine.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Engine name for logs and errors.
    fn name(&self) -> &'static str;

    /// Synthesize `text` into a waveform file at `out_path`.
    async fn synthesize(&self, text: &str, out_path: &Path) -> SynthResult<()>;
}

/// Coqui TTS CLI engine.
pub struct CoquiEngine {
    model: String,
}

impl CoquiEngine {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for CoquiEngine {
    fn name(&self) -> &'static str {
        "coqui"
    }

    async fn synthesize(&self, text: &str, out_path: &Path) -> SynthResult<()> {
        which::which("tts").map_err(|_| SynthError::EngineNotFound("tts"))?;

        let mut cmd = Command::new("tts");
        cmd.arg("--text")
            .arg(text)
            .arg("--model_name")
            .arg(&self.model)
            .arg("--out_path")
            .arg(out_path);

        run_engine(cmd, self.name(), COQUI_TIMEOUT_SECS).await
    }
}

/// eSpeak NG engine.
pub struct ESpeakEngine {
    voice: String,
    speed: u32,
}

impl ESpeakEngine {
    pub fn new(voice: impl Into<String>, speed: u32) -> Self {
        Self {
            voice: voice.into(),
            speed,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ESpeakEngine {
    fn name(&self) -> &'static str {
        "espeak"
    }

    async fn synthesize(&self, text: &str, out_path: &Path) -> SynthResult<()> {
        which::which("espeak-ng").map_err(|_| SynthError::EngineNotFound("espeak-ng"))?;

        let mut cmd = Command::new("espeak-ng");
        cmd.arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(self.speed.to_string())
            .arg("-w")
            .arg(out_path)
            .arg(text);

        run_engine(cmd, self.name(), ESPEAK_TIMEOUT_SECS).await
    }
}

/// Run an engine process with a timeout, killing it on expiry.
async fn run_engine(mut cmd: Command, engine: &'static str, timeout_secs: u64) -> SynthResult<()> {
    use tokio::io::AsyncReadExt;

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stderr = child.stderr.take();

    let wait = async {
        let mut stderr_text = String::new();
        if let Some(pipe) = stderr.as_mut() {
            let _ = pipe.read_to_string(&mut stderr_text).await;
        }
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((status, stderr_text))
    };

    let waited = tokio::time::timeout(Duration::from_secs(timeout_secs), wait).await;
    let (status, stderr_text) = match waited {
        Ok(result) => result?,
        Err(_) => {
            warn!(engine, timeout_secs, "Speech engine timed out, killing process");
            let _ = child.kill().await;
            return Err(SynthError::SynthesisTimeout(timeout_secs));
        }
    };

    if status.success() {
        Ok(())
    } else {
        // Keep the tail; engine stderr can be long
        let tail = stderr_text
            .lines()
            .rev()
            .take(5)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        Err(SynthError::synthesis_failed(engine, tail))
    }
}

/// Ordered engine chain: first success wins, primary failure is a warning.
pub struct EngineChain {
    engines: Vec<Box<dyn SpeechSynthesizer>>,
}

impl EngineChain {
    /// Build the chain for a configured engine selection.
    ///
    /// `coqui` tries Coqui first with an eSpeak fallback; `espeak` uses
    /// eSpeak alone.
    pub fn for_engine(
        engine: TtsEngine,
        coqui_model: impl Into<String>,
        espeak_voice: impl Into<String>,
        espeak_speed: u32,
    ) -> Self {
        let espeak: Box<dyn SpeechSynthesizer> = Box::new(ESpeakEngine::new(espeak_voice, espeak_speed));
        let engines: Vec<Box<dyn SpeechSynthesizer>> = match engine {
            TtsEngine::Coqui => vec![Box::new(CoquiEngine::new(coqui_model)), espeak],
            TtsEngine::Espeak => vec![espeak],
        };
        Self { engines }
    }

    /// Build a chain from explicit engines (used by tests).
    pub fn from_engines(engines: Vec<Box<dyn SpeechSynthesizer>>) -> Self {
        Self { engines }
    }

    /// Synthesize with the first engine that succeeds.
    pub async fn synthesize(&self, text: &str, out_path: &Path) -> SynthResult<()> {
        let mut last_error = None;

        for engine in &self.engines {
            info!(engine = engine.name(), chars = text.len(), "Synthesizing speech");
            match engine.synthesize(text, out_path).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(engine = engine.name(), error = %e, "Speech engine failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SynthError::AllEnginesFailed))
    }
}
