//! The sequential assembly pipeline.

use std::path::Path;

use reel_media::{
    probe_duration, render_composite, strategy_for, write_caption_file, AssetLibrary,
    BackgroundStrategy, CompositeSpec, FfmpegRunner, RenderContext,
};
use reel_synth::{EngineChain, OllamaClient, TextGenerator};
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::StageLogger;
use crate::workspace::Workspace;

/// Topic-to-video pipeline.
///
/// Stages run strictly in order; every stage after the first consumes an
/// artifact file the previous stage produced. Cancellation aborts the next
/// blocking encoder invocation and kills the running process.
pub struct Pipeline {
    config: PipelineConfig,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            cancel_rx: None,
        }
    }

    /// Attach a cancellation signal.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Run the full pipeline for a topic, writing the final video to `output`.
    pub async fn run(&self, topic: &str, output: &Path) -> PipelineResult<()> {
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, topic, "Starting pipeline");

        let workspace = Workspace::new(&self.config.work_dir);
        workspace.ensure().await?;

        let mut runner = FfmpegRunner::new().with_timeout_opt(self.config.encode_timeout_secs);
        if let Some(cancel_rx) = &self.cancel_rx {
            runner = runner.with_cancel(cancel_rx.clone());
        }

        // Stage 1: script generation (fatal on failure or empty completion)
        let logger = StageLogger::new(&run_id, "script_generation");
        logger.log_start(topic);
        let generator = OllamaClient::new(
            self.config.ollama_host.clone(),
            self.config.ollama_model.clone(),
            self.config.channel_name.clone(),
        );
        let script = generator
            .generate(topic)
            .await
            .map_err(PipelineError::ScriptGeneration)?;
        tokio::fs::write(workspace.script_path(), script.text()).await?;
        logger.log_completion(&format!("{} words", script.word_count()));

        // Stage 2: speech synthesis (engine chain, fatal if all engines fail)
        let logger = StageLogger::new(&run_id, "speech_synthesis");
        logger.log_start(&format!("{} chars", script.text().len()));
        let chain = EngineChain::for_engine(
            self.config.tts_engine,
            self.config.coqui_model.clone(),
            self.config.espeak_voice.clone(),
            self.config.espeak_speed,
        );
        let narration = workspace.narration_path();
        chain
            .synthesize(script.text(), &narration)
            .await
            .map_err(PipelineError::SpeechSynthesis)?;
        logger.log_completion("narration synthesized");

        // Stage 3: measure narration duration (never estimated from text)
        let duration = probe_duration(&narration)
            .await
            .map_err(PipelineError::NarrationProbe)?;
        info!(run_id = %run_id, duration, "Measured narration duration");

        // Stage 4: background track
        let logger = StageLogger::new(&run_id, "background");
        let strategy = strategy_for(self.config.background);
        logger.log_start(strategy.kind().as_str());
        let assets = AssetLibrary::new(&self.config.assets_dir);
        let ctx = RenderContext {
            work_dir: workspace.root().to_path_buf(),
            assets: assets.clone(),
            encoding: self.config.encoding.clone(),
            runner: runner.clone(),
        };
        let background = workspace.background_path();
        strategy
            .render(&script, duration, &background, &ctx)
            .await
            .map_err(PipelineError::Background)?;
        logger.log_completion("background created");

        // Stage 5: caption timing from the measured duration
        let logger = StageLogger::new(&run_id, "captions");
        logger.log_start(&format!("{duration:.2}s of narration"));
        let captions = workspace.captions_path();
        write_caption_file(&script, duration, &captions)
            .await
            .map_err(PipelineError::Captions)?;
        logger.log_completion("captions written");

        // Stage 6: final composite (any failure here is fatal)
        let logger = StageLogger::new(&run_id, "composite");
        let spec = CompositeSpec {
            background,
            narration,
            captions,
            music: assets.find_music(),
            logo: assets.find_logo(),
            output: output.to_path_buf(),
        };
        if spec.logo.is_some() {
            info!(run_id = %run_id, "Using logo overlay");
        }
        if let Some(music) = &spec.music {
            info!(run_id = %run_id, music = %music.display(), "Using background music");
        }
        logger.log_start(&output.display().to_string());
        render_composite(&spec, &self.config.encoding, self.config.logo_margin, &runner)
            .await
            .map_err(PipelineError::Composite)?;
        logger.log_completion("final video rendered");

        info!(run_id = %run_id, output = %output.display(), "Pipeline finished");
        Ok(())
    }
}
