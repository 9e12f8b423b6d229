//! Structured run logging.
//!
//! Tracing subscriber setup plus a stage logger carrying the run id, handed
//! to each stage rather than read from ambient state.

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with colored output for dev, JSON for production.
///
/// `LOG_FORMAT=json` selects JSON output; `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reel_pipeline=info".parse().expect("static directive parses"))
        .add_directive("reel_media=info".parse().expect("static directive parses"))
        .add_directive("reel_synth=info".parse().expect("static directive parses"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Stage logger with consistent formatting.
#[derive(Debug, Clone)]
pub struct StageLogger {
    run_id: String,
    stage: String,
}

impl StageLogger {
    /// Create a logger for one stage of a run.
    pub fn new(run_id: &str, stage: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            stage: stage.to_string(),
        }
    }

    /// Log the start of the stage.
    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage started: {}", message
        );
    }

    /// Log a warning during the stage.
    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage warning: {}", message
        );
    }

    /// Log a stage failure.
    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage error: {}", message
        );
    }

    /// Log stage completion.
    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            stage = %self.stage,
            "Stage completed: {}", message
        );
    }

    /// Get the run id.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the stage name.
    pub fn stage(&self) -> &str {
        &self.stage
    }
}
