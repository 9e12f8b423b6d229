//! ReelForge CLI: turn a topic string into a finished short-form video.

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use reel_pipeline::{init_tracing, Pipeline, PipelineConfig};

/// Generate a narrated short-form vertical video for a topic.
#[derive(Debug, Parser)]
#[command(name = "reelforge", version, about)]
struct Cli {
    /// Video topic/title
    topic: String,

    /// Output video path
    #[arg(long, default_value = "build/final.mp4")]
    out: PathBuf,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = PipelineConfig::from_env();

    info!(channel = %config.channel_name, topic = %cli.topic, "Starting ReelForge");

    // Ctrl-C aborts the next blocking encoder call and kills the process.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal, cancelling");
        let _ = cancel_tx.send(true);
    });

    let pipeline = Pipeline::new(config).with_cancel(cancel_rx);

    if let Err(e) = pipeline.run(&cli.topic, &cli.out).await {
        error!(stage = e.stage(), error = %e, "Pipeline failed");
        std::process::exit(1);
    }

    info!(output = %cli.out.display(), "Video generated successfully");
}
