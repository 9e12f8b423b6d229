//! Pipeline integration tests.
//!
//! These exercise the real external engines and are ignored by default.

use reel_media::{
    probe_duration, probe_media, render_composite, strategy_for, write_caption_file,
    AssetLibrary, BackgroundStrategy, CompositeSpec, FfmpegRunner, RenderContext,
};
use reel_models::{BackgroundKind, EncodingConfig, Script};
use reel_pipeline::{Pipeline, PipelineConfig};
use reel_synth::{ESpeakEngine, SpeechSynthesizer};
use tempfile::TempDir;

fn small_encoding() -> EncodingConfig {
    EncodingConfig::default().with_resolution(270, 480)
}

fn render_ctx(dir: &TempDir) -> RenderContext {
    RenderContext {
        work_dir: dir.path().to_path_buf(),
        assets: AssetLibrary::new(dir.path().join("assets")),
        encoding: small_encoding(),
        runner: FfmpegRunner::new().with_timeout(120),
    }
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_gradient_background_covers_duration() {
    let dir = TempDir::new().unwrap();
    let ctx = render_ctx(&dir);
    let out = dir.path().join("background.mp4");

    let strategy = strategy_for(BackgroundKind::Gradient);
    let script = Script::new("irrelevant for this strategy");
    strategy.render(&script, 4.0, &out, &ctx).await.unwrap();

    let info = probe_media(&out).await.unwrap();
    assert!((info.duration.unwrap() - 4.0).abs() < 0.1);
    assert_eq!(info.width, Some(270));
    assert_eq!(info.height, Some(480));
}

#[tokio::test]
#[ignore = "requires ffmpeg"]
async fn test_content_background_without_assets_uses_fallbacks() {
    let dir = TempDir::new().unwrap();
    let ctx = render_ctx(&dir);
    let out = dir.path().join("background.mp4");

    // No asset tree exists, so every segment degrades to the color fallback.
    let script = Script::new("neural networks and platforms and algorithms everywhere");
    let strategy = strategy_for(BackgroundKind::Content);
    strategy.render(&script, 6.0, &out, &ctx).await.unwrap();

    let info = probe_media(&out).await.unwrap();
    assert!((info.duration.unwrap() - 6.0).abs() < 0.2);
}

#[tokio::test]
#[ignore = "requires ffmpeg and espeak-ng"]
async fn test_composite_from_synthesized_narration() {
    let dir = TempDir::new().unwrap();
    let ctx = render_ctx(&dir);

    let script = Script::new("Hello world. This is a test. How are you?");

    // Narration
    let narration = dir.path().join("narration.wav");
    ESpeakEngine::new("en-us", 160)
        .synthesize(script.text(), &narration)
        .await
        .unwrap();
    let duration = probe_duration(&narration).await.unwrap();
    assert!(duration > 0.0);

    // Background and captions from the measured duration
    let background = dir.path().join("background.mp4");
    strategy_for(BackgroundKind::Gradient)
        .render(&script, duration, &background, &ctx)
        .await
        .unwrap();
    let captions = dir.path().join("captions.srt");
    write_caption_file(&script, duration, &captions).await.unwrap();

    // Composite without music or logo
    let output = dir.path().join("final.mp4");
    let spec = CompositeSpec {
        background,
        narration,
        captions,
        music: None,
        logo: None,
        output: output.clone(),
    };
    render_composite(&spec, &small_encoding(), 40, &ctx.runner)
        .await
        .unwrap();

    let info = probe_media(&output).await.unwrap();
    assert!(info.duration.unwrap() > 0.0);
    assert_eq!(info.width, Some(270));
    assert_eq!(info.height, Some(480));
}

#[tokio::test]
#[ignore = "requires ffmpeg, espeak-ng, and a running Ollama"]
async fn test_full_pipeline_run() {
    dotenvy::dotenv().ok();

    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        tts_engine: "espeak".parse().unwrap(),
        background: BackgroundKind::Gradient,
        encoding: small_encoding(),
        work_dir: dir.path().join("build"),
        assets_dir: dir.path().join("assets"),
        ..PipelineConfig::from_env()
    };

    let output = dir.path().join("final.mp4");
    Pipeline::new(config)
        .run("The future of on-device AI", &output)
        .await
        .unwrap();

    assert!(output.exists());
    let info = probe_media(&output).await.unwrap();
    assert!(info.duration.unwrap() > 10.0);
}
