//! Background track creation strategies.
//!
//! Three mutually exclusive strategies produce the background video behind
//! one trait, selected by configuration. All of them emit the target
//! resolution with identical codec/preset/pixel-format so downstream stages
//! treat their output uniformly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reel_models::{BackgroundKind, ContentSegment, EncodingConfig, Script};
use tracing::{info, warn};

use crate::assets::AssetLibrary;
use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::segments::{segment_script, DEFAULT_SEGMENT_COUNT};

/// Flat color used when an asset-based segment render is unavailable.
const FALLBACK_COLOR: &str = "#0f0f23";

/// Gradient strategy colors.
const GRADIENT_BASE: &str = "#1a1a2e";
const GRADIENT_TINT: &str = "#16213e";

/// Continuous zoom-in over a capped ratio; deterministic, so re-rendering
/// the same (asset, duration) pair is reproducible.
fn zoom_filter(width: u32, height: u32) -> String {
    format!(
        "zoompan=z='min(zoom+0.002,1.8)':d=125:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={width}x{height}"
    )
}

/// Everything a background strategy needs to render.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Directory for intermediate artifacts (per-segment files, concat list)
    pub work_dir: PathBuf,
    /// Visual asset lookup
    pub assets: AssetLibrary,
    /// Codec parameters shared by all emitted files
    pub encoding: EncodingConfig,
    /// Process runner carrying timeout and cancellation
    pub runner: FfmpegRunner,
}

/// A background creation strategy.
#[async_trait]
pub trait BackgroundStrategy: Send + Sync {
    /// Which configured variant this is.
    fn kind(&self) -> BackgroundKind;

    /// Produce a background video of exactly `duration` seconds at `output`.
    async fn render(
        &self,
        script: &Script,
        duration: f64,
        output: &Path,
        ctx: &RenderContext,
    ) -> MediaResult<()>;
}

/// Select the strategy for a configured kind.
pub fn strategy_for(kind: BackgroundKind) -> Box<dyn BackgroundStrategy> {
    match kind {
        BackgroundKind::Gradient => Box::new(GradientBackground),
        BackgroundKind::Motion => Box::new(MotionBackground),
        BackgroundKind::Content => Box::new(ContentAwareBackground),
    }
}

/// Static two-color gradient blend.
pub struct GradientBackground;

#[async_trait]
impl BackgroundStrategy for GradientBackground {
    fn kind(&self) -> BackgroundKind {
        BackgroundKind::Gradient
    }

    async fn render(
        &self,
        _script: &Script,
        duration: f64,
        output: &Path,
        ctx: &RenderContext,
    ) -> MediaResult<()> {
        info!(duration, "Creating gradient background");
        let size = format!("{}x{}", ctx.encoding.width, ctx.encoding.height);

        let cmd = FfmpegCommand::new(output)
            .lavfi_input(format!("color=c={GRADIENT_BASE}:s={size}"), duration)
            .lavfi_input(format!("color=c={GRADIENT_TINT}:s={size}"), duration)
            .filter_complex("[0:v][1:v]blend=all_mode=overlay:all_opacity=0.5")
            .output_args(ctx.encoding.segment_args());

        ctx.runner.run(&cmd).await
    }
}

/// Procedural animated gradient source.
pub struct MotionBackground;

#[async_trait]
impl BackgroundStrategy for MotionBackground {
    fn kind(&self) -> BackgroundKind {
        BackgroundKind::Motion
    }

    async fn render(
        &self,
        _script: &Script,
        duration: f64,
        output: &Path,
        ctx: &RenderContext,
    ) -> MediaResult<()> {
        info!(duration, "Creating procedural motion background");
        let size = format!("{}x{}", ctx.encoding.width, ctx.encoding.height);

        let cmd = FfmpegCommand::new(output)
            .lavfi_input(format!("gradients=s={size}:speed=0.05"), duration)
            .output_args(ctx.encoding.segment_args());

        ctx.runner.run(&cmd).await
    }
}

/// Content-aware segmented backgrounds driven by script keywords.
pub struct ContentAwareBackground;

#[async_trait]
impl BackgroundStrategy for ContentAwareBackground {
    fn kind(&self) -> BackgroundKind {
        BackgroundKind::Content
    }

    async fn render(
        &self,
        script: &Script,
        duration: f64,
        output: &Path,
        ctx: &RenderContext,
    ) -> MediaResult<()> {
        info!(duration, "Creating content-aware segmented background");

        let mut segments = segment_script(script, duration, DEFAULT_SEGMENT_COUNT);
        for segment in &mut segments {
            segment.asset = ctx.assets.find_image(segment.category);
        }

        let mut segment_paths = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let path = ctx.work_dir.join(format!("segment_{i}.mp4"));
            render_segment(segment, &path, ctx).await?;
            segment_paths.push(path);
        }

        concatenate_segments(&segment_paths, output, ctx).await
    }
}

/// Render one background segment covering exactly the segment's duration.
///
/// An asset-based render that fails degrades to the flat-color fallback with
/// a warning; a fallback failure propagates.
pub async fn render_segment(
    segment: &ContentSegment,
    output: &Path,
    ctx: &RenderContext,
) -> MediaResult<()> {
    if let Some(asset) = &segment.asset {
        match render_image_segment(asset, segment.duration(), output, ctx).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(
                    asset = %asset.display(),
                    error = %e,
                    "Asset segment render failed, using color fallback"
                );
            }
        }
    }
    render_color_segment(segment.duration(), output, ctx).await
}

async fn render_image_segment(
    asset: &Path,
    duration: f64,
    output: &Path,
    ctx: &RenderContext,
) -> MediaResult<()> {
    let (w, h) = (ctx.encoding.width, ctx.encoding.height);
    let filter = format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},{}",
        zoom_filter(w, h)
    );

    let cmd = FfmpegCommand::new(output)
        .input_with_args(
            vec![
                "-loop".to_string(),
                "1".to_string(),
                "-t".to_string(),
                format!("{:.3}", duration),
            ],
            asset.to_string_lossy(),
        )
        .video_filter(filter)
        .output_args(ctx.encoding.segment_args());

    ctx.runner.run(&cmd).await
}

/// Flat-color segment. The only dependency is the encoding engine itself.
async fn render_color_segment(
    duration: f64,
    output: &Path,
    ctx: &RenderContext,
) -> MediaResult<()> {
    let size = format!("{}x{}", ctx.encoding.width, ctx.encoding.height);

    let cmd = FfmpegCommand::new(output)
        .lavfi_input(format!("color=c={FALLBACK_COLOR}:s={size}"), duration)
        .output_args(ctx.encoding.segment_args());

    ctx.runner.run(&cmd).await
}

/// Join same-codec segments losslessly with the concat demuxer.
///
/// The renderer emits identical codec parameters for every segment, so
/// `-c copy` preserves order and total duration without re-encoding. On
/// failure the first segment becomes the whole background (logged), keeping
/// the pipeline alive.
pub async fn concatenate_segments(
    segment_paths: &[PathBuf],
    output: &Path,
    ctx: &RenderContext,
) -> MediaResult<()> {
    let list_path = ctx.work_dir.join("segments.txt");
    let mut list = String::new();
    for path in segment_paths {
        list.push_str(&format!("file '{}'\n", path.display()));
    }
    tokio::fs::write(&list_path, list).await?;

    let cmd = FfmpegCommand::new(output)
        .input_with_args(
            vec![
                "-f".to_string(),
                "concat".to_string(),
                "-safe".to_string(),
                "0".to_string(),
            ],
            list_path.to_string_lossy(),
        )
        .stream_copy();

    match ctx.runner.run(&cmd).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let first = segment_paths
                .first()
                .ok_or_else(|| crate::error::MediaError::ffmpeg_failed(
                    "Concatenation failed and no segments exist",
                    None,
                    None,
                ))?;
            warn!(error = %e, "Concatenation failed, using first segment as background");
            tokio::fs::copy(first, output).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::probe_media;
    use reel_models::Category;
    use tempfile::TempDir;

    fn test_ctx(dir: &TempDir) -> RenderContext {
        RenderContext {
            work_dir: dir.path().to_path_buf(),
            assets: AssetLibrary::new(dir.path().join("assets")),
            encoding: EncodingConfig::default().with_resolution(270, 480),
            runner: FfmpegRunner::new().with_timeout(60),
        }
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(strategy_for(BackgroundKind::Gradient).kind(), BackgroundKind::Gradient);
        assert_eq!(strategy_for(BackgroundKind::Motion).kind(), BackgroundKind::Motion);
        assert_eq!(strategy_for(BackgroundKind::Content).kind(), BackgroundKind::Content);
    }

    #[test]
    fn test_zoom_filter_is_deterministic() {
        assert_eq!(zoom_filter(1080, 1920), zoom_filter(1080, 1920));
        assert!(zoom_filter(1080, 1920).contains("s=1080x1920"));
        assert!(zoom_filter(1080, 1920).contains("min(zoom+0.002,1.8)"));
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_color_segment_duration() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);
        let out = dir.path().join("seg.mp4");

        render_color_segment(3.0, &out, &ctx).await.unwrap();

        let info = probe_media(&out).await.unwrap();
        // One output-frame tolerance at 25 fps
        assert!((info.duration.unwrap() - 3.0).abs() < 0.05);
        assert_eq!(info.width, Some(270));
        assert_eq!(info.height, Some(480));
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_missing_asset_degrades_to_color() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);
        let out = dir.path().join("seg.mp4");

        let segment = ContentSegment {
            start: 0.0,
            end: 2.0,
            category: Category::Ai,
            asset: Some(PathBuf::from("/nonexistent/image.jpg")),
        };
        render_segment(&segment, &out, &ctx).await.unwrap();
        assert!(out.exists());
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_concatenation_preserves_total_duration() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);

        let a = dir.path().join("a.mp4");
        let b = dir.path().join("b.mp4");
        render_color_segment(2.0, &a, &ctx).await.unwrap();
        render_color_segment(3.0, &b, &ctx).await.unwrap();

        let out = dir.path().join("joined.mp4");
        concatenate_segments(&[a, b], &out, &ctx).await.unwrap();

        let info = probe_media(&out).await.unwrap();
        assert!((info.duration.unwrap() - 5.0).abs() < 0.1);
    }
}
