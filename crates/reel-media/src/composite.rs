//! Final composite: one transform graph joining background, narration,
//! captions, and the optional logo and music.
//!
//! Single-invocation design: all inputs and pins resolve in one encoding
//! pass. Captions burn in after scaling to the target grid (burn-in is
//! resolution-dependent) and before the logo overlay.

use std::path::{Path, PathBuf};

use reel_models::EncodingConfig;
use tracing::info;

use crate::command::FfmpegRunner;
use crate::error::MediaResult;
use crate::graph::{escape_filter_path, FilterGraph, InputFile, RenderSpec};

/// Synthesized speech lands quieter than lossy encoding wants; narration is
/// always boosted above raw synthesis level.
pub const NARRATION_BOOST: f64 = 4.0;

/// Music level before ducking.
const MUSIC_VOLUME: f64 = 0.5;

/// Music ducks under narration: amplitude-threshold compression keyed off
/// the narration channel.
const DUCK_FILTER: &str = "sidechaincompress=threshold=0.12:ratio=10:attack=5:release=200";

/// Inputs of the final composite.
#[derive(Debug, Clone)]
pub struct CompositeSpec {
    /// Background video track
    pub background: PathBuf,
    /// Narration audio
    pub narration: PathBuf,
    /// Caption file (SRT) to burn in
    pub captions: PathBuf,
    /// Optional background music
    pub music: Option<PathBuf>,
    /// Optional logo overlay image
    pub logo: Option<PathBuf>,
    /// Final output file
    pub output: PathBuf,
}

/// Build the render spec for a composite.
///
/// Input order: background, narration, then music and logo when present.
pub fn build_render_spec(
    spec: &CompositeSpec,
    encoding: &EncodingConfig,
    logo_margin: u32,
) -> MediaResult<RenderSpec> {
    let mut inputs = vec![
        InputFile::plain(&spec.background),
        InputFile::plain(&spec.narration),
    ];

    let music_index = spec.music.as_ref().map(|music| {
        inputs.push(InputFile::plain(music));
        inputs.len() - 1
    });
    let logo_index = spec.logo.as_ref().map(|logo| {
        inputs.push(InputFile::plain(logo));
        inputs.len() - 1
    });

    let mut graph = FilterGraph::new();

    // Video: normalize to the target grid, then burn captions onto it.
    graph.chain(
        &["0:v"],
        format!(
            "scale={}:{},setsar=1:1,format=yuv420p",
            encoding.width, encoding.height
        ),
        &["scaled"],
    )?;
    graph.chain(
        &["scaled"],
        format!("subtitles='{}'", escape_filter_path(&spec.captions)),
        &["vsub"],
    )?;

    match logo_index {
        Some(i) => {
            let logo_pin = format!("{i}:v");
            let overlay = format!("overlay=W-w-{logo_margin}:H-h-{logo_margin}:format=auto");
            graph.chain(&["vsub", logo_pin.as_str()], overlay, &["vout"])?;
        }
        None => {
            graph.chain(&["vsub"], "null", &["vout"])?;
        }
    }

    // Audio: boosted narration, with music ducked underneath when present.
    match music_index {
        Some(i) => {
            let music_pin = format!("{i}:a");
            graph.chain(
                &["1:a"],
                format!("volume={NARRATION_BOOST:.1},asplit=2"),
                &["narr", "narrkey"],
            )?;
            graph.chain(
                &[music_pin.as_str()],
                format!("aformat=fltp:44100:stereo,volume={MUSIC_VOLUME:.1}"),
                &["music"],
            )?;
            graph.chain(&["music", "narrkey"], DUCK_FILTER, &["ducked"])?;
            graph.chain(
                &["narr", "ducked"],
                "amix=inputs=2:duration=first",
                &["aout"],
            )?;
        }
        None => {
            graph.chain(&["1:a"], format!("volume={NARRATION_BOOST:.1}"), &["aout"])?;
        }
    }

    let mut codec_args = encoding.to_ffmpeg_args();
    codec_args.push("-movflags".to_string());
    codec_args.push("+faststart".to_string());

    Ok(RenderSpec {
        inputs,
        graph,
        maps: vec!["vout".to_string(), "aout".to_string()],
        codec_args,
        shortest: true,
        output: spec.output.clone(),
    })
}

/// Render the final composite. Any failure here is fatal for the run.
pub async fn render_composite(
    spec: &CompositeSpec,
    encoding: &EncodingConfig,
    logo_margin: u32,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    info!(
        output = %spec.output.display(),
        music = spec.music.is_some(),
        logo = spec.logo.is_some(),
        "Rendering final composite"
    );

    let render = build_render_spec(spec, encoding, logo_margin)?;
    runner.run(&render.to_command()?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(music: bool, logo: bool) -> CompositeSpec {
        CompositeSpec {
            background: PathBuf::from("build/background.mp4"),
            narration: PathBuf::from("build/narration.wav"),
            captions: PathBuf::from("build/captions.srt"),
            music: music.then(|| PathBuf::from("assets/music/background.mp3")),
            logo: logo.then(|| PathBuf::from("assets/logos/logo.png")),
            output: PathBuf::from("build/final.mp4"),
        }
    }

    #[test]
    fn test_minimal_graph() {
        let render = build_render_spec(&spec(false, false), &EncodingConfig::default(), 40).unwrap();
        let graph = render.graph.serialize();

        assert_eq!(render.inputs.len(), 2);
        assert!(graph.contains("[0:v]scale=1080:1920,setsar=1:1,format=yuv420p[scaled]"));
        assert!(graph.contains("subtitles="));
        assert!(graph.contains("[vsub]null[vout]"));
        assert!(graph.contains("[1:a]volume=4.0[aout]"));
        assert!(!graph.contains("sidechaincompress"));
        assert!(!graph.contains("overlay"));
    }

    #[test]
    fn test_captions_burn_after_scale_before_overlay() {
        let render = build_render_spec(&spec(false, true), &EncodingConfig::default(), 40).unwrap();
        let graph = render.graph.serialize();

        let scale_pos = graph.find("scale=1080:1920").unwrap();
        let subs_pos = graph.find("subtitles=").unwrap();
        let overlay_pos = graph.find("overlay=").unwrap();
        assert!(scale_pos < subs_pos);
        assert!(subs_pos < overlay_pos);
        // Logo is input 2 when no music is configured
        assert!(graph.contains("[vsub][2:v]overlay=W-w-40:H-h-40"));
    }

    #[test]
    fn test_music_graph_keeps_narration_in_mix() {
        let render = build_render_spec(&spec(true, false), &EncodingConfig::default(), 40).unwrap();
        let graph = render.graph.serialize();

        assert!(graph.contains("asplit=2[narr][narrkey]"));
        assert!(graph.contains(&format!("[music][narrkey]{DUCK_FILTER}[ducked]")));
        assert!(graph.contains("[narr][ducked]amix=inputs=2:duration=first[aout]"));
        assert!(graph.contains("[2:a]aformat=fltp:44100:stereo,volume=0.5[music]"));
    }

    #[test]
    fn test_music_and_logo_input_order() {
        let render = build_render_spec(&spec(true, true), &EncodingConfig::default(), 25).unwrap();
        let graph = render.graph.serialize();

        assert_eq!(render.inputs.len(), 4);
        // Music is input 2, logo input 3
        assert!(graph.contains("[2:a]aformat"));
        assert!(graph.contains("[vsub][3:v]overlay=W-w-25:H-h-25"));
    }

    #[test]
    fn test_command_maps_and_flags() {
        let render = build_render_spec(&spec(true, true), &EncodingConfig::default(), 40).unwrap();
        let args = render.to_command().unwrap().build_args();

        assert!(args.contains(&"[vout]".to_string()));
        assert!(args.contains(&"[aout]".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert_eq!(args.last().unwrap(), "build/final.mp4");
    }

    #[test]
    fn test_graph_is_reproducible() {
        let encoding = EncodingConfig::default();
        let a = build_render_spec(&spec(true, true), &encoding, 40).unwrap();
        let b = build_render_spec(&spec(true, true), &encoding, 40).unwrap();
        assert_eq!(a.graph.serialize(), b.graph.serialize());
    }
}
