//! Pipeline configuration.
//!
//! Env-var driven with defaults; the loaded value is passed explicitly into
//! each component, never read from ambient state.

use std::path::PathBuf;

use reel_models::{BackgroundKind, EncodingConfig, TtsEngine};

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ollama model id
    pub ollama_model: String,
    /// Ollama API endpoint
    pub ollama_host: String,
    /// Speech engine selection
    pub tts_engine: TtsEngine,
    /// Coqui model name
    pub coqui_model: String,
    /// eSpeak voice
    pub espeak_voice: String,
    /// eSpeak speaking rate (words per minute)
    pub espeak_speed: u32,
    /// Output resolution, quality factor, preset, codecs
    pub encoding: EncodingConfig,
    /// Logo offset from the bottom-right corner (pixels)
    pub logo_margin: u32,
    /// Channel/brand name embedded in the generation prompt
    pub channel_name: String,
    /// Background creation strategy
    pub background: BackgroundKind,
    /// Root of the visual/music asset tree
    pub assets_dir: PathBuf,
    /// Working directory for intermediate artifacts
    pub work_dir: PathBuf,
    /// Optional deadline for each encoding invocation (seconds)
    pub encode_timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ollama_model: "mistral".to_string(),
            ollama_host: "http://localhost:11434".to_string(),
            tts_engine: TtsEngine::Coqui,
            coqui_model: "tts_models/en/vctk/vits".to_string(),
            espeak_voice: "en-us".to_string(),
            espeak_speed: 160,
            encoding: EncodingConfig::default(),
            logo_margin: 40,
            channel_name: "ReelForge AI".to_string(),
            background: BackgroundKind::Content,
            assets_dir: PathBuf::from("assets"),
            work_dir: PathBuf::from("build"),
            encode_timeout_secs: None,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let encoding = EncodingConfig::default()
            .with_resolution(
                env_parse("VIDEO_WIDTH", defaults.encoding.width),
                env_parse("VIDEO_HEIGHT", defaults.encoding.height),
            )
            .with_crf(env_parse("VIDEO_CRF", defaults.encoding.crf))
            .with_preset(env_string("VIDEO_PRESET", &defaults.encoding.preset));

        Self {
            ollama_model: env_string("OLLAMA_MODEL", &defaults.ollama_model),
            ollama_host: env_string("OLLAMA_HOST", &defaults.ollama_host),
            tts_engine: env_parse("TTS_ENGINE", defaults.tts_engine),
            coqui_model: env_string("COQUI_MODEL", &defaults.coqui_model),
            espeak_voice: env_string("ESPEAK_VOICE", &defaults.espeak_voice),
            espeak_speed: env_parse("ESPEAK_SPEED", defaults.espeak_speed),
            encoding,
            logo_margin: env_parse("LOGO_MARGIN", defaults.logo_margin),
            channel_name: env_string("CHANNEL_NAME", &defaults.channel_name),
            background: env_parse("BACKGROUND_STRATEGY", defaults.background),
            assets_dir: PathBuf::from(env_string("ASSETS_DIR", "assets")),
            work_dir: PathBuf::from(env_string("WORK_DIR", "build")),
            encode_timeout_secs: std::env::var("ENCODE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.ollama_model, "mistral");
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.tts_engine, TtsEngine::Coqui);
        assert_eq!(config.espeak_speed, 160);
        assert_eq!(config.encoding.width, 1080);
        assert_eq!(config.encoding.height, 1920);
        assert_eq!(config.logo_margin, 40);
        assert_eq!(config.background, BackgroundKind::Content);
        assert_eq!(config.work_dir, PathBuf::from("build"));
        assert!(config.encode_timeout_secs.is_none());
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        // Key that no environment would define
        assert_eq!(env_parse("REELFORGE_TEST_UNSET_KEY", 42u32), 42);
        assert_eq!(env_string("REELFORGE_TEST_UNSET_KEY", "fallback"), "fallback");
    }
}
