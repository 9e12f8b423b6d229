//! Script generation via the Ollama HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reel_models::Script;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SynthError, SynthResult};

/// Text generation timeout.
const GENERATION_TIMEOUT_SECS: u64 = 120;

/// A text generation engine.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a narration script for a topic.
    async fn generate(&self, topic: &str) -> SynthResult<Script>;
}

/// Ollama API client.
pub struct OllamaClient {
    host: String,
    model: String,
    channel_name: String,
    client: Client,
}

/// Ollama generate request.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama generate response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new client against `host` (e.g. `http://localhost:11434`).
    pub fn new(
        host: impl Into<String>,
        model: impl Into<String>,
        channel_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            model: model.into(),
            channel_name: channel_name.into(),
            client: Client::new(),
        }
    }

    /// The full prompt for a topic: channel branding, word-count range,
    /// required closing call-to-action, and the prohibition of section
    /// headers.
    fn build_prompt(&self, topic: &str) -> String {
        format!(
            r#"You are a professional YouTube script writer for "{channel}", a cutting-edge tech channel focused on AI innovations.

TOPIC: {topic}

REQUIREMENTS:
- Write EXACTLY 140-160 words for ~60 seconds of speech
- Structure: Hook (5s) -> Main Content (50s) -> CTA (5s)
- Tone: Energetic, curious, authoritative but accessible
- Use short, punchy sentences with natural pauses
- Include specific numbers, facts, or examples when possible
- End with "Don't forget to subscribe for more AI insights!"

STYLE GUIDELINES:
- Start with an attention-grabbing question or bold statement
- Use "you" to directly address viewers
- Avoid technical jargon - explain complex concepts simply
- Create urgency and excitement about AI developments
- Include transition phrases like "But here's the thing..." or "What's even crazier..."

IMPORTANT: Return ONLY the actual script text that will be spoken. Do NOT include:
- Title headers
- Section labels like "(Hook)" or "(Main Content)" or "(CTA)"
- Any formatting or commentary
- Just the pure spoken script text

OUTPUT: Return ONLY the script text, no additional formatting or commentary."#,
            channel = self.channel_name,
            topic = topic,
        )
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, topic: &str) -> SynthResult<Script> {
        info!(topic, model = %self.model, "Generating script");

        let prompt = self.build_prompt(topic);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.host);
        let send = async {
            let response = self.client.post(&url).json(&request).send().await?;
            if !response.status().is_success() {
                return Err(SynthError::generation_failed(format!(
                    "Ollama returned status {}",
                    response.status()
                )));
            }
            let body: GenerateResponse = response.json().await?;
            Ok(body.response)
        };

        let completion = tokio::time::timeout(Duration::from_secs(GENERATION_TIMEOUT_SECS), send)
            .await
            .map_err(|_| SynthError::GenerationTimeout(GENERATION_TIMEOUT_SECS))??;

        let script = normalize_initialisms(completion.trim());
        if script.is_empty() {
            return Err(SynthError::EmptyCompletion);
        }

        info!(chars = script.len(), "Script generated");
        Ok(Script::new(script))
    }
}

/// Rewrite standalone "AI" as "A.I." so the synthesizer spells it out
/// instead of reading a word.
fn normalize_initialisms(text: &str) -> String {
    text.split(' ')
        .map(|token| {
            let trimmed = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if trimmed == "AI" {
                // Collapse the doubled dot from a trailing period ("AI." -> "A.I.")
                token.replacen("AI", "A.I.", 1).replace("..", ".")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
