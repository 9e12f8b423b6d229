//! External generation engines.
//!
//! Wraps the two collaborators the pipeline does not own:
//! - Text generation via the Ollama HTTP API, with a bounded timeout and a
//!   strict empty-completion policy
//! - Speech synthesis via the Coqui `tts` CLI with an `espeak-ng` fallback,
//!   both time-bounded, first success wins

pub mod error;
pub mod llm;
pub mod tts;

pub use error::{SynthError, SynthResult};
pub use llm::{OllamaClient, TextGenerator};
pub use tts::{CoquiEngine, ESpeakEngine, EngineChain, SpeechSynthesizer};
