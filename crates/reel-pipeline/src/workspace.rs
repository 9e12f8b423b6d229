//! Project workspace layout.
//!
//! One directory holds every intermediate artifact of a run. It is created
//! at pipeline start, populated incrementally, and deliberately never
//! cleaned up, so a failed or surprising run can be inspected.

use std::path::{Path, PathBuf};

/// Working directory for a pipeline run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root` (typically `build/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the workspace directory if missing.
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// The workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generated narration script.
    pub fn script_path(&self) -> PathBuf {
        self.root.join("script.txt")
    }

    /// Synthesized narration audio.
    pub fn narration_path(&self) -> PathBuf {
        self.root.join("narration.wav")
    }

    /// Concatenated background track.
    pub fn background_path(&self) -> PathBuf {
        self.root.join("background.mp4")
    }

    /// Caption file consumed by the composite.
    pub fn captions_path(&self) -> PathBuf {
        self.root.join("captions.srt")
    }

    /// Default final output location.
    pub fn final_path(&self) -> PathBuf {
        self.root.join("final.mp4")
    }
}
