//! Content segments mapping script windows to background visuals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Background visual category detected from script keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// AI and machine learning imagery
    Ai,
    /// General technology imagery (the default)
    Tech,
    /// Apps, platforms, and tooling imagery
    Tools,
}

impl Category {
    /// Fixed priority order used for deterministic tie-breaking.
    pub const PRIORITY: &'static [Category] = &[Category::Ai, Category::Tech, Category::Tools];

    /// Directory name for this category under the image assets root.
    pub fn as_dir_name(&self) -> &'static str {
        match self {
            Category::Ai => "ai",
            Category::Tech => "tech",
            Category::Tools => "tools",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Tech
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dir_name())
    }
}

/// One contiguous time window of the background track.
///
/// A segment sequence partitions `[0, total_video_duration]` contiguously.
/// An absent `asset` means the fallback renderer covers this window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Detected visual category.
    pub category: Category,
    /// Resolved image asset, if any.
    pub asset: Option<PathBuf>,
}

impl ContentSegment {
    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category() {
        assert_eq!(Category::default(), Category::Tech);
    }

    #[test]
    fn test_dir_names() {
        assert_eq!(Category::Ai.as_dir_name(), "ai");
        assert_eq!(Category::Tools.to_string(), "tools");
    }

    #[test]
    fn test_segment_duration() {
        let seg = ContentSegment {
            start: 10.0,
            end: 25.5,
            category: Category::default(),
            asset: None,
        };
        assert!((seg.duration() - 15.5).abs() < 1e-9);
    }
}
