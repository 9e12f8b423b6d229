//! Caption intervals for subtitle burn-in.

use serde::{Deserialize, Serialize};

/// One time-aligned caption.
///
/// A caption sequence is contiguous and non-overlapping, covering
/// `[0, total_audio_duration]` exactly: each interval's `end` equals the next
/// interval's `start`, and the final `end` is the measured audio duration,
/// not an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionInterval {
    /// 1-based ordinal, contiguous across the sequence.
    pub index: u32,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// On-screen text for this interval.
    pub text: String,
}

impl CaptionInterval {
    /// Duration of this interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Check that a caption sequence is contiguous, increasing, and covers
/// `[0, total]` exactly.
pub fn is_contiguous_cover(intervals: &[CaptionInterval], total: f64) -> bool {
    let Some(first) = intervals.first() else {
        return false;
    };
    let Some(last) = intervals.last() else {
        return false;
    };
    if first.start != 0.0 || last.end != total {
        return false;
    }
    intervals.windows(2).all(|w| w[0].end == w[1].start) && intervals.iter().all(|i| i.start < i.end)
}
