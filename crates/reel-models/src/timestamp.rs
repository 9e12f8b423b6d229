//! SRT timestamp formatting.
//!
//! The caption file contract is `HH:MM:SS,mmm` — comma separator,
//! millisecond precision. Consumers burn the file into the video, so the
//! format must be bit-exact.

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Negative inputs clamp to zero.
///
/// # Examples
/// ```
/// use reel_models::timestamp::format_srt_timestamp;
/// assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
/// assert_eq!(format_srt_timestamp(61.5), "00:01:01,500");
/// ```
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}
