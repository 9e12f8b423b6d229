//! Caption timing from measured audio duration.
//!
//! Timing is proportional to word position, never estimated from text
//! length: the caller probes the narration file and passes the real
//! duration. The final interval is forced to end at exactly that duration to
//! absorb floating-point drift from the proportional division.

use std::path::Path;

use reel_models::{format_srt_timestamp, CaptionInterval, Script};

use crate::error::MediaResult;

/// Default caption window size in words. Smaller values increase caption
/// change frequency.
pub const DEFAULT_WORDS_PER_CAPTION: usize = 4;

/// Compute caption intervals for a script over a measured audio duration.
///
/// Words are grouped into windows of `words_per_caption`; each window's
/// interval is proportional to its share of the total word count. A script
/// with no words yields a single empty interval spanning the whole duration.
pub fn caption_intervals(
    script: &Script,
    duration: f64,
    words_per_caption: usize,
) -> Vec<CaptionInterval> {
    let words_per_caption = words_per_caption.max(1);

    // Quote characters corrupt the subtitle burn-in filter downstream.
    let words: Vec<String> = script
        .words()
        .map(|w| w.replace('"', ""))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return vec![CaptionInterval {
            index: 1,
            start: 0.0,
            end: duration,
            text: String::new(),
        }];
    }

    let total = words.len();
    let mut intervals = Vec::with_capacity(total.div_ceil(words_per_caption));

    for (i, window) in words.chunks(words_per_caption).enumerate() {
        let words_before = i * words_per_caption;
        let words_through = (words_before + window.len()).min(total);

        let start = words_before as f64 / total as f64 * duration;
        let mut end = words_through as f64 / total as f64 * duration;
        if words_through == total {
            end = duration;
        }

        intervals.push(CaptionInterval {
            index: (i + 1) as u32,
            start,
            end,
            text: window.join(" "),
        });
    }

    intervals
}

/// Render caption intervals as SRT text.
///
/// Blocks are `ordinal`, `HH:MM:SS,mmm --> HH:MM:SS,mmm`, text, blank line.
pub fn render_srt(intervals: &[CaptionInterval]) -> String {
    let mut srt = String::new();
    for interval in intervals {
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            interval.index,
            format_srt_timestamp(interval.start),
            format_srt_timestamp(interval.end),
            interval.text,
        ));
    }
    srt
}

/// Compute caption timing and write the SRT file.
pub async fn write_caption_file(
    script: &Script,
    audio_duration: f64,
    out_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let intervals = caption_intervals(script, audio_duration, DEFAULT_WORDS_PER_CAPTION);
    tokio::fs::write(out_path.as_ref(), render_srt(&intervals)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::caption::is_contiguous_cover;

    #[test]
    fn test_interval_count_is_ceil_of_words_over_window() {
        let script = Script::new("one two three four five six seven eight nine");
        let intervals = caption_intervals(&script, 10.0, 4);
        assert_eq!(intervals.len(), 3); // ceil(9/4)
        let intervals = caption_intervals(&script, 10.0, 3);
        assert_eq!(intervals.len(), 3);
        let intervals = caption_intervals(&script, 10.0, 9);
        assert_eq!(intervals.len(), 1);
    }

    #[test]
    fn test_intervals_are_contiguous_and_cover_duration() {
        let script = Script::new("alpha beta gamma delta epsilon zeta eta");
        let duration = 13.37;
        let intervals = caption_intervals(&script, duration, 2);
        assert!(is_contiguous_cover(&intervals, duration));
        assert_eq!(intervals[0].start, 0.0);
        assert_eq!(intervals.last().unwrap().end, duration);
        for pair in intervals.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_last_end_is_exact_not_approximate() {
        // 7 words / windows of 3 gives fractions that do not sum cleanly
        let script = Script::new("a b c d e f g");
        let duration = 1.0;
        let intervals = caption_intervals(&script, duration, 3);
        assert_eq!(intervals.last().unwrap().end, duration);
    }

    #[test]
    fn test_empty_script_single_empty_interval() {
        let intervals = caption_intervals(&Script::new(""), 7.5, 4);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].index, 1);
        assert_eq!(intervals[0].start, 0.0);
        assert_eq!(intervals[0].end, 7.5);
        assert!(intervals[0].text.is_empty());
    }

    #[test]
    fn test_quotes_are_stripped() {
        let script = Script::new(r#"He said "hello there" loudly"#);
        let intervals = caption_intervals(&script, 4.0, 10);
        assert_eq!(intervals[0].text, "He said hello there loudly");
    }

    #[test]
    fn test_ordinals_are_one_based_and_contiguous() {
        let script = Script::new("w1 w2 w3 w4 w5 w6 w7 w8");
        let intervals = caption_intervals(&script, 8.0, 2);
        let ordinals: Vec<u32> = intervals.iter().map(|i| i.index).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_idempotent_srt_output() {
        let script = Script::new("Hello world. This is a test. How are you?");
        let a = render_srt(&caption_intervals(&script, 1.0, 4));
        let b = render_srt(&caption_intervals(&script, 1.0, 4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_three_windows_over_one_second() {
        // 9 words in windows of 4 -> 3 intervals over [0, 1]
        let script = Script::new("Hello world. This is a test. How are you?");
        let intervals = caption_intervals(&script, 1.0, 4);
        assert_eq!(intervals.len(), 3);
        assert!(is_contiguous_cover(&intervals, 1.0));
        let srt = render_srt(&intervals);
        assert!(srt.contains("--> 00:00:01,000"));
    }

    #[test]
    fn test_srt_block_format() {
        let script = Script::new("only four words here");
        let srt = render_srt(&caption_intervals(&script, 2.0, 4));
        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:02,000\nonly four words here\n\n");
    }
}
