//! Content segmentation: mapping script windows to background categories.

use reel_models::{Category, ContentSegment, Script};

/// Number of background changes per video.
pub const DEFAULT_SEGMENT_COUNT: usize = 3;

/// Keyword to category table. Order is fixed; detection iterates categories
/// in `Category::PRIORITY` order so ties resolve deterministically.
const KEYWORD_CATEGORIES: &[(&str, Category)] = &[
    ("artificial", Category::Ai),
    ("intelligence", Category::Ai),
    ("ai", Category::Ai),
    ("robot", Category::Ai),
    ("machine", Category::Ai),
    ("neural", Category::Ai),
    ("deep", Category::Ai),
    ("learning", Category::Ai),
    ("algorithm", Category::Tech),
    ("data", Category::Tech),
    ("computer", Category::Tech),
    ("digital", Category::Tech),
    ("technology", Category::Tech),
    ("software", Category::Tech),
    ("code", Category::Tech),
    ("programming", Category::Tech),
    ("tool", Category::Tools),
    ("tools", Category::Tools),
    ("app", Category::Tools),
    ("application", Category::Tools),
    ("platform", Category::Tools),
    ("service", Category::Tools),
];

/// Detect the dominant category of a word window.
///
/// Highest keyword hit count wins; ties break to the category earliest in
/// `Category::PRIORITY`. No hits yields the default category. Never fails.
pub fn detect_category(words: &[String]) -> Category {
    let mut hits = [0usize; 3];

    for word in words {
        if let Some((_, category)) = KEYWORD_CATEGORIES.iter().find(|(kw, _)| *kw == word.as_str()) {
            let slot = Category::PRIORITY
                .iter()
                .position(|c| c == category)
                .expect("every table category is in PRIORITY");
            hits[slot] += 1;
        }
    }

    let mut best = Category::default();
    let mut best_count = 0;
    for (slot, category) in Category::PRIORITY.iter().enumerate() {
        if hits[slot] > best_count {
            best_count = hits[slot];
            best = *category;
        }
    }
    best
}

/// Partition a script into a fixed count of topic-tagged time windows.
///
/// Time spans are equal except the last, which extends to the exact total so
/// integer division cannot truncate the tail. Word windows are an
/// independent equal-size partition by word count. Assets are left
/// unresolved (`None`).
pub fn segment_script(script: &Script, total_duration: f64, count: usize) -> Vec<ContentSegment> {
    let count = count.max(1);

    let words: Vec<String> = script
        .text()
        .replace('"', "")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let span = total_duration / count as f64;
    let words_per_segment = words.len() / count;

    (0..count)
        .map(|i| {
            let start = i as f64 * span;
            let end = if i == count - 1 {
                total_duration
            } else {
                (i + 1) as f64 * span
            };

            let word_start = i * words_per_segment;
            let word_end = (word_start + words_per_segment).min(words.len());

            ContentSegment {
                start,
                end,
                category: detect_category(&words[word_start..word_end]),
                asset: None,
            }
        })
        .collect()
}
