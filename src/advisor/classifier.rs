//! Sufficiency classifier
//!
//! Coarse keyword heuristic deciding whether the latest user message gives
//! enough context to emit a structured study plan, or whether a follow-up
//! question is needed first. Stands in for a model-driven intent classifier;
//! the keyword set and thresholds are fixed because they directly determine
//! which of the two offline templates a demo user sees.

use tracing::debug;

/// Domain keywords signalling course/learning context
const KEYWORDS: [&str; 10] = [
    "課", "程度", "卡", "時間", "目標", "考試", "作業", "期末", "報告", "專題",
];

/// Distinct keyword hits at which a message stands on its own
const MIN_KEYWORD_HITS: usize = 2;

/// Messages at or above this many chars stand on their own regardless of hits
const MIN_SELF_SUFFICIENT_CHARS: usize = 40;

/// Whether the user has given enough context to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sufficient,
    Insufficient,
}

/// Classify the most recent user message.
///
/// Counts the distinct keywords occurring as substrings of the input. The
/// verdict is Insufficient only when the hit count is below two AND the
/// input is shorter than 40 characters; either signal alone is enough to
/// proceed. Total over all strings: empty input scores zero hits, zero
/// length, and classifies as Insufficient.
pub fn classify(latest_user_text: &str) -> Verdict {
    let hits = KEYWORDS.iter().filter(|k| latest_user_text.contains(**k)).count();
    let chars = latest_user_text.chars().count();
    let need_more = hits < MIN_KEYWORD_HITS && chars < MIN_SELF_SUFFICIENT_CHARS;

    debug!(hits, chars, need_more, "classify: scored input");

    if need_more { Verdict::Insufficient } else { Verdict::Sufficient }
}
