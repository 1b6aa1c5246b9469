//! Offline response synthesis
//!
//! Selects one of two fixed templates by classifier verdict. Same verdict,
//! same bytes, every time.

use tracing::debug;

use super::classifier::{Verdict, classify};
use crate::conversation::Conversation;
use crate::prompts::{CLARIFY_TEMPLATE, PLAN_TEMPLATE};

/// Produce the canned reply for a verdict
pub fn synthesize(verdict: Verdict) -> &'static str {
    debug!(?verdict, "synthesize: selecting template");
    match verdict {
        Verdict::Insufficient => CLARIFY_TEMPLATE,
        Verdict::Sufficient => PLAN_TEMPLATE,
    }
}

/// Offline reply for the current conversation.
///
/// Classifies the most recent user message; a conversation with no user
/// message yet classifies as the empty string.
pub fn offline_reply(conversation: &Conversation) -> &'static str {
    synthesize(classify(conversation.latest_user_text().unwrap_or("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_is_deterministic() {
        assert_eq!(synthesize(Verdict::Insufficient), synthesize(Verdict::Insufficient));
        assert_eq!(synthesize(Verdict::Sufficient), synthesize(Verdict::Sufficient));
    }

    #[test]
    fn test_verdicts_map_to_distinct_templates() {
        assert_eq!(synthesize(Verdict::Insufficient), CLARIFY_TEMPLATE);
        assert_eq!(synthesize(Verdict::Sufficient), PLAN_TEMPLATE);
    }

    #[test]
    fn test_offline_reply_before_first_turn_asks_for_context() {
        let conversation = Conversation::new();
        assert_eq!(offline_reply(&conversation), CLARIFY_TEMPLATE);
    }

    #[test]
    fn test_offline_reply_follows_latest_user_message() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        assert_eq!(offline_reply(&conversation), CLARIFY_TEMPLATE);

        conversation.push_assistant(CLARIFY_TEMPLATE);
        conversation.push_user("下週期末考，時間只剩一週，目標是及格");
        assert_eq!(offline_reply(&conversation), PLAN_TEMPLATE);
    }
}
