//! Heuristic specificity check for free-text commitments
//!
//! Two-step heuristic: a vague-word scan and a concrete-indicator scan
//! (clock times, quantities, dosages, frequency phrases). Used as live
//! input feedback in the wizard and as the strength-scoring signal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Vague aspirational words that flag a commitment as non-actionable
pub const VAGUE_WORDS: [&str; 14] = [
    "better",
    "more",
    "less",
    "try to",
    "hopefully",
    "maybe",
    "might",
    "should",
    "could",
    "eventually",
    "improve",
    "increase",
    "decrease",
    "reduce",
];

/// Concrete-indicator patterns: times, amounts, rituals
static SPECIFIC_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        // Times: "10:30 PM"
        Regex::new(r"\d{1,2}:\d{2}").unwrap(),
        // Quantities: "30 minutes"
        Regex::new(r"\d+\s*(hours?|minutes?|times?)").unwrap(),
        // Amounts: "250mg"
        Regex::new(r"\d+\s*(mg|g|ml|L|oz)").unwrap(),
        // Frequency: "every day"
        Regex::new(r"(every|each)\s+\w+").unwrap(),
    ]
});

/// Feedback shown when vague words are present without any indicator
const VAGUE_FEEDBACK: &str = "Include exact times, amounts, or rituals. Example: \"Lights out by 10:30 PM, no screens after 10 PM\"";

/// Feedback shown when the text is simply too short to be actionable
const LENGTH_FEEDBACK: &str = "Add more details to make this commitment actionable";

/// Length below which text without vague words is still considered vague
const MIN_SPECIFIC_LEN: usize = 100;

/// Outcome of a specificity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecificityReport {
    pub is_specific: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl SpecificityReport {
    fn specific() -> Self {
        SpecificityReport { is_specific: true, feedback: None }
    }

    fn vague(feedback: &str) -> Self {
        SpecificityReport { is_specific: false, feedback: Some(feedback.to_string()) }
    }
}

/// True if the text contains any of the four concrete-indicator patterns.
///
/// Shared with `Protocol::is_specific`, which applies only this test.
pub fn has_specific_indicators(text: &str) -> bool {
    SPECIFIC_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// True if the text contains any vague word (case-insensitive)
pub fn has_vague_words(text: &str) -> bool {
    let lower = text.to_lowercase();
    VAGUE_WORDS.iter().any(|word| lower.contains(word))
}

/// Classify a commitment text as specific or vague.
///
/// The vague-word branch dominates the length branch: an indicator match
/// rescues vague wording, and short text with an indicator but no vague
/// words still falls through to the length check.
pub fn evaluate(text: &str) -> SpecificityReport {
    if has_vague_words(text) && !has_specific_indicators(text) {
        return SpecificityReport::vague(VAGUE_FEEDBACK);
    }

    if text.chars().count() < MIN_SPECIFIC_LEN {
        return SpecificityReport::vague(LENGTH_FEEDBACK);
    }

    SpecificityReport::specific()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vague_word_without_indicator_gets_example_feedback() {
        let report = evaluate("I will do better");
        assert!(!report.is_specific);
        assert!(report.feedback.unwrap().contains("10:30 PM"));
    }

    #[test]
    fn indicator_suppresses_the_vague_feedback_but_not_the_length_floor() {
        // "should" is vague, "6:30" is an indicator: the vague branch is
        // skipped, the length branch still fires on short text
        let report = evaluate("I should wake up at 6:30 daily");
        assert!(!report.is_specific);
        assert_eq!(
            report.feedback.as_deref(),
            Some("Add more details to make this commitment actionable")
        );
        // Same outcome without any vague words
        let report = evaluate("Wake up at 6:30 daily");
        assert!(!report.is_specific);
        assert_eq!(
            report.feedback.as_deref(),
            Some("Add more details to make this commitment actionable")
        );
    }

    #[test]
    fn long_text_without_vague_words_is_specific() {
        let text = "Lights out by 10:30 PM nightly, phone charging outside the bedroom, \
                    blackout curtains closed, thermostat set to 67 degrees at 9 PM.";
        assert!(text.len() >= 100);
        let report = evaluate(text);
        assert!(report.is_specific);
        assert!(report.feedback.is_none());
    }

    #[test]
    fn long_vague_text_with_indicator_is_specific() {
        let text = "I will sleep better by committing to lights out at 10:30 PM every night, \
                    with no screens in the bedroom after 10 PM and the alarm set for 6:00 AM.";
        assert!(text.len() >= 100);
        let report = evaluate(text);
        assert!(report.is_specific);
    }

    #[test]
    fn short_plain_text_hits_the_length_branch() {
        let report = evaluate("Walk after lunch");
        assert!(!report.is_specific);
        assert_eq!(
            report.feedback.unwrap(),
            "Add more details to make this commitment actionable"
        );
    }

    #[test]
    fn indicator_patterns_match_expected_forms() {
        assert!(has_specific_indicators("bed at 10:30"));
        assert!(has_specific_indicators("30 minutes of walking"));
        assert!(has_specific_indicators("250mg with breakfast"));
        assert!(has_specific_indicators("every morning"));
        assert!(has_specific_indicators("each evening"));
        assert!(!has_specific_indicators("walk in the park"));
    }

    #[test]
    fn vague_scan_is_case_insensitive() {
        assert!(has_vague_words("I SHOULD rest"));
        assert!(has_vague_words("Try To focus"));
        assert!(!has_vague_words("lights out at ten"));
    }
}
