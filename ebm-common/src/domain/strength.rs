//! Advisory strength scoring for a drafted protocol
//!
//! Scores drain descriptions and protocol commitments through the
//! specificity checker (100 for specific, 50 otherwise) and labels the
//! overall result. Shown to the user before submit; never gates anything.

use serde::Serialize;

use crate::domain::specificity;

/// Tier label for an overall strength score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrengthTier {
    CategoryDefining,
    Bold,
    GettingThere,
    NeedsWork,
}

impl StrengthTier {
    pub fn for_score(score: u64) -> Self {
        match score {
            80.. => StrengthTier::CategoryDefining,
            65..=79 => StrengthTier::Bold,
            50..=64 => StrengthTier::GettingThere,
            _ => StrengthTier::NeedsWork,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::CategoryDefining => "CATEGORY-DEFINING",
            StrengthTier::Bold => "BOLD",
            StrengthTier::GettingThere => "GETTING THERE",
            StrengthTier::NeedsWork => "NEEDS WORK",
        }
    }
}

/// Strength report over one drafted protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthScores {
    pub drain_score: u64,
    pub protocol_score: u64,
    pub overall_score: u64,
    pub tier: StrengthTier,
}

fn specificity_points(text: &str) -> u64 {
    if specificity::evaluate(text).is_specific {
        100
    } else {
        50
    }
}

fn rounded_mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    ((total as f64) / (count as f64)).round() as u64
}

/// Mean specificity score over drain descriptions; 0 for empty input
pub fn drain_specificity_score<'a, I>(descriptions: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0;
    let mut count = 0;
    for text in descriptions {
        total += specificity_points(text);
        count += 1;
    }
    rounded_mean(total, count)
}

/// Mean specificity score over non-empty commitment texts; 0 if all empty
pub fn protocol_clarity_score<'a, I>(commitments: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0;
    let mut count = 0;
    for text in commitments {
        if !text.is_empty() {
            total += specificity_points(text);
            count += 1;
        }
    }
    rounded_mean(total, count)
}

/// Combine the two component scores into the full report
pub fn score_protocol<'a, D, C>(drains: D, commitments: C) -> StrengthScores
where
    D: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    let drain_score = drain_specificity_score(drains);
    let protocol_score = protocol_clarity_score(commitments);
    let overall_score = ((drain_score + protocol_score) as f64 / 2.0).round() as u64;
    StrengthScores {
        drain_score,
        protocol_score,
        overall_score,
        tier: StrengthTier::for_score(overall_score),
    }
}

/// Fixed improvement advice keyed off the component scores
pub fn suggestions(scores: &StrengthScores) -> Vec<&'static str> {
    let mut advice = Vec::new();
    if scores.drain_score < 60 {
        advice.push(
            "Make your energy drains more specific - add exact times, quantities, or situations",
        );
    }
    if scores.protocol_score < 60 {
        advice.push("Add specific details to your protocols - include when, where, and how much");
    }
    if scores.overall_score < 70 {
        advice.push(
            "Replace vague words like \"better\", \"more\", \"try\" with concrete actions and numbers",
        );
    }
    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIFIC: &str = "Lights out by 10:30 PM nightly, phone on the kitchen charger at \
                            9:45 PM, blackout curtains closed, thermostat at 67 degrees.";
    const VAGUE: &str = "I should try to sleep better";

    #[test]
    fn scores_are_100_or_50_per_text() {
        assert_eq!(drain_specificity_score([SPECIFIC]), 100);
        assert_eq!(drain_specificity_score([VAGUE]), 50);
        assert_eq!(drain_specificity_score([SPECIFIC, VAGUE]), 75);
        assert_eq!(drain_specificity_score([]), 0);
    }

    #[test]
    fn clarity_skips_empty_commitments() {
        assert_eq!(protocol_clarity_score([SPECIFIC, "", "", ""]), 100);
        assert_eq!(protocol_clarity_score(["", "", "", ""]), 0);
    }

    #[test]
    fn overall_is_rounded_midpoint_with_tier() {
        let scores = score_protocol([SPECIFIC, VAGUE], [SPECIFIC]);
        assert_eq!(scores.drain_score, 75);
        assert_eq!(scores.protocol_score, 100);
        assert_eq!(scores.overall_score, 88);
        assert_eq!(scores.tier, StrengthTier::CategoryDefining);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(StrengthTier::for_score(80), StrengthTier::CategoryDefining);
        assert_eq!(StrengthTier::for_score(79), StrengthTier::Bold);
        assert_eq!(StrengthTier::for_score(65), StrengthTier::Bold);
        assert_eq!(StrengthTier::for_score(64), StrengthTier::GettingThere);
        assert_eq!(StrengthTier::for_score(50), StrengthTier::GettingThere);
        assert_eq!(StrengthTier::for_score(49), StrengthTier::NeedsWork);
    }

    #[test]
    fn suggestions_trigger_on_low_scores() {
        let weak = score_protocol([VAGUE], [VAGUE, VAGUE]);
        assert_eq!(weak.drain_score, 50);
        assert_eq!(suggestions(&weak).len(), 3);

        let strong = score_protocol([SPECIFIC], [SPECIFIC]);
        assert!(suggestions(&strong).is_empty());
    }
}
