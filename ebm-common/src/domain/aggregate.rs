//! Batch statistics over submission lists for the dashboards

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::pillar::Pillar;
use crate::domain::submission::Submission;

/// Per-pillar mean ratings, one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarAverages {
    pub sleep: f64,
    pub food: f64,
    pub movement: f64,
    pub brain: f64,
}

impl PillarAverages {
    pub const ZERO: PillarAverages =
        PillarAverages { sleep: 0.0, food: 0.0, movement: 0.0, brain: 0.0 };

    pub fn get(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Sleep => self.sleep,
            Pillar::Food => self.food,
            Pillar::Movement => self.movement,
            Pillar::Brain => self.brain,
        }
    }
}

/// One normalized drain string and how many submissions share it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrainCount {
    pub drain: String,
    pub count: u64,
}

/// Normalized form used to group drains: lowercase, trimmed, first 100 chars
pub fn normalize_drain(text: &str) -> String {
    text.to_lowercase().trim().chars().take(100).collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean rating per pillar, rounded to one decimal; all zero for empty input
pub fn pillar_averages(submissions: &[Submission]) -> PillarAverages {
    if submissions.is_empty() {
        return PillarAverages::ZERO;
    }

    let count = submissions.len() as f64;
    let mean = |pillar: Pillar| {
        let total: i64 = submissions
            .iter()
            .map(|s| s.tool_data.audit.get(pillar).rating)
            .sum();
        round1(total as f64 / count)
    };

    PillarAverages {
        sleep: mean(Pillar::Sleep),
        food: mean(Pillar::Food),
        movement: mean(Pillar::Movement),
        brain: mean(Pillar::Brain),
    }
}

/// Top 5 drains by descending count over normalized drain text.
///
/// Counting uses an insertion-ordered map and a stable sort, so ties keep
/// first-encounter order.
pub fn common_drains(submissions: &[Submission]) -> Vec<DrainCount> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();

    for submission in submissions {
        let drain = normalize_drain(&submission.tool_data.drains.biggest_drain);
        *counts.entry(drain).or_insert(0) += 1;
    }

    let mut drains: Vec<DrainCount> = counts
        .into_iter()
        .map(|(drain, count)| DrainCount { drain, count })
        .collect();
    drains.sort_by(|a, b| b.count.cmp(&a.count));
    drains.truncate(5);
    drains
}

/// Cross-member patterns for the team comparison view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPatterns {
    pub lowest_pillar: Pillar,
    pub highest_pillar: Pillar,
    /// Normalized drains named by at least two members, first three
    pub shared_drains: Vec<String>,
}

/// Patterns over a selected team; needs at least two submissions.
///
/// Pillar ties resolve to the first pillar in canonical order.
pub fn team_patterns(submissions: &[Submission]) -> Option<TeamPatterns> {
    if submissions.len() < 2 {
        return None;
    }

    let averages = pillar_averages(submissions);
    let mut lowest = Pillar::Sleep;
    let mut highest = Pillar::Sleep;
    for pillar in Pillar::ALL {
        if averages.get(pillar) < averages.get(lowest) {
            lowest = pillar;
        }
        if averages.get(pillar) > averages.get(highest) {
            highest = pillar;
        }
    }

    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for submission in submissions {
        let drain = normalize_drain(&submission.tool_data.drains.biggest_drain);
        *counts.entry(drain).or_insert(0) += 1;
    }
    let shared_drains: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(drain, _)| drain)
        .take(3)
        .collect();

    Some(TeamPatterns { lowest_pillar: lowest, highest_pillar: highest, shared_drains })
}

/// Percentage (nearest integer) of submissions that are fully completed
pub fn completion_rate(submissions: &[Submission]) -> u64 {
    if submissions.is_empty() {
        return 0;
    }

    let completed = submissions.iter().filter(|s| s.is_complete()).count();
    ((completed as f64 / submissions.len() as f64) * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::{NewSubmission, SubmissionStatus};
    use crate::domain::tool_data::fixtures::valid_tool_data;

    fn submission_with(ratings: [i64; 4], drain: &str) -> Submission {
        let mut tool_data = valid_tool_data();
        tool_data.audit.sleep.rating = ratings[0];
        tool_data.audit.food.rating = ratings[1];
        tool_data.audit.movement.rating = ratings[2];
        tool_data.audit.brain.rating = ratings[3];
        tool_data.drains.biggest_drain = drain.to_string();
        Submission::create(NewSubmission {
            user_id: "user@example.com".to_string(),
            user_name: "Test User".to_string(),
            company_id: "acme-corp".to_string(),
            company_name: None,
            sprint_number: None,
            tool_data,
        })
    }

    #[test]
    fn empty_input_yields_zero_averages() {
        assert_eq!(pillar_averages(&[]), PillarAverages::ZERO);
    }

    #[test]
    fn single_submission_averages_equal_its_ratings() {
        let averages = pillar_averages(&[submission_with([7, 5, 4, 8], "meetings")]);
        assert_eq!(averages.sleep, 7.0);
        assert_eq!(averages.food, 5.0);
        assert_eq!(averages.movement, 4.0);
        assert_eq!(averages.brain, 8.0);
    }

    #[test]
    fn averages_round_to_one_decimal_half_up() {
        // sleep: (7 + 8 + 8) / 3 = 7.666... -> 7.7; food: (5 + 6 + 6) / 3 = 5.666... -> 5.7
        // movement: (4 + 5 + 4) / 3 = 4.333... -> 4.3; brain: (1 + 2 + 2) / 3 = 1.666... -> 1.7
        let averages = pillar_averages(&[
            submission_with([7, 5, 4, 1], "a"),
            submission_with([8, 6, 5, 2], "b"),
            submission_with([8, 6, 4, 2], "c"),
        ]);
        assert_eq!(averages.sleep, 7.7);
        assert_eq!(averages.food, 5.7);
        assert_eq!(averages.movement, 4.3);
        assert_eq!(averages.brain, 1.7);

        // Exact half rounds up: (4 + 5) / 2 = 4.5 -> 4.5 stays, (4 + 5 + 4 + 5) /4 = 4.5
        let averages = pillar_averages(&[
            submission_with([4, 1, 1, 1], "a"),
            submission_with([5, 1, 1, 1], "b"),
        ]);
        assert_eq!(averages.sleep, 4.5);
    }

    #[test]
    fn shared_drains_count_and_order() {
        let shared = "  Endless Slack pings  ";
        let submissions = vec![
            submission_with([5, 5, 5, 5], shared),
            submission_with([5, 5, 5, 5], "back-to-back meetings"),
            submission_with([5, 5, 5, 5], "endless slack pings"),
        ];
        let drains = common_drains(&submissions);
        assert_eq!(drains.len(), 2);
        assert_eq!(drains[0].drain, "endless slack pings");
        assert_eq!(drains[0].count, 2);
        assert_eq!(drains[1].drain, "back-to-back meetings");
        assert_eq!(drains[1].count, 1);
    }

    #[test]
    fn drain_ties_keep_encounter_order_and_top_five() {
        let submissions: Vec<Submission> = ["f", "e", "d", "c", "b", "a"]
            .iter()
            .map(|d| submission_with([5, 5, 5, 5], d))
            .collect();
        let drains = common_drains(&submissions);
        assert_eq!(drains.len(), 5);
        let order: Vec<&str> = drains.iter().map(|d| d.drain.as_str()).collect();
        assert_eq!(order, vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn drain_normalization_truncates_to_100_chars() {
        let long = "x".repeat(150);
        let drains = common_drains(&[submission_with([5, 5, 5, 5], &long)]);
        assert_eq!(drains[0].drain.chars().count(), 100);
    }

    #[test]
    fn team_patterns_need_two_submissions() {
        assert!(team_patterns(&[submission_with([5, 5, 5, 5], "a")]).is_none());
    }

    #[test]
    fn team_patterns_find_extremes_and_shared_drains() {
        let submissions = vec![
            submission_with([2, 6, 8, 5], "slack pings"),
            submission_with([3, 7, 9, 5], "slack pings"),
            submission_with([2, 6, 9, 5], "meetings"),
        ];
        let patterns = team_patterns(&submissions).unwrap();
        assert_eq!(patterns.lowest_pillar, Pillar::Sleep);
        assert_eq!(patterns.highest_pillar, Pillar::Movement);
        assert_eq!(patterns.shared_drains, vec!["slack pings".to_string()]);
    }

    #[test]
    fn completion_rate_mixed_list() {
        let mut submissions = vec![
            submission_with([5, 5, 5, 5], "a"),
            submission_with([5, 5, 5, 5], "b"),
            submission_with([5, 5, 5, 5], "c"),
            submission_with([5, 5, 5, 5], "d"),
        ];
        submissions[3].status = SubmissionStatus::Draft;
        assert_eq!(completion_rate(&submissions), 75);
        assert_eq!(completion_rate(&[]), 0);
    }
}
