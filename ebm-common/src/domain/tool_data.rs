//! Assessment payload: audit ratings, drains, commitments, first win
//!
//! These structs mirror the wire and storage shape of the `tool_data`
//! document. Validation is synchronous and collects every failing field so
//! the submit endpoint can report all issues at once.

use serde::{Deserialize, Serialize};

use crate::domain::pillar::Pillar;
use crate::domain::rating::Rating;
use crate::limits::{
    MIN_COMMITMENT, MIN_DRAIN, MIN_FIRST_WIN, MIN_HABITS, MIN_IMPACT, MIN_PARTNER, MIN_TIMES,
};
use crate::{Error, Result};

/// One field-level validation failure, keyed by dotted path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError { field: field.into(), message: message.into() }
    }
}

fn check_min_chars(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize, what: &str) {
    if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("{} must be at least {} characters", what, min),
        ));
    }
}

/// One pillar's audit entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarAudit {
    pub rating: i64,
    pub habits: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routines: Option<String>,
}

impl PillarAudit {
    pub fn new(rating: i64, habits: impl Into<String>) -> Self {
        PillarAudit {
            rating,
            habits: habits.into(),
            hours: None,
            minutes: None,
            patterns: None,
            routines: None,
        }
    }

    /// Validated rating value object for this entry
    pub fn rating(&self) -> Result<Rating> {
        Rating::new(self.rating)
    }

    fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        if let Err(e) = Rating::new(self.rating) {
            errors.push(FieldError::new(format!("{}.rating", path), e.to_string()));
        }
        check_min_chars(
            errors,
            &format!("{}.habits", path),
            &self.habits,
            MIN_HABITS,
            "Habits description",
        );
    }
}

/// All four pillar audits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSet {
    pub sleep: PillarAudit,
    pub food: PillarAudit,
    pub movement: PillarAudit,
    pub brain: PillarAudit,
}

impl AuditSet {
    pub fn get(&self, pillar: Pillar) -> &PillarAudit {
        match pillar {
            Pillar::Sleep => &self.sleep,
            Pillar::Food => &self.food,
            Pillar::Movement => &self.movement,
            Pillar::Brain => &self.brain,
        }
    }

    fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        for pillar in Pillar::ALL {
            self.get(pillar)
                .collect_errors(&format!("{}.{}", path, pillar), errors);
        }
    }
}

/// Energy drain identification answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyDrains {
    pub biggest_drain: String,
    pub impact: String,
    pub peak_times: String,
    pub crash_times: String,
}

impl EnergyDrains {
    /// Reduced vague-word test over the drain description only
    pub fn is_specific(&self) -> bool {
        let lower = self.biggest_drain.to_lowercase();
        !["better", "more", "less", "improve"]
            .iter()
            .any(|phrase| lower.contains(phrase))
    }

    fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        check_min_chars(
            errors,
            &format!("{}.biggest_drain", path),
            &self.biggest_drain,
            MIN_DRAIN,
            "Biggest drain",
        );
        check_min_chars(
            errors,
            &format!("{}.impact", path),
            &self.impact,
            MIN_IMPACT,
            "Impact description",
        );
        check_min_chars(
            errors,
            &format!("{}.peak_times", path),
            &self.peak_times,
            MIN_TIMES,
            "Peak times",
        );
        check_min_chars(
            errors,
            &format!("{}.crash_times", path),
            &self.crash_times,
            MIN_TIMES,
            "Crash times",
        );
    }
}

/// The four protocol commitments, one per pillar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolCommitments {
    pub sleep_commitment: String,
    pub food_commitment: String,
    pub movement_commitment: String,
    pub brain_commitment: String,
}

impl ProtocolCommitments {
    pub fn commitment_for(&self, pillar: Pillar) -> &str {
        match pillar {
            Pillar::Sleep => &self.sleep_commitment,
            Pillar::Food => &self.food_commitment,
            Pillar::Movement => &self.movement_commitment,
            Pillar::Brain => &self.brain_commitment,
        }
    }

    fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        for pillar in Pillar::ALL {
            check_min_chars(
                errors,
                &format!("{}.{}_commitment", path, pillar),
                self.commitment_for(pillar),
                MIN_COMMITMENT,
                &format!("{} commitment", pillar.label()),
            );
        }
    }
}

/// First 24-hour win commitment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstWin {
    pub action: String,
    /// Free text; never parsed into a real time value
    pub timeframe: String,
    pub accountability_partner: String,
}

impl FirstWin {
    fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        check_min_chars(
            errors,
            &format!("{}.action", path),
            &self.action,
            MIN_FIRST_WIN,
            "First Win action",
        );
        check_min_chars(
            errors,
            &format!("{}.timeframe", path),
            &self.timeframe,
            MIN_TIMES,
            "Timeframe",
        );
        check_min_chars(
            errors,
            &format!("{}.accountability_partner", path),
            &self.accountability_partner,
            MIN_PARTNER,
            "Accountability partner name",
        );
    }
}

/// Complete assessment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolData {
    pub audit: AuditSet,
    pub drains: EnergyDrains,
    pub protocols: ProtocolCommitments,
    pub first_win: FirstWin,
}

impl ToolData {
    /// Collect every failing field under the given path prefix
    pub fn collect_errors(&self, path: &str, errors: &mut Vec<FieldError>) {
        self.audit.collect_errors(&format!("{}.audit", path), errors);
        self.drains.collect_errors(&format!("{}.drains", path), errors);
        self.protocols
            .collect_errors(&format!("{}.protocols", path), errors);
        self.first_win
            .collect_errors(&format!("{}.first_win", path), errors);
    }

    /// Validate the whole payload; a payload that passes is fully populated
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.collect_errors("toolData", &mut errors);
        if let Some(first) = errors.first() {
            return Err(Error::InvalidInput(format!(
                "{}: {}",
                first.field, first.message
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A fully valid payload for tests
    pub fn valid_tool_data() -> ToolData {
        let habits = "Consistent evening routine with reading, lights out at the same \
                      time, and no caffeine after lunch on weekdays.";
        let commitment = "Lights out by 10:30 PM every night, no screens after 10 PM, \
                          bedroom temperature at 67F, blackout curtains closed, alarm at \
                          6:00 AM including weekends.";
        ToolData {
            audit: AuditSet {
                sleep: PillarAudit::new(7, habits),
                food: PillarAudit::new(5, habits),
                movement: PillarAudit::new(4, habits),
                brain: PillarAudit::new(8, habits),
            },
            drains: EnergyDrains {
                biggest_drain: "Late-night doomscrolling in bed keeps me up past midnight \
                                and wrecks the first three hours of the next morning, every \
                                single workday."
                    .to_string(),
                impact: "Groggy mornings, two lost deep-work hours".to_string(),
                peak_times: "9 AM to 11 AM".to_string(),
                crash_times: "2 PM to 4 PM".to_string(),
            },
            protocols: ProtocolCommitments {
                sleep_commitment: commitment.to_string(),
                food_commitment: commitment.to_string(),
                movement_commitment: commitment.to_string(),
                brain_commitment: commitment.to_string(),
            },
            first_win: FirstWin {
                action: "Tonight: phone on the kitchen charger at 9:45 PM, paper book in \
                         bed, lights out by 10:30 PM."
                    .to_string(),
                timeframe: "Tonight before 10:30 PM".to_string(),
                accountability_partner: "Sam".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::valid_tool_data;
    use super::*;

    #[test]
    fn valid_payload_passes() {
        assert!(valid_tool_data().validate().is_ok());
        let mut errors = Vec::new();
        valid_tool_data().collect_errors("toolData", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn collects_all_failing_fields_with_paths() {
        let mut data = valid_tool_data();
        data.audit.sleep.rating = 11;
        data.audit.food.habits = "too short".to_string();
        data.drains.impact = "x".to_string();
        data.first_win.accountability_partner = "J".to_string();

        let mut errors = Vec::new();
        data.collect_errors("toolData", &mut errors);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "toolData.audit.sleep.rating",
                "toolData.audit.food.habits",
                "toolData.drains.impact",
                "toolData.first_win.accountability_partner",
            ]
        );
        assert!(data.validate().is_err());
    }

    #[test]
    fn commitment_length_is_the_only_protocol_gate() {
        // 100+ chars of vague text still validates; specificity is advisory
        let mut data = valid_tool_data();
        data.protocols.sleep_commitment =
            format!("I will try to sleep better and improve my evenings {}", "x".repeat(60));
        assert!(data.protocols.sleep_commitment.len() >= 100);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn drain_specificity_uses_reduced_vague_list() {
        let mut data = valid_tool_data();
        assert!(data.drains.is_specific());
        data.drains.biggest_drain = format!("I need to sleep MORE {}", "x".repeat(100));
        assert!(!data.drains.is_specific());
    }

    #[test]
    fn wire_shape_round_trips() {
        let data = valid_tool_data();
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["audit"]["sleep"]["rating"].is_i64());
        assert!(json["audit"]["sleep"].get("hours").is_none());
        assert!(json["protocols"]["brain_commitment"].is_string());
        let back: ToolData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
