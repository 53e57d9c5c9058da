//! Interactive assessment wizard
//!
//! Five sections: energy audit, drains, protocols, first win, review.
//! Each answer updates the section's autosaved draft; continuation is
//! gated on field rules only, with specificity feedback shown as advice.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use uuid::Uuid;

use ebm_common::domain::protocol::examples_for;
use ebm_common::domain::specificity;
use ebm_common::domain::strength::{self, StrengthScores};
use ebm_common::domain::submission::{NewSubmission, Submission};
use ebm_common::domain::tool_data::{
    AuditSet, EnergyDrains, FirstWin, PillarAudit, ProtocolCommitments, ToolData,
};
use ebm_common::domain::{DraftStore, Pillar, Rating, SubmissionRepository};
use ebm_common::limits::{
    MIN_COMMITMENT, MIN_DRAIN, MIN_FIRST_WIN, MIN_HABITS, MIN_IMPACT, MIN_PARTNER, MIN_TIMES,
};
use ebm_common::{Error, Result};

use crate::autosave::{AutoSave, SaveState};
use crate::forms::FieldRule;
use crate::progress::ProgressTracker;

/// Draft storage keys, one per autosaved section
pub const KEY_AUDIT: &str = "energy_audit";
pub const KEY_DRAINS: &str = "energy_drains";
pub const KEY_PROTOCOLS: &str = "energy_protocols";
pub const KEY_FIRST_WIN: &str = "energy_first_win";

/// All draft keys, cleared after a successful submit
pub const ALL_KEYS: [&str; 4] = [KEY_AUDIT, KEY_DRAINS, KEY_PROTOCOLS, KEY_FIRST_WIN];

/// Section count used for progress percentage
pub const TOTAL_SECTIONS: u32 = 5;

/// Who is filling the assessment in
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub sprint_number: Option<String>,
}

/// Validate the assembled payload and hand it to the repository.
///
/// The repository returns the canonical stored copy (server-assigned id).
pub async fn submit<R: SubmissionRepository + ?Sized>(
    repo: &R,
    identity: &Identity,
    tool_data: ToolData,
) -> Result<Submission> {
    tool_data.validate()?;
    let submission = Submission::create(NewSubmission {
        user_id: identity.user_id.clone(),
        user_name: identity.user_name.clone(),
        company_id: identity.company_id.clone(),
        company_name: identity.company_name.clone(),
        sprint_number: identity.sprint_number.clone(),
        tool_data,
    });
    repo.save(submission).await
}

/// Drop every section draft after a successful submit
pub async fn clear_drafts<S: DraftStore + ?Sized>(store: &S) -> Result<()> {
    for key in ALL_KEYS {
        store.clear(key).await?;
    }
    Ok(())
}

/// Strength report over the drafted drains and commitments
pub fn strength_report(drains: &EnergyDrains, protocols: &ProtocolCommitments) -> StrengthScores {
    strength::score_protocol(
        [drains.biggest_drain.as_str()],
        Pillar::ALL.map(|p| protocols.commitment_for(p)),
    )
}

/// Interactive wizard session over stdin
pub struct Wizard<S: DraftStore + 'static, R: SubmissionRepository> {
    store: Arc<S>,
    repo: R,
    identity: Identity,
    progress: ProgressTracker,
    input: Lines<BufReader<Stdin>>,
}

impl<S: DraftStore + 'static, R: SubmissionRepository> Wizard<S, R> {
    pub fn new(store: Arc<S>, repo: R, identity: Identity) -> Self {
        Wizard {
            store,
            repo,
            identity,
            progress: ProgressTracker::new(TOTAL_SECTIONS),
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run all sections; returns the submission id on success, None if the
    /// user backed out at review
    pub async fn run(&mut self) -> Result<Option<Uuid>> {
        println!("EBM Energy Assessment");
        println!("=====================");

        let audit = self.audit_section().await?;
        let drains = self.drains_section().await?;
        let protocols = self.protocols_section().await?;
        let first_win = self.first_win_section().await?;

        let tool_data = ToolData { audit, drains, protocols, first_win };
        self.review_section(tool_data).await
    }

    async fn read_line(&mut self) -> Result<String> {
        match self.input.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Error::InvalidInput("Input closed".to_string())),
        }
    }

    /// Prompt until the rule passes. An empty answer keeps the draft value
    /// when one exists.
    async fn prompt(&mut self, label: &str, rule: FieldRule, prior: Option<&str>) -> Result<String> {
        loop {
            match prior {
                Some(prior) => println!("{} [enter keeps draft: {:.40}...]", label, prior),
                None => println!("{}", label),
            }
            let mut answer = self.read_line().await?;
            if answer.is_empty() {
                if let Some(prior) = prior {
                    answer = prior.to_string();
                }
            }
            match rule.check(&answer) {
                Some(message) => println!("  ! {}", message),
                None => return Ok(answer),
            }
        }
    }

    /// Prompt for a 1-10 rating
    async fn prompt_rating(&mut self, label: &str) -> Result<i64> {
        loop {
            println!("{}", label);
            let answer = self.read_line().await?;
            match answer.parse::<i64>().map_err(|_| ()).and_then(|value| {
                Rating::new(value).map(|r| r.value()).map_err(|_| ())
            }) {
                Ok(value) => return Ok(value),
                Err(()) => println!("  ! Rating must be a whole number between 1 and 10"),
            }
        }
    }

    /// Advisory specificity feedback; never blocks
    fn show_specificity_advice(&self, text: &str, pillar: Option<Pillar>) {
        let report = specificity::evaluate(text);
        if let Some(feedback) = report.feedback {
            println!("  ~ {}", feedback);
            if let Some(pillar) = pillar {
                println!("  ~ Strong example: {}", examples_for(pillar).good);
            }
        }
    }

    fn report_save_state(&self, autosave: &AutoSave<S>) {
        if let SaveState::Error(message) = autosave.state() {
            println!("  ! Draft not saved: {}", message);
        }
    }

    async fn draft_map(&self, key: &str) -> Map<String, Value> {
        match self.store.load(key).await {
            Ok(Some(Value::Object(map))) => map,
            _ => Map::new(),
        }
    }

    fn draft_str<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
        map.get(field).and_then(Value::as_str)
    }

    fn finish_section(&mut self, section: u32, title: &str) {
        self.progress.mark_complete(section);
        println!("-- {} complete ({}%)", title, self.progress.percentage());
    }

    async fn audit_pillar(
        &mut self,
        pillar: Pillar,
        draft: &Map<String, Value>,
        snapshot: &mut Map<String, Value>,
        autosave: &mut AutoSave<S>,
    ) -> Result<PillarAudit> {
        let rating = self
            .prompt_rating(&format!("Rate your {} energy (1-10):", pillar.label()))
            .await?;
        snapshot.insert(format!("{}_rating", pillar), json!(rating));
        autosave.update(Value::Object(snapshot.clone()));

        let habits_field = format!("{}_habits", pillar);
        let prior = Self::draft_str(draft, &habits_field).map(str::to_string);
        let habits = self
            .prompt(
                &format!("Describe your current {} habits:", pillar.label()),
                FieldRule::min_length(MIN_HABITS),
                prior.as_deref(),
            )
            .await?;
        snapshot.insert(habits_field, json!(habits));
        autosave.update(Value::Object(snapshot.clone()));
        self.report_save_state(autosave);

        Ok(PillarAudit::new(rating, habits))
    }

    async fn audit_section(&mut self) -> Result<AuditSet> {
        println!();
        println!("Section 1 of {}: Energy Audit", TOTAL_SECTIONS);

        let draft = self.draft_map(KEY_AUDIT).await;
        let mut autosave = AutoSave::new(Arc::clone(&self.store), KEY_AUDIT);
        let mut snapshot = draft.clone();

        let set = AuditSet {
            sleep: self
                .audit_pillar(Pillar::Sleep, &draft, &mut snapshot, &mut autosave)
                .await?,
            food: self
                .audit_pillar(Pillar::Food, &draft, &mut snapshot, &mut autosave)
                .await?,
            movement: self
                .audit_pillar(Pillar::Movement, &draft, &mut snapshot, &mut autosave)
                .await?,
            brain: self
                .audit_pillar(Pillar::Brain, &draft, &mut snapshot, &mut autosave)
                .await?,
        };

        self.finish_section(1, "Energy Audit");
        Ok(set)
    }

    async fn drains_section(&mut self) -> Result<EnergyDrains> {
        println!();
        println!("Section 2 of {}: Energy Drains", TOTAL_SECTIONS);

        let draft = self.draft_map(KEY_DRAINS).await;
        let mut autosave = AutoSave::new(Arc::clone(&self.store), KEY_DRAINS);
        let mut snapshot = draft.clone();

        let biggest_drain = self
            .drain_field(&draft, &mut snapshot, &mut autosave, "biggest_drain",
                "What is your biggest energy drain?", MIN_DRAIN)
            .await?;
        self.show_specificity_advice(&biggest_drain, None);
        let impact = self
            .drain_field(&draft, &mut snapshot, &mut autosave, "impact",
                "What does it cost you?", MIN_IMPACT)
            .await?;
        let peak_times = self
            .drain_field(&draft, &mut snapshot, &mut autosave, "peak_times",
                "When is your energy at its peak?", MIN_TIMES)
            .await?;
        let crash_times = self
            .drain_field(&draft, &mut snapshot, &mut autosave, "crash_times",
                "When does your energy crash?", MIN_TIMES)
            .await?;

        let drains = EnergyDrains { biggest_drain, impact, peak_times, crash_times };

        self.finish_section(2, "Energy Drains");
        Ok(drains)
    }

    async fn drain_field(
        &mut self,
        draft: &Map<String, Value>,
        snapshot: &mut Map<String, Value>,
        autosave: &mut AutoSave<S>,
        field: &str,
        label: &str,
        min: usize,
    ) -> Result<String> {
        let prior = Self::draft_str(draft, field).map(str::to_string);
        let answer = self
            .prompt(label, FieldRule::min_length(min), prior.as_deref())
            .await?;
        snapshot.insert(field.to_string(), json!(answer));
        autosave.update(Value::Object(snapshot.clone()));
        self.report_save_state(autosave);
        Ok(answer)
    }

    async fn protocols_section(&mut self) -> Result<ProtocolCommitments> {
        println!();
        println!("Section 3 of {}: Protocol Design", TOTAL_SECTIONS);

        let draft = self.draft_map(KEY_PROTOCOLS).await;
        let mut autosave = AutoSave::new(Arc::clone(&self.store), KEY_PROTOCOLS);
        let mut snapshot = draft.clone();
        let protocols = ProtocolCommitments {
            sleep_commitment: self
                .commitment_field(Pillar::Sleep, &draft, &mut snapshot, &mut autosave)
                .await?,
            food_commitment: self
                .commitment_field(Pillar::Food, &draft, &mut snapshot, &mut autosave)
                .await?,
            movement_commitment: self
                .commitment_field(Pillar::Movement, &draft, &mut snapshot, &mut autosave)
                .await?,
            brain_commitment: self
                .commitment_field(Pillar::Brain, &draft, &mut snapshot, &mut autosave)
                .await?,
        };

        self.finish_section(3, "Protocol Design");
        Ok(protocols)
    }

    async fn commitment_field(
        &mut self,
        pillar: Pillar,
        draft: &Map<String, Value>,
        snapshot: &mut Map<String, Value>,
        autosave: &mut AutoSave<S>,
    ) -> Result<String> {
        let field = format!("{}_commitment", pillar);
        let prior = Self::draft_str(draft, &field).map(str::to_string);
        let commitment = self
            .prompt(
                &format!("Your {} protocol commitment:", pillar.label()),
                FieldRule::min_length(MIN_COMMITMENT),
                prior.as_deref(),
            )
            .await?;
        self.show_specificity_advice(&commitment, Some(pillar));
        snapshot.insert(field, json!(commitment));
        autosave.update(Value::Object(snapshot.clone()));
        self.report_save_state(autosave);
        Ok(commitment)
    }

    async fn first_win_section(&mut self) -> Result<FirstWin> {
        println!();
        println!("Section 4 of {}: First Win", TOTAL_SECTIONS);

        let draft = self.draft_map(KEY_FIRST_WIN).await;
        let mut autosave = AutoSave::new(Arc::clone(&self.store), KEY_FIRST_WIN);
        let mut snapshot = draft.clone();

        let action = self
            .prompt(
                "One action you will take in the next 24 hours:",
                FieldRule::min_length(MIN_FIRST_WIN),
                Self::draft_str(&draft, "action"),
            )
            .await?;
        snapshot.insert("action".to_string(), json!(action));
        autosave.update(Value::Object(snapshot.clone()));

        let timeframe = self
            .prompt(
                "When exactly will you do it?",
                FieldRule::min_length(MIN_TIMES),
                Self::draft_str(&draft, "timeframe"),
            )
            .await?;
        snapshot.insert("timeframe".to_string(), json!(timeframe));
        autosave.update(Value::Object(snapshot.clone()));

        let partner = self
            .prompt(
                "Who will hold you accountable?",
                FieldRule::min_length(MIN_PARTNER),
                Self::draft_str(&draft, "accountability_partner"),
            )
            .await?;
        snapshot.insert("accountability_partner".to_string(), json!(partner));
        autosave.update(Value::Object(snapshot.clone()));
        self.report_save_state(&autosave);

        self.finish_section(4, "First Win");
        Ok(FirstWin { action, timeframe, accountability_partner: partner })
    }

    async fn review_section(&mut self, tool_data: ToolData) -> Result<Option<Uuid>> {
        println!();
        println!("Section 5 of {}: Review & Submit", TOTAL_SECTIONS);

        for pillar in Pillar::ALL {
            let audit = tool_data.audit.get(pillar);
            println!("  {} rating: {}/10", pillar.label(), audit.rating);
        }

        let scores = strength_report(&tool_data.drains, &tool_data.protocols);
        println!(
            "  Protocol strength: {} (drains {}, protocols {}) - {}",
            scores.overall_score,
            scores.drain_score,
            scores.protocol_score,
            scores.tier.label()
        );
        for advice in strength::suggestions(&scores) {
            println!("  ~ {}", advice);
        }

        println!("Submit now? (y/n)");
        let answer = self.read_line().await?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Not submitted. Your drafts are saved on this device.");
            return Ok(None);
        }

        let persisted = submit(&self.repo, &self.identity, tool_data).await?;
        info!("Submission stored as {}", persisted.id);

        clear_drafts(self.store.as_ref()).await?;
        self.finish_section(5, "Review & Submit");
        println!("Submitted. Reference id: {}", persisted.id);

        Ok(Some(persisted.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ebm_common::domain::submission::SubmissionStatus;
    use std::sync::Mutex;

    struct StubRepo {
        saved: Mutex<Vec<Submission>>,
        assigned: Uuid,
    }

    impl StubRepo {
        fn new() -> Self {
            StubRepo { saved: Mutex::new(Vec::new()), assigned: Uuid::new_v4() }
        }
    }

    #[async_trait]
    impl SubmissionRepository for StubRepo {
        async fn save(&self, submission: Submission) -> Result<Submission> {
            let canonical = Submission { id: self.assigned, ..submission.clone() };
            self.saved.lock().unwrap().push(submission);
            Ok(canonical)
        }

        async fn find_by_company(
            &self,
            _company_id: &str,
            _status: SubmissionStatus,
            _limit: i64,
        ) -> Result<Vec<Submission>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Submission>> {
            Ok(None)
        }
    }

    fn identity() -> Identity {
        Identity {
            user_id: "user@example.com".to_string(),
            user_name: "Test User".to_string(),
            company_id: "acme-corp".to_string(),
            company_name: None,
            sprint_number: None,
        }
    }

    fn valid_tool_data() -> ToolData {
        let habits = "Consistent evening routine with reading, lights out at the same \
                      time, and no caffeine after lunch on weekdays.";
        let commitment = "Lights out by 10:30 PM every night, no screens after 10 PM, \
                          bedroom temperature at 67F, blackout curtains closed.";
        ToolData {
            audit: AuditSet {
                sleep: PillarAudit::new(7, habits),
                food: PillarAudit::new(5, habits),
                movement: PillarAudit::new(4, habits),
                brain: PillarAudit::new(8, habits),
            },
            drains: EnergyDrains {
                biggest_drain: "Late-night doomscrolling in bed keeps me up past midnight \
                                and wrecks the first three hours of the next morning."
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

    #[tokio::test]
    async fn submit_returns_the_canonical_id() {
        let repo = StubRepo::new();
        let persisted = submit(&repo, &identity(), valid_tool_data()).await.unwrap();
        assert_eq!(persisted.id, repo.assigned);
        assert!(persisted.is_complete());
        assert_eq!(repo.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_refuses_invalid_payloads_before_the_repository() {
        let repo = StubRepo::new();
        let mut tool_data = valid_tool_data();
        tool_data.protocols.sleep_commitment = "too short".to_string();

        assert!(submit(&repo, &identity(), tool_data).await.is_err());
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_drafts_removes_every_section_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::storage::FileDraftStore::new(dir.path());
        for key in ALL_KEYS {
            store.save(key, &json!({"some": "draft"})).await.unwrap();
        }

        clear_drafts(&store).await.unwrap();
        for key in ALL_KEYS {
            assert_eq!(store.load(key).await.unwrap(), None);
        }
    }

    #[test]
    fn strength_report_scores_the_drafted_texts() {
        let tool_data = valid_tool_data();
        let scores = strength_report(&tool_data.drains, &tool_data.protocols);
        // Commitments carry clock times; the drain text has none and is
        // long but vague-free, so it scores on length alone
        assert_eq!(scores.protocol_score, 100);
        assert_eq!(scores.drain_score, 100);
    }
}
