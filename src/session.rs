use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::config::AffectConfig;
use crate::error::AffectError;
use crate::messages::MessageSelector;
use crate::policy::PolicyEngine;
use crate::random::{RandomSource, ThreadRandom};
use crate::scoring::{EngagementScorer, FrustrationScorer, StressScorer};
use crate::types::{
    ActivityType, BreakUrgency, DifficultyLevel, EmotionalState, EncouragementMessage,
    LearningActivity, MessageCategory, PriorAssessment,
};

/// Owns one learner's activity log and the snapshot derived from it.
///
/// Everything here is synchronous: each append or tick runs the full
/// scoring and policy pipeline to completion before returning. The session
/// is the only owner of its state, so no locking is involved.
pub struct AffectSession {
    config: AffectConfig,
    display_name: String,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
    frustration: FrustrationScorer,
    stress: StressScorer,
    engagement: EngagementScorer,
    policy: PolicyEngine,
    selector: MessageSelector,
    log: Vec<LearningActivity>,
    session_start: DateTime<Utc>,
    consecutive_wrong: u32,
    seeded: bool,
    state: EmotionalState,
    suggested_difficulty: DifficultyLevel,
    break_urgency: BreakUrgency,
    active_message: Option<EncouragementMessage>,
}

impl AffectSession {
    pub fn new(config: AffectConfig, display_name: impl Into<String>) -> Self {
        Self::with_providers(
            config,
            display_name,
            Box::new(SystemClock),
            Box::new(ThreadRandom),
        )
    }

    pub fn with_providers(
        config: AffectConfig,
        display_name: impl Into<String>,
        clock: Box<dyn Clock>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let session_start = clock.now();
        Self {
            frustration: FrustrationScorer::new(config.frustration.clone()),
            stress: StressScorer::new(config.stress.clone()),
            engagement: EngagementScorer::new(config.engagement.clone()),
            policy: PolicyEngine::new(config.policy.clone()),
            selector: MessageSelector,
            config,
            display_name: display_name.into(),
            clock,
            random,
            log: Vec::new(),
            session_start,
            consecutive_wrong: 0,
            seeded: false,
            state: EmotionalState::default(),
            suggested_difficulty: DifficultyLevel::Medium,
            break_urgency: BreakUrgency::None,
            active_message: None,
        }
    }

    /// Records one activity and returns the freshly recomputed snapshot.
    pub fn append_activity(
        &mut self,
        activity: LearningActivity,
    ) -> Result<EmotionalState, AffectError> {
        if let Err(err) = activity.validate() {
            tracing::warn!(error = %err, "rejected malformed activity");
            return Err(err);
        }

        // Event-triggered message candidates are judged against the counter
        // as it stood before this activity.
        let event_category = match (activity.activity_type, activity.is_correct) {
            (ActivityType::QuestionAnswered, Some(true)) => {
                self.consecutive_wrong = 0;
                let roll = self.random.sample();
                (roll < self.config.messages.celebration_probability)
                    .then_some(MessageCategory::Celebration)
            }
            (ActivityType::QuestionAnswered, Some(false)) => {
                let triggered = self.consecutive_wrong >= self.config.messages.consecutive_wrong_trigger;
                self.consecutive_wrong += 1;
                triggered.then_some(MessageCategory::Motivation)
            }
            _ => None,
        };

        self.log.push(activity);
        self.recompute();

        let category = match self.policy.message_category(&self.state, self.break_urgency) {
            // A break in force silences everything else.
            Some(MessageCategory::Break) => Some(MessageCategory::Break),
            state_category => event_category.or(state_category),
        };
        if let Some(category) = category {
            self.active_message = Some(self.selector.select(
                category,
                self.break_urgency,
                &self.display_name,
                self.random.as_mut(),
            ));
        }

        tracing::debug!(
            frustration = self.state.frustration_level,
            stress = self.state.stress_level,
            engagement = self.state.engagement_level,
            confidence = self.state.confidence_level,
            difficulty = self.suggested_difficulty.as_str(),
            "snapshot recomputed"
        );

        Ok(self.state)
    }

    /// Coarse periodic re-evaluation. Lets the time-driven break trigger
    /// fire (or escalate) between activities without a background clock.
    pub fn tick(&mut self) {
        let prev_urgency = self.break_urgency;
        if self.log.is_empty() {
            let minutes = self.session_minutes();
            self.break_urgency = self.policy.break_urgency(&self.state, minutes);
        } else {
            self.recompute();
        }

        if let Some(category) = self.policy.message_category(&self.state, self.break_urgency) {
            // Escalating urgency re-selects so the wording firms up.
            let already_shown = self.break_urgency == prev_urgency
                && self
                    .active_message
                    .as_ref()
                    .is_some_and(|m| m.category == category);
            if !already_shown {
                self.active_message = Some(self.selector.select(
                    category,
                    self.break_urgency,
                    &self.display_name,
                    self.random.as_mut(),
                ));
            }
        }
    }

    /// Seeds the initial snapshot from a prior assessment. Only valid once,
    /// and only before any activity has been recorded.
    pub fn seed_from_prior_assessment(
        &mut self,
        prior: &PriorAssessment,
    ) -> Result<(), AffectError> {
        if !self.log.is_empty() {
            return Err(AffectError::SeedRejected(
                "activities already recorded this session".to_string(),
            ));
        }
        if self.seeded {
            return Err(AffectError::SeedRejected(
                "session already seeded".to_string(),
            ));
        }

        let wrong_pct = if prior.total_questions == 0 {
            0.0
        } else {
            100.0 * prior.wrong_count as f64 / prior.total_questions as f64
        };
        let frustration = trunc_clamp(0.8 * wrong_pct, 0, 80);
        let stress = if prior.time_taken_minutes <= 45.0 {
            30
        } else {
            trunc_clamp(50.0 + (prior.time_taken_minutes - 45.0), 0, 70)
        };
        let engagement = trunc_clamp(prior.percentage_score + 20.0, 40, 100);
        let confidence = trunc_clamp(prior.percentage_score, 20, 95);

        self.state = EmotionalState {
            frustration_level: frustration,
            stress_level: stress,
            engagement_level: engagement,
            confidence_level: confidence,
        };
        self.suggested_difficulty = self.policy.suggest_difficulty(&self.state);
        self.break_urgency = self
            .policy
            .break_urgency(&self.state, self.session_minutes());
        self.seeded = true;

        tracing::info!(
            frustration,
            stress,
            engagement,
            confidence,
            "seeded from prior assessment"
        );
        Ok(())
    }

    /// Clears the log, counters, message, and elapsed-time baseline.
    pub fn reset_session(&mut self) {
        self.log.clear();
        self.consecutive_wrong = 0;
        self.seeded = false;
        self.session_start = self.clock.now();
        self.state = EmotionalState::default();
        self.suggested_difficulty = DifficultyLevel::Medium;
        self.break_urgency = BreakUrgency::None;
        self.active_message = None;
        tracing::info!("session reset");
    }

    pub fn state(&self) -> EmotionalState {
        self.state
    }

    pub fn suggested_difficulty(&self) -> DifficultyLevel {
        self.suggested_difficulty
    }

    pub fn break_urgency(&self) -> BreakUrgency {
        self.break_urgency
    }

    pub fn active_message(&self) -> Option<&EncouragementMessage> {
        self.active_message.as_ref()
    }

    /// Drops the active message. Has no effect on scores.
    pub fn dismiss_message(&mut self) {
        self.active_message = None;
    }

    pub fn activities(&self) -> &[LearningActivity] {
        &self.log
    }

    pub fn consecutive_wrong(&self) -> u32 {
        self.consecutive_wrong
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn session_minutes(&self) -> f64 {
        let elapsed = self.clock.now() - self.session_start;
        elapsed.num_seconds() as f64 / 60.0
    }

    fn recompute(&mut self) {
        let now = self.clock.now();
        let minutes = self.session_minutes();

        let frustration = self.frustration.score(tail(&self.log, self.frustration.window()));
        let stress = self
            .stress
            .score(tail(&self.log, self.stress.window()), minutes);
        let engagement = self
            .engagement
            .score(tail(&self.log, self.engagement.window()), now);

        self.state = EmotionalState::derived(frustration, stress, engagement);
        self.suggested_difficulty = self.policy.suggest_difficulty(&self.state);
        self.break_urgency = self.policy.break_urgency(&self.state, minutes);
    }
}

fn tail(log: &[LearningActivity], window: usize) -> &[LearningActivity] {
    &log[log.len().saturating_sub(window)..]
}

fn trunc_clamp(value: f64, lo: i64, hi: i64) -> u8 {
    (value as i64).clamp(lo, hi) as u8
}
