use crate::config::PolicyThresholds;
use crate::types::{BreakUrgency, DifficultyLevel, EmotionalState, MessageCategory};

/// Maps the current snapshot to a suggested difficulty, a break signal, and
/// a message category. Rule order is the tie-break contract: the rules are
/// not mutually exclusive, first match wins.
pub struct PolicyEngine {
    thresholds: PolicyThresholds,
}

impl PolicyEngine {
    pub fn new(thresholds: PolicyThresholds) -> Self {
        Self { thresholds }
    }

    /// Suggestions never include Expert; struggling learners are stepped
    /// down before confident ones are stepped up.
    pub fn suggest_difficulty(&self, state: &EmotionalState) -> DifficultyLevel {
        let t = &self.thresholds;
        if state.frustration_level > t.easy_frustration || state.stress_level > t.easy_stress {
            DifficultyLevel::Easy
        } else if state.frustration_level > t.medium_frustration
            || state.stress_level > t.medium_stress
        {
            DifficultyLevel::Medium
        } else if state.confidence_level > t.hard_confidence
            && state.frustration_level < t.hard_frustration_ceiling
        {
            DifficultyLevel::Hard
        } else {
            DifficultyLevel::Medium
        }
    }

    pub fn state_break_suggested(&self, state: &EmotionalState) -> bool {
        state.frustration_level > self.thresholds.break_frustration
            || state.stress_level > self.thresholds.break_stress
    }

    /// Combines the state-driven and time-driven break triggers into one
    /// urgency level. Long sessions escalate; the state trigger alone never
    /// goes past Suggested.
    pub fn break_urgency(&self, state: &EmotionalState, session_minutes: f64) -> BreakUrgency {
        let time_driven = if session_minutes > self.thresholds.urgent_after_minutes {
            BreakUrgency::Urgent
        } else if session_minutes > self.thresholds.break_after_minutes {
            BreakUrgency::Suggested
        } else {
            BreakUrgency::None
        };

        let state_driven = if self.state_break_suggested(state) {
            BreakUrgency::Suggested
        } else {
            BreakUrgency::None
        };

        time_driven.max(state_driven)
    }

    /// State-driven message category. A break in force overrides the lower
    /// bands; a learner in the 40-60 frustration band gets motivation, a
    /// disengaged one gets guidance, and a healthy state stays quiet.
    pub fn message_category(
        &self,
        state: &EmotionalState,
        urgency: BreakUrgency,
    ) -> Option<MessageCategory> {
        if urgency > BreakUrgency::None || self.state_break_suggested(state) {
            Some(MessageCategory::Break)
        } else if state.frustration_level > self.thresholds.motivation_frustration {
            Some(MessageCategory::Motivation)
        } else if state.engagement_level < self.thresholds.guidance_engagement {
            Some(MessageCategory::Guidance)
        } else {
            None
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(PolicyThresholds::default())
    }
}
