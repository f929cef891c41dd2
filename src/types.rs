use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AffectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    QuestionAnswered,
    TimeSpent,
    HintRequested,
    Retry,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuestionAnswered => "question_answered",
            Self::TimeSpent => "time_spent",
            Self::HintRequested => "hint_requested",
            Self::Retry => "retry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "question_answered" => Some(Self::QuestionAnswered),
            "time_spent" => Some(Self::TimeSpent),
            "hint_requested" => Some(Self::HintRequested),
            "retry" => Some(Self::Retry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            "expert" => Self::Expert,
            _ => Self::Medium,
        }
    }

    /// Hard and Expert items both count toward the sustained-difficulty
    /// stress signal.
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Hard | Self::Expert)
    }
}

/// One observed learner action. Immutable once appended to the session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningActivity {
    pub timestamp: DateTime<Utc>,
    pub activity_type: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
}

impl LearningActivity {
    pub fn question_answered(timestamp: DateTime<Utc>, is_correct: bool) -> Self {
        Self {
            timestamp,
            activity_type: ActivityType::QuestionAnswered,
            is_correct: Some(is_correct),
            time_spent_secs: None,
            difficulty_level: None,
        }
    }

    pub fn time_spent(timestamp: DateTime<Utc>, secs: f64) -> Self {
        Self {
            timestamp,
            activity_type: ActivityType::TimeSpent,
            is_correct: None,
            time_spent_secs: Some(secs),
            difficulty_level: None,
        }
    }

    pub fn hint_requested(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            activity_type: ActivityType::HintRequested,
            is_correct: None,
            time_spent_secs: None,
            difficulty_level: None,
        }
    }

    pub fn retry(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            activity_type: ActivityType::Retry,
            is_correct: None,
            time_spent_secs: None,
            difficulty_level: None,
        }
    }

    pub fn with_time_spent(mut self, secs: f64) -> Self {
        self.time_spent_secs = Some(secs);
        self
    }

    pub fn with_difficulty(mut self, level: DifficultyLevel) -> Self {
        self.difficulty_level = Some(level);
        self
    }

    pub fn validate(&self) -> Result<(), AffectError> {
        if self.activity_type == ActivityType::QuestionAnswered && self.is_correct.is_none() {
            return Err(AffectError::InvalidActivity(
                "question_answered requires isCorrect".to_string(),
            ));
        }
        if let Some(secs) = self.time_spent_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(AffectError::InvalidActivity(format!(
                    "timeSpent must be a non-negative number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

/// Derived snapshot of the learner's state. All fields live in [0, 100].
/// Replaced wholesale on every log mutation, never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalState {
    pub frustration_level: u8,
    pub stress_level: u8,
    pub engagement_level: u8,
    pub confidence_level: u8,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            frustration_level: 0,
            stress_level: 0,
            engagement_level: 100,
            confidence_level: 70,
        }
    }
}

impl EmotionalState {
    /// Builds a snapshot with confidence derived from frustration and
    /// stress. Integer truncating division is the rounding rule for the
    /// whole crate.
    pub fn derived(frustration: u8, stress: u8, engagement: u8) -> Self {
        Self {
            frustration_level: frustration,
            stress_level: stress,
            engagement_level: engagement,
            confidence_level: Self::derive_confidence(frustration, stress),
        }
    }

    pub fn derive_confidence(frustration: u8, stress: u8) -> u8 {
        let half = (frustration as i32 + stress as i32) / 2;
        (100 - half).max(0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Motivation,
    Break,
    Celebration,
    Guidance,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motivation => "motivation",
            Self::Break => "break",
            Self::Celebration => "celebration",
            Self::Guidance => "guidance",
        }
    }
}

/// Ephemeral user-facing text. Lives until dismissed or overwritten by the
/// next triggered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncouragementMessage {
    pub category: MessageCategory,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum BreakUrgency {
    #[default]
    None,
    Suggested,
    Urgent,
}

/// Summary of a previously completed assessment, used to seed the initial
/// snapshot before any live activity has been recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorAssessment {
    pub percentage_score: f64,
    pub wrong_count: u32,
    pub total_questions: u32,
    pub time_taken_minutes: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_skill_breakdown: Option<HashMap<String, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_truncates_toward_zero() {
        // (8 + 55) / 2 = 31 after truncation, not 31.5 rounded
        assert_eq!(EmotionalState::derive_confidence(8, 55), 69);
        assert_eq!(EmotionalState::derive_confidence(0, 0), 100);
        assert_eq!(EmotionalState::derive_confidence(100, 100), 0);
    }

    #[test]
    fn default_state_matches_no_prior_assessment() {
        let state = EmotionalState::default();
        assert_eq!(state.frustration_level, 0);
        assert_eq!(state.stress_level, 0);
        assert_eq!(state.engagement_level, 100);
        assert_eq!(state.confidence_level, 70);
    }

    #[test]
    fn activity_wire_names_are_snake_case() {
        let activity = LearningActivity::question_answered(Utc::now(), false);
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["activityType"], "question_answered");
        assert_eq!(json["isCorrect"], false);
    }

    #[test]
    fn question_answered_requires_is_correct() {
        let mut activity = LearningActivity::question_answered(Utc::now(), true);
        activity.is_correct = None;
        assert!(activity.validate().is_err());
    }

    #[test]
    fn negative_time_spent_is_rejected() {
        let activity = LearningActivity::retry(Utc::now()).with_time_spent(-1.0);
        assert!(activity.validate().is_err());
    }

    #[test]
    fn advanced_levels_cover_hard_and_expert() {
        assert!(DifficultyLevel::Hard.is_advanced());
        assert!(DifficultyLevel::Expert.is_advanced());
        assert!(!DifficultyLevel::Medium.is_advanced());
        assert!(!DifficultyLevel::Easy.is_advanced());
    }
}
