use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrustrationParams {
    pub window: usize,
    pub wrong_answer_weight: i32,
    pub retry_weight: i32,
    pub slow_pace_bonus: i32,
    pub slow_pace_threshold_secs: f64,
}

impl Default for FrustrationParams {
    fn default() -> Self {
        Self {
            window: 10,
            wrong_answer_weight: 15,
            retry_weight: 10,
            slow_pace_bonus: 20,
            slow_pace_threshold_secs: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressParams {
    pub window: usize,
    pub long_session_minutes: f64,
    pub long_session_bonus: i32,
    pub marathon_minutes: f64,
    pub marathon_bonus: i32,
    pub advanced_item_weight: i32,
    pub rush_bonus: i32,
    pub rush_threshold_secs: f64,
    /// Rushing is only flagged with more samples than this in the window.
    pub rush_min_samples: usize,
}

impl Default for StressParams {
    fn default() -> Self {
        Self {
            window: 5,
            long_session_minutes: 45.0,
            long_session_bonus: 30,
            marathon_minutes: 90.0,
            marathon_bonus: 40,
            advanced_item_weight: 10,
            rush_bonus: 20,
            rush_threshold_secs: 30.0,
            rush_min_samples: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementParams {
    pub window: usize,
    pub idle_threshold_secs: i64,
    pub idle_penalty: i32,
    pub hint_penalty: i32,
}

impl Default for EngagementParams {
    fn default() -> Self {
        Self {
            window: 10,
            idle_threshold_secs: 180,
            idle_penalty: 40,
            hint_penalty: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyThresholds {
    pub break_frustration: u8,
    pub break_stress: u8,
    pub motivation_frustration: u8,
    pub guidance_engagement: u8,
    pub easy_frustration: u8,
    pub easy_stress: u8,
    pub medium_frustration: u8,
    pub medium_stress: u8,
    pub hard_confidence: u8,
    pub hard_frustration_ceiling: u8,
    pub break_after_minutes: f64,
    pub urgent_after_minutes: f64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            break_frustration: 60,
            break_stress: 70,
            motivation_frustration: 40,
            guidance_engagement: 50,
            easy_frustration: 70,
            easy_stress: 80,
            medium_frustration: 50,
            medium_stress: 60,
            hard_confidence: 80,
            hard_frustration_ceiling: 30,
            break_after_minutes: 45.0,
            urgent_after_minutes: 90.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageParams {
    /// Chance that a correct answer produces a celebration message. Sampled,
    /// not an exact distribution contract.
    pub celebration_probability: f64,
    /// A wrong answer with at least this many prior consecutive misses
    /// forces a motivation message.
    pub consecutive_wrong_trigger: u32,
}

impl Default for MessageParams {
    fn default() -> Self {
        Self {
            celebration_probability: 0.3,
            consecutive_wrong_trigger: 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectConfig {
    pub frustration: FrustrationParams,
    pub stress: StressParams,
    pub engagement: EngagementParams,
    pub policy: PolicyThresholds,
    pub messages: MessageParams,
}

impl AffectConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("AFFECT_CELEBRATION_PROBABILITY") {
            if let Ok(p) = val.parse::<f64>() {
                config.messages.celebration_probability = p.clamp(0.0, 1.0);
            }
        }
        if let Ok(val) = std::env::var("AFFECT_LONG_SESSION_MINUTES") {
            if let Ok(m) = val.parse::<f64>() {
                config.stress.long_session_minutes = m;
                config.policy.break_after_minutes = m;
            }
        }
        if let Ok(val) = std::env::var("AFFECT_MARATHON_MINUTES") {
            if let Ok(m) = val.parse::<f64>() {
                config.stress.marathon_minutes = m;
                config.policy.urgent_after_minutes = m;
            }
        }
        if let Ok(val) = std::env::var("AFFECT_IDLE_THRESHOLD_SECS") {
            if let Ok(s) = val.parse::<i64>() {
                config.engagement.idle_threshold_secs = s;
            }
        }

        config
    }
}
