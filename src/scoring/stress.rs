use crate::config::StressParams;
use crate::types::LearningActivity;

/// Scores stress from session length, sustained hard-item exposure in the
/// last-5 window, and rushing (very low per-item time with enough samples
/// to be meaningful).
pub struct StressScorer {
    params: StressParams,
}

impl StressScorer {
    pub fn new(params: StressParams) -> Self {
        Self { params }
    }

    pub fn window(&self) -> usize {
        self.params.window
    }

    pub fn score(&self, window: &[LearningActivity], session_minutes: f64) -> u8 {
        let mut score = 0i32;

        // Additive: a 100-minute session carries both bonuses.
        if session_minutes > self.params.long_session_minutes {
            score += self.params.long_session_bonus;
        }
        if session_minutes > self.params.marathon_minutes {
            score += self.params.marathon_bonus;
        }

        let advanced = window
            .iter()
            .filter(|a| a.difficulty_level.is_some_and(|d| d.is_advanced()))
            .count() as i32;
        score += self.params.advanced_item_weight * advanced;

        if window.len() > self.params.rush_min_samples {
            let avg_secs = window
                .iter()
                .map(|a| a.time_spent_secs.unwrap_or(0.0))
                .sum::<f64>()
                / window.len() as f64;
            if avg_secs < self.params.rush_threshold_secs {
                score += self.params.rush_bonus;
            }
        }

        score.clamp(0, 100) as u8
    }
}

impl Default for StressScorer {
    fn default() -> Self {
        Self::new(StressParams::default())
    }
}
