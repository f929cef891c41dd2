use chrono::{DateTime, Utc};

use crate::config::EngagementParams;
use crate::types::{ActivityType, LearningActivity};

/// Scores engagement downward from a ceiling of 100: going idle and leaning
/// on hints both cost points. An empty log means full engagement.
pub struct EngagementScorer {
    params: EngagementParams,
}

impl EngagementScorer {
    pub fn new(params: EngagementParams) -> Self {
        Self { params }
    }

    pub fn window(&self) -> usize {
        self.params.window
    }

    pub fn score(&self, window: &[LearningActivity], now: DateTime<Utc>) -> u8 {
        let mut score = 100i32;

        if let Some(last) = window.last() {
            let idle_secs = (now - last.timestamp).num_seconds();
            if idle_secs > self.params.idle_threshold_secs {
                score -= self.params.idle_penalty;
            }
        }

        let hints = window
            .iter()
            .filter(|a| a.activity_type == ActivityType::HintRequested)
            .count() as i32;
        score -= self.params.hint_penalty * hints;

        score.clamp(0, 100) as u8
    }
}

impl Default for EngagementScorer {
    fn default() -> Self {
        Self::new(EngagementParams::default())
    }
}
