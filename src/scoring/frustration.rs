use crate::config::FrustrationParams;
use crate::types::{ActivityType, LearningActivity};

/// Scores frustration over the last-10 rolling window: wrong answers,
/// slow average pace, and retries all push it up.
pub struct FrustrationScorer {
    params: FrustrationParams,
}

impl FrustrationScorer {
    pub fn new(params: FrustrationParams) -> Self {
        Self { params }
    }

    pub fn window(&self) -> usize {
        self.params.window
    }

    pub fn score(&self, window: &[LearningActivity]) -> u8 {
        if window.is_empty() {
            return 0;
        }

        let wrong_answers = window
            .iter()
            .filter(|a| {
                a.activity_type == ActivityType::QuestionAnswered && a.is_correct == Some(false)
            })
            .count() as i32;
        let retries = window
            .iter()
            .filter(|a| a.activity_type == ActivityType::Retry)
            .count() as i32;

        let mut score =
            self.params.wrong_answer_weight * wrong_answers + self.params.retry_weight * retries;

        // The slow-pace bonus only applies when at least one entry carries a
        // time, otherwise the average is undefined and treated as not-exceeded.
        let timed: Vec<f64> = window.iter().filter_map(|a| a.time_spent_secs).collect();
        if !timed.is_empty() {
            let avg = timed.iter().sum::<f64>() / timed.len() as f64;
            if avg > self.params.slow_pace_threshold_secs {
                score += self.params.slow_pace_bonus;
            }
        }

        score.clamp(0, 100) as u8
    }
}

impl Default for FrustrationScorer {
    fn default() -> Self {
        Self::new(FrustrationParams::default())
    }
}
