//! Integration tests for AffectSession: the append/score/policy pipeline,
//! seeding, break management, and message lifecycle.

use affect_engine::{
    ActivityType, AffectConfig, AffectError, AffectSession, BreakUrgency, Clock, DifficultyLevel,
    EmotionalState, LearningActivity, ManualClock, MessageCategory, PriorAssessment,
    SequenceRandom,
};
use chrono::{Duration, TimeZone, Utc};

const SESSION_START_SECS: i64 = 1_700_000_000;

/// Session with a manual clock and a random source that never celebrates
/// (all rolls are 0.9, above the 0.3 default probability).
fn test_session() -> (AffectSession, ManualClock) {
    test_session_with_rolls([0.9])
}

fn test_session_with_rolls(rolls: impl IntoIterator<Item = f64>) -> (AffectSession, ManualClock) {
    let clock = ManualClock::new(Utc.timestamp_opt(SESSION_START_SECS, 0).unwrap());
    let session = AffectSession::with_providers(
        AffectConfig::default(),
        "Ada",
        Box::new(clock.clone()),
        Box::new(SequenceRandom::new(rolls)),
    );
    (session, clock)
}

fn wrong(clock: &ManualClock) -> LearningActivity {
    LearningActivity::question_answered(clock.now(), false)
}

fn correct(clock: &ManualClock) -> LearningActivity {
    LearningActivity::question_answered(clock.now(), true)
}

fn prior_assessment() -> PriorAssessment {
    PriorAssessment {
        percentage_score: 90.0,
        wrong_count: 1,
        total_questions: 10,
        time_taken_minutes: 50.0,
        per_skill_breakdown: None,
    }
}

#[test]
fn fresh_session_has_documented_defaults() {
    let (session, _clock) = test_session();
    assert_eq!(session.state(), EmotionalState::default());
    assert_eq!(session.suggested_difficulty(), DifficultyLevel::Medium);
    assert_eq!(session.break_urgency(), BreakUrgency::None);
    assert!(session.active_message().is_none());
    assert_eq!(session.consecutive_wrong(), 0);
}

#[test]
fn reset_restores_defaults() {
    let (mut session, clock) = test_session();
    for _ in 0..5 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    clock.advance(Duration::minutes(50));
    session.reset_session();

    assert_eq!(session.state(), EmotionalState::default());
    assert!(session.activities().is_empty());
    assert_eq!(session.consecutive_wrong(), 0);
    assert!(session.active_message().is_none());
    assert!(session.session_minutes() < 1.0);
}

#[test]
fn get_state_is_idempotent() {
    let (mut session, clock) = test_session();
    session.append_activity(wrong(&clock)).unwrap();
    assert_eq!(session.state(), session.state());
}

#[test]
fn wrong_answers_raise_frustration_fifteen_at_a_time() {
    let (mut session, clock) = test_session();
    for n in 1..=6u8 {
        let state = session.append_activity(wrong(&clock)).unwrap();
        assert_eq!(state.frustration_level, 15 * n);
        assert_eq!(
            state.confidence_level,
            EmotionalState::derive_confidence(state.frustration_level, state.stress_level)
        );
    }
}

#[test]
fn frustration_caps_at_one_hundred() {
    let (mut session, clock) = test_session();
    for _ in 0..10 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    assert_eq!(session.state().frustration_level, 100);
}

#[test]
fn old_struggles_roll_out_of_the_window() {
    let (mut session, clock) = test_session();
    for _ in 0..10 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    for _ in 0..10 {
        session.append_activity(correct(&clock)).unwrap();
    }
    assert_eq!(session.state().frustration_level, 0);
}

#[test]
fn break_band_message_is_break_not_motivation() {
    let (mut session, clock) = test_session();
    // Five straight misses put frustration at 75, past the break threshold.
    for _ in 0..5 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    let message = session.active_message().expect("break message expected");
    assert_eq!(message.category, MessageCategory::Break);
    assert_eq!(session.break_urgency(), BreakUrgency::Suggested);
}

#[test]
fn consecutive_wrong_counter_resets_on_correct() {
    let (mut session, clock) = test_session();

    session.append_activity(wrong(&clock)).unwrap();
    assert_eq!(session.consecutive_wrong(), 1);
    session.append_activity(wrong(&clock)).unwrap();
    assert_eq!(session.consecutive_wrong(), 2);
    session.append_activity(correct(&clock)).unwrap();
    assert_eq!(session.consecutive_wrong(), 0);
    session.append_activity(wrong(&clock)).unwrap();
    assert_eq!(session.consecutive_wrong(), 1);
}

#[test]
fn third_straight_miss_forces_motivation() {
    let (mut session, clock) = test_session();
    session.append_activity(wrong(&clock)).unwrap();
    session.append_activity(wrong(&clock)).unwrap();
    // Counter is 2 before this miss, so the event trigger fires; frustration
    // is only 45, below the break band.
    session.append_activity(wrong(&clock)).unwrap();
    let message = session.active_message().expect("motivation expected");
    assert_eq!(message.category, MessageCategory::Motivation);
}

#[test]
fn celebration_is_sampled_on_correct_answers() {
    // First roll decides celebration (0.1 < 0.3), second picks the template.
    let (mut session, clock) = test_session_with_rolls([0.1, 0.0]);
    session.append_activity(correct(&clock)).unwrap();
    let message = session.active_message().expect("celebration expected");
    assert_eq!(message.category, MessageCategory::Celebration);
    assert!(message.text.contains("Ada"));

    // A roll above the probability stays quiet.
    let (mut session, clock) = test_session_with_rolls([0.9]);
    session.append_activity(correct(&clock)).unwrap();
    assert!(session.active_message().is_none());
}

#[test]
fn seeding_matches_worked_example() {
    let (mut session, _clock) = test_session();
    session.seed_from_prior_assessment(&prior_assessment()).unwrap();

    let state = session.state();
    assert_eq!(state.frustration_level, 8);
    assert_eq!(state.stress_level, 55);
    assert_eq!(state.engagement_level, 100);
    assert_eq!(state.confidence_level, 90);
    // Confident and calm: the step-up rule applies to the seeded state.
    assert_eq!(session.suggested_difficulty(), DifficultyLevel::Hard);
}

#[test]
fn seed_with_zero_questions_does_not_divide() {
    let (mut session, _clock) = test_session();
    let prior = PriorAssessment {
        percentage_score: 0.0,
        wrong_count: 0,
        total_questions: 0,
        time_taken_minutes: 10.0,
        per_skill_breakdown: None,
    };
    session.seed_from_prior_assessment(&prior).unwrap();
    assert_eq!(session.state().frustration_level, 0);
    assert_eq!(session.state().stress_level, 30);
}

#[test]
fn seed_is_rejected_after_activity_or_twice() {
    let (mut session, clock) = test_session();
    session.append_activity(correct(&clock)).unwrap();
    let err = session.seed_from_prior_assessment(&prior_assessment());
    assert!(matches!(err, Err(AffectError::SeedRejected(_))));

    let (mut session, _clock) = test_session();
    session.seed_from_prior_assessment(&prior_assessment()).unwrap();
    let err = session.seed_from_prior_assessment(&prior_assessment());
    assert!(matches!(err, Err(AffectError::SeedRejected(_))));
}

#[test]
fn idle_penalty_applies_after_three_minutes() {
    let (mut session, clock) = test_session();
    session.append_activity(correct(&clock)).unwrap();
    assert_eq!(session.state().engagement_level, 100);

    clock.advance(Duration::seconds(200));
    session.tick();
    assert_eq!(session.state().engagement_level, 60);
}

#[test]
fn backdated_activity_carries_the_idle_penalty() {
    let (mut session, clock) = test_session();
    let stale = LearningActivity::question_answered(clock.now() - Duration::seconds(200), true);
    let state = session.append_activity(stale).unwrap();
    assert_eq!(state.engagement_level, 60);
}

#[test]
fn long_sessions_suggest_then_urge_breaks() {
    let (mut session, clock) = test_session();

    clock.advance(Duration::minutes(50));
    session.tick();
    assert_eq!(session.break_urgency(), BreakUrgency::Suggested);
    let message = session.active_message().expect("break message expected");
    assert_eq!(message.category, MessageCategory::Break);

    session.dismiss_message();
    clock.advance(Duration::minutes(45));
    session.tick();
    assert_eq!(session.break_urgency(), BreakUrgency::Urgent);
    let message = session.active_message().expect("urgent break expected");
    assert_eq!(message.category, MessageCategory::Break);
}

#[test]
fn break_band_silences_a_sampled_celebration() {
    // The fourth roll (0.1) would celebrate the correct answer, but five
    // prior misses hold frustration at 75, inside the break band.
    let (mut session, clock) = test_session_with_rolls([0.5, 0.5, 0.5, 0.1, 0.5]);
    for _ in 0..5 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    session.append_activity(correct(&clock)).unwrap();
    let message = session.active_message().expect("break message expected");
    assert_eq!(message.category, MessageCategory::Break);
}

#[test]
fn dismissed_break_refires_on_the_next_tick() {
    let (mut session, clock) = test_session();
    clock.advance(Duration::minutes(50));
    session.tick();
    assert!(session.active_message().is_some());

    session.dismiss_message();
    assert!(session.active_message().is_none());

    // No further time needs to pass; the next tick re-evaluates the
    // still-standing break condition.
    session.tick();
    let message = session.active_message().expect("break should re-fire");
    assert_eq!(message.category, MessageCategory::Break);
}

#[test]
fn dismissing_a_message_leaves_scores_alone() {
    let (mut session, clock) = test_session();
    for _ in 0..5 {
        session.append_activity(wrong(&clock)).unwrap();
    }
    let before = session.state();
    session.dismiss_message();
    assert!(session.active_message().is_none());
    assert_eq!(session.state(), before);
}

#[test]
fn malformed_activities_are_rejected_without_side_effects() {
    let (mut session, clock) = test_session();

    let mut no_flag = correct(&clock);
    no_flag.is_correct = None;
    assert!(matches!(
        session.append_activity(no_flag),
        Err(AffectError::InvalidActivity(_))
    ));

    let negative = LearningActivity::retry(clock.now()).with_time_spent(-5.0);
    assert!(matches!(
        session.append_activity(negative),
        Err(AffectError::InvalidActivity(_))
    ));

    assert!(session.activities().is_empty());
    assert_eq!(session.state(), EmotionalState::default());
}

#[test]
fn hints_and_retries_feed_their_signals() {
    let (mut session, clock) = test_session();
    session
        .append_activity(LearningActivity::hint_requested(clock.now()))
        .unwrap();
    session
        .append_activity(LearningActivity::retry(clock.now()))
        .unwrap();

    let state = session.state();
    assert_eq!(state.engagement_level, 92);
    assert_eq!(state.frustration_level, 10);
    assert_eq!(
        session.activities()[0].activity_type,
        ActivityType::HintRequested
    );
}
