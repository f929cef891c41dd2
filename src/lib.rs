//! Emotion-aware scoring and adaptive recommendation core for learning
//! sessions.
//!
//! A session owns an append-only log of learner activities. Every append
//! recomputes a four-dimensional snapshot (frustration, stress, engagement,
//! confidence, each in 0-100), which a rule-based policy maps to a suggested
//! difficulty, a break signal, and an encouragement message personalized
//! with the learner's name.
//!
//! The whole pipeline is synchronous and single-owner; wall-clock time and
//! randomness come in through the [`clock::Clock`] and
//! [`random::RandomSource`] traits so tests can run deterministically.

pub mod clock;
pub mod config;
pub mod error;
pub mod messages;
pub mod policy;
pub mod random;
pub mod scoring;
pub mod session;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AffectConfig;
pub use error::AffectError;
pub use messages::MessageSelector;
pub use policy::PolicyEngine;
pub use random::{RandomSource, SequenceRandom, ThreadRandom};
pub use session::AffectSession;
pub use types::{
    ActivityType, BreakUrgency, DifficultyLevel, EmotionalState, EncouragementMessage,
    LearningActivity, MessageCategory, PriorAssessment,
};
