pub mod engagement;
pub mod frustration;
pub mod stress;

pub use engagement::EngagementScorer;
pub use frustration::FrustrationScorer;
pub use stress::StressScorer;
