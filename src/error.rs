use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffectError {
    #[error("invalid activity: {0}")]
    InvalidActivity(String),
    #[error("seed rejected: {0}")]
    SeedRejected(String),
}
