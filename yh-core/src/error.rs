//! Rule violations raised by the core.

use thiserror::Error;

use crate::category::Category;
use crate::eligibility::Classification;

/// Errors raised when a caller breaks a game rule or misuses the API.
///
/// None of these are retryable: they signal a bad roll, a bad category choice, or a turn that
/// has run out of draws.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid roll shape: {msg}")]
    InvalidRollShape { msg: String },
    #[error("category {0} has already been scored")]
    CategoryAlreadyScored(Category),
    #[error("category {category} cannot be scored this way (classified {classification:?})")]
    UnscoreableCategory {
        category: Category,
        classification: Classification,
    },
    #[error("at most {max} draws are allowed per turn")]
    RollLimitExceeded { max: u8 },
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("roll number must be 1..=3, got {0}")]
    InvalidRollNumber(u8),
    #[error("every category on the scorecard is already filled")]
    ScorecardComplete,
    #[error("player ended the turn without drawing any dice")]
    NoRollDrawn,
}
