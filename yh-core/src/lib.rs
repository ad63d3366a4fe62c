//! yh-core: Yahtzee rules, scoring, scorecard state, turn harness and configuration.

pub mod category;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod game;
pub mod mask;
pub mod roll;
pub mod scorecard;

pub use category::{Category, CategoryInfo, Section, CATEGORY_TABLE, NUM_CATEGORIES, NUM_UPPER};
pub use config::{Config, ConfigError, GameConfig, LoggingConfig, SimulationConfig};
pub use eligibility::{
    classify, joker_active, realized_score, satisfies, score, straight_runs, Classification,
    FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, SMALL_STRAIGHT_SCORE, YAHTZEE_SCORE,
};
pub use error::RuleError;
pub use game::{Game, GameError, Player, TurnRecord};
pub use mask::RerollMask;
pub use roll::{DiceCup, Roll, MAX_DRAWS, NUM_DICE, NUM_FACES};
pub use scorecard::{
    ScoreBreakdown, Scorecard, ScorecardView, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod game_tests;
#[cfg(test)]
mod roll_tests;
