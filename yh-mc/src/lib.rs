//! Monte Carlo decision core.
//!
//! - `reroll`: per-category keep/redraw heuristics
//! - `simulate`: sequential and rayon-parallel trial simulation
//! - `turn`: the per-draw decision engine
//! - `bot`: a [`yh_core::Player`] built on the planner

pub mod bot;
pub mod reroll;
pub mod simulate;
pub mod turn;

pub use bot::{DecisionEvent, DecisionSink, MonteCarloBot};
pub use reroll::{choose_reroll_mask, EXPECTED_DIE};
pub use simulate::{
    simulate, simulate_par, trial_score, Accumulator, CategoryStats, SimulationReport,
};
pub use turn::{Candidate, TurnDecision, TurnPlan, TurnPlanner};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod reroll_tests;
