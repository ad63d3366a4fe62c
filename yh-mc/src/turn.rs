//! Turn decision engine: which dice to redraw after draws 1 and 2, which category to fill.

use rand::Rng;
use serde::Serialize;
use yh_core::{Category, RerollMask, Roll, RuleError, ScorecardView, SimulationConfig, MAX_DRAWS};

use crate::reroll::choose_reroll_mask;
use crate::simulate::{simulate, simulate_par, trial_score};

/// What to do with the current roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnDecision {
    /// Category the plan is aiming for (or filling, when `end_turn`).
    pub category: Category,
    /// Positions to redraw. Always empty when `end_turn`.
    pub reroll: RerollMask,
    pub end_turn: bool,
}

/// One evaluated option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub category: Category,
    pub reroll: RerollMask,
    /// Simulated expected score (draws 1-2) or realized trial score (draw 3).
    pub value: f64,
}

/// A decision together with everything that was weighed to reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnPlan {
    pub decision: TurnDecision,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct TurnPlanner {
    cfg: SimulationConfig,
}

impl Default for TurnPlanner {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl TurnPlanner {
    pub fn new(cfg: SimulationConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.cfg
    }

    /// Decide for draw number `roll_number` (1-based) of the current turn.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        view: &ScorecardView,
        roll: &Roll,
        roll_number: u8,
        rng: &mut R,
    ) -> Result<TurnDecision, RuleError> {
        Ok(self.plan(view, roll, roll_number, rng)?.decision)
    }

    /// Like [`TurnPlanner::decide`], also returning the evaluated candidates.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        view: &ScorecardView,
        roll: &Roll,
        roll_number: u8,
        rng: &mut R,
    ) -> Result<TurnPlan, RuleError> {
        if roll_number == 0 {
            return Err(RuleError::InvalidRollNumber(roll_number));
        }
        if roll_number > MAX_DRAWS {
            return Err(RuleError::RollLimitExceeded { max: MAX_DRAWS });
        }
        let unscored = view.unscored();
        if unscored.is_empty() {
            return Err(RuleError::ScorecardComplete);
        }

        if roll_number < MAX_DRAWS {
            if let Some(plan) = self.plan_reroll(&unscored, view, roll, rng)? {
                return Ok(plan);
            }
        }
        Ok(plan_final(&unscored, view, roll))
    }

    fn plan_reroll<R: Rng + ?Sized>(
        &self,
        unscored: &[Category],
        view: &ScorecardView,
        roll: &Roll,
        rng: &mut R,
    ) -> Result<Option<TurnPlan>, RuleError> {
        let mut candidates = Vec::with_capacity(unscored.len());
        for &category in unscored {
            let reroll = choose_reroll_mask(category, roll);
            let kept = roll.kept(reroll);
            let report = if self.cfg.parallel {
                let seed = rng.next_u64();
                simulate_par(
                    unscored,
                    &kept,
                    view,
                    self.cfg.trials,
                    self.cfg.chunk_trials,
                    seed,
                )?
            } else {
                simulate(unscored, &kept, view, self.cfg.trials, rng)?
            };
            if let Some(stats) = report.get(category) {
                candidates.push(Candidate {
                    category,
                    reroll,
                    value: stats.expected_score,
                });
            }
        }

        let Some(best) = pick_best(&candidates) else {
            return Ok(None);
        };
        let decision = if best.reroll.is_empty() {
            TurnDecision {
                category: best.category,
                reroll: RerollMask::NONE,
                end_turn: true,
            }
        } else {
            TurnDecision {
                category: best.category,
                reroll: best.reroll,
                end_turn: false,
            }
        };
        Ok(Some(TurnPlan {
            decision,
            candidates,
        }))
    }
}

/// Score every open category with the dice as they lie.
fn plan_final(unscored: &[Category], view: &ScorecardView, roll: &Roll) -> TurnPlan {
    let candidates: Vec<Candidate> = unscored
        .iter()
        .filter_map(|&category| {
            trial_score(category, roll, view).map(|s| Candidate {
                category,
                reroll: RerollMask::NONE,
                value: f64::from(s),
            })
        })
        .collect();

    // `unscored` is non-empty here; a joker roll always leaves some box open to it.
    let category = pick_best(&candidates)
        .map(|c| c.category)
        .unwrap_or(unscored[0]);
    TurnPlan {
        decision: TurnDecision {
            category,
            reroll: RerollMask::NONE,
            end_turn: true,
        },
        candidates,
    }
}

/// Highest value; first candidate wins ties.
fn pick_best(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        match best {
            Some(b) if c.value <= b.value => {}
            _ => best = Some(c),
        }
    }
    best
}
