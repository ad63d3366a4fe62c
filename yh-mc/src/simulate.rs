//! Monte Carlo estimate of what a set of kept dice is worth to each open category.
//!
//! Every trial completes the kept dice with uniform draws, scores each unscored category the
//! way the scorecard would (plus bonuses), and credits only the best category (or all tied
//! best categories) of that trial.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use yh_core::{
    realized_score, Category, RerollMask, Roll, RuleError, ScorecardView, NUM_CATEGORIES,
    NUM_DICE, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS, YAHTZEE_SCORE,
};

/// Aggregated outcome for one category over a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStats {
    /// Trials in which this category held the maximum trial score.
    pub occurrences: u64,
    /// Mean credited score over those trials; `None` when never credited.
    pub mean_score: Option<f64>,
    /// `occurrences / trials`.
    pub probability: f64,
    /// `probability * mean_score` (0 when never credited).
    pub expected_score: f64,
}

/// Per-category statistics. Categories that were never credited are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub trials: u64,
    pub stats: BTreeMap<Category, CategoryStats>,
}

impl SimulationReport {
    pub fn get(&self, category: Category) -> Option<&CategoryStats> {
        self.stats.get(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryStats)> {
        self.stats.iter().map(|(&c, s)| (c, s))
    }

    /// Category with the largest expected score; ties go to enumeration order.
    pub fn best(&self) -> Option<(Category, &CategoryStats)> {
        let mut best: Option<(Category, &CategoryStats)> = None;
        for (c, s) in self.iter() {
            match best {
                Some((_, b)) if s.expected_score <= b.expected_score => {}
                _ => best = Some((c, s)),
            }
        }
        best
    }
}

/// Score a category would be worth for `roll` inside one trial, bonuses included.
///
/// `None` when the category cannot take this roll. Bonuses:
/// - +100 for a five-of-a-kind while Yahtzee holds 50 (the scorecard bonus), or while Yahtzee
///   is still open (rewarding a roll that could fill it);
/// - +35 for an upper category whose score so far (five-of-a-kind bonus included) carries
///   the upper sum across 63.
pub fn trial_score(category: Category, roll: &Roll, view: &ScorecardView) -> Option<u32> {
    let mut total = u32::from(realized_score(category, roll, view)?);

    if roll.five_of_a_kind().is_some() {
        match view.score(Category::Yahtzee) {
            Some(YAHTZEE_SCORE) | None => total += YAHTZEE_BONUS,
            Some(_) => {}
        }
    }

    if category.is_upper() {
        let upper = view.upper_sum();
        if upper < UPPER_BONUS_THRESHOLD && upper + total >= UPPER_BONUS_THRESHOLD {
            total += UPPER_BONUS;
        }
    }
    Some(total)
}

/// Running sums for one batch of trials. Batches merge by addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    trials: u64,
    occurrences: [u64; NUM_CATEGORIES],
    totals: [u64; NUM_CATEGORIES],
}

impl Accumulator {
    /// Credit the best categories of one completed roll.
    pub fn record(&mut self, unscored: &[Category], roll: &Roll, view: &ScorecardView) {
        self.record_weighted(unscored, roll, view, 1);
    }

    fn record_weighted(
        &mut self,
        unscored: &[Category],
        roll: &Roll,
        view: &ScorecardView,
        weight: u64,
    ) {
        self.trials += weight;

        let mut scores = [None; NUM_CATEGORIES];
        let mut max = None;
        for &c in unscored {
            let s = trial_score(c, roll, view);
            scores[c.index()] = s;
            max = max.max(s);
        }
        let Some(max) = max else {
            return;
        };
        for &c in unscored {
            if scores[c.index()] == Some(max) {
                self.occurrences[c.index()] += weight;
                self.totals[c.index()] += u64::from(max) * weight;
            }
        }
    }

    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        self.trials += other.trials;
        for i in 0..NUM_CATEGORIES {
            self.occurrences[i] += other.occurrences[i];
            self.totals[i] += other.totals[i];
        }
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn into_report(self) -> SimulationReport {
        let mut stats = BTreeMap::new();
        if self.trials == 0 {
            return SimulationReport { trials: 0, stats };
        }
        for c in Category::ALL {
            let n = self.occurrences[c.index()];
            if n == 0 {
                continue;
            }
            let mean = self.totals[c.index()] as f64 / n as f64;
            let probability = n as f64 / self.trials as f64;
            stats.insert(
                c,
                CategoryStats {
                    occurrences: n,
                    mean_score: Some(mean),
                    probability,
                    expected_score: probability * mean,
                },
            );
        }
        SimulationReport {
            trials: self.trials,
            stats,
        }
    }
}

/// Kept dice packed into a full roll, plus the positions still to be drawn.
fn template(kept: &[u8]) -> Result<(Roll, RerollMask), RuleError> {
    if kept.len() > NUM_DICE {
        return Err(RuleError::InvalidRollShape {
            msg: format!("cannot keep {} dice out of {NUM_DICE}", kept.len()),
        });
    }
    let mut dice = [1u8; NUM_DICE];
    dice[..kept.len()].copy_from_slice(kept);
    let roll = Roll::new(dice)?;
    let missing = RerollMask::from_fn(|i| i >= kept.len());
    Ok((roll, missing))
}

fn run_trials<R: Rng + ?Sized>(
    unscored: &[Category],
    base: &Roll,
    missing: RerollMask,
    view: &ScorecardView,
    trials: u64,
    rng: &mut R,
) -> Accumulator {
    let mut acc = Accumulator::default();
    for _ in 0..trials {
        let roll = base.redraw(missing, rng);
        acc.record(unscored, &roll, view);
    }
    acc
}

/// Sequential simulation of `trials` completions of `kept`.
///
/// With all five dice kept there is nothing to draw: the roll is scored once and the result is
/// weighted by `trials`, so probabilities are exact.
pub fn simulate<R: Rng + ?Sized>(
    unscored: &[Category],
    kept: &[u8],
    view: &ScorecardView,
    trials: u32,
    rng: &mut R,
) -> Result<SimulationReport, RuleError> {
    let (base, missing) = template(kept)?;
    if trials == 0 {
        return Ok(SimulationReport::default());
    }
    if missing.is_empty() {
        let mut acc = Accumulator::default();
        acc.record_weighted(unscored, &base, view, u64::from(trials));
        return Ok(acc.into_report());
    }
    Ok(run_trials(unscored, &base, missing, view, u64::from(trials), rng).into_report())
}

/// Parallel simulation on the rayon pool.
///
/// Trials are cut into chunks of `chunk_trials`; chunk `i` draws from a `ChaCha8Rng` seeded
/// with `splitmix64(seed ^ i)`, so the report depends only on `seed` and the chunk size.
pub fn simulate_par(
    unscored: &[Category],
    kept: &[u8],
    view: &ScorecardView,
    trials: u32,
    chunk_trials: u32,
    seed: u64,
) -> Result<SimulationReport, RuleError> {
    let (base, missing) = template(kept)?;
    if trials == 0 {
        return Ok(SimulationReport::default());
    }
    if missing.is_empty() {
        let mut acc = Accumulator::default();
        acc.record_weighted(unscored, &base, view, u64::from(trials));
        return Ok(acc.into_report());
    }

    let trials = u64::from(trials);
    let chunk = u64::from(chunk_trials.max(1));
    let chunks = trials.div_ceil(chunk);

    let acc = (0..chunks)
        .into_par_iter()
        .map(|i| {
            let n = chunk.min(trials - i * chunk);
            let mut rng = ChaCha8Rng::seed_from_u64(splitmix64(seed ^ i));
            run_trials(unscored, &base, missing, view, n, &mut rng)
        })
        .reduce(Accumulator::default, Accumulator::merge);
    Ok(acc.into_report())
}

pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
