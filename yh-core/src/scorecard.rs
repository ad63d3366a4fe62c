//! Per-player scorecard.
//!
//! [`Scorecard`] is the only mutable game state; every other component reads a
//! [`ScorecardView`], a `Copy` value snapshot that compares and hashes by contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{Category, NUM_CATEGORIES};
use crate::eligibility::{classify, score, Classification, YAHTZEE_SCORE};
use crate::error::RuleError;
use crate::roll::Roll;

pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;
pub const YAHTZEE_BONUS: u32 = 100;

/// Immutable snapshot of a scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScorecardView {
    scores: [Option<u16>; NUM_CATEGORIES],
    bonus_count: u32,
}

impl ScorecardView {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of an externally kept record. Each category may appear at most once.
    pub fn from_filled(filled: &[(Category, u16)], bonus_count: u32) -> Result<Self, RuleError> {
        let mut view = Self {
            bonus_count,
            ..Self::default()
        };
        for &(cat, points) in filled {
            if view.is_filled(cat) {
                return Err(RuleError::CategoryAlreadyScored(cat));
            }
            view.scores[cat.index()] = Some(points);
        }
        Ok(view)
    }

    #[inline]
    pub fn score(&self, category: Category) -> Option<u16> {
        self.scores[category.index()]
    }

    #[inline]
    pub fn is_filled(&self, category: Category) -> bool {
        self.score(category).is_some()
    }

    /// Unfilled categories in enumeration order.
    pub fn unscored(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| !self.is_filled(c))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(Option::is_some)
    }

    pub fn bonus_count(&self) -> u32 {
        self.bonus_count
    }

    pub fn upper_sum(&self) -> u32 {
        Category::UPPER
            .iter()
            .map(|&c| self.score(c).unwrap_or(0) as u32)
            .sum()
    }

    pub fn lower_sum(&self) -> u32 {
        Category::LOWER
            .iter()
            .map(|&c| self.score(c).unwrap_or(0) as u32)
            .sum()
    }

    pub fn upper_bonus(&self) -> u32 {
        if self.upper_sum() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    /// Upper sum + upper bonus + lower sum + 100 per Yahtzee bonus. Valid mid-game.
    pub fn total_score(&self) -> u32 {
        self.upper_sum() + self.upper_bonus() + self.lower_sum() + self.bonus_count * YAHTZEE_BONUS
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        let categories = Category::ALL
            .into_iter()
            .map(|c| (c, self.score(c).unwrap_or(0)))
            .collect();
        ScoreBreakdown {
            categories,
            upper_total: self.upper_sum(),
            upper_bonus: self.upper_bonus(),
            lower_total: self.lower_sum(),
            yahtzee_bonus_count: self.bonus_count,
            yahtzee_bonus_points: self.bonus_count * YAHTZEE_BONUS,
            grand_total: self.total_score(),
        }
    }

    /// A five-of-a-kind scored while the Yahtzee box already holds 50 earns a bonus.
    fn earns_yahtzee_bonus(&self, roll: &Roll) -> bool {
        roll.five_of_a_kind().is_some() && self.score(Category::Yahtzee) == Some(YAHTZEE_SCORE)
    }
}

/// Detailed end-of-game result (unfilled categories count as 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub categories: BTreeMap<Category, u16>,
    pub upper_total: u32,
    pub upper_bonus: u32,
    pub lower_total: u32,
    pub yahtzee_bonus_count: u32,
    pub yahtzee_bonus_points: u32,
    pub grand_total: u32,
}

/// Mutable scorecard. Each category transitions unfilled → filled exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    view: ScorecardView,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ScorecardView {
        &self.view
    }

    /// Value copy of the current state.
    pub fn snapshot(&self) -> ScorecardView {
        self.view
    }

    pub fn total_score(&self) -> u32 {
        self.view.total_score()
    }

    /// Fill `category` for points. Returns the points recorded.
    pub fn fill_for_points(&mut self, category: Category, roll: &Roll) -> Result<u16, RuleError> {
        self.check_fill(category, roll, Classification::ForPoints)?;
        let points = score(category, roll);
        self.record(category, points, roll);
        Ok(points)
    }

    /// Fill `category` with a zero because its combination is not met.
    pub fn fill_as_zero(&mut self, category: Category, roll: &Roll) -> Result<(), RuleError> {
        self.check_fill(category, roll, Classification::AsZero)?;
        self.record(category, 0, roll);
        Ok(())
    }

    /// Classify, then fill along whichever path the classification allows.
    pub fn fill(&mut self, category: Category, roll: &Roll) -> Result<Classification, RuleError> {
        let classification = classify(category, roll, &self.view);
        match classification {
            Classification::ForPoints => self.fill_for_points(category, roll).map(|_| ())?,
            Classification::AsZero => self.fill_as_zero(category, roll)?,
            Classification::Ineligible => {
                // Reports CategoryAlreadyScored or UnscoreableCategory.
                self.check_fill(category, roll, Classification::ForPoints)?
            }
        }
        Ok(classification)
    }

    fn check_fill(
        &self,
        category: Category,
        roll: &Roll,
        wanted: Classification,
    ) -> Result<(), RuleError> {
        if self.view.is_filled(category) {
            return Err(RuleError::CategoryAlreadyScored(category));
        }
        let classification = classify(category, roll, &self.view);
        if classification != wanted {
            return Err(RuleError::UnscoreableCategory {
                category,
                classification,
            });
        }
        Ok(())
    }

    fn record(&mut self, category: Category, points: u16, roll: &Roll) {
        // Bonus is judged against the card *before* this fill.
        if self.view.earns_yahtzee_bonus(roll) {
            self.view.bonus_count += 1;
        }
        self.view.scores[category.index()] = Some(points);
    }
}
