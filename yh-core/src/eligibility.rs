//! Eligibility & scoring: may a roll fill a category on this card, and for how much?
//!
//! Everything here is a pure function of `(category, roll, view)`. Classification depends on
//! the scorecard contents, so results must not be cached across scorecard mutations; the
//! [`ScorecardView`] passed in is a value snapshot and is the only valid cache key.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::roll::Roll;
use crate::scorecard::ScorecardView;

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAHTZEE_SCORE: u16 = 50;

pub const SMALL_STRAIGHT_RUNS: [&[u8]; 3] = [&[1, 2, 3, 4], &[2, 3, 4, 5], &[3, 4, 5, 6]];
pub const LARGE_STRAIGHT_RUNS: [&[u8]; 2] = [&[1, 2, 3, 4, 5], &[2, 3, 4, 5, 6]];

/// How a category may be filled with a given roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Already filled, or forbidden by the joker rule.
    Ineligible,
    /// Selectable and worth [`score`] points.
    ForPoints,
    /// Selectable, but the combination is not met so it scores zero.
    AsZero,
}

impl Classification {
    pub fn is_eligible(self) -> bool {
        self != Classification::Ineligible
    }
}

/// Runs that satisfy a straight category; empty for every other category.
pub fn straight_runs(category: Category) -> &'static [&'static [u8]] {
    match category {
        Category::SmallStraight => &SMALL_STRAIGHT_RUNS,
        Category::LargeStraight => &LARGE_STRAIGHT_RUNS,
        _ => &[],
    }
}

/// Static combination predicate, ignoring the scorecard.
///
/// Upper categories and Chance accept any roll.
pub fn satisfies(category: Category, roll: &Roll) -> bool {
    match category {
        Category::Aces
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes
        | Category::Chance => true,
        Category::ThreeOfAKind => roll.max_count() >= 3,
        Category::FourOfAKind => roll.max_count() >= 4,
        Category::FullHouse => {
            let mut groups: Vec<u8> = roll.counts().into_iter().filter(|&c| c > 0).collect();
            groups.sort_unstable();
            groups == [2, 3] || groups == [5]
        }
        Category::SmallStraight => SMALL_STRAIGHT_RUNS.iter().any(|run| roll.has_all_faces(run)),
        Category::LargeStraight => {
            let sorted = roll.sorted();
            LARGE_STRAIGHT_RUNS.iter().any(|run| sorted[..] == run[..])
        }
        Category::Yahtzee => roll.five_of_a_kind().is_some(),
    }
}

/// Points `category` is worth when filled for points with `roll`.
pub fn score(category: Category, roll: &Roll) -> u16 {
    match category {
        Category::FullHouse => FULL_HOUSE_SCORE,
        Category::SmallStraight => SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => LARGE_STRAIGHT_SCORE,
        Category::Yahtzee => YAHTZEE_SCORE,
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => roll.sum(),
        upper => {
            // Upper categories always carry a face.
            let face = upper.face().unwrap_or(0);
            roll.count_of(face) as u16 * face as u16
        }
    }
}

/// Joker rule: a five-of-a-kind rolled after the Yahtzee box is filled (with any value).
pub fn joker_active(roll: &Roll, view: &ScorecardView) -> bool {
    roll.five_of_a_kind().is_some() && view.is_filled(Category::Yahtzee)
}

pub fn classify(category: Category, roll: &Roll, view: &ScorecardView) -> Classification {
    if view.is_filled(category) {
        return Classification::Ineligible;
    }
    match roll.five_of_a_kind() {
        Some(face) if view.is_filled(Category::Yahtzee) => classify_joker(category, face, view),
        _ => classify_standard(category, roll),
    }
}

fn classify_joker(category: Category, face: u8, view: &ScorecardView) -> Classification {
    // The matching upper box must be taken first while it is open.
    let matched = Category::UPPER[(face - 1) as usize];
    if !view.is_filled(matched) {
        return if category == matched {
            Classification::ForPoints
        } else {
            Classification::Ineligible
        };
    }

    if !category.is_upper() {
        return Classification::ForPoints;
    }

    // Other upper boxes open up (as forced zeros) only once the lower section is full.
    let lower_full = Category::LOWER.iter().all(|&c| view.is_filled(c));
    if lower_full {
        Classification::ForPoints
    } else {
        Classification::Ineligible
    }
}

fn classify_standard(category: Category, roll: &Roll) -> Classification {
    if satisfies(category, roll) {
        Classification::ForPoints
    } else {
        Classification::AsZero
    }
}

/// Score that filling `category` would record: `None` if ineligible, `Some(0)` for a zero.
pub fn realized_score(category: Category, roll: &Roll, view: &ScorecardView) -> Option<u16> {
    match classify(category, roll, view) {
        Classification::Ineligible => None,
        Classification::AsZero => Some(0),
        Classification::ForPoints => Some(score(category, roll)),
    }
}
