//! The fixed 13-category table.
//!
//! Index order is the enumeration order used for every tie-break in the decision engine:
//! - idx 0..=5  : upper section (Aces..Sixes), face value = idx + 1
//! - idx 6..=12 : lower section (ThreeOfAKind..Chance)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

pub const NUM_CATEGORIES: usize = 13;
pub const NUM_UPPER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

/// Static per-category metadata.
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub section: Section,
    /// Face value for upper categories.
    pub face: Option<u8>,
}

const fn upper(name: &'static str, face: u8) -> CategoryInfo {
    CategoryInfo {
        name,
        section: Section::Upper,
        face: Some(face),
    }
}

const fn lower(name: &'static str) -> CategoryInfo {
    CategoryInfo {
        name,
        section: Section::Lower,
        face: None,
    }
}

/// Metadata in index order.
pub const CATEGORY_TABLE: [CategoryInfo; NUM_CATEGORIES] = [
    upper("ACES", 1),
    upper("TWOS", 2),
    upper("THREES", 3),
    upper("FOURS", 4),
    upper("FIVES", 5),
    upper("SIXES", 6),
    lower("THREE_OF_A_KIND"),
    lower("FOUR_OF_A_KIND"),
    lower("FULL_HOUSE"),
    lower("SMALL_STRAIGHT"),
    lower("LARGE_STRAIGHT"),
    lower("YAHTZEE"),
    lower("CHANCE"),
];

impl Category {
    /// All categories in enumeration order.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; NUM_UPPER] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; NUM_CATEGORIES - NUM_UPPER] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Category::index`].
    pub fn from_index(idx: usize) -> Result<Category, RuleError> {
        Category::ALL
            .get(idx)
            .copied()
            .ok_or_else(|| RuleError::UnknownCategory(format!("index {idx}")))
    }

    #[inline]
    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn section(self) -> Section {
        self.info().section
    }

    pub fn is_upper(self) -> bool {
        self.section() == Section::Upper
    }

    /// Face value for upper categories, `None` for lower ones.
    pub fn face(self) -> Option<u8> {
        self.info().face
    }

    /// The upper category scoring dice of `face`.
    pub fn from_face(face: u8) -> Result<Category, RuleError> {
        match face {
            1..=6 => Ok(Category::UPPER[(face - 1) as usize]),
            _ => Err(RuleError::UnknownCategory(format!("face {face}"))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = RuleError;

    /// Accepts the canonical name case-insensitively, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == norm)
            .ok_or_else(|| RuleError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Category::from_index(i).unwrap(), *c);
        }
        assert!(Category::from_index(NUM_CATEGORIES).is_err());
    }

    #[test]
    fn upper_faces_and_sections() {
        for face in 1u8..=6 {
            let c = Category::from_face(face).unwrap();
            assert_eq!(c.face(), Some(face));
            assert_eq!(c.section(), Section::Upper);
        }
        for c in Category::LOWER {
            assert_eq!(c.face(), None);
            assert!(!c.is_upper());
        }
    }

    #[test]
    fn from_face_rejects_out_of_range() {
        assert!(matches!(
            Category::from_face(0),
            Err(RuleError::UnknownCategory(_))
        ));
        assert!(matches!(
            Category::from_face(7),
            Err(RuleError::UnknownCategory(_))
        ));
    }

    #[test]
    fn parse_names() {
        assert_eq!("FULL_HOUSE".parse::<Category>().unwrap(), Category::FullHouse);
        assert_eq!("small-straight".parse::<Category>().unwrap(), Category::SmallStraight);
        assert_eq!(" aces ".parse::<Category>().unwrap(), Category::Aces);
        assert!(matches!(
            "BONUS".parse::<Category>(),
            Err(RuleError::UnknownCategory(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
    }
}
