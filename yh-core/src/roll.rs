//! Dice rolls and the per-turn dice cup.
//!
//! A [`Roll`] keeps its dice in draw order so a [`RerollMask`] can name concrete positions,
//! but compares and hashes as a multiset.

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;

use crate::error::RuleError;
use crate::mask::RerollMask;

pub const NUM_DICE: usize = 5;
pub const NUM_FACES: usize = 6;

/// Maximum draws (initial roll + two rerolls) per turn.
pub const MAX_DRAWS: u8 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Roll {
    dice: [u8; NUM_DICE],
}

impl Roll {
    /// Validate and build a roll. Every die must be in 1..=6.
    pub fn new(dice: [u8; NUM_DICE]) -> Result<Self, RuleError> {
        if let Some(&bad) = dice.iter().find(|d| !(1..=6).contains(*d)) {
            return Err(RuleError::InvalidRollShape {
                msg: format!("die value {bad} out of range 1..=6 in {dice:?}"),
            });
        }
        Ok(Self { dice })
    }

    /// Build from a slice that must hold exactly five dice.
    pub fn from_slice(dice: &[u8]) -> Result<Self, RuleError> {
        let arr: [u8; NUM_DICE] = dice.try_into().map_err(|_| RuleError::InvalidRollShape {
            msg: format!("expected {NUM_DICE} dice, got {}", dice.len()),
        })?;
        Self::new(arr)
    }

    /// Five fresh uniform dice.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut dice = [0u8; NUM_DICE];
        for d in &mut dice {
            *d = rng.gen_range(1..=6);
        }
        Self { dice }
    }

    /// Redraw the masked positions, keeping the others in place.
    pub fn redraw<R: Rng + ?Sized>(&self, mask: RerollMask, rng: &mut R) -> Self {
        let mut dice = self.dice;
        for pos in mask.positions() {
            dice[pos] = rng.gen_range(1..=6);
        }
        Self { dice }
    }

    /// Faces of the dice *not* selected by `mask`, in position order.
    pub fn kept(&self, mask: RerollMask) -> Vec<u8> {
        (0..NUM_DICE)
            .filter(|&i| !mask.contains(i))
            .map(|i| self.dice[i])
            .collect()
    }

    #[inline]
    pub fn dice(&self) -> [u8; NUM_DICE] {
        self.dice
    }

    #[inline]
    pub fn get(&self, pos: usize) -> u8 {
        self.dice[pos]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.dice.iter().copied()
    }

    pub fn sorted(&self) -> [u8; NUM_DICE] {
        let mut s = self.dice;
        s.sort_unstable();
        s
    }

    /// Face histogram: `counts[f - 1]` is the number of dice showing `f`.
    pub fn counts(&self) -> [u8; NUM_FACES] {
        let mut counts = [0u8; NUM_FACES];
        for &d in &self.dice {
            counts[(d - 1) as usize] += 1;
        }
        counts
    }

    pub fn count_of(&self, face: u8) -> u8 {
        self.dice.iter().filter(|&&d| d == face).count() as u8
    }

    pub fn contains_face(&self, face: u8) -> bool {
        self.dice.contains(&face)
    }

    pub fn sum(&self) -> u16 {
        self.dice.iter().map(|&d| d as u16).sum()
    }

    /// Size of the largest group of equal dice.
    pub fn max_count(&self) -> u8 {
        self.counts().into_iter().max().unwrap_or(0)
    }

    /// The repeated face if all five dice match.
    pub fn five_of_a_kind(&self) -> Option<u8> {
        let first = self.dice[0];
        self.dice.iter().all(|&d| d == first).then_some(first)
    }

    /// True if every face in `faces` appears at least once.
    pub fn has_all_faces(&self, faces: &[u8]) -> bool {
        faces.iter().all(|&f| self.contains_face(f))
    }
}

impl PartialEq for Roll {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Roll {}

impl Hash for Roll {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl TryFrom<&[u8]> for Roll {
    type Error = RuleError;

    fn try_from(dice: &[u8]) -> Result<Self, Self::Error> {
        Roll::from_slice(dice)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dice;
        write!(f, "[{} {} {} {} {}]", d[0], d[1], d[2], d[3], d[4])
    }
}

/// Die-draw provider for a single turn.
///
/// The first draw (or any draw with an empty mask) rolls all five dice; later draws replace
/// exactly the masked positions of the stored roll. A fourth draw fails.
#[derive(Debug, Clone, Default)]
pub struct DiceCup {
    draws: u8,
    current: Option<Roll>,
}

impl DiceCup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        reroll: RerollMask,
        rng: &mut R,
    ) -> Result<Roll, RuleError> {
        if self.draws >= MAX_DRAWS {
            return Err(RuleError::RollLimitExceeded { max: MAX_DRAWS });
        }
        self.draws += 1;

        let next = match self.current {
            Some(prev) if !reroll.is_empty() => prev.redraw(reroll, rng),
            _ => Roll::random(rng),
        };
        self.current = Some(next);
        Ok(next)
    }

    /// The latest roll, if any draw has happened.
    pub fn current(&self) -> Option<Roll> {
        self.current
    }

    /// Draws taken so far this turn (the current roll number).
    pub fn draws(&self) -> u8 {
        self.draws
    }

    pub fn draws_left(&self) -> u8 {
        MAX_DRAWS - self.draws
    }
}
