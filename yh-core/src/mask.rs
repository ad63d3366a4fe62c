//! Reroll masks over die positions.
//!
//! Bit `i` (0..=4) set means the die at position `i` is redrawn. Positions refer to the draw
//! order of a [`crate::Roll`], not to sorted order.

use std::fmt;

use serde::Serialize;

use crate::error::RuleError;
use crate::roll::NUM_DICE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RerollMask(u8);

impl RerollMask {
    /// Keep every die.
    pub const NONE: RerollMask = RerollMask(0);
    /// Redraw every die.
    pub const ALL: RerollMask = RerollMask(0b1_1111);

    /// Build a mask from raw bits; bits above position 4 are rejected.
    pub fn from_bits(bits: u8) -> Result<Self, RuleError> {
        if bits > Self::ALL.0 {
            return Err(RuleError::InvalidRollShape {
                msg: format!("reroll mask {bits:#07b} addresses more than {NUM_DICE} dice"),
            });
        }
        Ok(Self(bits))
    }

    pub fn from_positions(positions: &[usize]) -> Result<Self, RuleError> {
        let mut bits = 0u8;
        for &p in positions {
            if p >= NUM_DICE {
                return Err(RuleError::InvalidRollShape {
                    msg: format!("die position {p} out of range 0..{NUM_DICE}"),
                });
            }
            bits |= 1 << p;
        }
        Ok(Self(bits))
    }

    /// Mark position `i` for redraw iff `redraw(i)`.
    pub fn from_fn(mut redraw: impl FnMut(usize) -> bool) -> Self {
        let mut bits = 0u8;
        for i in 0..NUM_DICE {
            if redraw(i) {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, pos: usize) -> bool {
        pos < NUM_DICE && (self.0 >> pos) & 1 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of dice redrawn.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..NUM_DICE).filter(move |&i| self.contains(i))
    }
}

impl fmt::Display for RerollMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ps: Vec<String> = self.positions().map(|p| p.to_string()).collect();
        write!(f, "[{}]", ps.join(","))
    }
}
