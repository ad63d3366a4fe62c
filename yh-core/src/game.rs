//! Turn harness: seats players, hands each a fresh dice cup per turn, and scores their choice.
//!
//! This module is the single place that mutates a [`Scorecard`] during play.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use thiserror::Error;

use crate::category::Category;
use crate::eligibility::Classification;
use crate::error::RuleError;
use crate::roll::{DiceCup, Roll};
use crate::scorecard::{ScoreBreakdown, Scorecard, ScorecardView};

/// Anything that can take a turn: roll the cup up to three times, then name a category.
///
/// Implementations only see a read-only view of their own scorecard.
pub trait Player {
    fn name(&self) -> &str;

    fn take_turn(
        &mut self,
        cup: &mut DiceCup,
        view: &ScorecardView,
        rng: &mut dyn RngCore,
    ) -> Result<Category, RuleError>;
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("at least one player is required")]
    NoPlayers,
    #[error("game is not over yet")]
    NotFinished,
    #[error("player {player} broke a rule: {source}")]
    Rule {
        player: String,
        #[source]
        source: RuleError,
    },
}

/// What happened in one completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: usize,
    pub category: Category,
    pub roll: Roll,
    pub classification: Classification,
    pub points: u16,
    pub draws: u8,
}

pub struct Game {
    players: Vec<Box<dyn Player>>,
    cards: Vec<Scorecard>,
    rng: ChaCha8Rng,
    current: usize,
}

impl Game {
    pub fn new(players: Vec<Box<dyn Player>>, seed: u64) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let cards = vec![Scorecard::new(); players.len()];
        Ok(Self {
            players,
            cards,
            rng: ChaCha8Rng::seed_from_u64(seed),
            current: 0,
        })
    }

    /// Over once every player has filled all 13 categories.
    pub fn is_over(&self) -> bool {
        self.cards.iter().all(|c| c.view().is_complete())
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn scorecard(&self, player: usize) -> Option<&Scorecard> {
        self.cards.get(player)
    }

    /// Run one turn for the current player and pass the cup on.
    pub fn play_turn(&mut self) -> Result<TurnRecord, GameError> {
        let idx = self.current;
        let name = self.players[idx].name().to_string();
        let rule_err = |source: RuleError| GameError::Rule {
            player: name.clone(),
            source,
        };
        let player = &mut self.players[idx];
        let card = &mut self.cards[idx];

        if card.view().is_complete() {
            return Err(rule_err(RuleError::ScorecardComplete));
        }

        let mut cup = DiceCup::new();
        let view = card.snapshot();
        let category = player
            .take_turn(&mut cup, &view, &mut self.rng)
            .map_err(rule_err)?;
        let roll = cup.current().ok_or_else(|| rule_err(RuleError::NoRollDrawn))?;
        let classification = card.fill(category, &roll).map_err(rule_err)?;
        let points = card.view().score(category).unwrap_or(0);

        self.current = (self.current + 1) % self.players.len();

        Ok(TurnRecord {
            player: idx,
            category,
            roll,
            classification,
            points,
            draws: cup.draws(),
        })
    }

    /// Play until every card is complete. Returns the turn log.
    pub fn play(&mut self) -> Result<Vec<TurnRecord>, GameError> {
        let mut log = Vec::new();
        while !self.is_over() {
            log.push(self.play_turn()?);
        }
        Ok(log)
    }

    /// `(name, total)` pairs, highest first; ties keep seating order.
    pub fn final_scores(&self) -> Result<Vec<(String, u32)>, GameError> {
        if !self.is_over() {
            return Err(GameError::NotFinished);
        }
        let mut scores: Vec<(String, u32)> = self
            .players
            .iter()
            .zip(&self.cards)
            .map(|(p, c)| (p.name().to_string(), c.total_score()))
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(scores)
    }

    /// Every player sharing the top score.
    pub fn winners(&self) -> Result<Vec<String>, GameError> {
        let scores = self.final_scores()?;
        let top = scores.first().map(|s| s.1).unwrap_or(0);
        Ok(scores
            .into_iter()
            .filter(|(_, s)| *s == top)
            .map(|(n, _)| n)
            .collect())
    }

    pub fn breakdowns(&self) -> Vec<(String, ScoreBreakdown)> {
        self.players
            .iter()
            .zip(&self.cards)
            .map(|(p, c)| (p.name().to_string(), c.view().breakdown()))
            .collect()
    }
}
