//! Automated player driven by the turn planner.

use rand_core::RngCore;
use yh_core::{Category, DiceCup, Player, RerollMask, Roll, RuleError, ScorecardView};

use crate::turn::{TurnPlan, TurnPlanner};

/// One planner decision, as seen by a sink.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEvent<'a> {
    pub player: &'a str,
    /// Turn index for this player, 0-based.
    pub turn: u32,
    pub roll_number: u8,
    pub roll: Roll,
    pub view: &'a ScorecardView,
    pub plan: &'a TurnPlan,
}

/// Receives every decision a bot makes. Keeps logging out of the decision path.
pub trait DecisionSink {
    fn on_decision(&mut self, ev: &DecisionEvent<'_>);
}

pub struct MonteCarloBot {
    name: String,
    planner: TurnPlanner,
    sink: Option<Box<dyn DecisionSink>>,
    turns: u32,
}

impl MonteCarloBot {
    pub fn new(name: impl Into<String>, planner: TurnPlanner) -> Self {
        Self {
            name: name.into(),
            planner,
            sink: None,
            turns: 0,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn DecisionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn planner(&self) -> &TurnPlanner {
        &self.planner
    }
}

impl Player for MonteCarloBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(
        &mut self,
        cup: &mut DiceCup,
        view: &ScorecardView,
        rng: &mut dyn RngCore,
    ) -> Result<Category, RuleError> {
        let mut roll = cup.draw(RerollMask::NONE, rng)?;
        loop {
            let roll_number = cup.draws();
            let plan = self.planner.plan(view, &roll, roll_number, rng)?;
            if let Some(sink) = self.sink.as_mut() {
                sink.on_decision(&DecisionEvent {
                    player: &self.name,
                    turn: self.turns,
                    roll_number,
                    roll,
                    view,
                    plan: &plan,
                });
            }

            let d = plan.decision;
            if d.end_turn || cup.draws_left() == 0 {
                self.turns += 1;
                return Ok(d.category);
            }
            roll = cup.draw(d.reroll, rng)?;
        }
    }
}
