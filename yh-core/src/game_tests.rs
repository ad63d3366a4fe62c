use rand_core::RngCore;

use crate::{
    classify, Category, DiceCup, Game, GameError, Player, RerollMask, RuleError, ScorecardView,
};

/// Draws once and takes the first eligible category.
struct FirstEligible {
    name: String,
}

impl Player for FirstEligible {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(
        &mut self,
        cup: &mut DiceCup,
        view: &ScorecardView,
        rng: &mut dyn RngCore,
    ) -> Result<Category, RuleError> {
        let roll = cup.draw(RerollMask::NONE, rng)?;
        view.unscored()
            .into_iter()
            .find(|&c| classify(c, &roll, view).is_eligible())
            .ok_or(RuleError::ScorecardComplete)
    }
}

/// Never rolls.
struct Lazy;

impl Player for Lazy {
    fn name(&self) -> &str {
        "lazy"
    }

    fn take_turn(
        &mut self,
        _cup: &mut DiceCup,
        _view: &ScorecardView,
        _rng: &mut dyn RngCore,
    ) -> Result<Category, RuleError> {
        Ok(Category::Chance)
    }
}

fn first_eligible(name: &str) -> Box<dyn Player> {
    Box::new(FirstEligible {
        name: name.to_string(),
    })
}

#[test]
fn requires_players() {
    assert!(matches!(Game::new(Vec::new(), 0), Err(GameError::NoPlayers)));
}

#[test]
fn two_player_game_runs_26_turns() {
    let mut game = Game::new(vec![first_eligible("a"), first_eligible("b")], 7).unwrap();
    assert!(matches!(game.final_scores(), Err(GameError::NotFinished)));

    let log = game.play().unwrap();
    assert_eq!(log.len(), 26);
    assert!(game.is_over());

    // Players alternate.
    for (i, t) in log.iter().enumerate() {
        assert_eq!(t.player, i % 2);
        assert_eq!(t.draws, 1);
    }

    let scores = game.final_scores().unwrap();
    assert_eq!(scores.len(), 2);
    assert!(scores[0].1 >= scores[1].1);

    let winners = game.winners().unwrap();
    assert!(!winners.is_empty());
    assert!(winners.contains(&scores[0].0));

    for (name, b) in game.breakdowns() {
        let card_total = if name == "a" {
            game.scorecard(0).unwrap().total_score()
        } else {
            game.scorecard(1).unwrap().total_score()
        };
        assert_eq!(b.grand_total, card_total);
    }
}

#[test]
fn turn_log_matches_scorecard() {
    let mut game = Game::new(vec![first_eligible("solo")], 123).unwrap();
    let log = game.play().unwrap();
    let card = game.scorecard(0).unwrap();
    let mut seen = Vec::new();
    for t in &log {
        assert_eq!(card.view().score(t.category), Some(t.points));
        assert!(!seen.contains(&t.category));
        seen.push(t.category);
    }
    assert_eq!(seen.len(), 13);
}

#[test]
fn same_seed_same_game() {
    let run = |seed| {
        let mut g = Game::new(vec![first_eligible("x")], seed).unwrap();
        g.play().unwrap();
        g.final_scores().unwrap()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn single_player_is_sole_winner() {
    let mut game = Game::new(vec![first_eligible("only")], 1).unwrap();
    game.play().unwrap();
    assert_eq!(game.winners().unwrap(), vec!["only".to_string()]);
}

#[test]
fn player_that_never_rolls_is_rejected() {
    let mut game = Game::new(vec![Box::new(Lazy)], 0).unwrap();
    let err = game.play_turn().unwrap_err();
    match err {
        GameError::Rule { player, source } => {
            assert_eq!(player, "lazy");
            assert_eq!(source, RuleError::NoRollDrawn);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(game.current_player(), 0);
}
