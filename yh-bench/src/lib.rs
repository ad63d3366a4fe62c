//! Shared fixtures for the benches.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use yh_core::{Category, Roll, ScorecardView};

/// `n` uniformly random rolls from a fixed seed.
pub fn roll_samples(n: usize) -> Vec<Roll> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1234_5678_9ABC_DEF0);
    (0..n).map(|_| Roll::random(&mut rng)).collect()
}

/// A mid-game card: Yahtzee scored, half of each section filled.
pub fn mid_game_view() -> ScorecardView {
    ScorecardView::from_filled(
        &[
            (Category::Aces, 3),
            (Category::Threes, 9),
            (Category::Fives, 15),
            (Category::FullHouse, 25),
            (Category::Yahtzee, 50),
            (Category::Chance, 22),
        ],
        0,
    )
    .unwrap_or_default()
}
