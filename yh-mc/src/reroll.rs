//! Reroll heuristics: one deterministic keep/redraw rule per category family.
//!
//! These are a cheap pre-filter. The simulation engine then estimates what each suggested
//! mask is actually worth.

use yh_core::{satisfies, straight_runs, Category, RerollMask, Roll, NUM_DICE};

/// Expected value of a single fair die.
pub const EXPECTED_DIE: f64 = 3.5;

/// Positions to redraw when chasing `category` from `roll`.
pub fn choose_reroll_mask(category: Category, roll: &Roll) -> RerollMask {
    match category {
        Category::ThreeOfAKind => kind_mask(roll, 3),
        Category::FourOfAKind => kind_mask(roll, 4),
        Category::FullHouse => full_house_mask(roll),
        Category::SmallStraight | Category::LargeStraight => straight_mask(category, roll),
        Category::Yahtzee => yahtzee_mask(roll),
        Category::Chance => RerollMask::from_fn(|i| is_low(roll.get(i))),
        upper => upper_mask(upper, roll),
    }
}

fn is_low(face: u8) -> bool {
    (face as f64) < EXPECTED_DIE
}

/// Most frequent face; ties go to the larger face. Returns `(face, count)`.
fn majority(roll: &Roll) -> (u8, u8) {
    let counts = roll.counts();
    let mut best = (0u8, 0u8);
    for face in (1..=6u8).rev() {
        let n = counts[(face - 1) as usize];
        if n > best.1 {
            best = (face, n);
        }
    }
    best
}

/// Most frequent face; ties go to the face seen first in draw order.
fn first_majority(roll: &Roll) -> (u8, u8) {
    let counts = roll.counts();
    let mut best = (0u8, 0u8);
    for face in roll.iter() {
        let n = counts[(face - 1) as usize];
        if n > best.1 {
            best = (face, n);
        }
    }
    best
}

fn redraw_all_but(roll: &Roll, keep: impl Fn(u8) -> bool) -> RerollMask {
    RerollMask::from_fn(|i| !keep(roll.get(i)))
}

fn upper_mask(category: Category, roll: &Roll) -> RerollMask {
    match category.face() {
        Some(face) if roll.contains_face(face) => redraw_all_but(roll, |d| d == face),
        _ => RerollMask::ALL,
    }
}

fn kind_mask(roll: &Roll, target: u8) -> RerollMask {
    let (face, count) = first_majority(roll);
    if count == 1 {
        let high = roll.iter().max().unwrap_or(0);
        return if (high as f64) > EXPECTED_DIE {
            redraw_all_but(roll, |d| d == high)
        } else {
            RerollMask::ALL
        };
    }
    if count < target {
        return redraw_all_but(roll, |d| d == face);
    }
    // Target met: chase a higher sum by redrawing low outliers.
    RerollMask::from_fn(|i| {
        let d = roll.get(i);
        d != face && is_low(d)
    })
}

fn full_house_mask(roll: &Roll) -> RerollMask {
    if satisfies(Category::FullHouse, roll) {
        return RerollMask::NONE;
    }
    let (face, count) = majority(roll);
    match count {
        2 => {
            let counts = roll.counts();
            let second = (1..=6u8)
                .rev()
                .find(|&f| f != face && counts[(f - 1) as usize] == 2);
            match second {
                Some(other) => redraw_all_but(roll, |d| d == face || d == other),
                None => redraw_all_but(roll, |d| d == face),
            }
        }
        3 | 4 => redraw_all_but(roll, |d| d == face),
        _ => RerollMask::ALL,
    }
}

fn straight_mask(category: Category, roll: &Roll) -> RerollMask {
    if satisfies(category, roll) {
        return RerollMask::NONE;
    }

    let overlap = |run: &[u8]| run.iter().filter(|&&f| roll.contains_face(f)).count();
    let mut target: &[u8] = &[];
    let mut best = 0usize;
    for &run in straight_runs(category) {
        let n = overlap(run);
        if target.is_empty() || n > best {
            target = run;
            best = n;
        }
    }

    // Keep the first occurrence of each face on the target run.
    let mut seen = [false; 7];
    let mut bits = [false; NUM_DICE];
    for (i, redraw) in bits.iter_mut().enumerate() {
        let d = roll.get(i);
        *redraw = !target.contains(&d) || seen[d as usize];
        seen[d as usize] = true;
    }
    RerollMask::from_fn(|i| bits[i])
}

fn yahtzee_mask(roll: &Roll) -> RerollMask {
    if satisfies(Category::Yahtzee, roll) {
        return RerollMask::NONE;
    }
    let (face, _) = majority(roll);
    redraw_all_but(roll, |d| d == face)
}
