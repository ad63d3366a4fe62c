use yh_core::{satisfies, Category, RerollMask, Roll};

use crate::choose_reroll_mask;

fn roll(d: [u8; 5]) -> Roll {
    Roll::new(d).unwrap()
}

fn mask(positions: &[usize]) -> RerollMask {
    RerollMask::from_positions(positions).unwrap()
}

#[test]
fn upper_keeps_matching_faces() {
    let r = roll([4, 1, 4, 6, 2]);
    assert_eq!(choose_reroll_mask(Category::Fours, &r), mask(&[1, 3, 4]));
    assert_eq!(choose_reroll_mask(Category::Fives, &r), RerollMask::ALL);
}

#[test]
fn kind_without_duplicates_keeps_high_die() {
    let r = roll([1, 2, 3, 5, 6]);
    assert_eq!(
        choose_reroll_mask(Category::ThreeOfAKind, &r),
        mask(&[0, 1, 2, 3])
    );
    assert_eq!(
        choose_reroll_mask(Category::FourOfAKind, &r),
        mask(&[0, 1, 2, 3])
    );
}

#[test]
fn kind_majority_ties_keep_the_face_drawn_first() {
    let r = roll([2, 2, 5, 5, 1]);
    assert_eq!(
        choose_reroll_mask(Category::ThreeOfAKind, &r),
        mask(&[2, 3, 4])
    );
    let r = roll([5, 2, 5, 2, 1]);
    assert_eq!(
        choose_reroll_mask(Category::FourOfAKind, &r),
        mask(&[1, 3, 4])
    );
    // The Yahtzee heuristic still prefers the larger face.
    assert_eq!(
        choose_reroll_mask(Category::Yahtzee, &roll([2, 2, 5, 5, 1])),
        mask(&[0, 1, 4])
    );
}

#[test]
fn kind_target_met_redraws_only_low_outliers() {
    let r = roll([3, 3, 3, 1, 6]);
    assert_eq!(choose_reroll_mask(Category::ThreeOfAKind, &r), mask(&[3]));
    // Below four of a kind: keep the triple only.
    assert_eq!(choose_reroll_mask(Category::FourOfAKind, &r), mask(&[3, 4]));
}

#[test]
fn full_house_patterns() {
    let fh = Category::FullHouse;
    assert_eq!(choose_reroll_mask(fh, &roll([2, 5, 2, 5, 5])), RerollMask::NONE);
    assert_eq!(choose_reroll_mask(fh, &roll([2, 2, 5, 5, 1])), mask(&[4]));
    assert_eq!(choose_reroll_mask(fh, &roll([2, 2, 1, 5, 6])), mask(&[2, 3, 4]));
    assert_eq!(choose_reroll_mask(fh, &roll([4, 4, 4, 1, 2])), mask(&[3, 4]));
    assert_eq!(choose_reroll_mask(fh, &roll([4, 4, 4, 4, 2])), mask(&[4]));
    assert_eq!(choose_reroll_mask(fh, &roll([1, 2, 3, 4, 6])), RerollMask::ALL);
}

#[test]
fn straight_keeps_one_of_each_run_face() {
    let ss = Category::SmallStraight;
    assert_eq!(choose_reroll_mask(ss, &roll([1, 2, 3, 4, 4])), RerollMask::NONE);
    assert_eq!(choose_reroll_mask(ss, &roll([1, 1, 2, 3, 6])), mask(&[1, 4]));
}

#[test]
fn straight_overlap_ties_pick_the_first_run() {
    // 2,3,4 overlaps every small run by three faces.
    assert_eq!(
        choose_reroll_mask(Category::SmallStraight, &roll([2, 3, 4, 6, 6])),
        mask(&[3, 4])
    );
    // 1,2,3,4 and 2,3,4,6 overlap both large runs by four faces.
    assert_eq!(
        choose_reroll_mask(Category::LargeStraight, &roll([1, 2, 3, 4, 6])),
        mask(&[4])
    );
}

#[test]
fn yahtzee_keeps_most_frequent_face() {
    let y = Category::Yahtzee;
    assert_eq!(choose_reroll_mask(y, &roll([3, 3, 3, 3, 3])), RerollMask::NONE);
    assert_eq!(choose_reroll_mask(y, &roll([3, 3, 5, 5, 1])), mask(&[0, 1, 4]));
    assert_eq!(choose_reroll_mask(y, &roll([6, 1, 1, 2, 1])), mask(&[0, 3]));
}

#[test]
fn chance_redraws_low_dice() {
    assert_eq!(
        choose_reroll_mask(Category::Chance, &roll([1, 4, 3, 6, 2])),
        mask(&[0, 2, 4])
    );
    assert_eq!(
        choose_reroll_mask(Category::Chance, &roll([4, 5, 6, 4, 5])),
        RerollMask::NONE
    );
}

#[test]
fn satisfied_combinations_are_kept_whole() {
    let combos = [
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
    ];
    for a in 1u8..=6 {
        for b in 1u8..=6 {
            for c in 1u8..=6 {
                for d in 1u8..=6 {
                    for e in 1u8..=6 {
                        let r = roll([a, b, c, d, e]);
                        for cat in combos {
                            if satisfies(cat, &r) {
                                assert_eq!(choose_reroll_mask(cat, &r), RerollMask::NONE);
                            }
                        }
                    }
                }
            }
        }
    }
}
