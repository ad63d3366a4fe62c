use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::{DiceCup, RerollMask, Roll, RuleError, MAX_DRAWS};

fn hash_of(r: &Roll) -> u64 {
    let mut h = DefaultHasher::new();
    r.hash(&mut h);
    h.finish()
}

#[test]
fn equality_and_hash_ignore_order() {
    let a = Roll::new([1, 2, 3, 4, 5]).unwrap();
    let b = Roll::new([5, 4, 3, 2, 1]).unwrap();
    let c = Roll::new([1, 2, 3, 4, 6]).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, c);
    // Positions are still kept in draw order.
    assert_eq!(b.get(0), 5);
}

#[test]
fn rejects_bad_shapes() {
    assert!(matches!(
        Roll::new([0, 1, 2, 3, 4]),
        Err(RuleError::InvalidRollShape { .. })
    ));
    assert!(matches!(
        Roll::new([1, 2, 3, 4, 7]),
        Err(RuleError::InvalidRollShape { .. })
    ));
    assert!(matches!(
        Roll::from_slice(&[1, 2, 3, 4]),
        Err(RuleError::InvalidRollShape { .. })
    ));
    assert!(matches!(
        Roll::from_slice(&[1, 2, 3, 4, 5, 6]),
        Err(RuleError::InvalidRollShape { .. })
    ));
    assert!(Roll::try_from(&[6u8, 6, 6, 6, 6][..]).is_ok());
}

#[test]
fn counts_and_helpers() {
    let r = Roll::new([3, 3, 5, 3, 1]).unwrap();
    assert_eq!(r.counts(), [1, 0, 3, 0, 1, 0]);
    assert_eq!(r.sum(), 15);
    assert_eq!(r.max_count(), 3);
    assert_eq!(r.count_of(3), 3);
    assert!(r.contains_face(5));
    assert!(!r.contains_face(6));
    assert_eq!(r.five_of_a_kind(), None);
    assert_eq!(Roll::new([4; 5]).unwrap().five_of_a_kind(), Some(4));
    assert_eq!(r.sorted(), [1, 3, 3, 3, 5]);
}

#[test]
fn kept_excludes_masked_positions() {
    let r = Roll::new([6, 1, 6, 2, 6]).unwrap();
    let mask = RerollMask::from_positions(&[1, 3]).unwrap();
    assert_eq!(r.kept(mask), vec![6, 6, 6]);
    assert_eq!(r.kept(RerollMask::NONE), vec![6, 1, 6, 2, 6]);
    assert!(r.kept(RerollMask::ALL).is_empty());
}

#[test]
fn redraw_only_touches_masked_positions() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let r = Roll::new([6, 6, 6, 6, 6]).unwrap();
    let mask = RerollMask::from_positions(&[2]).unwrap();
    for _ in 0..50 {
        let next = r.redraw(mask, &mut rng);
        for pos in [0, 1, 3, 4] {
            assert_eq!(next.get(pos), 6);
        }
        assert!((1..=6).contains(&next.get(2)));
    }
}

#[test]
fn cup_allows_three_draws() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut cup = DiceCup::new();
    assert_eq!(cup.current(), None);

    let first = cup.draw(RerollMask::NONE, &mut rng).unwrap();
    assert_eq!(cup.draws(), 1);
    assert_eq!(cup.current(), Some(first));

    let keep_first = RerollMask::from_positions(&[1, 2, 3, 4]).unwrap();
    let second = cup.draw(keep_first, &mut rng).unwrap();
    assert_eq!(second.get(0), first.get(0));

    cup.draw(keep_first, &mut rng).unwrap();
    assert_eq!(cup.draws_left(), 0);

    let err = cup.draw(keep_first, &mut rng).unwrap_err();
    assert_eq!(err, RuleError::RollLimitExceeded { max: MAX_DRAWS });
    assert_eq!(cup.draws(), MAX_DRAWS);
}

#[test]
fn cup_is_reproducible_for_a_seed() {
    let draw_three = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cup = DiceCup::new();
        let mask = RerollMask::from_positions(&[0, 4]).unwrap();
        let a = cup.draw(RerollMask::NONE, &mut rng).unwrap().dice();
        let b = cup.draw(mask, &mut rng).unwrap().dice();
        let c = cup.draw(mask, &mut rng).unwrap().dice();
        (a, b, c)
    };
    assert_eq!(draw_three(99), draw_three(99));
}
