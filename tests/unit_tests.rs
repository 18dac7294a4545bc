// Unit tests for the Kyun Match deck core

use kyun_match::core::{classify_swipe, Advance, Deck, DeckController, SwipeGesture};
use kyun_match::models::{MatchResult, Profile, SwipeDirection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: id.to_string(),
        age: 22,
        bio: format!("{}です", id),
        video_url: "/videos/sample.mp4".to_string(),
        location: String::new(),
        tags: vec![],
    }
}

fn seed(n: usize) -> Vec<Profile> {
    (0..n).map(|i| profile(&format!("p{}", i))).collect()
}

fn sorted_ids(profiles: &[Profile]) -> Vec<String> {
    let mut ids: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}

#[test]
fn test_threshold_classification_sweep() {
    for delta in -300..=300 {
        let delta = delta as f64;
        let expected = if delta > 120.0 {
            Some(SwipeDirection::Accept)
        } else if delta < -120.0 {
            Some(SwipeDirection::Reject)
        } else {
            None
        };
        assert_eq!(classify_swipe(delta, 120.0), expected, "delta {}", delta);
    }
}

#[test]
fn test_gesture_end_matches_classification() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let start: f64 = rng.gen_range(0.0..400.0);
        let end: f64 = rng.gen_range(0.0..400.0);

        let mut gesture = SwipeGesture::default();
        gesture.start(start, true);
        gesture.move_to(end);

        assert_eq!(gesture.end(), classify_swipe(end - start, 120.0));
        assert!(!gesture.is_dragging());
    }
}

#[test]
fn test_cursor_monotonic_between_reshuffles() {
    let n = 7;
    let mut rng = StdRng::seed_from_u64(11);
    let mut controller = DeckController::new(seed(n), StdRng::seed_from_u64(5));

    for expected in 1..=n {
        let direction = if rng.gen_bool(0.5) {
            SwipeDirection::Accept
        } else {
            SwipeDirection::Reject
        };
        let before = controller.deck().cursor();
        let outcome = controller.resolve_swipe(direction).expect("deck not exhausted");

        assert_eq!(outcome.profile.id, format!("p{}", before));
        assert_eq!(controller.deck().cursor(), expected);
        if expected < n {
            assert_eq!(outcome.advance, Advance::Moved { cursor: expected });
        } else {
            assert_eq!(outcome.advance, Advance::Exhausted);
        }
    }

    assert!(controller.resolve_swipe(SwipeDirection::Accept).is_none());
    assert_eq!(controller.deck().cursor(), n);
}

#[test]
fn test_reshuffle_preserves_seed_multiset() {
    for s in 0..20 {
        let mut rng = StdRng::seed_from_u64(s);
        let mut deck = Deck::new(seed(5));
        while deck.advance().is_some() {}

        deck.reshuffle(&mut rng);

        assert_eq!(deck.cursor(), 0);
        assert_eq!(sorted_ids(deck.profiles()), sorted_ids(deck.seed()));
    }
}

#[test]
fn test_reshuffle_produces_varied_orders() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut deck = Deck::new(seed(4));
    let mut orders = std::collections::HashSet::new();

    for _ in 0..50 {
        deck.reshuffle(&mut rng);
        let order: Vec<String> = deck.profiles().iter().map(|p| p.id.clone()).collect();
        orders.insert(order);
    }

    assert!(orders.len() > 1, "Reshuffle should not always produce the same order");
}

#[test]
fn test_match_probability_converges() {
    let trials = 20_000;
    let mut controller = DeckController::new(seed(3), StdRng::seed_from_u64(2024));
    let mut matches = 0;

    for _ in 0..trials {
        if controller.deck().is_exhausted() {
            controller.reshuffle();
        }
        let outcome = controller
            .resolve_swipe(SwipeDirection::Accept)
            .expect("deck refilled");
        if outcome.is_match {
            matches += 1;
        }
    }

    let rate = matches as f64 / trials as f64;
    assert!((rate - 0.6).abs() < 0.02, "Match rate {} too far from 0.6", rate);
}

#[test]
fn test_scenario_on_controller() {
    let seed = vec![profile("A"), profile("B"), profile("C")];
    let mut controller = DeckController::with_probability(seed, StdRng::seed_from_u64(8), 1.0);

    let a = controller.resolve_swipe(SwipeDirection::Reject).unwrap();
    assert_eq!(a.profile.id, "A");
    assert!(!a.is_match);
    assert_eq!(controller.deck().cursor(), 1);

    let b = controller.resolve_swipe(SwipeDirection::Accept).unwrap();
    assert!(b.is_match);
    controller.publish_match(MatchResult::new(b.profile.clone(), "やったね！".to_string()));
    assert_eq!(controller.latest_match().unwrap().profile.id, "B");
    assert_eq!(controller.deck().cursor(), 2);

    let c = controller.resolve_swipe(SwipeDirection::Accept).unwrap();
    assert!(c.is_match);
    assert_eq!(c.advance, Advance::Exhausted);
    assert_eq!(controller.deck().cursor(), 3);

    controller.reshuffle();
    assert_eq!(controller.deck().cursor(), 0);
    assert_eq!(
        sorted_ids(controller.deck().profiles()),
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    );
}
