use crate::core::deck::{Advance, Deck};
use crate::models::{MatchResult, Profile, SwipeDirection};
use rand::Rng;

/// Chance that an accepted profile turns into a match
pub const DEFAULT_MATCH_PROBABILITY: f64 = 0.6;

/// What a resolved swipe did to the deck
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeOutcome {
    /// Profile that was on top when the swipe resolved
    pub profile: Profile,
    pub direction: SwipeDirection,
    /// The accept won the match draw; a congratulation must be requested
    pub is_match: bool,
    pub advance: Advance,
}

/// Owns the deck and turns swipe decisions into cursor moves and matches
///
/// The random source is injected so the match draw and the reshuffle order
/// are reproducible under a fixed seed.
#[derive(Debug)]
pub struct DeckController<R> {
    deck: Deck,
    rng: R,
    match_probability: f64,
    latest_match: Option<MatchResult>,
}

impl<R: Rng> DeckController<R> {
    pub fn new(seed: Vec<Profile>, rng: R) -> Self {
        Self::with_probability(seed, rng, DEFAULT_MATCH_PROBABILITY)
    }

    pub fn with_probability(seed: Vec<Profile>, rng: R, match_probability: f64) -> Self {
        let match_probability = if match_probability.is_nan() {
            0.0
        } else {
            match_probability.clamp(0.0, 1.0)
        };

        Self {
            deck: Deck::new(seed),
            rng,
            match_probability,
            latest_match: None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn match_probability(&self) -> f64 {
        self.match_probability
    }

    /// Resolve a swipe on the top card
    ///
    /// The cursor moves synchronously whatever the match draw decides. On an
    /// exhausted deck this is a no-op and returns `None`.
    pub fn resolve_swipe(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        let Some(profile) = self.deck.current().cloned() else {
            tracing::warn!("Ignoring {} swipe on exhausted deck", direction);
            return None;
        };

        let is_match =
            direction == SwipeDirection::Accept && self.rng.gen_bool(self.match_probability);

        let advance = self.deck.advance()?;

        tracing::debug!(
            "Resolved {} on profile {} (match: {}, advance: {:?})",
            direction,
            profile.id,
            is_match,
            advance
        );

        Some(SwipeOutcome {
            profile,
            direction,
            is_match,
            advance,
        })
    }

    /// Refill the deck with a new permutation of the seed profiles
    pub fn reshuffle(&mut self) {
        self.deck.reshuffle(&mut self.rng);
        tracing::debug!(
            "Deck reshuffled: {:?}",
            self.deck.profiles().iter().map(|p| p.id.as_str()).collect::<Vec<_>>()
        );
    }

    /// Publish a match into the single slot, replacing any previous one
    pub fn publish_match(&mut self, result: MatchResult) {
        self.latest_match = Some(result);
    }

    pub fn latest_match(&self) -> Option<&MatchResult> {
        self.latest_match.as_ref()
    }

    /// Clear the published match; returns whether one was open
    pub fn dismiss_match(&mut self) -> bool {
        self.latest_match.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: id.to_string(),
            age: 21,
            bio: String::new(),
            video_url: String::new(),
            location: String::new(),
            tags: vec![],
        }
    }

    fn controller(probability: f64) -> DeckController<StdRng> {
        DeckController::with_probability(
            vec![profile("A"), profile("B"), profile("C")],
            StdRng::seed_from_u64(42),
            probability,
        )
    }

    #[test]
    fn test_reject_never_matches() {
        let mut controller = controller(1.0);
        let outcome = controller.resolve_swipe(SwipeDirection::Reject).unwrap();
        assert!(!outcome.is_match);
        assert_eq!(outcome.profile.id, "A");
        assert_eq!(outcome.advance, Advance::Moved { cursor: 1 });
    }

    #[test]
    fn test_accept_with_certain_match() {
        let mut controller = controller(1.0);
        let outcome = controller.resolve_swipe(SwipeDirection::Accept).unwrap();
        assert!(outcome.is_match);
        assert_eq!(controller.deck().cursor(), 1);
    }

    #[test]
    fn test_accept_with_zero_probability() {
        let mut controller = controller(0.0);
        for _ in 0..3 {
            let outcome = controller.resolve_swipe(SwipeDirection::Accept).unwrap();
            assert!(!outcome.is_match);
        }
    }

    #[test]
    fn test_swipe_on_exhausted_deck_is_noop() {
        let mut controller = controller(0.5);
        for _ in 0..3 {
            controller.resolve_swipe(SwipeDirection::Reject);
        }
        assert!(controller.deck().is_exhausted());
        assert!(controller.resolve_swipe(SwipeDirection::Accept).is_none());
        assert_eq!(controller.deck().cursor(), 3);
    }

    #[test]
    fn test_probability_is_clamped() {
        assert_eq!(controller(1.5).match_probability(), 1.0);
        assert_eq!(controller(-0.2).match_probability(), 0.0);
        assert_eq!(controller(f64::NAN).match_probability(), 0.0);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut controller = controller(1.0);
        assert!(!controller.dismiss_match());

        controller.publish_match(MatchResult::new(profile("A"), "やったね！".to_string()));
        assert!(controller.latest_match().is_some());
        assert!(controller.dismiss_match());
        assert!(controller.latest_match().is_none());
        assert!(!controller.dismiss_match());
    }
}
