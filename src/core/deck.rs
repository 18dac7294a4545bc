use crate::models::Profile;
use rand::seq::SliceRandom;
use rand::Rng;

/// Maximum number of cards rendered at once (top + the one stacked behind)
pub const VISIBLE_CARDS: usize = 2;

/// Result of moving the cursor past the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor now points at the next card
    Moved { cursor: usize },
    /// Cursor reached the end; the deck needs a reshuffle
    Exhausted,
}

/// Ordered working set of profiles plus the current position
///
/// Invariant: `0 <= cursor <= profiles.len()`. `cursor == len` means
/// exhausted. The working set is always a permutation of `seed`.
#[derive(Debug, Clone)]
pub struct Deck {
    seed: Vec<Profile>,
    profiles: Vec<Profile>,
    cursor: usize,
}

impl Deck {
    /// Build a deck in seed order
    pub fn new(seed: Vec<Profile>) -> Self {
        Self {
            profiles: seed.clone(),
            seed,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.profiles.len()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn seed(&self) -> &[Profile] {
        &self.seed
    }

    /// Profile under the cursor, `None` once exhausted
    pub fn current(&self) -> Option<&Profile> {
        self.profiles.get(self.cursor)
    }

    /// Cards to render, top first
    pub fn visible(&self) -> &[Profile] {
        let start = self.cursor.min(self.profiles.len());
        let end = (self.cursor + VISIBLE_CARDS).min(self.profiles.len());
        &self.profiles[start..end]
    }

    /// Move past the current card
    ///
    /// Returns `None` without touching the cursor if the deck is already
    /// exhausted.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.is_exhausted() {
            return None;
        }

        if self.cursor + 1 < self.profiles.len() {
            self.cursor += 1;
            Some(Advance::Moved {
                cursor: self.cursor,
            })
        } else {
            self.cursor = self.profiles.len();
            Some(Advance::Exhausted)
        }
    }

    /// Restart at cursor 0 with a fresh uniform permutation of the seed
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut profiles = self.seed.clone();
        profiles.shuffle(rng);
        self.profiles = profiles;
        self.cursor = 0;
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
            name: id.to_uppercase(),
            age: 20,
            bio: String::new(),
            video_url: "/videos/sample.mp4".to_string(),
            location: String::new(),
            tags: vec![],
        }
    }

    fn ids(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut deck = Deck::new(vec![profile("a"), profile("b"), profile("c")]);

        assert_eq!(deck.advance(), Some(Advance::Moved { cursor: 1 }));
        assert_eq!(deck.advance(), Some(Advance::Moved { cursor: 2 }));
        assert_eq!(deck.advance(), Some(Advance::Exhausted));
        assert_eq!(deck.cursor(), 3);
        assert!(deck.is_exhausted());
        assert!(deck.current().is_none());

        assert_eq!(deck.advance(), None);
        assert_eq!(deck.cursor(), 3);
    }

    #[test]
    fn test_visible_window() {
        let mut deck = Deck::new(vec![profile("a"), profile("b"), profile("c")]);
        assert_eq!(ids(deck.visible()), vec!["a", "b"]);

        deck.advance();
        deck.advance();
        assert_eq!(ids(deck.visible()), vec!["c"]);

        deck.advance();
        assert!(deck.visible().is_empty());
    }

    #[test]
    fn test_reshuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new(vec![profile("a"), profile("b"), profile("c"), profile("d")]);
        while deck.advance() != Some(Advance::Exhausted) {}

        deck.reshuffle(&mut rng);

        assert_eq!(deck.cursor(), 0);
        let mut shuffled = ids(deck.profiles());
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["a", "b", "c", "d"]);
        assert_eq!(ids(deck.seed()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_deck_is_exhausted() {
        let mut deck = Deck::new(vec![]);
        assert!(deck.is_exhausted());
        assert_eq!(deck.advance(), None);
        assert!(deck.visible().is_empty());
    }
}
