//! Kyun Match - swipe-deck engine for a video dating demo
//!
//! This library provides the deck and gesture logic behind the Kyun Match
//! swipe UI: a per-card drag state machine, a deck that reshuffles itself
//! once exhausted, and a probabilistic match draw whose congratulation text
//! comes from a generative text API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classify_swipe, Deck, DeckController, GestureConfig, SwipeGesture};
pub use models::{MatchResult, Profile, SwipeDirection};
pub use services::{spawn_session, GeminiClient, MatchMessageGenerator, SessionHandle, SessionOptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(classify_swipe(121.0, 120.0), Some(SwipeDirection::Accept));
    }
}
