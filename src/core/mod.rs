// Core deck and gesture exports
pub mod controller;
pub mod deck;
pub mod gesture;

pub use controller::{DeckController, SwipeOutcome, DEFAULT_MATCH_PROBABILITY};
pub use deck::{Advance, Deck, VISIBLE_CARDS};
pub use gesture::{classify_swipe, CardMotion, GestureConfig, GestureState, SwipeGesture};
