use crate::core::CardMotion;
use crate::models::domain::{MatchResult, Profile, SwipeDirection};
use serde::{Deserialize, Serialize};

/// A rendered card: profile plus its live drag transform
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub profile: Profile,
    #[serde(rename = "isTop")]
    pub is_top: bool,
    #[serde(flatten)]
    pub motion: CardMotion,
}

/// Renderable deck state
///
/// `cards` holds at most the top card and the one behind it. When
/// `exhausted` is set the UI shows the "searching" placeholder instead.
#[derive(Debug, Clone, Serialize)]
pub struct DeckResponse {
    pub cards: Vec<CardView>,
    pub cursor: usize,
    pub total: usize,
    pub exhausted: bool,
}

/// Response for a gesture-start or move
///
/// `accepted` is false when the event was ignored (background or unknown
/// card, or a move without an active drag).
#[derive(Debug, Clone, Serialize)]
pub struct GestureResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub motion: CardMotion,
}

/// Response for a gesture release
#[derive(Debug, Clone, Serialize)]
pub struct GestureEndResponse {
    pub decision: Option<SwipeDirection>,
    pub deck: DeckResponse,
}

/// Response for a button swipe
#[derive(Debug, Clone, Serialize)]
pub struct SwipeResponse {
    pub resolved: bool,
    pub direction: SwipeDirection,
    #[serde(rename = "matchPending")]
    pub match_pending: bool,
    pub deck: DeckResponse,
}

/// Currently published match, if any
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub current: Option<MatchResult>,
}

/// Response for a match dismissal
#[derive(Debug, Clone, Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
