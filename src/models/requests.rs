use crate::models::SwipeDirection;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pointer/touch position for a gesture-start or move event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GestureRequest {
    #[validate(range(min = -100000.0, max = 100000.0))]
    #[serde(alias = "clientX")]
    pub x: f64,
}

/// Button-driven swipe (the like / pass buttons under the deck)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}
