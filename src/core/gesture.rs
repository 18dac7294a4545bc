use crate::models::SwipeDirection;
use serde::Serialize;

/// Horizontal displacement a drag must exceed to count as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 120.0;

/// Displacement above which the accept/reject cue is shown while dragging
pub const DEFAULT_INDICATOR_THRESHOLD: f64 = 50.0;

/// Card rotation is `offset / divisor` degrees
pub const DEFAULT_ROTATION_DIVISOR: f64 = 10.0;

/// Gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub swipe_threshold: f64,
    pub indicator_threshold: f64,
    pub rotation_divisor: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            indicator_threshold: DEFAULT_INDICATOR_THRESHOLD,
            rotation_divisor: DEFAULT_ROTATION_DIVISOR,
        }
    }
}

/// Classify a released drag
///
/// Both comparisons are strict: a delta of exactly `threshold` is a no-op.
#[inline]
pub fn classify_swipe(delta: f64, threshold: f64) -> Option<SwipeDirection> {
    if delta > threshold {
        Some(SwipeDirection::Accept)
    } else if delta < -threshold {
        Some(SwipeDirection::Reject)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { start_x: f64, delta: f64 },
}

/// Live transform of a card, consumed by the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CardMotion {
    pub dragging: bool,
    pub offset: f64,
    #[serde(rename = "rotationDeg")]
    pub rotation_deg: f64,
    pub indicator: Option<SwipeDirection>,
}

/// Drag state machine for a single card
///
/// One instance per rendered card. A gesture-start is only honoured on the
/// top card; every release returns the machine to `Idle` with zero offset,
/// whether or not a decision was produced.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    config: GestureConfig,
    state: GestureState,
}

impl SwipeGesture {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Pointer-down / touch-start at `x`
    ///
    /// Returns whether the drag was accepted. A repeated start while already
    /// dragging overwrites the start coordinate.
    pub fn start(&mut self, x: f64, is_top: bool) -> bool {
        if !is_top {
            return false;
        }
        self.state = GestureState::Dragging {
            start_x: x,
            delta: 0.0,
        };
        true
    }

    /// Pointer/touch move to `x`; ignored while idle
    pub fn move_to(&mut self, x: f64) {
        if let GestureState::Dragging { start_x, delta } = &mut self.state {
            *delta = x - *start_x;
        }
    }

    /// Pointer-up, touch-end or pointer-leave
    pub fn end(&mut self) -> Option<SwipeDirection> {
        let GestureState::Dragging { delta, .. } = self.state else {
            return None;
        };
        self.state = GestureState::Idle;
        classify_swipe(delta, self.config.swipe_threshold)
    }

    pub fn offset(&self) -> f64 {
        match self.state {
            GestureState::Idle => 0.0,
            GestureState::Dragging { delta, .. } => delta,
        }
    }

    pub fn rotation_deg(&self) -> f64 {
        self.offset() / self.config.rotation_divisor
    }

    /// Directional cue shown while the drag is past the indicator threshold
    pub fn indicator(&self) -> Option<SwipeDirection> {
        if !self.is_dragging() {
            return None;
        }
        classify_swipe(self.offset(), self.config.indicator_threshold)
    }

    pub fn motion(&self) -> CardMotion {
        CardMotion {
            dragging: self.is_dragging(),
            offset: self.offset(),
            rotation_deg: self.rotation_deg(),
            indicator: self.indicator(),
        }
    }
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
