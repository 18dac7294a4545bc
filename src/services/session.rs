use crate::config::DeckSettings;
use crate::core::{
    Advance, CardMotion, DeckController, GestureConfig, SwipeGesture, SwipeOutcome,
    DEFAULT_MATCH_PROBABILITY,
};
use crate::models::{
    CardView, DeckResponse, GestureEndResponse, GestureResponse, MatchResult, Profile,
    SwipeDirection, SwipeResponse,
};
use crate::services::gemini::MatchMessageGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// Errors returned by a [`SessionHandle`]
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Deck session has shut down")]
    Closed,
}

/// Tuning for a deck session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub gesture: GestureConfig,
    pub match_probability: f64,
    pub reshuffle_delay: Duration,
    pub rng_seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            match_probability: DEFAULT_MATCH_PROBABILITY,
            reshuffle_delay: Duration::from_millis(500),
            rng_seed: None,
        }
    }
}

impl SessionOptions {
    pub fn from_settings(settings: &DeckSettings) -> Self {
        Self {
            gesture: settings.gesture_config(),
            match_probability: settings.match_probability,
            reshuffle_delay: settings.reshuffle_delay(),
            rng_seed: settings.rng_seed,
        }
    }
}

enum Command {
    Deck {
        reply: oneshot::Sender<DeckResponse>,
    },
    GestureStart {
        card_id: String,
        x: f64,
        reply: oneshot::Sender<GestureResponse>,
    },
    GestureMove {
        card_id: String,
        x: f64,
        reply: oneshot::Sender<GestureResponse>,
    },
    GestureEnd {
        card_id: String,
        reply: oneshot::Sender<GestureEndResponse>,
    },
    Swipe {
        direction: SwipeDirection,
        reply: oneshot::Sender<SwipeResponse>,
    },
    DismissMatch {
        reply: oneshot::Sender<bool>,
    },
    MatchReady(MatchResult),
    Reshuffle,
    Shutdown,
}

/// Cloneable handle to a running deck session
///
/// The session stops once every handle is dropped or [`shutdown`] is called.
///
/// [`shutdown`]: SessionHandle::shutdown
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    matches: watch::Receiver<Option<MatchResult>>,
}

impl SessionHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Cards to render, top first
    pub async fn deck(&self) -> Result<DeckResponse, SessionError> {
        self.request(|reply| Command::Deck { reply }).await
    }

    pub async fn gesture_start(&self, card_id: &str, x: f64) -> Result<GestureResponse, SessionError> {
        self.request(|reply| Command::GestureStart {
            card_id: card_id.to_string(),
            x,
            reply,
        })
        .await
    }

    pub async fn gesture_move(&self, card_id: &str, x: f64) -> Result<GestureResponse, SessionError> {
        self.request(|reply| Command::GestureMove {
            card_id: card_id.to_string(),
            x,
            reply,
        })
        .await
    }

    /// Release the drag on `card_id`, resolving a swipe if it crossed the threshold
    pub async fn gesture_end(&self, card_id: &str) -> Result<GestureEndResponse, SessionError> {
        self.request(|reply| Command::GestureEnd {
            card_id: card_id.to_string(),
            reply,
        })
        .await
    }

    /// Resolve a swipe on the top card without a drag
    pub async fn swipe(&self, direction: SwipeDirection) -> Result<SwipeResponse, SessionError> {
        self.request(|reply| Command::Swipe { direction, reply }).await
    }

    /// Close the match dialog; returns whether one was open
    pub async fn dismiss_match(&self) -> Result<bool, SessionError> {
        self.request(|reply| Command::DismissMatch { reply }).await
    }

    pub fn current_match(&self) -> Option<MatchResult> {
        self.matches.borrow().clone()
    }

    /// Receiver notified whenever a match is published or dismissed
    pub fn subscribe_matches(&self) -> watch::Receiver<Option<MatchResult>> {
        let mut receiver = self.matches.clone();
        let _ = receiver.borrow_and_update();
        receiver
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }
}

/// Start a deck session task on the current tokio runtime
pub fn spawn_session<G>(seed: Vec<Profile>, options: SessionOptions, generator: G) -> SessionHandle
where
    G: MatchMessageGenerator,
{
    let (commands, receiver) = mpsc::unbounded_channel();
    let (matches_tx, matches_rx) = watch::channel(None);

    let rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = DeckSession {
        controller: DeckController::with_probability(seed, rng, options.match_probability),
        gestures: HashMap::new(),
        gesture_config: options.gesture,
        reshuffle_delay: options.reshuffle_delay,
        generator: Arc::new(generator),
        matches: matches_tx,
        commands: commands.downgrade(),
    };
    session.sync_gestures();

    tokio::spawn(session.run(receiver));

    SessionHandle {
        commands,
        matches: matches_rx,
    }
}

/// Sole owner of the deck and of the gesture state of each rendered card
struct DeckSession<G> {
    controller: DeckController<StdRng>,
    gestures: HashMap<String, SwipeGesture>,
    gesture_config: GestureConfig,
    reshuffle_delay: Duration,
    generator: Arc<G>,
    matches: watch::Sender<Option<MatchResult>>,
    // Weak so that spawned tasks never keep the session alive
    commands: mpsc::WeakUnboundedSender<Command>,
}

impl<G: MatchMessageGenerator> DeckSession<G> {
    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<Command>) {
        tracing::info!(
            "Deck session started with {} profiles",
            self.controller.deck().len()
        );

        while let Some(command) = receiver.recv().await {
            if let Command::Shutdown = command {
                break;
            }
            self.handle(command);
        }

        tracing::info!("Deck session stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Deck { reply } => {
                let _ = reply.send(self.deck_view());
            }
            Command::GestureStart { card_id, x, reply } => {
                let _ = reply.send(self.gesture_start(&card_id, x));
            }
            Command::GestureMove { card_id, x, reply } => {
                let _ = reply.send(self.gesture_move(&card_id, x));
            }
            Command::GestureEnd { card_id, reply } => {
                let decision = self
                    .gestures
                    .get_mut(&card_id)
                    .and_then(|gesture| gesture.end());
                if let Some(direction) = decision {
                    self.resolve(direction);
                }
                let _ = reply.send(GestureEndResponse {
                    decision,
                    deck: self.deck_view(),
                });
            }
            Command::Swipe { direction, reply } => {
                let outcome = self.resolve(direction);
                let _ = reply.send(SwipeResponse {
                    resolved: outcome.is_some(),
                    direction,
                    match_pending: outcome.map(|o| o.is_match).unwrap_or(false),
                    deck: self.deck_view(),
                });
            }
            Command::DismissMatch { reply } => {
                let dismissed = self.controller.dismiss_match();
                if dismissed {
                    self.matches.send_replace(None);
                }
                let _ = reply.send(dismissed);
            }
            Command::MatchReady(result) => {
                tracing::info!("Match with {} published: {}", result.profile.name, result.message);
                self.controller.publish_match(result.clone());
                self.matches.send_replace(Some(result));
            }
            Command::Reshuffle => {
                self.controller.reshuffle();
                self.sync_gestures();
                tracing::info!("Deck refilled with {} profiles", self.controller.deck().len());
            }
            Command::Shutdown => {}
        }
    }

    fn resolve(&mut self, direction: SwipeDirection) -> Option<SwipeOutcome> {
        let outcome = self.controller.resolve_swipe(direction)?;

        if outcome.is_match {
            self.request_match(outcome.profile.clone());
        }
        if outcome.advance == Advance::Exhausted {
            self.schedule_reshuffle();
        }
        self.sync_gestures();

        Some(outcome)
    }

    fn request_match(&self, profile: Profile) {
        let generator = Arc::clone(&self.generator);
        let commands = self.commands.clone();

        tokio::spawn(async move {
            let message = generator.generate_match_message(&profile.name).await;
            let result = MatchResult::new(profile, message);

            let Some(commands) = commands.upgrade() else {
                tracing::debug!("Session gone, discarding match with {}", result.profile.name);
                return;
            };
            if commands.send(Command::MatchReady(result)).is_err() {
                tracing::debug!("Session stopped, discarding late match");
            }
        });
    }

    fn schedule_reshuffle(&self) {
        let delay = self.reshuffle_delay;
        let commands = self.commands.clone();

        tracing::debug!("Deck exhausted, reshuffling in {:?}", delay);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match commands.upgrade() {
                Some(commands) => {
                    let _ = commands.send(Command::Reshuffle);
                }
                None => tracing::debug!("Session gone, skipping reshuffle"),
            }
        });
    }

    /// Keep exactly one gesture machine per rendered card
    fn sync_gestures(&mut self) {
        let visible: Vec<String> = self
            .controller
            .deck()
            .visible()
            .iter()
            .map(|p| p.id.clone())
            .collect();

        self.gestures.retain(|id, _| visible.contains(id));
        for id in visible {
            let config = self.gesture_config;
            self.gestures
                .entry(id)
                .or_insert_with(|| SwipeGesture::new(config));
        }
    }

    fn is_top(&self, card_id: &str) -> bool {
        self.controller
            .deck()
            .current()
            .map(|p| p.id == card_id)
            .unwrap_or(false)
    }

    fn gesture_start(&mut self, card_id: &str, x: f64) -> GestureResponse {
        let is_top = self.is_top(card_id);
        match self.gestures.get_mut(card_id) {
            Some(gesture) => GestureResponse {
                accepted: gesture.start(x, is_top),
                motion: gesture.motion(),
            },
            None => {
                tracing::debug!("Ignoring gesture start on unrendered card {}", card_id);
                ignored()
            }
        }
    }

    fn gesture_move(&mut self, card_id: &str, x: f64) -> GestureResponse {
        match self.gestures.get_mut(card_id) {
            Some(gesture) => {
                gesture.move_to(x);
                GestureResponse {
                    accepted: gesture.is_dragging(),
                    motion: gesture.motion(),
                }
            }
            None => ignored(),
        }
    }

    fn deck_view(&self) -> DeckResponse {
        let deck = self.controller.deck();
        let cards = deck
            .visible()
            .iter()
            .enumerate()
            .map(|(i, profile)| CardView {
                profile: profile.clone(),
                is_top: i == 0,
                motion: self
                    .gestures
                    .get(&profile.id)
                    .map(|g| g.motion())
                    .unwrap_or_default(),
            })
            .collect();

        DeckResponse {
            cards,
            cursor: deck.cursor(),
            total: deck.len(),
            exhausted: deck.is_exhausted(),
        }
    }
}

fn ignored() -> GestureResponse {
    GestureResponse {
        accepted: false,
        motion: CardMotion::default(),
    }
}
