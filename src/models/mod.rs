// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod seed;

pub use domain::{MatchResult, Profile, SwipeDirection};
pub use requests::{GestureRequest, SwipeRequest};
pub use responses::{
    CardView, DeckResponse, DismissResponse, ErrorResponse, GestureEndResponse, GestureResponse,
    HealthResponse, MatchResponse, SwipeResponse,
};
pub use seed::{builtin_profiles, load_profiles, parse_profiles, SeedError, VideoSource};
