// Service exports
pub mod gemini;
pub mod session;

pub use gemini::{fallback_message, GeminiClient, GeminiError, MatchMessageGenerator, GENERIC_MATCH_MESSAGE};
pub use session::{spawn_session, SessionError, SessionHandle, SessionOptions};
