use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile shown on a swipe card
///
/// Profiles are built once at startup from the seed list and never mutated.
/// `location` and `tags` are placeholders the UI does not render yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub bio: String,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Outcome of a completed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Right swipe (like)
    #[serde(alias = "right")]
    Accept,
    /// Left swipe (pass)
    #[serde(alias = "left")]
    Reject,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published match: the accepted profile plus its congratulation text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: Uuid,
    pub profile: Profile,
    pub message: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

impl MatchResult {
    pub fn new(profile: Profile, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            message,
            matched_at: chrono::Utc::now(),
        }
    }
}
