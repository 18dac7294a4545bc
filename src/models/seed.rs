use crate::models::Profile;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Hosted clip shared by the built-in profiles
pub const REMOTE_VIDEO_URL: &str =
    "https://video.twimg.com/amplify_video/1991092264043782144/vid/avc1/360x640/DCGrgfORL1NgTyI6.mp4";

/// Default path of the bundled clip when serving videos locally
pub const DEFAULT_LOCAL_VIDEO_PATH: &str = "/videos/sample.mp4";

/// Errors that can occur when loading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Seed list is empty")]
    Empty,

    #[error("Duplicate profile id: {0}")]
    DuplicateId(String),
}

/// Where the profile videos are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    Remote,
    Local { path: String },
}

impl VideoSource {
    fn resolve(&self) -> String {
        match self {
            VideoSource::Remote => REMOTE_VIDEO_URL.to_string(),
            VideoSource::Local { path } => path.clone(),
        }
    }
}

/// Built-in seed profiles, in deck order
pub fn builtin_profiles(source: &VideoSource) -> Vec<Profile> {
    let video_url = source.resolve();
    let seeds = [
        (
            "1",
            "あみ",
            21,
            "ビデオで遊ぼ💛 お手伝いしてあげる💜 寂しい夜は一緒に過ごそう？今すぐ通話していいよ！",
        ),
        (
            "2",
            "りな",
            23,
            "内緒の話、しよ？🤫 誰にも言えない秘密を共有できる関係が理想です✨ 準備はいい？今ならすぐ出れるよ！",
        ),
        (
            "3",
            "もか",
            20,
            "甘えん坊な女の子です🎀 ギュッてしてほしいな。あなたのタイプを教えて？画面越しにイチャイチャしたいな。",
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, name, age, bio)| Profile {
            id: id.to_string(),
            name: name.to_string(),
            age,
            bio: bio.to_string(),
            video_url: video_url.clone(),
            location: String::new(),
            tags: vec![],
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Parse a TOML seed list made of `[[profiles]]` tables
pub fn parse_profiles(contents: &str) -> Result<Vec<Profile>, SeedError> {
    let file: SeedFile = toml::from_str(contents)?;

    if file.profiles.is_empty() {
        return Err(SeedError::Empty);
    }

    let mut seen = std::collections::HashSet::new();
    for profile in &file.profiles {
        if !seen.insert(profile.id.as_str()) {
            return Err(SeedError::DuplicateId(profile.id.clone()));
        }
    }

    Ok(file.profiles)
}

/// Load a TOML seed list from disk
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<Profile>, SeedError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let profiles = parse_profiles(&contents)?;
    tracing::info!(
        "Loaded {} seed profiles from {}",
        profiles.len(),
        path.as_ref().display()
    );
    Ok(profiles)
}
