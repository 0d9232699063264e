use crate::domain::values::match_policy::{MatchPolicy, DEFAULT_MIN_FACE_AREA_RATIO, DEFAULT_THRESHOLD};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum DetectorKind {
    Noop,
    Remote { url: String },
}

#[derive(Debug, Clone)]
pub struct FaceIdConfig {
    /// SQLite database holding the record list and the embedding matrix.
    pub db_path: String,
    pub photo_dir: PathBuf,
    pub policy: MatchPolicy,
    pub detector: DetectorKind,
}

impl Default for FaceIdConfig {
    fn default() -> Self {
        Self {
            db_path: "./faceid.db".into(),
            photo_dir: PathBuf::from("./employees"),
            policy: MatchPolicy::default(),
            detector: DetectorKind::Noop,
        }
    }
}

impl FaceIdConfig {
    /// Reads `FACEID_*` environment variables, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let threshold = parse_or(&lookup, "FACEID_THRESHOLD", DEFAULT_THRESHOLD);
        let min_ratio = parse_or(&lookup, "FACEID_MIN_FACE_AREA_RATIO", DEFAULT_MIN_FACE_AREA_RATIO);
        let policy = MatchPolicy::new(threshold, min_ratio).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid match policy, using defaults");
            MatchPolicy::default()
        });

        let detector = match lookup("FACEID_DETECTOR").as_deref() {
            Some("remote") => match lookup("FACEID_DETECTOR_URL") {
                Some(url) => DetectorKind::Remote { url },
                None => {
                    tracing::warn!("FACEID_DETECTOR=remote without FACEID_DETECTOR_URL, using noop detector");
                    DetectorKind::Noop
                }
            },
            _ => DetectorKind::Noop,
        };

        Self {
            db_path: lookup("FACEID_DB").unwrap_or(defaults.db_path),
            photo_dir: lookup("FACEID_PHOTO_DIR").map(PathBuf::from).unwrap_or(defaults.photo_dir),
            policy,
            detector,
        }
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "not a number, using default");
            default
        }),
    }
}
