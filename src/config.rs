//! Application-level configuration loading.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::geometry::TrackGeometry;

/// Default location on disk where the game looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "POP_THE_ROCK_CONFIG_PATH";
/// Default location of the persisted anonymous identity.
const DEFAULT_IDENTITY_PATH: &str = "config/identity";

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Track dimensions used by the geometry engine.
    pub track: TrackGeometry,
    /// Where the anonymous identity is persisted between runs.
    pub identity_path: PathBuf,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    ///
    /// A missing file is normal; a malformed one is logged and ignored.
    /// Configuration problems never prevent the game from starting.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            track: TrackGeometry::default(),
            identity_path: PathBuf::from(DEFAULT_IDENTITY_PATH),
        }
    }
}

/// JSON representation of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    track: RawTrack,
    identity_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTrack {
    radius: Option<f32>,
    pointer_width: Option<f32>,
    target_diameter: Option<f32>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = TrackGeometry::default();
        Self {
            track: TrackGeometry {
                radius: raw.track.radius.unwrap_or(defaults.radius),
                pointer_width: raw.track.pointer_width.unwrap_or(defaults.pointer_width),
                target_diameter: raw
                    .track
                    .target_diameter
                    .unwrap_or(defaults.target_diameter),
            },
            identity_path: raw
                .identity_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IDENTITY_PATH)),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
