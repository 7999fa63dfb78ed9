use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playbar/config.toml` or `~/.config/playbar/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYBAR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    /// Tracks in playback order. When empty the host scans a directory instead.
    pub playlist: Vec<TrackEntry>,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Index of the track loaded at startup. Clamped into the playlist.
    pub default_track: usize,
    /// Start playback whenever a track is selected.
    pub auto_play: bool,
    /// Log the resolved configuration once at startup.
    pub debug: bool,
    /// Interval of the progress poll while playing (milliseconds).
    pub poll_interval_ms: u64,
    /// Artist used for playlist entries that omit one.
    pub default_artist: Option<String>,
    /// Album used for playlist entries that omit one.
    pub default_album: Option<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_track: 0,
            auto_play: false,
            debug: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            default_artist: None,
            default_album: None,
        }
    }
}

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// One `[[playlist]]` entry as written in the config file.
///
/// Fields are optional here so a malformed entry can be reported with its
/// position when the playlist is built.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackEntry {
    #[serde(alias = "file_url", alias = "fileUrl")]
    pub file: Option<String>,
    #[serde(alias = "thumb_url", alias = "thumbUrl")]
    pub thumb: Option<String>,
    #[serde(alias = "trackName")]
    pub track_name: Option<String>,
    #[serde(alias = "trackArtist")]
    pub track_artist: Option<String>,
    #[serde(alias = "trackAlbum")]
    pub track_album: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ playbar ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/playbar/playbar.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
