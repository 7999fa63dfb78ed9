//! Error types shared by the playlist model and the player controller.

use thiserror::Error;

/// A rejected controller or playlist operation.
///
/// Every variant is recoverable: the operation that produced it left the
/// controller untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    /// The requested track index is outside the playlist.
    #[error("track index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation needs at least one track.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The primitive does not know the track duration yet.
    #[error("seek unavailable: track duration is not known yet")]
    SeekUnavailable,

    /// A seek fraction that is not a finite number.
    #[error("invalid seek fraction: {0}")]
    InvalidFraction(f64),
}

/// A malformed playlist entry, reported once when the playlist is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    /// A required field is absent or blank.
    #[error("playlist entry {position}: missing required field `{field}`")]
    MissingField {
        position: usize,
        field: &'static str,
    },
}

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;
