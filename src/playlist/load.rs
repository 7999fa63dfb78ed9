use crate::config::{PlayerSettings, TrackEntry};
use crate::error::PlaylistError;

use super::model::{Playlist, Track};

impl Playlist {
    /// Build a playlist from config entries, validating every entry.
    ///
    /// Fields are trimmed. `file`, `thumb` and `track_name` are required;
    /// artist and album fall back to `defaults.default_artist` /
    /// `defaults.default_album`. The first malformed entry aborts the load.
    pub fn from_entries(
        entries: &[TrackEntry],
        defaults: &PlayerSettings,
    ) -> Result<Self, PlaylistError> {
        let tracks = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| track_from_entry(position, entry, defaults))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tracks))
    }
}

fn track_from_entry(
    position: usize,
    entry: &TrackEntry,
    defaults: &PlayerSettings,
) -> Result<Track, PlaylistError> {
    let required = |value: Option<&String>, field: &'static str| {
        trimmed(value).ok_or(PlaylistError::MissingField { position, field })
    };
    let with_default = |value: Option<&String>, default: Option<&String>, field: &'static str| {
        trimmed(value)
            .or_else(|| trimmed(default))
            .ok_or(PlaylistError::MissingField { position, field })
    };

    Ok(Track {
        file_url: required(entry.file.as_ref(), "file")?,
        thumb_url: required(entry.thumb.as_ref(), "thumb")?,
        track_name: required(entry.track_name.as_ref(), "track_name")?,
        track_artist: with_default(
            entry.track_artist.as_ref(),
            defaults.default_artist.as_ref(),
            "track_artist",
        )?,
        track_album: with_default(
            entry.track_album.as_ref(),
            defaults.default_album.as_ref(),
            "track_album",
        )?,
    })
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
