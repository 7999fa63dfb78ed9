use crate::error::{PlayerError, Result};

/// A track descriptor as the widget renders and plays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub file_url: String,
    pub thumb_url: String,
    pub track_name: String,
    pub track_artist: String,
    pub track_album: String,
}

/// An ordered sequence of tracks, fixed once constructed.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Look up the track at `index`.
    pub fn get(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or(PlayerError::IndexOutOfRange {
            index,
            len: self.tracks.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
