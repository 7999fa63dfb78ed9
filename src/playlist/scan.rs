use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::{LibrarySettings, PlayerSettings};

use super::model::{Playlist, Track};

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const COVER_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// The first cover image next to `path`, if any.
fn sibling_cover(path: &Path) -> Option<String> {
    let dir = path.parent()?;
    COVER_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|p| p.display().to_string())
}

fn non_blank(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn sort_key(track: &Track) -> String {
    format!("{} - {}", track.track_artist, track.track_name).to_lowercase()
}

/// Build a playlist from the audio files under `dir`.
pub fn scan(dir: &Path, settings: &LibrarySettings, defaults: &PlayerSettings) -> Playlist {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let mut track_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist: Option<String> = None;
        let mut album: Option<String> = None;

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(title) = non_blank(tag.title()) {
                        track_name = title;
                    }
                    artist = non_blank(tag.artist());
                    album = non_blank(tag.album());
                }
            }
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        tracks.push(Track {
            file_url: path.display().to_string(),
            thumb_url: sibling_cover(path).unwrap_or_default(),
            track_name,
            track_artist: artist
                .or_else(|| defaults.default_artist.clone())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            track_album: album
                .or_else(|| defaults.default_album.clone())
                .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        });
    }

    tracks.sort_by_key(sort_key);
    tracing::info!(dir = %dir.display(), count = tracks.len(), "scanned library");
    Playlist::new(tracks)
}
