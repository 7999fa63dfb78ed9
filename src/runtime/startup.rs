use std::env;
use std::path::PathBuf;

use playbar::error::PlaylistError;
use playbar::playlist::{self, Playlist};
use playbar::{ControllerOptions, config};

/// Build the playlist from `[[playlist]]`, or by scanning `dir` when the
/// config lists no tracks.
pub fn build_playlist(
    settings: &config::Settings,
    dir: Option<String>,
) -> Result<Playlist, PlaylistError> {
    if !settings.playlist.is_empty() {
        let playlist = Playlist::from_entries(&settings.playlist, &settings.player)?;
        tracing::info!(count = playlist.len(), "playlist loaded from config");
        return Ok(playlist);
    }

    let dir = dir.map(PathBuf::from).unwrap_or_else(|| {
        env::current_dir().unwrap_or_else(|_| PathBuf::from("Music"))
    });
    Ok(playlist::scan(&dir, &settings.library, &settings.player))
}

/// Controller options from `[player]`. With `debug` set the resolved
/// configuration is logged once.
pub fn controller_options(settings: &config::Settings) -> ControllerOptions {
    if settings.player.debug {
        match settings.to_toml() {
            Ok(dump) => tracing::info!("resolved configuration:\n{dump}"),
            Err(e) => tracing::warn!(error = %e, "could not render configuration"),
        }
    }
    ControllerOptions::from(&settings.player)
}
