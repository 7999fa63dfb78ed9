use std::time::Duration;

use crate::config::{DEFAULT_POLL_INTERVAL_MS, PlayerSettings};
use crate::error::{PlayerError, Result};
use crate::playlist::{Playlist, Track};
use crate::time::{format_clock, has_known_duration, progress_percentage};

use super::ports::{PlaybackPrimitive, PollHandle, RenderPort, Scheduler, TransportAction};

/// The transport mode of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Controller behavior fixed at construction.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Track loaded at startup; clamped into the playlist.
    pub default_track: usize,
    /// Start playback whenever a track is selected.
    pub auto_play: bool,
    /// Interval of the progress poll while playing.
    pub poll_interval: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_track: 0,
            auto_play: false,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl From<&PlayerSettings> for ControllerOptions {
    fn from(settings: &PlayerSettings) -> Self {
        Self {
            default_track: settings.default_track,
            auto_play: settings.auto_play,
            poll_interval: Duration::from_millis(settings.poll_interval_ms.max(1)),
        }
    }
}

/// Keeps the playback primitive and the widget's views in sync.
///
/// Invariants:
/// - `current` is always a valid index into a non-empty playlist.
/// - `poll` is `Some` exactly while `state == Playing`, and there is never
///   more than one live handle: a new one is only created after the old one
///   was cancelled.
pub struct PlayerController<P, R, S>
where
    P: PlaybackPrimitive,
    R: RenderPort,
    S: Scheduler,
{
    playlist: Playlist,
    options: ControllerOptions,
    current: usize,
    state: TransportState,
    elapsed_seconds: f64,
    poll: Option<PollHandle>,
    primitive: P,
    render: R,
    scheduler: S,
}

impl<P, R, S> PlayerController<P, R, S>
where
    P: PlaybackPrimitive,
    R: RenderPort,
    S: Scheduler,
{
    /// Build a controller and prime it with the default track.
    ///
    /// Priming renders the playlist, loads the default track without playing
    /// it (even with `auto_play`), resets progress to zero and shows the
    /// total time.
    pub fn new(
        playlist: Playlist,
        options: ControllerOptions,
        primitive: P,
        render: R,
        scheduler: S,
    ) -> Result<Self> {
        if playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        let current = options.default_track.min(playlist.len() - 1);
        let mut controller = Self {
            playlist,
            options,
            current,
            state: TransportState::Stopped,
            elapsed_seconds: 0.0,
            poll: None,
            primitive,
            render,
            scheduler,
        };
        controller.prime();
        Ok(controller)
    }

    fn prime(&mut self) {
        self.render.render_playlist(self.playlist.tracks());
        self.load_current();
        self.refresh_track_views();
        self.rewind();
        self.refresh_total_time();
        tracing::debug!(index = self.current, "player primed");
    }

    /// Make `index` the current track.
    ///
    /// Playback continues on the new track when the player was playing or
    /// `auto_play` is set; otherwise the track is only loaded and the
    /// transport state is left as it was.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        self.playlist.get(index)?;

        let resume = self.state == TransportState::Playing || self.options.auto_play;
        self.cancel_poll();
        self.current = index;
        self.load_current();

        if resume {
            self.start_playback();
        }

        self.refresh_track_views();
        tracing::debug!(index, state = ?self.state, "track selected");
        Ok(())
    }

    /// Start or resume playback. Re-entry while playing only re-asserts the
    /// primitive's playback.
    pub fn play(&mut self) -> Result<()> {
        if self.state == TransportState::Playing {
            self.primitive.play();
            return Ok(());
        }
        self.start_playback();
        tracing::debug!(index = self.current, "playback started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.primitive.pause();
        self.cancel_poll();
        self.state = TransportState::Paused;
        self.render.set_transport_button_state(TransportAction::Play);
        tracing::debug!(index = self.current, "playback paused");
        Ok(())
    }

    /// Pause and rewind to the start of the current track.
    pub fn stop(&mut self) -> Result<()> {
        self.rewind();
        tracing::debug!(index = self.current, "playback stopped");
        Ok(())
    }

    fn rewind(&mut self) {
        self.primitive.pause();
        self.primitive.set_position(0.0);
        self.cancel_poll();
        self.elapsed_seconds = 0.0;
        self.refresh_progress();
        self.state = TransportState::Stopped;
        self.render.set_transport_button_state(TransportAction::Play);
    }

    pub fn next(&mut self) -> Result<()> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }
        self.select_track((self.current + 1) % len)
    }

    pub fn prev(&mut self) -> Result<()> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }
        let index = if self.current == 0 {
            len - 1
        } else {
            self.current - 1
        };
        self.select_track(index)
    }

    /// Jump to `fraction` (0..=1) of the current track.
    pub fn seek_to(&mut self, fraction: f64) -> Result<()> {
        if !fraction.is_finite() {
            return Err(PlayerError::InvalidFraction(fraction));
        }
        let duration = self.primitive.duration();
        if !has_known_duration(duration) {
            return Err(PlayerError::SeekUnavailable);
        }

        let position = fraction.clamp(0.0, 1.0) * duration;
        self.primitive.set_position(position);
        self.elapsed_seconds = position;
        self.refresh_progress();
        Ok(())
    }

    /// Poll callback. Advances to the next track once the current one ended.
    pub fn on_tick(&mut self) -> Result<()> {
        if self.state != TransportState::Playing {
            return Ok(());
        }
        self.elapsed_seconds = self.primitive.position();
        self.refresh_progress();

        if self.primitive.ended() {
            tracing::debug!(index = self.current, "track ended");
            self.next()?;
        }
        Ok(())
    }

    /// Called once the primitive knows the duration of the loaded track.
    pub fn on_metadata_loaded(&mut self) -> Result<()> {
        self.elapsed_seconds = self.primitive.position();
        self.refresh_progress();
        self.refresh_total_time();
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.current]
    }

    pub fn transport_state(&self) -> TransportState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// The live poll handle, present only while playing.
    pub fn poll_handle(&self) -> Option<PollHandle> {
        self.poll
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn primitive_mut(&mut self) -> &mut P {
        &mut self.primitive
    }

    pub fn render_port(&self) -> &R {
        &self.render
    }

    pub fn render_port_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn start_playback(&mut self) {
        self.primitive.play();
        self.cancel_poll();
        self.poll = Some(self.scheduler.schedule_repeating(self.options.poll_interval));
        self.state = TransportState::Playing;
        self.render.set_transport_button_state(TransportAction::Pause);
    }

    fn cancel_poll(&mut self) {
        if let Some(handle) = self.poll.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn load_current(&mut self) {
        self.primitive.load(&self.playlist.tracks()[self.current].file_url);
    }

    fn refresh_track_views(&mut self) {
        let track = &self.playlist.tracks()[self.current];
        self.render.highlight_track(self.current);
        self.render.set_thumbnail(&track.thumb_url);
        self.render.render_track_details(track);
    }

    fn refresh_progress(&mut self) {
        let fill = progress_percentage(self.elapsed_seconds, self.primitive.duration());
        self.render.set_progress_fill(fill);
        self.render.set_elapsed_time_text(&format_clock(self.elapsed_seconds));
    }

    fn refresh_total_time(&mut self) {
        let total = format_clock(self.primitive.duration());
        self.render.set_total_time_text(&total);
    }
}

impl<P, R, S> Drop for PlayerController<P, R, S>
where
    P: PlaybackPrimitive,
    R: RenderPort,
    S: Scheduler,
{
    fn drop(&mut self) {
        self.cancel_poll();
    }
}
