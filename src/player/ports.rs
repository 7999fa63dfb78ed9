//! Capabilities the controller consumes.
//!
//! The host supplies one implementation of each trait when constructing a
//! `PlayerController`.

use std::time::Duration;

use crate::playlist::Track;

/// The audio element the controller delegates playback to.
pub trait PlaybackPrimitive {
    /// Replace the current media with the one at `url`. Does not start it.
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Current position in seconds.
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    /// Track length in seconds, NaN until metadata is known.
    fn duration(&self) -> f64;
    /// Whether the current media played through to its end.
    fn ended(&self) -> bool;
}

/// The action the transport button currently offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportAction {
    Play,
    Pause,
}

/// View updates emitted after every state change.
pub trait RenderPort {
    fn render_playlist(&mut self, tracks: &[Track]);
    fn highlight_track(&mut self, index: usize);
    fn render_track_details(&mut self, track: &Track);
    fn set_thumbnail(&mut self, url: &str);
    /// Progress fill in percent, always within `[0, 100]`.
    fn set_progress_fill(&mut self, percentage: f64);
    fn set_elapsed_time_text(&mut self, text: &str);
    fn set_total_time_text(&mut self, text: &str);
    fn set_transport_button_state(&mut self, action: TransportAction);
}

/// Identifies one repeating task created by a `Scheduler`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PollHandle(pub u64);

/// Repeating timers used for the progress poll.
///
/// The scheduler only keeps time; the host turns each due tick into
/// `InputEvent::Tick`.
pub trait Scheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> PollHandle;
    fn cancel(&mut self, handle: PollHandle);
}
