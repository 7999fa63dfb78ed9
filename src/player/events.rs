//! Input events surfaced by the UI layer and their routing.

use crate::error::Result;

use super::controller::PlayerController;
use super::ports::{PlaybackPrimitive, RenderPort, Scheduler};

/// A transport control button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlAction {
    Prev,
    Next,
    Play,
    Pause,
    Stop,
}

/// Everything that can drive the controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// A control button was activated.
    Control(ControlAction),
    /// A playlist item was activated.
    PlaylistItem(usize),
    /// The progress bar was activated at this fraction of its width.
    ProgressBar(f64),
    /// The primitive now knows the track duration.
    MetadataLoaded,
    /// The poll handle fired.
    Tick,
}

impl<P, R, S> PlayerController<P, R, S>
where
    P: PlaybackPrimitive,
    R: RenderPort,
    S: Scheduler,
{
    /// Route one input event to exactly one controller operation.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Control(ControlAction::Prev) => self.prev(),
            InputEvent::Control(ControlAction::Next) => self.next(),
            InputEvent::Control(ControlAction::Play) => self.play(),
            InputEvent::Control(ControlAction::Pause) => self.pause(),
            InputEvent::Control(ControlAction::Stop) => self.stop(),
            // Re-activating the current item changes nothing.
            InputEvent::PlaylistItem(index) if index == self.current_index() => Ok(()),
            InputEvent::PlaylistItem(index) => self.select_track(index),
            InputEvent::ProgressBar(fraction) => self.seek_to(fraction),
            InputEvent::MetadataLoaded => self.on_metadata_loaded(),
            InputEvent::Tick => self.on_tick(),
        }
    }
}
