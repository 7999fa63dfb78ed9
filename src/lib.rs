//! playbar: an embeddable audio player widget.
//!
//! The crate keeps a playlist, a transport state machine, and five dependent
//! views (playlist highlight, track details, thumbnail, progress fill,
//! elapsed/total time) consistent with each other. Audio output, drawing and
//! timers are supplied by the host through the traits in [`player`].

pub mod config;
pub mod error;
pub mod player;
pub mod playlist;
pub mod time;

pub use error::{PlayerError, PlaylistError};
pub use player::{
    ControlAction, ControllerOptions, InputEvent, PlaybackPrimitive, PlayerController, PollHandle,
    RenderPort, Scheduler, TransportAction, TransportState,
};
pub use playlist::{Playlist, Track};
