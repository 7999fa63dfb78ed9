//! Local-file playback for the terminal host.
//!
//! `RodioPrimitive` plays one track at a time on the default output device
//! and answers the controller's position and duration queries.

mod primitive;
mod sink;

pub use primitive::RodioPrimitive;
