//! Player module: the transport state machine and the ports it drives.
//!
//! `PlayerController` owns the current track index, the transport state and
//! the single poll handle. Everything it cannot do itself (audio output,
//! drawing, timers) goes through the traits in `player::ports`.

mod controller;
mod events;
mod ports;

pub use controller::*;
pub use events::*;
pub use ports::*;

#[cfg(test)]
mod tests;
