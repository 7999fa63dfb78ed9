//! Playlist module: the ordered, immutable track list the player drives.
//!
//! Tracks come either from `[[playlist]]` config entries (`playlist::load`)
//! or from a directory scan (`playlist::scan`).

mod load;
mod model;
mod scan;

pub use model::*;
pub use scan::scan;
