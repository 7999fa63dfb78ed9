//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to build the playlist
//! and drive the player, and helpers to load configuration from disk.

mod load;
mod schema;

pub use load::{default_config_path, default_log_path, resolve_config_path};
pub use schema::*;
