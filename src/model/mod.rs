//! Data model for a decoded export database
//!
//! Everything here is built once per parse and never mutated afterwards.

mod database;
mod lookup;
mod playlist;
mod track;

pub use database::{Database, TrackSection};
pub use lookup::LookupTables;
pub use playlist::Playlist;
pub use track::{format_duration, Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};
