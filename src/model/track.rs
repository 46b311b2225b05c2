use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder title for tracks whose title string is empty
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder artist for tracks whose artist id does not resolve
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A single track decoded from the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Row id, unique and non-zero
    pub id: u32,

    /// Track title ("Unknown Title" when empty)
    pub title: String,

    /// Artist name ("Unknown Artist" when unresolved)
    pub artist: String,

    /// Album name (empty when unresolved)
    pub album: String,

    /// Genre (empty when unresolved)
    pub genre: String,

    /// Track duration in seconds
    pub duration: u32,

    /// Tempo in beats per minute
    pub bpm: f64,

    /// Musical key name, e.g. "Am" (empty when unresolved)
    pub key: String,

    /// Star rating as stored by the library software
    pub rating: u8,

    /// Bitrate in kbps
    pub bitrate: u32,

    /// Path of the audio file on the media
    pub file_path: String,

    /// When the track was added, if the stored string could be parsed
    pub date_added: Option<DateTime<Utc>>,
}

impl Track {
    /// Date added, or `fallback` when the stored value was missing or unparseable
    pub fn date_added_or(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.date_added.unwrap_or(fallback)
    }

    /// Duration as `m:ss`
    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }
}

/// Format a number of seconds as `m:ss`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
