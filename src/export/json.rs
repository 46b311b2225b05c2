use crate::error::Result;
use crate::model::Track;
use chrono::SecondsFormat;
use serde::Serialize;

/// Exported view of a track; fields are declared in key order so the output
/// has sorted keys
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackExport<'a> {
    album: &'a str,
    artist: &'a str,
    bitrate: u32,
    bpm: f64,
    date_added: Option<String>,
    duration: u32,
    file_path: &'a str,
    genre: &'a str,
    id: u32,
    key: &'a str,
    rating: u8,
    title: &'a str,
}

impl<'a> From<&'a Track> for TrackExport<'a> {
    fn from(track: &'a Track) -> Self {
        Self {
            album: &track.album,
            artist: &track.artist,
            bitrate: track.bitrate,
            bpm: track.bpm,
            date_added: track
                .date_added
                .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            duration: track.duration,
            file_path: &track.file_path,
            genre: &track.genre,
            id: track.id,
            key: &track.key,
            rating: track.rating,
            title: &track.title,
        }
    }
}

/// Render tracks as a pretty-printed JSON array
pub fn tracks_to_json(tracks: &[Track]) -> Result<String> {
    let payload: Vec<TrackExport<'_>> = tracks.iter().map(TrackExport::from).collect();
    Ok(serde_json::to_string_pretty(&payload)?)
}
