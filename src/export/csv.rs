use crate::model::Track;
use chrono::SecondsFormat;

const HEADER: [&str; 12] = [
    "row",
    "id",
    "title",
    "artist",
    "album",
    "genre",
    "duration",
    "bpm",
    "rating",
    "bitrate",
    "filePath",
    "dateAdded",
];

/// Render tracks as CSV, one numbered row per track
///
/// Text fields are always quoted, with embedded quotes doubled.
pub fn tracks_to_csv(tracks: &[Track]) -> String {
    let mut lines = Vec::with_capacity(tracks.len() + 1);
    lines.push(HEADER.join(","));

    for (idx, track) in tracks.iter().enumerate() {
        let date_added = track
            .date_added
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();

        let fields = [
            (idx + 1).to_string(),
            track.id.to_string(),
            quote(&track.title),
            quote(&track.artist),
            quote(&track.album),
            quote(&track.genre),
            track.duration.to_string(),
            format!("{:.2}", track.bpm),
            track.rating.to_string(),
            track.bitrate.to_string(),
            quote(&track.file_path),
            quote(&date_added),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
