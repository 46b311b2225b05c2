//! Fuzzy track search
//!
//! A query is split into words; a track matches when every word matches at
//! least one searched field. A word matches a field as a substring, or when
//! its characters appear in the field in order ("dft pnk" finds "Daft Punk").

use crate::model::Track;

/// Which fields a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Title, artist and album
    #[default]
    Basic,

    /// Title, artist, album, genre and key
    Extended,
}

/// Tracks matching `query`, in their original order
///
/// An empty or whitespace-only query returns every track.
pub fn filter_tracks<'a>(tracks: &'a [Track], query: &str, scope: SearchScope) -> Vec<&'a Track> {
    let query = query.trim().to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return tracks.iter().collect();
    }

    tracks
        .iter()
        .filter(|track| {
            let fields = searchable_fields(track, scope);
            words
                .iter()
                .all(|word| fields.iter().any(|field| fuzzy_match(word, field)))
        })
        .collect()
}

fn searchable_fields(track: &Track, scope: SearchScope) -> Vec<String> {
    let mut fields = vec![
        track.title.to_lowercase(),
        track.artist.to_lowercase(),
        track.album.to_lowercase(),
    ];
    if scope == SearchScope::Extended {
        fields.push(track.genre.to_lowercase());
        fields.push(track.key.to_lowercase());
    }
    fields
}

/// Substring match, falling back to an in-order character subsequence match
pub fn fuzzy_match(word: &str, target: &str) -> bool {
    if target.contains(word) {
        return true;
    }

    let mut target_chars = target.chars();
    word.chars()
        .all(|wanted| target_chars.any(|candidate| candidate == wanted))
}
