use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// id -> name maps decoded from the artist, album, genre and key tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTables {
    pub artists: HashMap<u32, String>,
    pub albums: HashMap<u32, String>,
    pub genres: HashMap<u32, String>,
    pub keys: HashMap<u32, String>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
            && self.albums.is_empty()
            && self.genres.is_empty()
            && self.keys.is_empty()
    }

    /// Total number of entries across all four maps
    pub fn len(&self) -> usize {
        self.artists.len() + self.albums.len() + self.genres.len() + self.keys.len()
    }

    /// Copy in every entry of `other` whose id is not already present
    pub fn merge_missing(&mut self, other: &LookupTables) {
        fn fill(target: &mut HashMap<u32, String>, source: &HashMap<u32, String>) {
            for (id, name) in source {
                target.entry(*id).or_insert_with(|| name.clone());
            }
        }

        fill(&mut self.artists, &other.artists);
        fill(&mut self.albums, &other.albums);
        fill(&mut self.genres, &other.genres);
        fill(&mut self.keys, &other.keys);
    }
}
