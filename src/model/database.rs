use super::{Playlist, Track};
use crate::search::{filter_tracks, SearchScope};
use serde::Serialize;

/// Decoded contents of one export database
///
/// Tracks are sorted ascending by id; playlists are the root level of the
/// playlist tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Database {
    tracks: Vec<Track>,
    playlists: Vec<Playlist>,
}

/// Tracks of one playlist found under a folder, titled with its folder path
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSection<'a> {
    /// "Folder / Subfolder / Playlist"
    pub title: String,
    pub tracks: Vec<&'a Track>,
}

impl Database {
    /// Assemble a database; `tracks` must already be sorted by id
    pub(crate) fn new(tracks: Vec<Track>, playlists: Vec<Playlist>) -> Self {
        debug_assert!(tracks.windows(2).all(|pair| pair[0].id < pair[1].id));
        Self { tracks, playlists }
    }

    /// All tracks, ascending by id
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Root-level playlists and folders
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of playlist tree nodes at every level, folders included
    pub fn playlist_count(&self) -> usize {
        let mut count = 0;
        for root in &self.playlists {
            root.walk(&mut |_, _| count += 1);
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.playlists.is_empty()
    }

    /// Get a track by id
    pub fn get_track(&self, id: u32) -> Option<&Track> {
        self.tracks
            .binary_search_by_key(&id, |track| track.id)
            .ok()
            .map(|index| &self.tracks[index])
    }

    /// Tracks of a playlist in entry order; ids without a track are skipped
    pub fn tracks_for_playlist(&self, playlist: &Playlist) -> Vec<&Track> {
        playlist
            .track_ids
            .iter()
            .filter_map(|id| self.get_track(*id))
            .collect()
    }

    /// Find a playlist or folder anywhere in the tree by id
    pub fn find_playlist(&self, id: u32) -> Option<&Playlist> {
        self.playlists.iter().find_map(|root| root.find(id))
    }

    /// First playlist or folder named `name`, depth first in display order
    pub fn find_playlist_by_name(&self, name: &str) -> Option<&Playlist> {
        let mut found = None;
        for root in &self.playlists {
            root.walk(&mut |node, _| {
                if found.is_none() && node.name == name {
                    found = Some(node);
                }
            });
        }
        found
    }

    /// One section per non-empty playlist below `folder`
    ///
    /// Sub-folders are descended into; section titles join the folder path
    /// with " / ", starting with the folder's own name.
    pub fn sections_under_folder<'a>(&'a self, folder: &'a Playlist) -> Vec<TrackSection<'a>> {
        let mut sections = Vec::new();
        self.collect_sections(folder, vec![folder.name.as_str()], &mut sections);
        sections
    }

    fn collect_sections<'a>(
        &'a self,
        node: &'a Playlist,
        path: Vec<&'a str>,
        sections: &mut Vec<TrackSection<'a>>,
    ) {
        if node.is_folder {
            for child in &node.children {
                let mut child_path = path.clone();
                child_path.push(child.name.as_str());
                self.collect_sections(child, child_path, sections);
            }
            return;
        }

        let tracks = self.tracks_for_playlist(node);
        if !tracks.is_empty() {
            sections.push(TrackSection {
                title: path.join(" / "),
                tracks,
            });
        }
    }

    /// Fuzzy search over the track list
    pub fn search(&self, query: &str, scope: SearchScope) -> Vec<&Track> {
        filter_tracks(&self.tracks, query, scope)
    }
}
