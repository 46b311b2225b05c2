use serde::{Deserialize, Serialize};

/// A playlist or playlist folder
///
/// Folders hold `children`; playlists hold `track_ids` in play order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Node id, unique and non-zero
    pub id: u32,

    /// Playlist name
    pub name: String,

    /// Parent folder id (None = root level)
    pub parent_id: Option<u32>,

    /// Whether this is a folder (can contain sub-playlists)
    pub is_folder: bool,

    /// Child nodes ordered by their stored sort order
    pub children: Vec<Playlist>,

    /// Track ids ordered by entry position
    pub track_ids: Vec<u32>,
}

impl Playlist {
    /// Number of tracks in this playlist, or across all descendants of a folder
    ///
    /// Tracks appearing in several playlists are counted once per playlist.
    pub fn total_track_count(&self) -> usize {
        if self.is_folder {
            self.children.iter().map(Playlist::total_track_count).sum()
        } else {
            self.track_ids.len()
        }
    }

    /// A node with no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a node by id in this subtree
    pub fn find(&self, id: u32) -> Option<&Playlist> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Visit this node and every descendant, depth first, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Playlist, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Playlist, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: u32, track_ids: Vec<u32>) -> Playlist {
        Playlist {
            id,
            name: format!("Playlist {}", id),
            parent_id: None,
            is_folder: false,
            children: Vec::new(),
            track_ids,
        }
    }

    fn folder(id: u32, children: Vec<Playlist>) -> Playlist {
        Playlist {
            is_folder: true,
            children,
            ..playlist(id, Vec::new())
        }
    }

    #[test]
    fn test_total_track_count_sums_descendants() {
        let tree = folder(
            1,
            vec![
                playlist(2, vec![10, 11]),
                folder(3, vec![playlist(4, vec![10, 12, 13])]),
                folder(5, Vec::new()),
            ],
        );
        // track 10 appears twice and is counted twice
        assert_eq!(tree.total_track_count(), 5);
        assert_eq!(folder(6, Vec::new()).total_track_count(), 0);
    }

    #[test]
    fn test_folder_ignores_own_track_ids() {
        let mut node = folder(1, vec![playlist(2, vec![1])]);
        node.track_ids = vec![7, 8, 9];
        assert_eq!(node.total_track_count(), 1);
    }

    #[test]
    fn test_find_and_walk() {
        let tree = folder(1, vec![folder(2, vec![playlist(3, vec![])]), playlist(4, vec![])]);
        assert_eq!(tree.find(3).map(|p| p.id), Some(3));
        assert!(tree.find(99).is_none());
        assert!(tree.find(4).unwrap().is_leaf());

        let mut seen = Vec::new();
        tree.walk(&mut |node, depth| seen.push((node.id, depth)));
        assert_eq!(seen, vec![(1, 0), (2, 1), (3, 2), (4, 1)]);
    }
}
