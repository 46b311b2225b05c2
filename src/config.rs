//! Explorer configuration

use crate::export::ExportFormat;
use crate::search::SearchScope;
use std::path::PathBuf;

/// What the CLI prints when no file export is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Track and playlist counts
    #[default]
    Summary,

    /// One line per track
    Tracks,

    /// The playlist tree with track counts
    Playlists,
}

/// Configuration for loading and presenting a library
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// export.pdb file, or a media root to scan for one
    pub source: PathBuf,

    /// Merge artist/album/genre/key names from exportExt.pdb when present
    pub merge_ext: bool,

    /// Console view
    pub view: View,

    /// File export; `None` prints to stdout
    pub export: Option<(ExportFormat, Option<PathBuf>)>,

    /// Fuzzy search restricting the listed tracks
    pub search: Option<String>,

    pub search_scope: SearchScope,

    /// Restrict the listed tracks to one playlist or folder
    pub playlist: Option<String>,
}

impl ExplorerConfig {
    /// Create a new configuration
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            merge_ext: true,
            view: View::Summary,
            export: None,
            search: None,
            search_scope: SearchScope::default(),
            playlist: None,
        }
    }

    /// Ignore exportExt.pdb even if one is found
    pub fn without_ext(mut self) -> Self {
        self.merge_ext = false;
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Export tracks as `format`, to `output` or stdout
    pub fn with_export(mut self, format: ExportFormat, output: Option<PathBuf>) -> Self {
        self.export = Some((format, output));
        self
    }

    pub fn with_search(mut self, query: String) -> Self {
        self.search = Some(query);
        self
    }

    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.search_scope = scope;
        self
    }

    pub fn with_playlist(mut self, name: String) -> Self {
        self.playlist = Some(name);
        self
    }
}
