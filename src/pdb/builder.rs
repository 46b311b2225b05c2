//! Database assembly
//!
//! A full parse runs four passes over the table directory, each a pure
//! function returning a fresh map:
//! 1. lookups (artists, albums, genres, keys, labels)
//! 2. the flat playlist tree
//! 3. playlist entries
//! 4. tracks, resolved against the pass 1 maps
//!
//! and then assembles the sorted track list and the playlist hierarchy.

use super::dates::parse_date_loose;
use super::directory::TableDirectory;
use super::pages::walk_table;
use super::reader::ByteReader;
use super::rows::{
    decode_lookup_row, decode_playlist_entry, decode_playlist_node, decode_track,
    PlaylistEntryRow, PlaylistNode, TrackRow,
};
use super::types::PageType;
use crate::model::{Database, LookupTables, Playlist, Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};
use std::collections::{BTreeMap, HashMap};

/// Pass 1 output. Labels are decoded but nothing downstream reads them.
#[derive(Debug, Default)]
struct Lookups {
    tables: LookupTables,
    labels: HashMap<u32, String>,
}

/// Parse a complete export database
pub fn parse_database(data: &[u8]) -> Database {
    parse_database_with_fallback(data, &LookupTables::default())
}

/// Parse a complete export database, resolving track foreign keys through
/// `fallback` when the file's own lookup tables lack an id
///
/// This is how metadata from `exportExt.pdb` enriches `export.pdb` tracks.
pub fn parse_database_with_fallback(data: &[u8], fallback: &LookupTables) -> Database {
    let reader = ByteReader::new(data);
    let directory = TableDirectory::read(&reader);
    log::debug!(
        "PDB: {} bytes, page size {}, {} tables",
        data.len(),
        directory.page_size,
        directory.tables.len()
    );

    let mut lookups = read_lookups(reader, &directory);
    log::debug!(
        "Lookups: {} artists, {} albums, {} genres, {} keys, {} labels",
        lookups.tables.artists.len(),
        lookups.tables.albums.len(),
        lookups.tables.genres.len(),
        lookups.tables.keys.len(),
        lookups.labels.len()
    );
    lookups.tables.merge_missing(fallback);

    let tree = read_playlist_tree(reader, &directory);
    let entries = read_playlist_entries(reader, &directory);
    let tracks = read_tracks(reader, &directory, &lookups.tables);
    log::debug!(
        "Decoded {} playlist nodes, entries for {} playlists, {} tracks",
        tree.len(),
        entries.len(),
        tracks.len()
    );

    Database::new(tracks.into_values().collect(), assemble_playlists(&tree, entries))
}

/// Parse only the artist, album, genre and key tables
pub fn parse_lookup_tables(data: &[u8]) -> LookupTables {
    let reader = ByteReader::new(data);
    let directory = TableDirectory::read(&reader);
    read_lookups(reader, &directory).tables
}

/// Pass 1
fn read_lookups(reader: ByteReader<'_>, directory: &TableDirectory) -> Lookups {
    let mut lookups = Lookups::default();

    let tables = directory
        .tables
        .iter()
        .filter(|table| table.kind().is_some_and(PageType::is_lookup));
    for table in tables {
        for row in walk_table(reader, table, directory.page_size) {
            let Some(decoded) = decode_lookup_row(&reader, row) else {
                continue;
            };
            let target = match decoded.kind {
                PageType::Artists => &mut lookups.tables.artists,
                PageType::Albums => &mut lookups.tables.albums,
                PageType::Genres => &mut lookups.tables.genres,
                PageType::Keys => &mut lookups.tables.keys,
                PageType::Labels => &mut lookups.labels,
                _ => continue,
            };
            target.insert(decoded.id, decoded.name);
        }
    }

    lookups
}

/// Pass 2
fn read_playlist_tree(reader: ByteReader<'_>, directory: &TableDirectory) -> BTreeMap<u32, PlaylistNode> {
    let mut nodes = BTreeMap::new();
    for table in directory.tables_of(PageType::PlaylistTree) {
        for row in walk_table(reader, table, directory.page_size) {
            if let Some(node) = decode_playlist_node(&reader, row.offset) {
                nodes.insert(node.id, node);
            }
        }
    }
    nodes
}

/// Pass 3. Entries stay in file order here; position ordering happens at assembly.
fn read_playlist_entries(
    reader: ByteReader<'_>,
    directory: &TableDirectory,
) -> HashMap<u32, Vec<PlaylistEntryRow>> {
    let mut entries: HashMap<u32, Vec<PlaylistEntryRow>> = HashMap::new();
    for table in directory.tables_of(PageType::PlaylistEntries) {
        for row in walk_table(reader, table, directory.page_size) {
            if let Some(entry) = decode_playlist_entry(&reader, row.offset) {
                entries.entry(entry.playlist_id).or_default().push(entry);
            }
        }
    }
    entries
}

/// Pass 4. A later row with the same id replaces an earlier one.
fn read_tracks(
    reader: ByteReader<'_>,
    directory: &TableDirectory,
    lookups: &LookupTables,
) -> BTreeMap<u32, Track> {
    let mut tracks = BTreeMap::new();
    for table in directory.tables_of(PageType::Tracks) {
        for row in walk_table(reader, table, directory.page_size) {
            if let Some(track_row) = decode_track(&reader, row.offset) {
                let track = resolve_track(track_row, lookups);
                tracks.insert(track.id, track);
            }
        }
    }
    tracks
}

/// Resolve a track row's foreign keys and apply placeholder defaults
pub fn resolve_track(row: TrackRow, lookups: &LookupTables) -> Track {
    let name = |map: &HashMap<u32, String>, id: u32| map.get(&id).cloned();
    let bpm = row.bpm();

    Track {
        id: row.id,
        title: if row.title.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            row.title
        },
        artist: name(&lookups.artists, row.artist_id).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: name(&lookups.albums, row.album_id).unwrap_or_default(),
        genre: name(&lookups.genres, row.genre_id).unwrap_or_default(),
        duration: u32::from(row.duration),
        bpm,
        key: name(&lookups.keys, row.key_id).unwrap_or_default(),
        rating: row.rating,
        bitrate: row.bitrate,
        file_path: row.file_path,
        date_added: parse_date_loose(&row.date_added),
    }
}

/// Deepest playlist nesting kept; roots are level 1
pub const MAX_PLAYLIST_DEPTH: usize = 256;

/// Build the playlist hierarchy from the flat node map
///
/// Nodes are grouped by parent id (0 = root) and attached recursively, each
/// sibling list ordered by sort order, then id. Nodes whose parent never
/// appears are unreachable from the roots and left out, as are nodes nested
/// deeper than [`MAX_PLAYLIST_DEPTH`].
pub fn assemble_playlists(
    nodes: &BTreeMap<u32, PlaylistNode>,
    mut entries: HashMap<u32, Vec<PlaylistEntryRow>>,
) -> Vec<Playlist> {
    let mut children_of: HashMap<u32, Vec<&PlaylistNode>> = HashMap::new();
    for node in nodes.values() {
        children_of.entry(node.parent_id).or_default().push(node);
    }
    for siblings in children_of.values_mut() {
        siblings.sort_by_key(|node| (node.sort_order, node.id));
    }

    let roots = build_children(0, 0, &children_of, &mut entries);

    let attached: usize = roots.iter().map(count_nodes).sum();
    if attached < nodes.len() {
        log::debug!(
            "{} playlist nodes are not reachable from the root or nested too deep",
            nodes.len() - attached
        );
    }
    roots
}

/// Children of `parent_id`, which sits `depth` levels below the root
fn build_children(
    parent_id: u32,
    depth: usize,
    children_of: &HashMap<u32, Vec<&PlaylistNode>>,
    entries: &mut HashMap<u32, Vec<PlaylistEntryRow>>,
) -> Vec<Playlist> {
    if depth >= MAX_PLAYLIST_DEPTH {
        return Vec::new();
    }
    let Some(siblings) = children_of.get(&parent_id) else {
        return Vec::new();
    };

    siblings
        .iter()
        .map(|node| {
            let mut rows = entries.remove(&node.id).unwrap_or_default();
            rows.sort_by_key(|entry| entry.position);

            Playlist {
                id: node.id,
                name: node.name.clone(),
                parent_id: (node.parent_id != 0).then_some(node.parent_id),
                is_folder: node.is_folder,
                children: build_children(node.id, depth + 1, children_of, entries),
                track_ids: rows.iter().map(|entry| entry.track_id).collect(),
            }
        })
        .collect()
}

fn count_nodes(playlist: &Playlist) -> usize {
    1 + playlist.children.iter().map(count_nodes).sum::<usize>()
}
