//! PDB (Pioneer Database) file decoder
//!
//! Reads export.pdb / exportExt.pdb files found on Rekordbox-exported USB
//! devices. The format is a DeviceSQL page store: a header with a table
//! directory, then fixed-size pages linked per table.
//!
//! Decoding never fails. Truncated or corrupt structures end traversal early
//! and produce partial results.

mod builder;
mod dates;
mod directory;
mod pages;
mod reader;
mod rows;
mod strings;
mod types;

pub use builder::{
    assemble_playlists, parse_database, parse_database_with_fallback, parse_lookup_tables,
    resolve_track, MAX_PLAYLIST_DEPTH,
};
pub use dates::parse_date_loose;
pub use directory::{TableDirectory, TableInfo};
pub use pages::{
    group_base, presence_flags_pos, row_group_count, row_offset_pos, walk_table, PageHeader,
    PageWalker, RowRef,
};
pub use reader::ByteReader;
pub use rows::{
    decode_lookup_row, decode_playlist_entry, decode_playlist_node, decode_track, LookupRow,
    PlaylistEntryRow, PlaylistNode, TrackRow, TRACK_STRING_SLOTS,
};
pub use types::{header, page, string_flags, PageType};
