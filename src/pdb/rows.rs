//! Row decoders for each table kind
//!
//! All offsets are relative to the row base address handed out by the page
//! walker. Decoders never fail; rows that cannot identify themselves (zero
//! id, empty name) are dropped by returning `None`.

use super::pages::RowRef;
use super::reader::ByteReader;
use super::types::PageType;

/// A decoded id -> name row from one of the lookup tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRow {
    pub kind: PageType,
    pub id: u32,
    pub name: String,
}

/// Decode an artist, album, genre, key or label row
///
/// Returns `None` for other page types and for rows with an empty name.
pub fn decode_lookup_row(reader: &ByteReader<'_>, row: RowRef) -> Option<LookupRow> {
    let kind = PageType::from_raw(row.page_type)?;
    let (id, name) = match kind {
        PageType::Artists => decode_artist(reader, row.offset),
        PageType::Albums => decode_album(reader, row.offset),
        PageType::Genres | PageType::Labels => {
            (reader.u32(row.offset), reader.read_string(row.offset + 4))
        }
        PageType::Keys => (reader.u32(row.offset), reader.read_string(row.offset + 8)),
        _ => return None,
    };

    if name.is_empty() {
        return None;
    }
    Some(LookupRow { kind, id, name })
}

/// Artist row: subtype u16, index_shift u16, id u32, then a near (u8 @ 0x09)
/// or far (u16 @ 0x0a) name offset depending on subtype bit 0x04
fn decode_artist(reader: &ByteReader<'_>, base: usize) -> (u32, String) {
    let subtype = reader.u16(base);
    let id = reader.u32(base + 4);
    let name_offset = if subtype & 0x04 == 0x04 {
        reader.u16(base + 0x0a) as usize
    } else {
        reader.u8(base + 9) as usize
    };
    (id, reader.read_string(base + name_offset))
}

/// Album row: id at 0x0c. Subtype 0x80 rows carry the name inline at 0x16;
/// other subtypes store a far (u16 @ 0x16) or near (u8 @ 0x11) name offset.
fn decode_album(reader: &ByteReader<'_>, base: usize) -> (u32, String) {
    let subtype = reader.u16(base);
    let id = reader.u32(base + 12);

    let name = if subtype == 0x80 {
        reader.read_string(base + 0x16)
    } else {
        let name_offset = if subtype & 0x04 == 0x04 {
            reader.u16(base + 0x16) as usize
        } else {
            reader.u8(base + 17) as usize
        };
        reader.read_string(base + name_offset)
    };
    (id, name)
}

/// One node of the flat playlist tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistNode {
    pub id: u32,
    /// 0 = root level
    pub parent_id: u32,
    pub sort_order: u32,
    pub is_folder: bool,
    pub name: String,
}

/// PlaylistTreeNode row:
///   - u32: parent_id (0 = root)
///   - u32: unknown
///   - u32: sort_order
///   - u32: id
///   - u32: node_is_folder (non-zero = folder)
///   - DeviceSQLString: name (inline)
pub fn decode_playlist_node(reader: &ByteReader<'_>, base: usize) -> Option<PlaylistNode> {
    let parent_id = reader.u32(base);
    let sort_order = reader.u32(base + 8);
    let id = reader.u32(base + 12);
    let is_folder = reader.u32(base + 16) != 0;
    let name = reader.read_string(base + 20);

    if name.is_empty() || id == 0 {
        return None;
    }
    Some(PlaylistNode {
        id,
        parent_id,
        sort_order,
        is_folder,
        name,
    })
}

/// One playlist membership row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistEntryRow {
    pub position: u32,
    pub track_id: u32,
    pub playlist_id: u32,
}

/// PlaylistEntry row: entry_index u32, track_id u32, playlist_id u32
pub fn decode_playlist_entry(reader: &ByteReader<'_>, base: usize) -> Option<PlaylistEntryRow> {
    let position = reader.u32(base);
    let track_id = reader.u32(base + 4);
    let playlist_id = reader.u32(base + 8);

    if playlist_id == 0 || track_id == 0 {
        return None;
    }
    Some(PlaylistEntryRow {
        position,
        track_id,
        playlist_id,
    })
}

/// Number of u16 string offsets following the fixed track header
pub const TRACK_STRING_SLOTS: usize = 21;

/// Start of the string offset array
const TRACK_STRING_OFFSETS: usize = 0x5e;

const SLOT_DATE_ADDED: usize = 10;
const SLOT_TITLE: usize = 17;
const SLOT_FILE_PATH: usize = 20;

/// A track row before its foreign keys are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub id: u32,
    pub title: String,
    pub artist_id: u32,
    pub album_id: u32,
    pub genre_id: u32,
    pub key_id: u32,
    /// BPM * 100
    pub tempo: u32,
    /// Seconds
    pub duration: u16,
    pub rating: u8,
    pub bitrate: u32,
    pub file_path: String,
    pub date_added: String,
}

impl TrackRow {
    pub fn bpm(&self) -> f64 {
        f64::from(self.tempo) / 100.0
    }
}

/// Track row. Fixed header fields used here:
///   0x20 key_id, 0x30 bitrate, 0x38 tempo, 0x3c genre_id, 0x40 album_id,
///   0x44 artist_id, 0x48 id, 0x54 duration (u16), 0x59 rating (u8)
/// followed at 0x5e by 21 u16 string offsets relative to the row start.
pub fn decode_track(reader: &ByteReader<'_>, base: usize) -> Option<TrackRow> {
    let id = reader.u32(base + 0x48);
    if id == 0 {
        return None;
    }

    let string_at = |slot: usize| -> String {
        match reader.u16(base + TRACK_STRING_OFFSETS + slot * 2) {
            0 => String::new(),
            offset => reader.read_string(base + offset as usize),
        }
    };

    Some(TrackRow {
        id,
        title: string_at(SLOT_TITLE),
        artist_id: reader.u32(base + 0x44),
        album_id: reader.u32(base + 0x40),
        genre_id: reader.u32(base + 0x3c),
        key_id: reader.u32(base + 0x20),
        tempo: reader.u32(base + 0x38),
        duration: reader.u16(base + 0x54),
        rating: reader.u8(base + 0x59),
        bitrate: reader.u32(base + 0x30),
        file_path: string_at(SLOT_FILE_PATH),
        date_added: string_at(SLOT_DATE_ADDED),
    })
}
