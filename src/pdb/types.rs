//! PDB type definitions and layout constants

/// Page (table) type identifiers as stored in the table directory and page headers
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    Tracks = 0x00,
    Genres = 0x01,
    Artists = 0x02,
    Albums = 0x03,
    Labels = 0x04,
    Keys = 0x05,
    Colors = 0x06,
    PlaylistTree = 0x07,
    PlaylistEntries = 0x08,
    Artwork = 0x0d,
    Columns = 0x10,
    HistoryPlaylists = 0x11,
    HistoryEntries = 0x12,
    History = 0x13,
}

impl PageType {
    /// Map a raw directory/page type value to a known kind
    pub fn from_raw(raw: u32) -> Option<Self> {
        let kind = match raw {
            0x00 => PageType::Tracks,
            0x01 => PageType::Genres,
            0x02 => PageType::Artists,
            0x03 => PageType::Albums,
            0x04 => PageType::Labels,
            0x05 => PageType::Keys,
            0x06 => PageType::Colors,
            0x07 => PageType::PlaylistTree,
            0x08 => PageType::PlaylistEntries,
            0x0d => PageType::Artwork,
            0x10 => PageType::Columns,
            0x11 => PageType::HistoryPlaylists,
            0x12 => PageType::HistoryEntries,
            0x13 => PageType::History,
            _ => return None,
        };
        Some(kind)
    }

    /// Tables decoded into id -> name maps in the lookup pass
    pub fn is_lookup(self) -> bool {
        matches!(
            self,
            PageType::Artists
                | PageType::Albums
                | PageType::Genres
                | PageType::Keys
                | PageType::Labels
        )
    }
}

/// DeviceSQL string encoding flags
pub mod string_flags {
    /// Short ASCII string (length in the upper 7 bits, bit 0 set)
    pub const SHORT_ASCII: u8 = 0x01;

    /// Long ASCII string (bit 6 set)
    pub const LONG_ASCII: u8 = 0x40;

    /// Long UTF-16 LE string (bits 4,7 set)
    pub const LONG_UTF16LE: u8 = 0x90;
}

/// File header offsets
pub mod header {
    /// u32 page size
    pub const PAGE_SIZE: usize = 0x04;

    /// u32 number of table directory entries
    pub const TABLE_COUNT: usize = 0x08;

    /// First 16-byte table directory entry
    pub const TABLES_START: usize = 0x1c;

    /// Size of one table directory entry
    pub const TABLE_ENTRY_SIZE: usize = 16;
}

/// Page header offsets and row group geometry
pub mod page {
    /// u32 page type
    pub const TYPE: usize = 0x08;

    /// u32 index of the next page in the table
    pub const NEXT_PAGE: usize = 0x0c;

    /// u32 packed row info; the low 13 bits hold the row offset count
    pub const PACKED_ROW_INFO: usize = 0x18;

    /// u8 page flags (high byte of the packed row info)
    pub const FLAGS: usize = 0x1b;

    pub const ROW_COUNT_MASK: u32 = 0x1fff;

    /// Flag bit marking an index page rather than a data page
    pub const FLAG_INDEX_PAGE: u8 = 0x40;

    /// Data starts at byte 40
    pub const HEAP_START: usize = 0x28;

    /// 16 row offsets + presence flags + unknown u16
    pub const ROW_GROUP_SIZE: usize = 0x24;

    pub const ROWS_PER_GROUP: usize = 16;
}
