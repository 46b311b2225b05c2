//! In-memory PDB image builder for integration tests
//!
//! Lays files out the way Rekordbox does: page 0 holds the file header and
//! table directory, every table is a chain of data pages with rows packed
//! from the heap start and row groups written backwards from the page end.

#![allow(dead_code)]

use rekordbox_explorer::pdb::{header, page, string_flags, PageType, TRACK_STRING_SLOTS};

pub const PAGE_SIZE: usize = 4096;

/// One page worth of encoded rows
pub type PageRows = Vec<Vec<u8>>;

struct TableSpec {
    page_type: u32,
    pages: Vec<PageRows>,
}

/// Builder for a complete PDB image
pub struct PdbBuilder {
    page_size: usize,
    tables: Vec<TableSpec>,
}

/// Where a table's pages ended up in the built image
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    pub first_page: u32,
    pub last_page: u32,
}

impl PdbBuilder {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            tables: Vec::new(),
        }
    }

    /// Add a table whose rows all fit on one page
    pub fn table(self, kind: PageType, rows: PageRows) -> Self {
        self.table_pages(kind, vec![rows])
    }

    /// Add a table spread over several linked pages
    pub fn table_pages(mut self, kind: PageType, pages: Vec<PageRows>) -> Self {
        self.tables.push(TableSpec {
            page_type: kind as u32,
            pages,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.build_with_layout().0
    }

    /// Build the image, also returning each table's page range in order of addition
    pub fn build_with_layout(&self) -> (Vec<u8>, Vec<TableLayout>) {
        let total_pages = 1 + self.tables.iter().map(|t| t.pages.len()).sum::<usize>();
        let mut data = vec![0u8; total_pages * self.page_size];

        put_u32(&mut data, header::PAGE_SIZE, self.page_size as u32);
        put_u32(&mut data, header::TABLE_COUNT, self.tables.len() as u32);

        let mut layouts = Vec::new();
        let mut next_free = 1u32;
        for (index, table) in self.tables.iter().enumerate() {
            let first_page = next_free;
            let last_page = first_page + table.pages.len() as u32 - 1;

            let entry = header::TABLES_START + index * header::TABLE_ENTRY_SIZE;
            put_u32(&mut data, entry, table.page_type);
            put_u32(&mut data, entry + 4, last_page + 1);
            put_u32(&mut data, entry + 8, first_page);
            put_u32(&mut data, entry + 12, last_page);

            for (i, rows) in table.pages.iter().enumerate() {
                let page_index = first_page + i as u32;
                let next_page = if page_index == last_page { 0 } else { page_index + 1 };
                self.write_page(&mut data, page_index, table.page_type, next_page, rows);
            }

            layouts.push(TableLayout {
                first_page,
                last_page,
            });
            next_free = last_page + 1;
        }

        (data, layouts)
    }

    fn write_page(&self, data: &mut [u8], page_index: u32, page_type: u32, next_page: u32, rows: &[Vec<u8>]) {
        let start = page_index as usize * self.page_size;
        let end = start + self.page_size;

        put_u32(data, start + 4, page_index);
        put_u32(data, start + page::TYPE, page_type);
        put_u32(data, start + page::NEXT_PAGE, next_page);
        put_u32(data, start + page::PACKED_ROW_INFO, rows.len() as u32);
        data[start + page::FLAGS] = 0x34;

        let groups = rows.len().div_ceil(page::ROWS_PER_GROUP);
        let heap_limit = end - groups * page::ROW_GROUP_SIZE;
        let heap_base = start + page::HEAP_START;

        let mut cursor = heap_base;
        for (i, row) in rows.iter().enumerate() {
            assert!(cursor + row.len() <= heap_limit, "rows overflow page {}", page_index);
            data[cursor..cursor + row.len()].copy_from_slice(row);

            let group = i / page::ROWS_PER_GROUP;
            let slot = i % page::ROWS_PER_GROUP;
            let base = end - group * page::ROW_GROUP_SIZE;
            put_u16(data, base - 6 - 2 * slot, (cursor - heap_base) as u16);
            let present = get_u16(data, base - 4) | (1 << slot);
            put_u16(data, base - 4, present);

            cursor = align4(cursor + row.len());
        }
    }
}

/// Turn page `page_index` into an index page
pub fn mark_index_page(data: &mut [u8], page_size: usize, page_index: u32) {
    data[page_index as usize * page_size + page::FLAGS] |= page::FLAG_INDEX_PAGE;
}

/// Overwrite the next-page link of `page_index`
pub fn set_next_page(data: &mut [u8], page_size: usize, page_index: u32, next: u32) {
    put_u32(data, page_index as usize * page_size + page::NEXT_PAGE, next);
}

/// Overwrite the last-page field of table directory entry `table`
pub fn set_last_page(data: &mut [u8], table: usize, last_page: u32) {
    put_u32(data, header::TABLES_START + table * header::TABLE_ENTRY_SIZE + 12, last_page);
}

pub fn put_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn put_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Encode `s` as a DeviceSQL string: short ASCII when it fits, otherwise
/// long ASCII or long UTF-16LE
pub fn device_sql(s: &str) -> Vec<u8> {
    if s.is_ascii() && s.len() <= 126 {
        let mut out = vec![(((s.len() + 1) << 1) as u8) | string_flags::SHORT_ASCII];
        out.extend_from_slice(s.as_bytes());
        return out;
    }

    let (flag, payload): (u8, Vec<u8>) = if s.is_ascii() {
        (string_flags::LONG_ASCII, s.as_bytes().to_vec())
    } else {
        (
            string_flags::LONG_UTF16LE,
            s.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        )
    };
    let mut out = vec![flag];
    out.extend_from_slice(&((payload.len() + 4) as u16).to_le_bytes());
    out.push(0);
    out.extend(payload);
    out
}

// Row encoders

/// Artist row with a near (u8) name offset
pub fn artist_row(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 10];
    put_u16(&mut row, 0, 0x60);
    put_u32(&mut row, 4, id);
    row[8] = 0x03;
    row[9] = 10;
    row.extend(device_sql(name));
    row
}

/// Artist row with a far (u16) name offset
pub fn artist_row_far(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 12];
    put_u16(&mut row, 0, 0x64);
    put_u32(&mut row, 4, id);
    row[8] = 0x03;
    put_u16(&mut row, 0x0a, 12);
    row.extend(device_sql(name));
    row
}

/// Album row with the name stored inline (subtype 0x80)
pub fn album_row(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 0x16];
    put_u16(&mut row, 0, 0x80);
    put_u32(&mut row, 12, id);
    row.extend(device_sql(name));
    row
}

/// Album row with a near (u8 at 0x11) name offset
pub fn album_row_near(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 0x18];
    put_u16(&mut row, 0, 0x60);
    put_u32(&mut row, 12, id);
    row[0x11] = 0x18;
    row.extend(device_sql(name));
    row
}

/// Album row with a far (u16 at 0x16) name offset
pub fn album_row_far(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 0x1c];
    put_u16(&mut row, 0, 0x64);
    put_u32(&mut row, 12, id);
    put_u16(&mut row, 0x16, 0x1c);
    row.extend(device_sql(name));
    row
}

/// Genre or label row: id followed by the inline name
pub fn genre_row(id: u32, name: &str) -> Vec<u8> {
    let mut row = id.to_le_bytes().to_vec();
    row.extend(device_sql(name));
    row
}

pub fn key_row(id: u32, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 8];
    put_u32(&mut row, 0, id);
    put_u32(&mut row, 4, id);
    row.extend(device_sql(name));
    row
}

pub fn playlist_node_row(id: u32, parent_id: u32, sort_order: u32, is_folder: bool, name: &str) -> Vec<u8> {
    let mut row = vec![0u8; 20];
    put_u32(&mut row, 0, parent_id);
    put_u32(&mut row, 8, sort_order);
    put_u32(&mut row, 12, id);
    put_u32(&mut row, 16, u32::from(is_folder));
    row.extend(device_sql(name));
    row
}

pub fn playlist_entry_row(position: u32, track_id: u32, playlist_id: u32) -> Vec<u8> {
    let mut row = vec![0u8; 12];
    put_u32(&mut row, 0, position);
    put_u32(&mut row, 4, track_id);
    put_u32(&mut row, 8, playlist_id);
    row
}

/// Field values for a track row
#[derive(Debug, Clone, Default)]
pub struct TrackFixture {
    pub id: u32,
    pub title: String,
    pub artist_id: u32,
    pub album_id: u32,
    pub genre_id: u32,
    pub key_id: u32,
    /// BPM * 100
    pub tempo: u32,
    pub duration: u16,
    pub rating: u8,
    pub bitrate: u32,
    pub file_path: String,
    pub date_added: String,
}

const TRACK_STRINGS_START: usize = 0x5e;
const TRACK_HEADER_LEN: usize = TRACK_STRINGS_START + TRACK_STRING_SLOTS * 2;

impl TrackFixture {
    pub fn new(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn row(&self) -> Vec<u8> {
        let mut row = vec![0u8; TRACK_HEADER_LEN];
        put_u16(&mut row, 0, 0x24);
        put_u32(&mut row, 0x20, self.key_id);
        put_u32(&mut row, 0x30, self.bitrate);
        put_u32(&mut row, 0x38, self.tempo);
        put_u32(&mut row, 0x3c, self.genre_id);
        put_u32(&mut row, 0x40, self.album_id);
        put_u32(&mut row, 0x44, self.artist_id);
        put_u32(&mut row, 0x48, self.id);
        put_u16(&mut row, 0x54, self.duration);
        row[0x59] = self.rating;

        for slot in 0..TRACK_STRING_SLOTS {
            let value = match slot {
                10 => self.date_added.as_str(),
                17 => self.title.as_str(),
                20 => self.file_path.as_str(),
                _ => "",
            };
            let offset = row.len() as u16;
            put_u16(&mut row, TRACK_STRINGS_START + slot * 2, offset);
            row.extend(device_sql(value));
        }
        row
    }
}
