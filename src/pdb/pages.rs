//! Table page traversal
//!
//! Each table is a singly linked list of pages. Data pages hold row payloads
//! in a heap growing forward from byte 40 and, growing backward from the end
//! of the page, one 0x24-byte row group per 16 rows:
//!
//! ```text
//!   group base - 0x24 .. group base - 4       u16 row offsets, slot 15 first
//!   group base - 4                            u16 presence bitmap
//!   group base - 2                            u16 unknown
//! ```
//!
//! where the base of group `g` is `page end - g * 0x24`.

use super::directory::TableInfo;
use super::reader::ByteReader;
use super::types::page;
use std::collections::HashSet;

/// A live row found while walking a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    /// Absolute byte offset of the row payload in the file
    pub offset: usize,

    /// Type of the page the row was found on
    pub page_type: u32,
}

/// Decoded page header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    pub page_type: u32,
    pub next_page: u32,
    pub row_count: usize,
    pub flags: u8,
}

impl PageHeader {
    pub fn read(reader: &ByteReader<'_>, page_offset: usize) -> Self {
        let packed_row_info = reader.u32(page_offset + page::PACKED_ROW_INFO);
        Self {
            page_type: reader.u32(page_offset + page::TYPE),
            next_page: reader.u32(page_offset + page::NEXT_PAGE),
            row_count: (packed_row_info & page::ROW_COUNT_MASK) as usize,
            flags: reader.u8(page_offset + page::FLAGS),
        }
    }

    pub fn is_data_page(&self) -> bool {
        self.flags & page::FLAG_INDEX_PAGE == 0
    }
}

pub fn row_group_count(num_rows: usize) -> usize {
    num_rows.div_ceil(page::ROWS_PER_GROUP)
}

/// End boundary of row group `group`, counted back from the end of the page
pub fn group_base(page_offset: usize, page_size: usize, group: usize) -> Option<usize> {
    (page_offset + page_size).checked_sub(group.checked_mul(page::ROW_GROUP_SIZE)?)
}

/// Position of the u16 presence bitmap of the group ending at `group_base`
pub fn presence_flags_pos(group_base: usize) -> Option<usize> {
    group_base.checked_sub(4)
}

/// Position of the u16 heap offset for row `slot` of the group ending at `group_base`
pub fn row_offset_pos(group_base: usize, slot: usize) -> Option<usize> {
    group_base.checked_sub(6 + slot * 2)
}

/// Collect the live rows of one data page
///
/// Geometry that would reach into the 40-byte page header, and rows whose
/// heap address lies past the end of the page, are skipped.
fn scan_page(
    reader: &ByteReader<'_>,
    page_offset: usize,
    page_size: usize,
    header: &PageHeader,
) -> Vec<RowRef> {
    let heap_base = page_offset + page::HEAP_START;
    let page_end = page_offset + page_size;
    let mut rows = Vec::new();

    for group in 0..row_group_count(header.row_count) {
        let Some(base) = group_base(page_offset, page_size, group) else {
            continue;
        };
        let Some(flags_pos) = presence_flags_pos(base) else {
            continue;
        };
        if flags_pos < heap_base {
            continue;
        }

        let present = reader.u16(flags_pos);
        for slot in 0..page::ROWS_PER_GROUP {
            if (present >> slot) & 1 == 0 {
                continue;
            }
            let Some(ofs_pos) = row_offset_pos(base, slot) else {
                continue;
            };
            if ofs_pos < heap_base {
                continue;
            }

            let row_offset = heap_base + reader.u16(ofs_pos) as usize;
            if row_offset >= page_end {
                continue;
            }

            rows.push(RowRef {
                offset: row_offset,
                page_type: header.page_type,
            });
        }
    }

    rows
}

/// Lazy iterator over every live row of one table
///
/// Traversal follows next-page links from `first_page` and ends at
/// `last_page`, at a zero or out-of-range link, at a page that does not fit
/// in the buffer, or at a page already visited.
pub struct PageWalker<'a> {
    reader: ByteReader<'a>,
    table: TableInfo,
    page_size: usize,
    page_count: usize,
    next_page: Option<u32>,
    visited: HashSet<u32>,
    pending: std::vec::IntoIter<RowRef>,
}

impl<'a> PageWalker<'a> {
    pub fn new(reader: ByteReader<'a>, table: TableInfo, page_size: u32) -> Self {
        let page_size = page_size as usize;
        let page_count = reader.len().checked_div(page_size).unwrap_or(0);
        if page_size == 0 {
            log::warn!(
                "Page size is zero; skipping table of type {}",
                table.page_type
            );
        }

        Self {
            reader,
            table,
            page_size,
            page_count,
            next_page: (page_size > 0).then_some(table.first_page),
            visited: HashSet::new(),
            pending: Vec::new().into_iter(),
        }
    }

    /// Indices of the pages entered so far
    pub fn visited_pages(&self) -> &HashSet<u32> {
        &self.visited
    }

    /// Enter `page_index`, queue its rows and work out the following page
    fn visit(&mut self, page_index: u32) {
        if page_index == 0 || !self.visited.insert(page_index) {
            log::trace!("Stopping at page {} (zero or already visited)", page_index);
            return;
        }

        let Some(page_offset) = (page_index as usize).checked_mul(self.page_size) else {
            return;
        };
        if page_offset
            .checked_add(self.page_size)
            .map_or(true, |end| end > self.reader.len())
        {
            log::trace!("Page {} lies outside the buffer", page_index);
            return;
        }

        let header = PageHeader::read(&self.reader, page_offset);
        if header.is_data_page() && header.page_type == self.table.page_type && header.row_count > 0
        {
            let rows = scan_page(&self.reader, page_offset, self.page_size, &header);
            log::trace!("Page {}: {} live rows", page_index, rows.len());
            self.pending = rows.into_iter();
        }

        let next = header.next_page;
        if next == 0 || next as usize >= self.page_count || page_index == self.table.last_page {
            return;
        }
        self.next_page = Some(next);
    }
}

impl Iterator for PageWalker<'_> {
    type Item = RowRef;

    fn next(&mut self) -> Option<RowRef> {
        loop {
            if let Some(row) = self.pending.next() {
                return Some(row);
            }
            let page_index = self.next_page.take()?;
            self.visit(page_index);
        }
    }
}

/// Walk every live row of `table`
pub fn walk_table<'a>(reader: ByteReader<'a>, table: &TableInfo, page_size: u32) -> PageWalker<'a> {
    PageWalker::new(reader, *table, page_size)
}
