//! File header and table directory

use super::reader::ByteReader;
use super::types::{header, PageType};

/// One table directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    /// Raw page type; may name a kind this decoder does not know
    pub page_type: u32,
    pub first_page: u32,
    pub last_page: u32,
}

impl TableInfo {
    pub fn kind(&self) -> Option<PageType> {
        PageType::from_raw(self.page_type)
    }
}

/// Decoded file header: page size plus the list of tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDirectory {
    pub page_size: u32,
    pub tables: Vec<TableInfo>,
}

impl TableDirectory {
    /// Read the header and as many directory entries as the buffer holds
    ///
    /// A directory that runs past the end of the buffer is cut short; the
    /// entries read so far are kept.
    pub fn read(reader: &ByteReader<'_>) -> Self {
        let page_size = reader.u32(header::PAGE_SIZE);
        let table_count = reader.u32(header::TABLE_COUNT) as usize;

        let mut tables = Vec::new();
        for index in 0..table_count {
            let entry = header::TABLES_START + index * header::TABLE_ENTRY_SIZE;
            if reader.slice(entry, header::TABLE_ENTRY_SIZE).is_none() {
                log::debug!(
                    "Table directory truncated after {} of {} entries",
                    tables.len(),
                    table_count
                );
                break;
            }

            tables.push(TableInfo {
                page_type: reader.u32(entry),
                first_page: reader.u32(entry + 8),
                last_page: reader.u32(entry + 12),
            });
        }

        Self { page_size, tables }
    }

    /// Tables whose type is `kind`, in directory order
    pub fn tables_of(&self, kind: PageType) -> impl Iterator<Item = &TableInfo> + '_ {
        self.tables
            .iter()
            .filter(move |table| table.page_type == kind as u32)
    }
}
