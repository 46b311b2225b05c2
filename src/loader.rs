//! Reading databases from disk

use crate::config::ExplorerConfig;
use crate::error::{PdbError, Result};
use crate::model::{Database, LookupTables};
use crate::pdb;
use crate::scanner;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse a complete database file
pub fn load_database(path: &Path) -> Result<Database> {
    let data = fs::read(path).map_err(|source| PdbError::io(path, source))?;
    Ok(pdb::parse_database(&data))
}

/// Read a database file and decode only its lookup tables
pub fn load_lookup_tables(path: &Path) -> Result<LookupTables> {
    let data = fs::read(path).map_err(|source| PdbError::io(path, source))?;
    Ok(pdb::parse_lookup_tables(&data))
}

/// A parsed library and the files it came from
#[derive(Debug)]
pub struct LoadedLibrary {
    pub database: Database,
    pub export_pdb: PathBuf,
    /// Set only when exportExt.pdb was found and merged
    pub export_ext_pdb: Option<PathBuf>,
}

/// Resolves a configured source into a parsed library
pub struct LibraryLoader<'a> {
    config: &'a ExplorerConfig,
}

impl<'a> LibraryLoader<'a> {
    pub fn new(config: &'a ExplorerConfig) -> Self {
        Self { config }
    }

    /// Load the library
    ///
    /// A file source is parsed as-is. A directory is scanned for
    /// export.pdb, with exportExt.pdb (when present and enabled) supplying
    /// names the main file lacks.
    pub fn load(&self) -> Result<LoadedLibrary> {
        let source = &self.config.source;

        let (export_pdb, ext_candidate) = if source.is_dir() {
            log::info!("Scanning {:?} for Rekordbox databases...", source);
            let found = scanner::scan(source).ok_or_else(|| PdbError::NotFound {
                root: source.clone(),
            })?;
            (found.export_pdb, found.export_ext_pdb)
        } else {
            (source.clone(), None)
        };

        let (fallback, export_ext_pdb) = match ext_candidate.filter(|_| self.config.merge_ext) {
            Some(path) => match load_ext_lookups(&path) {
                Some(tables) => (tables, Some(path)),
                None => (LookupTables::new(), None),
            },
            None => (LookupTables::new(), None),
        };

        log::info!("Reading {:?}...", export_pdb);
        let data = fs::read(&export_pdb).map_err(|source| PdbError::io(&export_pdb, source))?;
        let database = pdb::parse_database_with_fallback(&data, &fallback);
        log::info!(
            "Library loaded: {} tracks, {} playlists",
            database.track_count(),
            database.playlist_count()
        );

        Ok(LoadedLibrary {
            database,
            export_pdb,
            export_ext_pdb,
        })
    }
}

/// Lookup names from exportExt.pdb; an unreadable file only loses the extra names
fn load_ext_lookups(path: &Path) -> Option<LookupTables> {
    match load_lookup_tables(path) {
        Ok(tables) => {
            log::info!("Loaded {} lookup names from {:?}", tables.len(), path);
            Some(tables)
        }
        Err(e) => {
            log::warn!("Ignoring exportExt.pdb: {}", e);
            None
        }
    }
}
