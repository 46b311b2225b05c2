//! Rekordbox Explorer - read Rekordbox USB export databases
//!
//! Decodes the `export.pdb` (and optional `exportExt.pdb`) DeviceSQL files
//! that Rekordbox writes to USB media into tracks and a playlist tree.

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod pdb;
pub mod scanner;
pub mod search;

pub use config::{ExplorerConfig, View};
pub use error::{PdbError, Result};
pub use loader::{load_database, load_lookup_tables, LibraryLoader, LoadedLibrary};
pub use model::{Database, LookupTables, Playlist, Track};
pub use pdb::{parse_database, parse_database_with_fallback, parse_lookup_tables};
