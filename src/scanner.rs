//! Locating the database files on exported media

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const EXPORT_PDB: &str = "export.pdb";
pub const EXPORT_EXT_PDB: &str = "exportExt.pdb";

/// Where Rekordbox puts its database files on a USB stick
const STANDARD_DIR: &str = "PIONEER/rekordbox";

/// Database files found under a media root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub export_pdb: PathBuf,
    pub export_ext_pdb: Option<PathBuf>,
}

/// Find `export.pdb` (required) and `exportExt.pdb` (optional) under `root`
///
/// The standard `PIONEER/rekordbox/` location wins; otherwise the first
/// file with the right name found by a recursive walk is used. Hidden files
/// and directories are skipped.
pub fn scan(root: &Path) -> Option<ScanResult> {
    let export_pdb = find_file(root, EXPORT_PDB)?;
    let export_ext_pdb = find_file(root, EXPORT_EXT_PDB);

    log::debug!("Found {:?} (ext: {:?})", export_pdb, export_ext_pdb);
    Some(ScanResult {
        export_pdb,
        export_ext_pdb,
    })
}

fn find_file(root: &Path, name: &str) -> Option<PathBuf> {
    let standard = root.join(STANDARD_DIR).join(name);
    if standard.is_file() {
        return Some(standard);
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(DirEntry::into_path)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
