//! Track list export (CSV and JSON)

mod csv;
mod json;

pub use csv::tracks_to_csv;
pub use json::tracks_to_json;

use crate::error::{PdbError, Result};
use crate::model::Track;
use std::fs;
use std::path::Path;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Render `tracks` in `format`
pub fn render_tracks(tracks: &[Track], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(tracks_to_csv(tracks)),
        ExportFormat::Json => tracks_to_json(tracks),
    }
}

/// Write `tracks` to `path` in `format`
pub fn write_tracks(path: &Path, tracks: &[Track], format: ExportFormat) -> Result<()> {
    let contents = render_tracks(tracks, format)?;
    fs::write(path, contents).map_err(|source| PdbError::io(path, source))?;
    log::info!("Exported {} tracks to {:?}", tracks.len(), path);
    Ok(())
}
