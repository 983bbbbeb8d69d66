pub mod csv;
pub mod filelock;
pub mod html;
pub mod json;

use std::path::{Path, PathBuf};

use crate::error::HubError;
use crate::model::Snapshot;

/// The three sibling export formats written per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Json, ExportFormat::Csv];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Html => "content-hub.html",
            ExportFormat::Json => "content-library.json",
            ExportFormat::Csv => "content-index.csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub updated_at: String,
    pub source_url: String,
}

/// Serialize the snapshot in one format and write it under the advisory path
/// lock. Returns the destination path. Serialization happens before the lock
/// is taken, so a failure there never touches the previous file.
pub fn export(
    format: ExportFormat,
    snapshot: &Snapshot,
    meta: &ExportMeta,
    output_dir: &Path,
) -> Result<PathBuf, HubError> {
    let content = match format {
        ExportFormat::Html => html::render(snapshot, meta),
        ExportFormat::Json => json::render(snapshot, meta)?,
        ExportFormat::Csv => csv::render(snapshot),
    };
    let path = output_dir.join(format.file_name());
    filelock::locked_write(&path, &content)?;
    Ok(path)
}

/// Read back a previously written export for display, under the same lock the
/// writers use. Absent files yield `None`.
pub fn read_previous_export(path: &Path) -> Result<Option<String>, HubError> {
    filelock::locked_read(path)
}

// ── Tests ──
