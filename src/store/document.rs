//! Store document I/O
//!
//! Whole-file reads and writes of the identifier → fields mapping.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{MonoError, Result};
use crate::record::Fields;

/// In-memory image of the store file
pub type Document = IndexMap<String, Fields>;

/// Parse store file contents
///
/// Fails with `Format` unless the contents are a JSON object whose values
/// are all objects.
pub fn parse_document(content: &str) -> Result<Document> {
    serde_json::from_str(content).map_err(|e| MonoError::Format(e.to_string()))
}

/// Read the whole store file
///
/// A missing or blank file is an empty store; a malformed file (not UTF-8,
/// not JSON, or the wrong shape) is an empty store with a warning. Other I/O
/// failures propagate.
pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file not found, starting empty");
            return Ok(Document::new());
        }
        Err(e) => return Err(e.into()),
    };

    let parsed = String::from_utf8(bytes)
        .map_err(|e| MonoError::Format(e.to_string()))
        .and_then(|content| {
            if content.trim().is_empty() {
                Ok(Document::new())
            } else {
                parse_document(&content)
            }
        });

    match parsed {
        Ok(document) => Ok(document),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "store file contains invalid data, treating it as empty"
            );
            Ok(Document::new())
        }
    }
}

/// Rewrite the whole store file
///
/// Writes to a sibling temp file and renames it over `path`, so a failed
/// write never leaves a half-written store behind. `indent == 0` writes
/// compact JSON.
pub fn write_document(path: &Path, document: &Document, indent: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, document, indent)
        .and_then(|()| fs::rename(&temp_path, path).map_err(MonoError::from));

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            if cleanup.kind() != ErrorKind::NotFound {
                warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Serialize the document into `temp_path` and sync it to disk
fn write_temp(temp_path: &Path, document: &Document, indent: usize) -> Result<()> {
    let mut writer = BufWriter::new(File::create(temp_path)?);

    if indent == 0 {
        serde_json::to_writer(&mut writer, document)?;
    } else {
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        document.serialize(&mut serializer)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| MonoError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}

/// "store.json" → "store.json.tmp"
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
