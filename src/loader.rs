//! Content ingestion: structured JSON records and freeform text files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::LoadError;
use crate::{derive_content_id, Content};

const DEFAULT_JSON_TYPE: &str = "post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Json,
    Markdown,
    Text,
}

impl SourceKind {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SourceKind::Json),
            "md" | "markdown" => Some(SourceKind::Markdown),
            "txt" => Some(SourceKind::Text),
            _ => None,
        }
    }
}

/// Outcome of a batch load. Failures never abort the batch.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub contents: Vec<Content>,
    pub failures: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty() && self.failures.is_empty()
    }
}

pub fn is_content_file(path: &Path) -> bool {
    SourceKind::from_path(path).is_some()
}

/// Loads a single file, or every supported file under a directory.
pub fn load_path(path: &Path) -> LoadReport {
    if path.is_dir() {
        return load_content_dir(path);
    }

    let mut report = LoadReport::default();
    match load_content_file(path) {
        Ok(content) => report.contents.push(content),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "content file skipped");
            report.failures.push(err);
        }
    }
    report
}

/// Recursive walk in path order. Unsupported extensions are ignored.
pub fn load_content_dir(dir: &Path) -> LoadReport {
    let mut report = LoadReport::default();
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir) {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_content_file(entry.path()) => {
                paths.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                warn!(path = %path.display(), error = %err, "directory walk failed");
                report.failures.push(LoadError::Read {
                    path,
                    source: err.into(),
                });
            }
        }
    }

    paths.sort();
    debug!(dir = %dir.display(), files = paths.len(), "content files found");

    for path in paths {
        match load_content_file(&path) {
            Ok(content) => report.contents.push(content),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "content file skipped");
                report.failures.push(err);
            }
        }
    }

    report
}

pub fn load_content_file(path: &Path) -> Result<Content, LoadError> {
    let kind =
        SourceKind::from_path(path).ok_or_else(|| LoadError::Unsupported(path.to_path_buf()))?;
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut content = match kind {
        SourceKind::Json => parse_record(path, &raw)?,
        SourceKind::Markdown => freeform(raw, "markdown"),
        SourceKind::Text => freeform(raw, "text"),
    };

    if content.id.trim().is_empty() {
        content.id = derive_content_id(&content.text);
    }
    content.source_path = Some(path.to_path_buf());
    Ok(content)
}

fn parse_record(path: &Path, raw: &str) -> Result<Content, LoadError> {
    let mut content: Content = serde_json::from_str(raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if content.content_type.trim().is_empty() {
        content.content_type = DEFAULT_JSON_TYPE.to_string();
    }
    Ok(content)
}

fn freeform(text: String, content_type: &str) -> Content {
    Content {
        text,
        content_type: content_type.to_string(),
        ..Content::default()
    }
}
