use docsearch_common::{DocSearchError, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::types::Document;

/// Separator between document ID and content on each line
pub const DOCUMENT_DELIMITER: &str = ": ";

/// Counts collected while parsing a document file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines stored (including ones that overwrote an earlier ID)
    pub loaded: usize,

    /// Lines without the delimiter
    pub skipped: usize,

    /// Lines whose ID was already present
    pub duplicates: usize,
}

/// Insertion-ordered mapping of document ID to content
///
/// A repeated ID replaces the earlier content but keeps the earlier position,
/// so position `i` always refers to the first line that introduced the ID.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: IndexMap<String, String>,
}

impl DocumentStore {
    /// Load document file from disk
    pub fn load(path: &Path) -> Result<(Self, LoadReport)> {
        info!("Loading documents from {}", path.display());

        let file = File::open(path).map_err(|e| {
            DocSearchError::document_store(format!(
                "Failed to open document file {}: {}",
                path.display(),
                e
            ))
        })?;

        let (store, report) = Self::from_reader(BufReader::new(file))?;

        info!(
            "Documents loaded: {} ({} lines skipped, {} duplicate IDs)",
            store.len(),
            report.skipped,
            report.duplicates
        );
        Ok((store, report))
    }

    /// Parse documents from any line source
    pub fn from_reader<R: BufRead>(reader: R) -> Result<(Self, LoadReport)> {
        let mut store = Self::default();
        let mut report = LoadReport::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                DocSearchError::document_store(format!(
                    "Failed to read line {}: {}",
                    line_no + 1,
                    e
                ))
            })?;

            match line.trim().split_once(DOCUMENT_DELIMITER) {
                Some((id, content)) => {
                    if store.insert(id, content).is_some() {
                        warn!(
                            "Duplicate document ID '{}' on line {} overwrites earlier content",
                            id,
                            line_no + 1
                        );
                        report.duplicates += 1;
                    }
                    report.loaded += 1;
                }
                None => {
                    debug!(
                        "Skipping line {}: no '{}' delimiter",
                        line_no + 1,
                        DOCUMENT_DELIMITER
                    );
                    report.skipped += 1;
                }
            }
        }

        Ok((store, report))
    }

    /// Parse documents from an in-memory string
    pub fn parse(text: &str) -> Result<(Self, LoadReport)> {
        Self::from_reader(text.as_bytes())
    }

    /// Insert or overwrite a document, returning the previous content
    pub fn insert(&mut self, id: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.documents.insert(id.into(), content.into())
    }

    /// Content by document ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    /// Document at insertion position `index`
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.documents
            .get_index(index)
            .map(|(id, content)| (id.as_str(), content.as_str()))
    }

    /// Iterate documents in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Document> + '_ {
        self.documents
            .iter()
            .map(|(id, content)| Document::new(id.as_str(), content.as_str()))
    }

    /// Document IDs in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
