use crate::scan::{Occurrence, Position};
use std::collections::HashMap;
use std::fmt;

/// Identifies a document, typically by its URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The occurrences of the latest scan of each document, for answering
/// "which icon is here" questions from hovers and commands.
///
/// This is a cache: a scan replaces a document's entries wholesale, and the
/// whole store may be dropped at any time.
#[derive(Debug, Clone, Default)]
pub struct CorrelationStore {
    documents: HashMap<DocumentId, Vec<Occurrence>>,
}

impl CorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything known about `document` with the result of a new scan.
    pub fn replace(&mut self, document: DocumentId, occurrences: Vec<Occurrence>) {
        if occurrences.is_empty() {
            self.documents.remove(&document);
        } else {
            self.documents.insert(document, occurrences);
        }
    }

    pub fn clear_document(&mut self, document: &DocumentId) {
        self.documents.remove(document);
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Finds the occurrence under `position`.
    ///
    /// Occurrences of one scan never overlap; should they anyway, the first one wins.
    pub fn lookup(&self, document: &DocumentId, position: Position) -> Option<&Occurrence> {
        self.occurrences(document)
            .iter()
            .find(|occurrence| occurrence.range.contains(position))
    }

    /// Finds the first occurrence on `line`, wherever the cursor is on it.
    ///
    /// Stylesheet occurrences are shown per line, so this is how commands
    /// invoked from a line find their icon.
    pub fn at_line(&self, document: &DocumentId, line: usize) -> Option<&Occurrence> {
        self.occurrences(document)
            .iter()
            .find(|occurrence| occurrence.line() == line)
    }

    pub fn occurrences(&self, document: &DocumentId) -> &[Occurrence] {
        self.documents
            .get(document)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of occurrences over all documents.
    pub fn len(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
