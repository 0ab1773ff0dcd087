//! Open document store and link production.

use std::collections::HashMap;

use lsp_types::{DocumentLink, TextDocumentContentChangeEvent, Url};
use tracing::debug;

use crate::commands::command_uri;
use crate::scanner;

use super::types::LineIndex;

#[derive(Debug, Clone)]
struct Document {
    language_id: String,
    text: String,
}

/// Documents the client has opened, keyed by URI.
#[derive(Debug, Default)]
pub struct Documents {
    documents: HashMap<Url, Document>,
}

impl Documents {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly opened document.
    pub fn open(&mut self, uri: Url, language_id: String, text: String) {
        self.documents.insert(uri, Document { language_id, text });
    }

    /// Applies full-text changes; the last change wins.
    ///
    /// Range edits are not expected since the server advertises full sync.
    pub fn change(&mut self, uri: &Url, changes: Vec<TextDocumentContentChangeEvent>) {
        let Some(document) = self.documents.get_mut(uri) else {
            debug!(%uri, "change for unknown document");
            return;
        };
        if let Some(change) = changes.into_iter().rev().find(|c| c.range.is_none()) {
            document.text = change.text;
        }
    }

    /// Forgets a closed document.
    pub fn close(&mut self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Produces the document links for `uri`.
    ///
    /// Unknown documents and documents whose language is not scanned yield
    /// no links.
    pub fn links(&self, uri: &Url, scans_language: impl Fn(&str) -> bool) -> Vec<DocumentLink> {
        let Some(document) = self.documents.get(uri) else {
            return Vec::new();
        };
        if !scans_language(&document.language_id) {
            return Vec::new();
        }

        let index = LineIndex::new(&document.text);
        scanner::scan(&document.text)
            .into_iter()
            .map(|hit| {
                let target = hit.target();
                DocumentLink {
                    range: index.range(hit.range.clone()),
                    target: command_uri(hit.kind, &target),
                    tooltip: Some(format!("Open {} {}", hit.kind.label(), target.query)),
                    data: None,
                }
            })
            .collect()
    }
}
