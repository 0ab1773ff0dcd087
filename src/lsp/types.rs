//! Conversions between scanner byte offsets, LSP positions, and URIs.
//!
//! LSP positions count UTF-16 code units within a line, while the scanner
//! reports byte offsets; [`LineIndex`] bridges the two.

use std::ops::Range;
use std::path::Path;

use lsp_types::{Position, Url};

use crate::error::NavigationError;
use crate::navigation::NavigationResult;

/// Line start table for a document.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the line starts of `text`.
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Converts a byte offset into an LSP position.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character clamp to its start.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset].encode_utf16().count();

        Position {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            character: u32::try_from(character).unwrap_or(u32::MAX),
        }
    }

    /// Converts a byte range into an LSP range.
    pub fn range(&self, range: Range<usize>) -> lsp_types::Range {
        lsp_types::Range {
            start: self.position(range.start),
            end: self.position(range.end),
        }
    }
}

/// Converts LSP 0-indexed position to user-facing 1-indexed position.
pub fn from_lsp_position(position: Position) -> (u32, u32) {
    (position.line + 1, position.character + 1)
}

/// Converts an absolute path to a `file://` URI.
///
/// ## Errors
/// Returns an error if the path is relative or otherwise not representable.
pub fn path_to_url(path: &Path) -> NavigationResult<Url> {
    Url::from_file_path(path).map_err(|()| NavigationError::ShowDocumentFailed {
        uri: path.display().to_string(),
        message: "path is not absolute".to_string(),
    })
}
