//! Workspace-backed editor host.
//!
//! Generic LSP clients have no quick-open command the server could drive,
//! so this host stands in for one: a quick-open query ranks the workspace
//! files, `@method` queries look for a method in the file opened last, and
//! accepting opens the best candidate through `window/showDocument`.

use std::path::{Path, PathBuf};

use async_lsp::{ClientSocket, LanguageClient};
use ignore::{DirEntry, WalkBuilder};
use lsp_types::ShowDocumentParams;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::NavigationError;
use crate::navigation::{EditorCommand, EditorHost, NavigationResult};

use super::types::{LineIndex, path_to_url};

/// Directories never offered as quick-open candidates.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "dist", "target"];

/// Something that can show a document to the user.
pub trait DocumentOpener: Send {
    /// Shows `path`, optionally selecting `selection`.
    fn show(
        &mut self,
        path: &Path,
        selection: Option<lsp_types::Range>,
    ) -> impl Future<Output = NavigationResult<()>> + Send;
}

impl DocumentOpener for ClientSocket {
    async fn show(
        &mut self,
        path: &Path,
        selection: Option<lsp_types::Range>,
    ) -> NavigationResult<()> {
        let uri = path_to_url(path)?;
        let params = ShowDocumentParams {
            uri: uri.clone(),
            external: Some(false),
            take_focus: Some(true),
            selection,
        };

        let result = self.show_document(params).await.map_err(|e| {
            NavigationError::ShowDocumentFailed {
                uri: uri.to_string(),
                message: e.to_string(),
            }
        })?;

        if !result.success {
            warn!(%uri, "client declined to show document");
        }
        Ok(())
    }
}

/// How well a path matches a quick-open query; better matches sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    /// The path starts with the query.
    Prefix,
    /// The query appears contiguously in the path.
    Substring,
    /// The query's characters appear in order in the path.
    Subsequence,
}

/// Rates `path` against `query`, case-insensitively.
pub fn match_quality(path: &str, query: &str) -> Option<MatchQuality> {
    let path = path.to_lowercase();
    let query = query.to_lowercase();

    if path.starts_with(&query) {
        return Some(MatchQuality::Prefix);
    }
    if path.contains(&query) {
        return Some(MatchQuality::Substring);
    }

    let mut remaining = path.chars();
    query
        .chars()
        .all(|q| remaining.any(|p| p == q))
        .then_some(MatchQuality::Subsequence)
}

fn is_skipped_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Ranks the workspace files under `root` against `query`.
///
/// Returns absolute paths, best match first. Ties prefer the shorter
/// relative path, then lexicographic order.
///
/// ## Errors
/// Returns an error if the workspace cannot be walked at all.
pub fn search_workspace(
    root: &Path,
    query: &str,
    respect_gitignore: bool,
) -> NavigationResult<Vec<PathBuf>> {
    let query = query.trim().trim_start_matches('/');
    if query.is_empty() {
        return Ok(Vec::new());
    }

    if !root.is_dir() {
        return Err(NavigationError::WorkspaceSearch(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let walker = WalkBuilder::new(root)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .ignore(respect_gitignore)
        .require_git(false)
        .filter_entry(|entry| !is_skipped_entry(entry))
        .build();

    let mut ranked: Vec<(MatchQuality, String, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if let Some(quality) = match_quality(&relative, query) {
            ranked.push((quality, relative, entry.into_path()));
        }
    }

    ranked.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.len().cmp(&b.1.len()))
            .then_with(|| a.1.cmp(&b.1))
    });

    Ok(ranked.into_iter().map(|(_, _, path)| path).collect())
}

/// Finds the declaration of `method` in `text`.
///
/// Prefers a `function <method>` declaration and falls back to the first
/// whole-word occurrence.
pub fn find_method(text: &str, method: &str) -> Option<lsp_types::Range> {
    let escaped = regex::escape(method);
    let patterns = [
        format!(r"function\s+&?\s*({escaped})\b"),
        format!(r"\b({escaped})\b"),
    ];

    patterns.iter().find_map(|pattern| {
        let re = Regex::new(pattern).ok()?;
        let token = re.captures(text)?.get(1)?;
        Some(LineIndex::new(text).range(token.range()))
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Selection {
    File(PathBuf),
    Method(PathBuf, lsp_types::Range),
}

/// Editor host that searches the workspace and opens files via an opener.
#[derive(Debug)]
pub struct WorkspaceHost<O> {
    root: PathBuf,
    opener: O,
    respect_gitignore: bool,
    selection: Option<Selection>,
    current: Option<PathBuf>,
}

impl<O: DocumentOpener> WorkspaceHost<O> {
    /// Creates a host rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, opener: O) -> Self {
        Self {
            root: root.into(),
            opener,
            respect_gitignore: true,
            selection: None,
            current: None,
        }
    }

    /// Sets whether `.gitignore` rules hide files from quick-open.
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// The file opened most recently.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// The opener, for inspection.
    pub fn opener(&self) -> &O {
        &self.opener
    }

    async fn quick_open(&mut self, query: String) -> NavigationResult<()> {
        self.selection = if query.starts_with('@') {
            Self::locate_method(self.current.clone(), &query[1..]).await
        } else {
            let root = self.root.clone();
            let respect = self.respect_gitignore;
            let candidates =
                tokio::task::spawn_blocking(move || search_workspace(&root, &query, respect))
                    .await
                    .map_err(|e| NavigationError::WorkspaceSearch(e.to_string()))??;
            debug!(candidates = candidates.len(), "quick-open populated");
            candidates.into_iter().next().map(Selection::File)
        };
        Ok(())
    }

    async fn locate_method(current: Option<PathBuf>, method: &str) -> Option<Selection> {
        let path = current?;
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot read current file");
                return None;
            }
        };
        let range = find_method(&text, method)?;
        Some(Selection::Method(path, range))
    }

    async fn accept(&mut self) -> NavigationResult<()> {
        match self.selection.take() {
            Some(Selection::File(path)) => {
                self.opener.show(&path, None).await?;
                self.current = Some(path);
            }
            Some(Selection::Method(path, range)) => {
                self.opener.show(&path, Some(range)).await?;
            }
            None => {}
        }
        Ok(())
    }
}

impl<O: DocumentOpener> EditorHost for WorkspaceHost<O> {
    async fn execute(&mut self, command: EditorCommand) -> NavigationResult<()> {
        debug!(%command, "executing");
        match command {
            EditorCommand::QuickOpen(query) => self.quick_open(query).await,
            EditorCommand::AcceptSelectedQuickOpenItem => self.accept().await,
        }
    }
}
