//! Link scanner.
//!
//! Scans a whole document with a fixed set of regular expressions and
//! reports every captured token together with its byte range. Patterns run
//! one after another (endpoints, fragments, queries, mutations), so the
//! output is grouped by kind, and within a kind ordered by position.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::resolver::{self, NavigationTarget};

/// `$fetch('/api/users')`, `useApi("/health")`, ...
static ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\$fetch|useApi|useLazyApi|useFetch|useLazyFetch)\(\s*['"`](/(?:api/)?[^'"`]+)['"`]"#)
        .expect("endpoint pattern is valid")
});

/// `'FRAGMENT_USER'`
static FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"`](FRAGMENT_[A-Z0-9_]+)['"`]"#).expect("fragment pattern is valid")
});

/// `query getUser($id: ID!) {` or `query getUsers {`
static QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"query\s+([a-zA-Z0-9_]+)\s*(\([^)]*\))?\s*\{").expect("query pattern is valid")
});

/// `mutation createUser($input: UserInput!) {`; the argument list is required.
static MUTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mutation\s+([a-zA-Z0-9_]+)\s*\([^)]*\)\s*\{").expect("mutation pattern is valid")
});

/// What kind of pattern produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// HTTP API call expression.
    Endpoint,
    /// GraphQL fragment identifier.
    Fragment,
    /// GraphQL query declaration.
    Query,
    /// GraphQL mutation declaration.
    Mutation,
}

impl LinkKind {
    /// All kinds, in scan order.
    pub const ALL: [Self; 4] = [Self::Endpoint, Self::Fragment, Self::Query, Self::Mutation];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Endpoint => &ENDPOINT,
            Self::Fragment => &FRAGMENT,
            Self::Query => &QUERY,
            Self::Mutation => &MUTATION,
        }
    }

    /// Human-readable label used in link tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Self::Endpoint => "server route",
            Self::Fragment => "fragment",
            Self::Query => "query provider",
            Self::Mutation => "mutation provider",
        }
    }
}

/// A single scanner hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Which pattern matched.
    pub kind: LinkKind,
    /// The captured token (endpoint, fragment name, or operation name).
    pub token: String,
    /// Byte range of the token within the scanned text.
    pub range: Range<usize>,
}

impl LinkMatch {
    /// Resolves this match to the file (and method) it should open.
    pub fn target(&self) -> NavigationTarget {
        resolver::resolve(self.kind, &self.token)
    }
}

/// Scans `text` for every supported pattern.
pub fn scan(text: &str) -> Vec<LinkMatch> {
    LinkKind::ALL
        .into_iter()
        .flat_map(|kind| scan_kind(text, kind))
        .collect()
}

/// Scans `text` for a single pattern.
pub fn scan_kind(text: &str, kind: LinkKind) -> Vec<LinkMatch> {
    kind.pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|token| LinkMatch {
            kind,
            token: token.as_str().to_string(),
            range: token.range(),
        })
        .collect()
}
