//! Nuxt Route Links Language Server
//!
//! A language server that turns Nuxt API calls, GraphQL fragment names, and
//! GraphQL operation declarations into clickable links. Clicking a link
//! opens the server-side file that handles it through a quick-open flow,
//! and for GraphQL operations jumps to the operation's method.
//!
//! # Overview
//!
//! This library provides:
//! - A regex-based link scanner
//! - Pure path resolution by naming convention
//! - A navigation driver replaying the quick-open command sequence
//! - An LSP server with stdio transport
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     stdio      ┌───────────────────┐
//! │     Editor      │◄──────────────►│    LSP Server     │
//! │  (LSP client)   │     (LSP)      │(nuxt-route-links) │
//! └─────────────────┘                └─────────┬─────────┘
//!                                              │
//!                         ┌────────────────────┼────────────────────┐
//!                  ┌──────▼──────┐      ┌──────▼──────┐      ┌──────▼──────┐
//!                  │   Scanner   │─────►│  Resolver   │      │ Navigation  │
//!                  └─────────────┘      └─────────────┘      │   Driver    │
//!                                                            └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types for the entire application
//! - [`scanner`] - Pattern scanning
//! - [`resolver`] - Token to path resolution
//! - [`navigation`] - Quick-open command sequencing
//! - [`commands`] - Link command URIs and arguments
//! - [`config`] - Server settings
//! - [`lsp`] - LSP server implementation
//!
//! # Example
//!
//! ```
//! use nuxt_route_links::scanner::scan;
//!
//! let links = scan("const { data } = useFetch('/api/users')");
//! assert_eq!(links[0].target().query, "server/api/users");
//! ```

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod commands;
pub mod config;
pub mod error;
pub mod lsp;
pub mod navigation;
pub mod resolver;
pub mod scanner;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use resolver::NavigationTarget;
pub use scanner::{LinkKind, LinkMatch};
