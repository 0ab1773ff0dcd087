//! LSP (Language Server Protocol) server module.
//!
//! This module exposes the link scanner to editors as a language server.
//!
//! # Architecture
//!
//! The LSP module is organized into:
//! - `server`: request routing, lifecycle, and command execution
//! - `documents`: the open document store and link production
//! - `workspace`: the workspace-backed quick-open host
//! - `types`: position and URI conversions

pub mod documents;
pub mod server;
pub mod types;
pub mod workspace;

pub use server::{ServerState, run_stdio};
