//! Error types for the nuxt-route-links language server.
//!
//! Errors are organized by subsystem: navigation, link commands, and the
//! LSP server itself. A link that resolves to nothing is not an error; it is
//! a silent no-op handled by the host.

use thiserror::Error;

/// Errors raised while driving the editor's quick-open flow.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The host rejected or failed to run an editor command.
    #[error("editor command '{command}' failed: {message}")]
    CommandFailed {
        /// The editor command that failed.
        command: String,
        /// Reason reported by the host.
        message: String,
    },

    /// The client refused or failed to show a document.
    #[error("failed to show document {uri}: {message}")]
    ShowDocumentFailed {
        /// The document URI.
        uri: String,
        /// Reason reported by the client.
        message: String,
    },

    /// Walking the workspace for quick-open candidates failed.
    #[error("workspace search failed: {0}")]
    WorkspaceSearch(String),
}

/// Errors raised while decoding a link command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The command identifier is not one of ours.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The command arguments are missing or malformed.
    #[error("invalid arguments for {command}: {message}")]
    InvalidArguments {
        /// The command identifier.
        command: String,
        /// What was wrong with the arguments.
        message: String,
    },
}

/// Errors related to the LSP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to acquire stdio for the protocol transport.
    #[error("failed to acquire stdio: {0}")]
    Stdio(String),

    /// The main loop terminated with an error.
    #[error("server main loop failed: {0}")]
    MainLoop(String),
}

/// A unified error type for the entire application.
#[derive(Debug, Error)]
pub enum Error {
    /// Navigation error.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Command decoding error.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Server error.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// A specialized Result type for nuxt-route-links operations.
pub type Result<T> = std::result::Result<T, Error>;
