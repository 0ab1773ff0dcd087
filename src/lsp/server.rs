//! LSP server implementation.
//!
//! Serves `textDocument/documentLink` for open documents and executes the
//! link commands by running the navigation driver against a
//! [`WorkspaceHost`] on a background task.
//!
//! # Example
//!
//! ```ignore
//! use nuxt_route_links::lsp::server::run_stdio;
//!
//! run_stdio(None).await?;
//! ```

use std::ops::ControlFlow;
use std::path::PathBuf;

use async_lsp::client_monitor::ClientProcessMonitorLayer;
use async_lsp::concurrency::ConcurrencyLayer;
use async_lsp::panic::CatchUnwindLayer;
use async_lsp::router::Router;
use async_lsp::server::LifecycleLayer;
use async_lsp::tracing::TracingLayer;
use async_lsp::{ClientSocket, ErrorCode, ResponseError};
use lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    DocumentLink, DocumentLinkOptions, ExecuteCommandOptions, ExecuteCommandParams,
    InitializeParams, InitializeResult, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
    notification, request,
};
use serde_json::Value;
use tower::ServiceBuilder;
use tracing::{debug, info, warn};

use crate::commands::ALL_COMMANDS;
use crate::config::Settings;
use crate::error::ServerError;
use crate::resolver::NavigationTarget;

use super::documents::Documents;
use super::workspace::WorkspaceHost;

/// Server name reported to clients.
pub const SERVER_NAME: &str = "nuxt-route-links";

/// State shared by all request and notification handlers.
pub struct ServerState {
    /// Socket for requests to the client.
    client: ClientSocket,
    /// Workspace root forced from the command line.
    workspace_override: Option<PathBuf>,
    /// Workspace root in effect after initialization.
    workspace_root: Option<PathBuf>,
    /// Settings from initialization options.
    settings: Settings,
    /// Open documents.
    documents: Documents,
}

impl ServerState {
    /// Creates the state for a new connection.
    pub fn new(client: ClientSocket, workspace_override: Option<PathBuf>) -> Self {
        Self {
            client,
            workspace_root: workspace_override.clone(),
            workspace_override,
            settings: Settings::default(),
            documents: Documents::new(),
        }
    }

    /// Builds the request router for a connection.
    pub fn router(client: ClientSocket, workspace_override: Option<PathBuf>) -> Router<Self> {
        let mut router = Router::new(Self::new(client, workspace_override));
        router
            .request::<request::Initialize, _>(|st, params| {
                let result = st.initialize(params);
                async move { Ok(result) }
            })
            .request::<request::Shutdown, _>(|_, ()| async { Ok(()) })
            .request::<request::DocumentLinkRequest, _>(|st, params| {
                let links = st.document_links(&params.text_document.uri);
                async move { Ok(Some(links)) }
            })
            .request::<request::ExecuteCommand, _>(|st, params| {
                let result = st.execute_command(params);
                async move { result }
            })
            .notification::<notification::Initialized>(|_, _| ControlFlow::Continue(()))
            .notification::<notification::DidOpenTextDocument>(|st, params| {
                st.did_open(params);
                ControlFlow::Continue(())
            })
            .notification::<notification::DidChangeTextDocument>(|st, params| {
                st.did_change(params);
                ControlFlow::Continue(())
            })
            .notification::<notification::DidCloseTextDocument>(|st, params| {
                st.did_close(&params);
                ControlFlow::Continue(())
            })
            .notification::<notification::Exit>(|_, ()| ControlFlow::Break(Ok(())))
            .unhandled_notification(|_, notif| {
                debug!(method = %notif.method, "ignoring notification");
                ControlFlow::Continue(())
            });
        router
    }

    /// Handles `initialize`: records the workspace root and settings.
    fn initialize(&mut self, params: InitializeParams) -> InitializeResult {
        self.settings = Settings::from_initialization_options(params.initialization_options.clone());

        if self.workspace_override.is_none() {
            self.workspace_root = workspace_root_from(&params);
        }

        info!(
            workspace = ?self.workspace_root,
            languages = ?self.settings.languages,
            "initialized"
        );

        InitializeResult {
            capabilities: capabilities(),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        }
    }

    fn did_open(&mut self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents.open(doc.uri, doc.language_id, doc.text);
    }

    fn did_change(&mut self, params: DidChangeTextDocumentParams) {
        self.documents
            .change(&params.text_document.uri, params.content_changes);
    }

    fn did_close(&mut self, params: &DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    /// Produces links for an open document.
    fn document_links(&self, uri: &Url) -> Vec<DocumentLink> {
        let links = self
            .documents
            .links(uri, |language| self.settings.scans_language(language));
        debug!(%uri, count = links.len(), "document links");
        links
    }

    /// Handles `workspace/executeCommand` for the link commands.
    ///
    /// Navigation runs in the background; the request returns immediately.
    fn execute_command(
        &mut self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>, ResponseError> {
        let target = NavigationTarget::from_arguments(&params.command, &params.arguments)
            .map_err(|e| ResponseError::new(ErrorCode::INVALID_PARAMS, e))?;

        let Some(root) = self.workspace_root.clone() else {
            warn!(query = %target.query, "no workspace root, ignoring link");
            return Ok(None);
        };

        let driver = self.settings.driver();
        let mut host = WorkspaceHost::new(root, self.client.clone())
            .respect_gitignore(self.settings.respect_gitignore);

        info!(command = %params.command, query = %target.query, "navigating");
        tokio::spawn(async move {
            if let Err(e) = driver.open(&mut host, &target).await {
                warn!(query = %target.query, error = %e, "navigation failed");
            }
        });

        Ok(None)
    }
}

/// Capabilities advertised in the `initialize` response.
pub fn capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        document_link_provider: Some(DocumentLinkOptions {
            resolve_provider: Some(false),
            work_done_progress_options: WorkDoneProgressOptions::default(),
        }),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: ALL_COMMANDS.iter().map(ToString::to_string).collect(),
            work_done_progress_options: WorkDoneProgressOptions::default(),
        }),
        ..ServerCapabilities::default()
    }
}

/// Picks the workspace root from initialize parameters.
///
/// The first workspace folder wins; the deprecated `rootUri` is the
/// fallback for older clients.
pub fn workspace_root_from(params: &InitializeParams) -> Option<PathBuf> {
    let folder_uri = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri);

    #[allow(deprecated)]
    let uri = folder_uri.or(params.root_uri.as_ref())?;
    uri.to_file_path().ok()
}

/// Runs the server over stdio until the client exits.
///
/// ## Errors
/// Returns an error if stdio cannot be acquired or the main loop fails.
pub async fn run_stdio(workspace_override: Option<PathBuf>) -> Result<(), ServerError> {
    let (mainloop, _client) = async_lsp::MainLoop::new_server(|client| {
        ServiceBuilder::new()
            .layer(TracingLayer::default())
            .layer(LifecycleLayer::default())
            .layer(CatchUnwindLayer::default())
            .layer(ConcurrencyLayer::default())
            .layer(ClientProcessMonitorLayer::new(client.clone()))
            .service(ServerState::router(client, workspace_override))
    });

    #[cfg(unix)]
    let (stdin, stdout) = (
        async_lsp::stdio::PipeStdin::lock_tokio().map_err(|e| ServerError::Stdio(e.to_string()))?,
        async_lsp::stdio::PipeStdout::lock_tokio()
            .map_err(|e| ServerError::Stdio(e.to_string()))?,
    );
    #[cfg(not(unix))]
    let (stdin, stdout) = (
        tokio_util::compat::TokioAsyncReadCompatExt::compat(tokio::io::stdin()),
        tokio_util::compat::TokioAsyncWriteCompatExt::compat_write(tokio::io::stdout()),
    );

    mainloop
        .run_buffered(stdin, stdout)
        .await
        .map_err(|e| ServerError::MainLoop(e.to_string()))
}
