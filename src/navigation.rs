//! Navigation driver.
//!
//! Opens a [`NavigationTarget`] by replaying the same command sequence a
//! user would type: open the quick-open picker with the target query, then
//! accept the highlighted entry a few times while the picker populates.
//! When the target names a method, the picker is reopened with an `@method`
//! symbol query and accepted once more.
//!
//! The driver knows nothing about how the editor implements quick-open;
//! that lives behind [`EditorHost`].

use std::fmt;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::NavigationError;
use crate::resolver::NavigationTarget;

/// Result type for navigation operations.
pub type NavigationResult<T> = std::result::Result<T, NavigationError>;

/// Delays before each accept of the quick-open selection.
pub const DEFAULT_ACCEPT_DELAYS: [Duration; 4] = [
    Duration::from_millis(20),
    Duration::from_millis(100),
    Duration::from_millis(200),
    Duration::from_millis(200),
];

/// Delay between the file opening and the method lookup.
pub const DEFAULT_METHOD_SETTLE: Duration = Duration::from_millis(200);

/// Delay between the method lookup and its accept.
pub const METHOD_ACCEPT_DELAY: Duration = Duration::from_millis(20);

/// Editor commands the driver issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Open the quick-open picker prefilled with a query.
    QuickOpen(String),
    /// Accept the highlighted quick-open entry.
    AcceptSelectedQuickOpenItem,
}

impl EditorCommand {
    /// The editor's identifier for this command.
    pub fn id(&self) -> &'static str {
        match self {
            Self::QuickOpen(_) => "workbench.action.quickOpen",
            Self::AcceptSelectedQuickOpenItem => "workbench.action.acceptSelectedQuickOpenItem",
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuickOpen(query) => write!(f, "{}({query:?})", self.id()),
            Self::AcceptSelectedQuickOpenItem => f.write_str(self.id()),
        }
    }
}

/// Something that can execute editor commands.
///
/// Implementations decide what an accept with nothing to accept means;
/// the expected behavior is a silent no-op.
pub trait EditorHost: Send {
    /// Executes a single editor command.
    fn execute(
        &mut self,
        command: EditorCommand,
    ) -> impl Future<Output = NavigationResult<()>> + Send;
}

/// Drives the fixed quick-open command sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationDriver {
    accept_delays: Vec<Duration>,
    method_settle: Duration,
}

impl Default for NavigationDriver {
    fn default() -> Self {
        Self {
            accept_delays: DEFAULT_ACCEPT_DELAYS.to_vec(),
            method_settle: DEFAULT_METHOD_SETTLE,
        }
    }
}

impl NavigationDriver {
    /// Creates a driver with the default delay schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the accept delay schedule.
    #[must_use]
    pub fn accept_delays(mut self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.accept_delays = delays.into_iter().collect();
        self
    }

    /// Sets the delay before the method lookup.
    #[must_use]
    pub fn method_settle(mut self, delay: Duration) -> Self {
        self.method_settle = delay;
        self
    }

    /// Opens `target` through `host`.
    ///
    /// ## Errors
    /// Returns the first error reported by the host; later commands are not
    /// issued.
    #[instrument(level = "debug", skip(self, host), fields(query = %target.query))]
    pub async fn open<H: EditorHost>(
        &self,
        host: &mut H,
        target: &NavigationTarget,
    ) -> NavigationResult<()> {
        host.execute(EditorCommand::QuickOpen(target.query.clone()))
            .await?;

        for delay in &self.accept_delays {
            tokio::time::sleep(*delay).await;
            host.execute(EditorCommand::AcceptSelectedQuickOpenItem)
                .await?;
        }

        if let Some(method) = &target.method {
            tokio::time::sleep(self.method_settle).await;
            debug!(method = %method, "jumping to method");
            host.execute(EditorCommand::QuickOpen(format!("@{method}")))
                .await?;
            tokio::time::sleep(METHOD_ACCEPT_DELAY).await;
            host.execute(EditorCommand::AcceptSelectedQuickOpenItem)
                .await?;
        }

        Ok(())
    }
}
