//! Link commands.
//!
//! Document links carry a `command:` URI instead of a file URI, because the
//! file is only found at click time through quick-open. The URI names one
//! of three commands and carries the quick-open query (and, for GraphQL
//! operations, the method name) as a percent-encoded JSON argument list.

use lsp_types::Url;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::error::CommandError;
use crate::resolver::NavigationTarget;
use crate::scanner::LinkKind;

/// Opens the server file behind an API endpoint.
pub const OPEN_FILE_DIALOG: &str = "nuxt-jump-to-server-routes.openFileDialog";

/// Opens the file defining a GraphQL fragment.
pub const OPEN_FRAGMENT_DIALOG: &str = "nuxt-jump-to-server-routes.openFragmentDialog";

/// Opens a GraphQL provider and jumps to the operation's method.
pub const OPEN_PHP_METHOD: &str = "nuxt-jump-to-server-routes.openPHPMethod";

/// Characters escaped in the JSON argument, matching a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Every command this server executes.
pub const ALL_COMMANDS: [&str; 3] = [OPEN_FILE_DIALOG, OPEN_FRAGMENT_DIALOG, OPEN_PHP_METHOD];

/// The command a link of `kind` invokes.
pub fn command_for(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Endpoint => OPEN_FILE_DIALOG,
        LinkKind::Fragment => OPEN_FRAGMENT_DIALOG,
        LinkKind::Query | LinkKind::Mutation => OPEN_PHP_METHOD,
    }
}

/// Command arguments for a target: the query, then the method if any.
pub fn arguments(target: &NavigationTarget) -> Vec<Value> {
    let mut args = vec![Value::String(target.query.clone())];
    if let Some(method) = &target.method {
        args.push(Value::String(method.clone()));
    }
    args
}

/// Builds the `command:` URI a document link points at.
///
/// The argument list is serialized to JSON and percent-encoded as a whole,
/// so decoding the query once yields the JSON text unchanged.
pub fn command_uri(kind: LinkKind, target: &NavigationTarget) -> Option<Url> {
    let json = Value::Array(arguments(target)).to_string();
    let encoded = utf8_percent_encode(&json, COMPONENT);
    Url::parse(&format!("command:{}?{encoded}", command_for(kind))).ok()
}

impl NavigationTarget {
    /// Decodes the arguments of an executed link command.
    ///
    /// A single string argument is accepted for every command, which is how
    /// older links encoded their target. The method is only honored for
    /// [`OPEN_PHP_METHOD`].
    ///
    /// ## Errors
    /// Returns an error if the command is not ours or the first argument is
    /// missing or not a string.
    pub fn from_arguments(command: &str, args: &[Value]) -> Result<Self, CommandError> {
        if !ALL_COMMANDS.contains(&command) {
            return Err(CommandError::Unknown(command.to_string()));
        }

        let invalid = |message: &str| CommandError::InvalidArguments {
            command: command.to_string(),
            message: message.to_string(),
        };

        let query = match args.first() {
            Some(Value::String(query)) if !query.is_empty() => query.clone(),
            Some(Value::String(_)) => return Err(invalid("query is empty")),
            Some(_) => return Err(invalid("query must be a string")),
            None => return Err(invalid("missing query argument")),
        };

        let method = match (command, args.get(1)) {
            (OPEN_PHP_METHOD, Some(Value::String(method))) if !method.is_empty() => {
                Some(method.clone())
            }
            (OPEN_PHP_METHOD, Some(Value::String(_) | Value::Null) | None) => None,
            (OPEN_PHP_METHOD, Some(_)) => return Err(invalid("method must be a string")),
            _ => None,
        };

        Ok(Self { query, method })
    }
}
