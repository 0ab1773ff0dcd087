//! Path resolution by naming convention.
//!
//! Every function here is pure: a matched token goes in, a quick-open query
//! (and for GraphQL operations, the method to jump to) comes out. Nothing
//! touches the file system; whether the path exists is the host's business.

use serde::{Deserialize, Serialize};

use crate::scanner::LinkKind;

/// Directory holding GraphQL query providers.
pub const QUERY_PROVIDER_DIR: &str = "server/src/GraphQL/Query/Provider/";

/// Directory holding GraphQL mutation providers.
pub const MUTATION_PROVIDER_DIR: &str = "server/src/GraphQL/Mutation/Provider/";

/// GraphQL operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// A `query` declaration.
    Query,
    /// A `mutation` declaration.
    Mutation,
}

impl OperationKind {
    /// Directory the providers of this operation type live in.
    pub fn provider_dir(self) -> &'static str {
        match self {
            Self::Query => QUERY_PROVIDER_DIR,
            Self::Mutation => MUTATION_PROVIDER_DIR,
        }
    }
}

/// Where a link leads: a quick-open query and an optional method to jump to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    /// Text typed into the quick-open picker.
    pub query: String,
    /// Method to select once the file is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl NavigationTarget {
    /// A target that only opens a file.
    pub fn file(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            method: None,
        }
    }

    /// A target that opens a file and then jumps to `method`.
    pub fn method(query: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            method: Some(method.into()),
        }
    }
}

/// Maps an API endpoint to its Nuxt server file path.
///
/// `/api/...` endpoints live under `server/api`, everything else is a server
/// route under `server/routes`.
pub fn endpoint_path(endpoint: &str) -> String {
    if endpoint.starts_with("/api/") {
        format!("server{endpoint}")
    } else {
        format!("server/routes{endpoint}")
    }
}

/// Derives the provider class file name for a GraphQL operation.
///
/// The provider is named after the first camel-case word of the operation:
/// `getUserById` is served by `GetProvider.php`.
pub fn provider_file_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return "Provider.php".to_string();
    };

    let mut file_name: String = first.to_uppercase().collect();
    file_name.extend(chars.take_while(|c| !c.is_ascii_uppercase()));
    file_name.push_str("Provider.php");
    file_name
}

/// Full provider path for a GraphQL operation.
pub fn provider_path(kind: OperationKind, name: &str) -> String {
    format!("{}{}", kind.provider_dir(), provider_file_name(name))
}

/// Resolves a scanned token into a navigation target.
pub fn resolve(kind: LinkKind, token: &str) -> NavigationTarget {
    match kind {
        LinkKind::Endpoint => NavigationTarget::file(endpoint_path(token)),
        LinkKind::Fragment => NavigationTarget::file(token),
        LinkKind::Query => {
            NavigationTarget::method(provider_path(OperationKind::Query, token), token)
        }
        LinkKind::Mutation => {
            NavigationTarget::method(provider_path(OperationKind::Mutation, token), token)
        }
    }
}
