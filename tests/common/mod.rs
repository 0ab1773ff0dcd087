//! Common test helpers and utilities.

#![allow(dead_code)]

pub mod temp_workspace;

use std::path::{Path, PathBuf};

use nuxt_route_links::lsp::workspace::DocumentOpener;
use nuxt_route_links::navigation::NavigationResult;

// Re-export for convenience
pub use temp_workspace::TestWorkspace;

/// A small Nuxt project with a PHP GraphQL backend.
pub fn nuxt_fixture() -> String {
    r#"
//- /.gitignore
generated/
//- /pages/users.vue
<script setup lang="ts">
const { data: users } = await useFetch('/api/users')
const health = await $fetch("/health")
const query = gql`
  query getUserList($first: Int) {
    users(first: $first) { ...${'FRAGMENT_USER'} }
  }
`
</script>
//- /server/api/users.get.ts
export default defineEventHandler(() => [])
//- /server/api/users/[id].get.ts
export default defineEventHandler(() => null)
//- /server/routes/health.ts
export default defineEventHandler(() => 'ok')
//- /server/src/GraphQL/Query/Provider/GetProvider.php
<?php

class GetProvider
{
    // getUserList is registered in the schema
    public function getUser(array $args): array
    {
        return [];
    }

    public function getUserList(array $args): array
    {
        return [];
    }
}
//- /graphql/fragments/FRAGMENT_USER.ts
export const FRAGMENT_USER = 'fragment FRAGMENT_USER on User { id }'
//- /node_modules/server/api/users.js
module.exports = {}
//- /generated/server/api/users.ts
export {}
"#
    .to_string()
}

/// Records every document shown instead of talking to a client.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    /// Shown documents, in order.
    pub shown: Vec<(PathBuf, Option<lsp_types::Range>)>,
}

impl DocumentOpener for RecordingOpener {
    async fn show(
        &mut self,
        path: &Path,
        selection: Option<lsp_types::Range>,
    ) -> NavigationResult<()> {
        self.shown.push((path.to_path_buf(), selection));
        Ok(())
    }
}
