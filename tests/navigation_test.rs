//! End-to-end tests for link navigation against a real workspace.
//!
//! The navigation driver runs against a `WorkspaceHost` whose opener records
//! the documents it would show, so no editor is required.
//!
//! ```bash
//! cargo test --test navigation_test
//! ```
mod common;

use common::{RecordingOpener, TestWorkspace};
use nuxt_route_links::NavigationTarget;
use nuxt_route_links::lsp::workspace::{WorkspaceHost, search_workspace};
use nuxt_route_links::navigation::{EditorCommand, EditorHost, NavigationDriver};
use nuxt_route_links::scanner::scan;
use tokio_test::assert_ok;

fn host(ws: &TestWorkspace) -> WorkspaceHost<RecordingOpener> {
    WorkspaceHost::new(ws.path(), RecordingOpener::default())
}

#[tokio::test(start_paused = true)]
async fn test_endpoint_opens_best_match_once() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    let result = NavigationDriver::new()
        .open(&mut host, &NavigationTarget::file("server/api/users"))
        .await;
    assert_ok!(result);

    // Four accepts, but only the first has a selection to open.
    let shown = &host.opener().shown;
    assert_eq!(shown.len(), 1, "shown: {shown:?}");
    assert_eq!(shown[0].0, ws.apath("server/api/users.get.ts"));
    assert_eq!(shown[0].1, None);
    assert_eq!(host.current(), Some(ws.apath("server/api/users.get.ts").as_path()));
}

#[tokio::test(start_paused = true)]
async fn test_query_opens_provider_and_selects_method() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    let text = std::fs::read_to_string(ws.apath("pages/users.vue")).unwrap();
    let query = scan(&text)
        .into_iter()
        .find(|hit| hit.token == "getUserList")
        .expect("query link");

    assert_ok!(NavigationDriver::new().open(&mut host, &query.target()).await);

    let shown = &host.opener().shown;
    assert_eq!(shown.len(), 2, "shown: {shown:?}");
    let provider = ws.apath("server/src/GraphQL/Query/Provider/GetProvider.php");
    assert_eq!(shown[0], (provider.clone(), None));

    // The declaration wins over the earlier mention in a comment.
    let (path, selection) = &shown[1];
    assert_eq!(path, &provider);
    let selection = selection.expect("method selection");
    assert_eq!(selection.start.line, 10);
    assert_eq!(selection.start.character, 20);
}

#[tokio::test(start_paused = true)]
async fn test_fragment_opens_fragment_file() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    assert_ok!(
        NavigationDriver::new()
            .open(&mut host, &NavigationTarget::file("FRAGMENT_USER"))
            .await
    );

    let shown = &host.opener().shown;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].0, ws.apath("graphql/fragments/FRAGMENT_USER.ts"));
}

#[tokio::test(start_paused = true)]
async fn test_unresolvable_target_is_a_no_op() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    let target = NavigationTarget::method("server/api/zzz-missing", "qqq");
    assert_ok!(NavigationDriver::new().open(&mut host, &target).await);

    assert!(host.opener().shown.is_empty());
    assert_eq!(host.current(), None);
}

#[tokio::test]
async fn test_method_lookup_without_open_file() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    assert_ok!(host.execute(EditorCommand::QuickOpen("@getUser".to_string())).await);
    assert_ok!(host.execute(EditorCommand::AcceptSelectedQuickOpenItem).await);
    assert!(host.opener().shown.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_driver_timing() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());
    let mut host = host(&ws);

    let start = tokio::time::Instant::now();
    assert_ok!(
        NavigationDriver::new()
            .open(&mut host, &NavigationTarget::method("GetProvider", "getUser"))
            .await
    );
    // 20 + 100 + 200 + 200 accept delays, 200 settle, 20 before the method accept.
    assert!(start.elapsed() >= std::time::Duration::from_millis(740));
}

#[test]
fn test_search_skips_ignored_files() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());

    let results = search_workspace(ws.path(), "server/api/users", true).unwrap();
    assert_eq!(
        results,
        vec![
            ws.apath("server/api/users.get.ts"),
            ws.apath("server/api/users/[id].get.ts"),
        ]
    );

    // Without .gitignore the generated copy shows up, node_modules never does.
    let results = search_workspace(ws.path(), "server/api/users", false).unwrap();
    assert!(results.contains(&ws.apath("generated/server/api/users.ts")));
    assert!(!results.iter().any(|p| p.starts_with(ws.apath("node_modules"))));
}

#[test]
fn test_search_leading_slash_and_empty_query() {
    let ws = TestWorkspace::new(&common::nuxt_fixture());

    let results = search_workspace(ws.path(), "/server/routes/health", true).unwrap();
    assert_eq!(results.first(), Some(&ws.apath("server/routes/health.ts")));

    assert!(search_workspace(ws.path(), "  ", true).unwrap().is_empty());
    assert!(search_workspace(&ws.apath("missing-dir"), "x", true).is_err());
}
