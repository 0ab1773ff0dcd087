use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Splits a fixture into `(relative path, content)` pairs.
///
/// Each file starts with a `//- path` header line.
/// ## Panics
/// if content appears before the first header
pub fn parse_fixture(input: &str) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    let mut current_path: Option<PathBuf> = None;
    let mut current_content = String::new();

    for line in input.lines() {
        if let Some(path) = line.strip_prefix("//- ") {
            if let Some(p) = current_path.take() {
                files.push((p, std::mem::take(&mut current_content)));
            }
            // Store relative path (trim leading slash)
            current_path = Some(PathBuf::from(path.trim().trim_start_matches('/')));
        } else {
            if current_path.is_none() {
                assert!(
                    line.trim().is_empty(),
                    "fixture content before first //- header: {line}"
                );
                continue;
            }
            current_content.push_str(line);
            current_content.push('\n');
        }
    }

    if let Some(p) = current_path {
        files.push((p, current_content));
    }

    files
}

/// Temporary workspace populated from a fixture.
pub struct TestWorkspace {
    /// Temporary folder for the workspace
    pub root: TempDir,
    /// Files written into the workspace
    pub files: Vec<(PathBuf, String)>,
}

impl TestWorkspace {
    /// creates new workspace
    /// ## Panics
    pub fn new(fixture: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let files = parse_fixture(fixture);

        for (path, content) in &files {
            let abs = root.path().join(path);
            std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
            std::fs::write(&abs, content).unwrap();
        }

        Self { root, files }
    }

    /// Returns the root path
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Converts a relative path to an absolute path
    pub fn apath(&self, path: &str) -> PathBuf {
        self.root.path().join(path)
    }
}

#[test]
fn test_parse_fixture() {
    let files = parse_fixture("//- /a.ts\nx\n//- b/c.php\ny\nz\n");
    assert_eq!(
        files,
        vec![
            (PathBuf::from("a.ts"), "x\n".to_string()),
            (PathBuf::from("b/c.php"), "y\nz\n".to_string()),
        ]
    );
}
