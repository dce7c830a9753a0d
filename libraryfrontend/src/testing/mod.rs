use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::auth::{IdSource, TimeSource};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Time source pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub i64);

impl TimeSource for FixedTimeSource {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Identifier source that always returns the same `jti`.
#[derive(Debug, Clone)]
pub struct FixedIdSource(pub String);

impl IdSource for FixedIdSource {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}

/// Identifier source yielding `{prefix}-0`, `{prefix}-1`, ...
#[derive(Debug)]
pub struct SequenceIdSource {
    prefix: String,
    next: AtomicU64,
}

impl SequenceIdSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequenceIdSource {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{n}", self.prefix)
    }
}

/// Scratch directory removed on drop.
pub struct TestDir {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TestDir {
    /// Create a new, empty scratch directory.
    #[must_use]
    pub fn new() -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::expect_used)]
        let dir = tempfile::Builder::new()
            .prefix(&format!("libraryfrontend_test_{}_{counter}_", std::process::id()))
            .tempdir()
            .expect("failed to create temp dir");
        let path = dir.path().to_path_buf();
        Self { _dir: dir, path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        #[allow(clippy::expect_used)]
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Read `name` inside the directory.
    #[must_use]
    pub fn read(&self, name: &str) -> String {
        #[allow(clippy::expect_used)]
        std::fs::read_to_string(self.path.join(name)).expect("failed to read test file")
    }
}
