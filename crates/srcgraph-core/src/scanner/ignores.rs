//! Ignore patterns for walking Java repositories.
//!
//! The walk must see every `.java` file anywhere under the root, so the
//! defaults are deliberately conservative: only version-control internals
//! are skipped. Callers can add their own patterns through
//! `ScanConfig::extra_ignores`.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Directories that never contain source of interest.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
];

/// Gitignore-style matcher combining defaults with caller patterns.
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Create ignore patterns from defaults + custom patterns.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            let _ = builder.add_line(None, pattern);
        }

        for pattern in extra_patterns {
            let _ = builder.add_line(None, pattern);
        }

        Self {
            gitignore: builder
                .build()
                .unwrap_or_else(|_| GitignoreBuilder::new(root).build().unwrap_or_else(|_| Gitignore::empty())),
        }
    }

    /// Check if a path should be ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}
