//! Scanner types - configuration and discovery results.

use std::path::PathBuf;

/// Configuration for source discovery.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan.
    pub root: PathBuf,
    /// Glob patterns for parse targets (matched case-insensitively).
    pub patterns: Vec<String>,
    /// Additional ignore patterns (beyond defaults).
    pub extra_ignores: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            patterns: vec!["**/*.java".to_string()],
            extra_ignores: vec![],
        }
    }
}

/// Result of source discovery.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The scanned root.
    pub root: PathBuf,
    /// Parse targets, root-relative, in deterministic walk order.
    pub files: Vec<PathBuf>,
    /// Conventional source roots, root-relative, in detection order.
    /// Empty when the tree has no `src/main/java`-style layout; the
    /// caller then treats the whole tree as a single root.
    pub source_roots: Vec<PathBuf>,
}
