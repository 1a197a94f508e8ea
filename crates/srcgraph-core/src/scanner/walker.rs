//! Source discovery and content hashing.
//!
//! Walks the scan root recursively, collects `.java` parse targets in
//! deterministic order, and detects conventional Maven/Gradle source
//! roots (`src/main/java`, `src/test/java`, and the same nested below
//! module directories) which later serve as resolution roots.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use super::ignores::IgnorePatterns;
use super::types::{ScanConfig, ScanResult};

/// Maximum depth searched for nested `src/main/java`-style roots.
const SOURCE_ROOT_SEARCH_DEPTH: usize = 4;

/// Relative suffixes that mark a conventional source root.
const SOURCE_ROOT_MARKERS: &[&str] = &["src/main/java", "src/test/java"];

/// Recursive source-file scanner.
pub struct Scanner {
    config: ScanConfig,
    ignores: IgnorePatterns,
    include_globs: GlobSet,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        let ignores = IgnorePatterns::new(&config.root, &config.extra_ignores);

        let mut builder = GlobSetBuilder::new();
        for pattern in &config.patterns {
            // `.java`/`.JAVA` both count as parse targets
            if let Ok(glob) = GlobBuilder::new(pattern).case_insensitive(true).build() {
                builder.add(glob);
            }
        }
        let include_globs = builder.build().unwrap_or_else(|_| GlobSet::empty());

        Self {
            config,
            ignores,
            include_globs,
        }
    }

    /// Walk the root and collect parse targets and source roots.
    pub fn scan(&self) -> ScanResult {
        let mut files = Vec::new();
        self.walk_dir(&self.config.root, &mut files);

        let source_roots = self.detect_source_roots();

        ScanResult {
            root: self.config.root.clone(),
            files,
            source_roots,
        }
    }

    /// Recursively walk a directory in sorted-entry order.
    fn walk_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), %err, "unreadable directory skipped");
                return;
            }
        };

        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let relative = path
                .strip_prefix(&self.config.root)
                .unwrap_or(&path)
                .to_path_buf();

            if path.is_dir() {
                if !self.ignores.is_ignored(&relative, true) {
                    self.walk_dir(&path, files);
                }
            } else if path.is_file()
                && !self.ignores.is_ignored(&relative, false)
                && self.include_globs.is_match(&relative)
            {
                files.push(relative);
            }
        }
    }

    /// Detect conventional source roots below the scan root.
    ///
    /// The root's own `src/main/java`/`src/test/java` come first, then a
    /// bounded-depth sweep picks up multi-module layouts. Duplicates are
    /// removed, first occurrence kept.
    fn detect_source_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();

        for marker in SOURCE_ROOT_MARKERS {
            if self.config.root.join(marker).is_dir() {
                roots.push(PathBuf::from(marker));
            }
        }

        for entry in WalkDir::new(&self.config.root)
            .max_depth(SOURCE_ROOT_SEARCH_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_dir() {
                continue;
            }
            if !SOURCE_ROOT_MARKERS
                .iter()
                .any(|marker| entry.path().ends_with(marker))
            {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.config.root) {
                let relative = relative.to_path_buf();
                if !roots.contains(&relative) {
                    roots.push(relative);
                }
            }
        }

        roots
    }
}

/// Content digest of a file, as 16 lowercase hex digits (XXH3-64).
///
/// Read failures hash an empty byte sequence; a missing file never fails
/// the record that carries the hash.
pub fn file_hash(path: &Path) -> String {
    let bytes = fs::read(path).unwrap_or_default();
    format!("{:016x}", xxh3_64(&bytes))
}

/// Content digest of a text fragment (method/constructor bodies).
pub fn content_hash(text: &str) -> String {
    format!("{:016x}", xxh3_64(text.as_bytes()))
}
