//! Scanner module - source discovery over a repository tree.
//!
//! This module provides:
//! - recursive walking with gitignore-style filtering (`ignore` crate)
//! - deterministic enumeration of `.java` parse targets (`globset`)
//! - detection of conventional Maven/Gradle source roots
//! - content hashing for files and text fragments (`xxhash`)

mod ignores;
mod types;
mod walker;

pub use ignores::{IgnorePatterns, DEFAULT_IGNORE_DIRS};
pub use types::{ScanConfig, ScanResult};
pub use walker::{content_hash, file_hash, Scanner};
