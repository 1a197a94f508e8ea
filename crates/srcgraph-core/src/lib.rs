//! srcgraph-core: static Java source-graph extraction engine
//!
//! Parses a tree of Java source files into a structural-and-semantic
//! graph - declared types, their members, and the relationships between
//! types - with content hashes attached for downstream change detection.
//!
//! Components:
//! - Scanner: source discovery, ignore patterns, source-root detection
//! - Parser: native tree-sitter Java parsing and AST access
//! - Index: the declaration index (internal universe of FQNs)
//! - Resolver: best-effort symbol resolution over pluggable type catalogs
//! - Normalize: canonicalization of type strings
//! - Graph: records, relationship extraction, call edges, deduplication
//! - Pipeline: the single-threaded two-pass extraction run

pub mod error;
pub mod graph;
pub mod index;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod scanner;

// Re-exports for convenience
pub use error::{Error, Result};
pub use graph::{
    CallEdge, DependencyEdge, DependencyKind, ExtendsEdge, FieldRecord, GraphDocument,
    ImplementsEdge, MethodRecord, ParamRecord, TypeRecord,
};
pub use index::{DeclarationIndex, TypeMeta};
pub use parser::{JavaParser, ParsedUnit};
pub use pipeline::{extract, ExtractOptions, DEFAULT_REPO_ID};
pub use resolver::{
    CatalogEntry, FileContext, Resolution, Resolver, SourceRootCatalog, TypeCatalog,
    TypeDescription, WellKnownCatalog,
};
pub use scanner::{ScanConfig, ScanResult, Scanner};
