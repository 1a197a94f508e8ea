//! The two-pass extraction pipeline.
//!
//! Single-threaded batch run: discover files, parse them once and build
//! the declaration index, then revisit every internal type for members
//! and call edges, deduplicate, and hand back the finished document.
//! The graph accumulator is owned here and passed by reference; nothing
//! survives the run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::graph::{CallExtractor, GraphBuilder, GraphDocument};
use crate::index::DeclarationIndex;
use crate::parser::{JavaParser, ParsedUnit};
use crate::resolver::Resolver;
use crate::scanner::{ScanConfig, Scanner};

/// Repository identifier used when the caller supplies none.
pub const DEFAULT_REPO_ID: &str = "local";

/// Caller-supplied run options; `None` fields take defaults.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Defaults to the root directory's base name.
    pub project_name: Option<String>,
    /// Defaults to [`DEFAULT_REPO_ID`].
    pub repo_id: Option<String>,
}

/// Run the full extraction over a source tree.
///
/// The only fatal failure is an invalid root; per-file and per-reference
/// problems degrade the output instead of aborting it.
pub fn extract(root: &Path, options: &ExtractOptions) -> Result<GraphDocument> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }
    let root = fs::canonicalize(root)?;

    let project_name = options.project_name.clone().unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    });
    let repo_id = options
        .repo_id
        .clone()
        .unwrap_or_else(|| DEFAULT_REPO_ID.to_string());

    // Discovery
    let scanner = Scanner::new(ScanConfig {
        root: root.clone(),
        ..Default::default()
    });
    let scan = scanner.scan();
    tracing::info!(
        files = scan.files.len(),
        source_roots = scan.source_roots.len(),
        root = %root.display(),
        "scan complete"
    );

    // Pass 1: parse everything once, index declared types.
    let mut parser = JavaParser::new()?;
    let mut units: Vec<ParsedUnit> = Vec::new();
    for rel in &scan.files {
        let path = root.join(rel);
        let source = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(file = %rel.display(), %err, "unreadable file skipped");
                continue;
            }
        };
        let file = rel.to_string_lossy().replace('\\', "/");
        match ParsedUnit::parse(&mut parser, file, source) {
            Some(unit) => units.push(unit),
            None => tracing::warn!(file = %rel.display(), "unparsable file skipped"),
        }
    }
    let index = DeclarationIndex::build(&units);
    tracing::info!(
        parsed = units.len(),
        types = index.len(),
        "declaration index built"
    );

    // Resolution context: one catalog per discovered source root, or the
    // whole tree when no conventional layout exists.
    let roots: Vec<PathBuf> = if scan.source_roots.is_empty() {
        vec![PathBuf::new()]
    } else {
        scan.source_roots.clone()
    };
    let resolver = Resolver::new(&index, &roots);

    // Pass 2: members and declaration-surface edges, then calls.
    let mut graph = GraphDocument::new(project_name.clone(), repo_id.clone());
    let builder = GraphBuilder::new(&index, &resolver, &root, &project_name, &repo_id);
    let tables = builder.build(&units, &mut graph);

    let extractor = CallExtractor::new(&index, &resolver, &tables, &project_name, &repo_id);
    extractor.extract(&units, &mut graph);

    graph.dedupe_edges();
    tracing::info!(
        types = graph.types.len(),
        methods = graph.methods.len(),
        fields = graph.fields.len(),
        dependencies = graph.dependencies.len(),
        calls = graph.calls.len(),
        "graph assembled"
    );
    Ok(graph)
}
