//! Declaration index - the internal universe of declared types.
//!
//! Built in the first pass by walking every parsed unit. Keys are
//! canonical FQNs (`pkg.Outer$Inner`); iteration follows first
//! declaration order, which also fixes the tie-break order of the
//! syntactic simple-name fallback.

use indexmap::IndexMap;

use crate::normalize::{simple_name, strip_array};
use crate::parser::{ast, ParsedUnit};

/// Metadata captured for each declared type during the first pass.
#[derive(Debug, Clone)]
pub struct TypeMeta {
    pub fqn: String,
    pub name: String,
    /// Root-relative source file path, `/`-separated.
    pub file: String,
}

/// The set of types declared inside the scanned tree.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    types: IndexMap<String, TypeMeta>,
}

impl DeclarationIndex {
    /// First pass: register every type declaration of every parsed unit.
    /// A duplicate FQN keeps the first registration (benign collision).
    pub fn build(units: &[ParsedUnit]) -> Self {
        let mut index = Self::default();
        for unit in units {
            let root = unit.tree.root_node();
            for decl in ast::type_declarations(root, &unit.source) {
                if decl.fqn.is_empty() {
                    continue;
                }
                index.register(decl.fqn, decl.name, unit.file.clone());
            }
        }
        index
    }

    pub fn register(&mut self, fqn: String, name: String, file: String) {
        self.types.entry(fqn.clone()).or_insert(TypeMeta { fqn, name, file });
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    pub fn get(&self, fqn: &str) -> Option<&TypeMeta> {
        self.types.get(fqn)
    }

    /// Declared types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeMeta> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Map a normalized type string onto an internal FQN.
    ///
    /// Exact key match first; otherwise the first FQN (in registration
    /// order) whose last `.`/`$` segment equals the reference's simple
    /// name. Ambiguous simple names resolve to the first match - a
    /// documented recall-over-soundness heuristic (see DESIGN.md).
    pub fn match_internal(&self, type_str: &str) -> Option<&str> {
        let base = strip_array(type_str);
        if base.is_empty() {
            return None;
        }
        if let Some(meta) = self.types.get(base.as_str()) {
            return Some(meta.fqn.as_str());
        }
        let simple = simple_name(&base);
        if simple.is_empty() {
            return None;
        }
        let dot_suffix = format!(".{simple}");
        let dollar_suffix = format!("${simple}");
        self.types
            .keys()
            .map(|fqn| fqn.as_str())
            .find(|fqn| {
                fqn.ends_with(&dot_suffix) || fqn.ends_with(&dollar_suffix) || *fqn == simple
            })
    }
}
