//! Type catalogs - pluggable sources of type-name knowledge.
//!
//! A catalog answers one question: "do you know a type by this canonical
//! name?". External types never need member-level detail, so a name
//! table stands in for a reflective type system.

use crate::index::DeclarationIndex;

/// A successful catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Canonical qualified name of the type.
    pub qualified: String,
    /// Whether the type is declared inside the scanned tree.
    pub internal: bool,
}

/// A source of type-name knowledge consulted during semantic resolution.
pub trait TypeCatalog {
    /// Look up a candidate canonical name.
    fn lookup(&self, candidate: &str) -> Option<CatalogEntry>;
}

/// Resolves types declared under one discovered source root.
///
/// When conventional roots exist, semantic resolution only sees types
/// declared under them; anything else stays reachable through the
/// syntactic fallback, matching the original solver wiring.
pub struct SourceRootCatalog<'a> {
    index: &'a DeclarationIndex,
    /// Root-relative file prefix with trailing `/`; `""` = whole tree.
    prefix: String,
}

impl<'a> SourceRootCatalog<'a> {
    pub fn new(index: &'a DeclarationIndex, root: &str) -> Self {
        let trimmed = root.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        Self { index, prefix }
    }
}

impl TypeCatalog for SourceRootCatalog<'_> {
    fn lookup(&self, candidate: &str) -> Option<CatalogEntry> {
        let meta = self.index.get(candidate)?;
        if !self.prefix.is_empty() && !meta.file.starts_with(&self.prefix) {
            return None;
        }
        Some(CatalogEntry {
            qualified: meta.fqn.clone(),
            internal: true,
        })
    }
}
