//! Symbol resolution - best-effort mapping of syntactic type references
//! onto canonical names.
//!
//! Resolution combines a fixed well-known-types catalog with one
//! declaration-index-backed catalog per discovered source root. Every
//! attempt yields an explicit `Resolution`; the syntactic simple-name
//! fallback is a second strategy invoked only on `Unresolved`, never
//! exception-driven control flow.

mod catalog;
mod wellknown;

pub use catalog::{CatalogEntry, SourceRootCatalog, TypeCatalog};
pub use wellknown::WellKnownCatalog;

use std::path::Path;

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::index::DeclarationIndex;
use crate::normalize::{array_suffix, normalize_type, simple_name, strip_array};
use crate::parser::ast::{self, Import};

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A catalog knows the reference under this canonical name.
    Resolved(CatalogEntry),
    /// No catalog knows the reference; callers fall back syntactically.
    Unresolved,
}

/// Per-file resolution context: package, imports.
#[derive(Debug, Default)]
pub struct FileContext {
    pub package: String,
    /// simple name → imported qualified name (first import wins).
    pub single_imports: FxHashMap<String, String>,
    /// packages opened by `import p.*;`, in source order.
    pub wildcard_imports: Vec<String>,
}

impl FileContext {
    /// Build the context from a compilation unit's package and imports.
    pub fn of(root: Node, source: &str) -> Self {
        let package = ast::package_name(root, source);
        let mut single_imports = FxHashMap::default();
        let mut wildcard_imports = Vec::new();
        for import in ast::imports(root, source) {
            match import {
                Import::Single(path) => {
                    let simple = simple_name(&path);
                    single_imports.entry(simple).or_insert(path);
                }
                Import::Wildcard(pkg) => wildcard_imports.push(pkg),
            }
        }
        Self {
            package,
            single_imports,
            wildcard_imports,
        }
    }
}

/// Best-effort descriptor of a type reference: the string recorded on
/// entities, plus whether semantic resolution succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    pub text: String,
    pub resolved: bool,
}

/// The type itself plus each enclosing type, innermost first.
pub fn enclosing_chain(fqn: &str) -> Vec<String> {
    let mut out = vec![fqn.to_string()];
    let mut current = fqn;
    while let Some(i) = current.rfind('$') {
        current = &current[..i];
        out.push(current.to_string());
    }
    out
}

/// Combined resolver over the well-known table and the per-root catalogs.
pub struct Resolver<'a> {
    well_known: WellKnownCatalog,
    roots: Vec<SourceRootCatalog<'a>>,
}

impl<'a> Resolver<'a> {
    /// Build a resolver for the given source roots. An empty `roots`
    /// slice is treated as one whole-tree root.
    pub fn new(index: &'a DeclarationIndex, roots: &[impl AsRef<Path>]) -> Self {
        let root_catalogs = if roots.is_empty() {
            vec![SourceRootCatalog::new(index, "")]
        } else {
            roots
                .iter()
                .map(|r| {
                    let rel = r.as_ref().to_string_lossy().replace('\\', "/");
                    SourceRootCatalog::new(index, &rel)
                })
                .collect()
        };
        Self {
            well_known: WellKnownCatalog::new(),
            roots: root_catalogs,
        }
    }

    fn lookup_roots(&self, candidate: &str) -> Option<CatalogEntry> {
        self.roots.iter().find_map(|root| root.lookup(candidate))
    }

    /// Resolve a raw type reference against the file context.
    ///
    /// Candidate order for a simple name follows Java scoping: nested
    /// siblings through the enclosing chain, same package, explicit
    /// import, wildcard imports, then the implicit `java.lang` table.
    pub fn resolve(&self, raw: &str, ctx: &FileContext, enclosing: &[String]) -> Resolution {
        let normalized = normalize_type(raw);
        let base = strip_array(&normalized);
        if base.is_empty() {
            return Resolution::Unresolved;
        }

        if base.contains('.') {
            if let Some(entry) = self.lookup_roots(&base) {
                return Resolution::Resolved(entry);
            }
            if let Some(entry) = self.well_known.lookup(&base) {
                return Resolution::Resolved(entry);
            }
            return Resolution::Unresolved;
        }

        for encl in enclosing {
            if let Some(entry) = self.lookup_roots(&format!("{encl}${base}")) {
                return Resolution::Resolved(entry);
            }
            if simple_name(encl) == base {
                if let Some(entry) = self.lookup_roots(encl) {
                    return Resolution::Resolved(entry);
                }
            }
        }

        let same_package = if ctx.package.is_empty() {
            base.clone()
        } else {
            format!("{}.{base}", ctx.package)
        };
        if let Some(entry) = self.lookup_roots(&same_package) {
            return Resolution::Resolved(entry);
        }

        if let Some(imported) = ctx.single_imports.get(&base) {
            if let Some(entry) = self.lookup_roots(imported) {
                return Resolution::Resolved(entry);
            }
            if let Some(entry) = self.well_known.lookup(imported) {
                return Resolution::Resolved(entry);
            }
        }

        for pkg in &ctx.wildcard_imports {
            let candidate = format!("{pkg}.{base}");
            if let Some(entry) = self.lookup_roots(&candidate) {
                return Resolution::Resolved(entry);
            }
            if let Some(entry) = self.well_known.lookup(&candidate) {
                return Resolution::Resolved(entry);
            }
        }

        if let Some(entry) = self.well_known.lookup(&base) {
            return Resolution::Resolved(entry);
        }

        Resolution::Unresolved
    }

    /// Describe a type reference: resolved canonical text (array markers
    /// preserved) or the normalized raw text when resolution fails.
    pub fn describe(&self, raw: &str, ctx: &FileContext, enclosing: &[String]) -> TypeDescription {
        let normalized = normalize_type(raw);
        match self.resolve(raw, ctx, enclosing) {
            Resolution::Resolved(entry) => TypeDescription {
                text: format!("{}{}", entry.qualified, array_suffix(&normalized)),
                resolved: true,
            },
            Resolution::Unresolved => TypeDescription {
                text: normalized,
                resolved: false,
            },
        }
    }

    /// Resolve a supertype/superinterface reference to an internal FQN.
    ///
    /// Semantic resolution is checked against the universe first; on any
    /// miss the syntactic simple-name scan runs. External supertypes
    /// yield `None` and no edge.
    pub fn resolve_supertype(
        &self,
        raw: &str,
        ctx: &FileContext,
        enclosing: &[String],
        index: &DeclarationIndex,
    ) -> Option<String> {
        if let Resolution::Resolved(entry) = self.resolve(raw, ctx, enclosing) {
            if let Some(hit) = index.match_internal(&entry.qualified) {
                return Some(hit.to_string());
            }
        }
        index
            .match_internal(&simple_name(&normalize_type(raw)))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{JavaParser, ParsedUnit};

    fn setup(sources: &[(&str, &str)]) -> (Vec<ParsedUnit>, DeclarationIndex) {
        let mut parser = JavaParser::new().unwrap();
        let units: Vec<ParsedUnit> = sources
            .iter()
            .filter_map(|(file, src)| ParsedUnit::parse(&mut parser, *file, *src))
            .collect();
        let index = DeclarationIndex::build(&units);
        (units, index)
    }

    fn ctx_of(unit: &ParsedUnit) -> FileContext {
        FileContext::of(unit.tree.root_node(), &unit.source)
    }

    #[test]
    fn test_same_package_resolution() {
        let (units, index) = setup(&[
            ("com/x/A.java", "package com.x; class A { B b; }"),
            ("com/x/B.java", "package com.x; class B {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        let resolution = resolver.resolve("B", &ctx, &[]);
        assert_eq!(
            resolution,
            Resolution::Resolved(CatalogEntry {
                qualified: "com.x.B".to_string(),
                internal: true
            })
        );
    }

    #[test]
    fn test_explicit_import_resolution() {
        let (units, index) = setup(&[
            (
                "com/a/A.java",
                "package com.a; import com.b.Widget; class A { Widget w; }",
            ),
            ("com/b/Widget.java", "package com.b; class Widget {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        match resolver.resolve("Widget", &ctx, &[]) {
            Resolution::Resolved(entry) => {
                assert_eq!(entry.qualified, "com.b.Widget");
                assert!(entry.internal);
            }
            Resolution::Unresolved => panic!("import should resolve"),
        }
    }

    #[test]
    fn test_wildcard_import_resolution() {
        let (units, index) = setup(&[
            (
                "com/a/A.java",
                "package com.a; import com.b.*; class A { Widget w; }",
            ),
            ("com/b/Widget.java", "package com.b; class Widget {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        match resolver.resolve("Widget", &ctx, &[]) {
            Resolution::Resolved(entry) => assert_eq!(entry.qualified, "com.b.Widget"),
            Resolution::Unresolved => panic!("wildcard import should resolve"),
        }
    }

    #[test]
    fn test_well_known_string_resolves_external() {
        let (units, index) = setup(&[("com/x/A.java", "package com.x; class A { String s; }")]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        match resolver.resolve("String", &ctx, &[]) {
            Resolution::Resolved(entry) => {
                assert_eq!(entry.qualified, "java.lang.String");
                assert!(!entry.internal);
            }
            Resolution::Unresolved => panic!("String is well known"),
        }
    }

    #[test]
    fn test_nested_sibling_via_enclosing_chain() {
        let (units, index) = setup(&[(
            "com/x/Outer.java",
            "package com.x; class Outer { class Inner {} class Other { Inner i; } }",
        )]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        let enclosing = enclosing_chain("com.x.Outer$Other");
        match resolver.resolve("Inner", &ctx, &enclosing) {
            Resolution::Resolved(entry) => assert_eq!(entry.qualified, "com.x.Outer$Inner"),
            Resolution::Unresolved => panic!("nested sibling should resolve"),
        }
    }

    #[test]
    fn test_unresolved_reference() {
        let (units, index) = setup(&[("com/x/A.java", "package com.x; class A {}")]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        assert_eq!(resolver.resolve("Mystery", &ctx, &[]), Resolution::Unresolved);
    }

    #[test]
    fn test_describe_keeps_array_markers() {
        let (units, index) = setup(&[
            ("com/x/A.java", "package com.x; class A { B[] bs; }"),
            ("com/x/B.java", "package com.x; class B {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        let described = resolver.describe("B[]", &ctx, &[]);
        assert_eq!(described.text, "com.x.B[]");
        assert!(described.resolved);
    }

    #[test]
    fn test_describe_falls_back_to_normalized_raw() {
        let (units, index) = setup(&[("com/x/A.java", "package com.x; class A {}")]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        let described = resolver.describe("List<Mystery>", &ctx, &[]);
        assert_eq!(described.text, "Mystery");
        assert!(!described.resolved);
    }

    #[test]
    fn test_generic_supertype_is_transparent() {
        let (units, index) = setup(&[
            (
                "com/x/Repo.java",
                "package com.x; class Repo extends Store<User> {}",
            ),
            ("com/x/User.java", "package com.x; class User {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        let parent = resolver.resolve_supertype("Store<User>", &ctx, &[], &index);
        assert_eq!(parent.as_deref(), Some("com.x.User"));
    }

    #[test]
    fn test_supertype_syntactic_fallback() {
        let (units, index) = setup(&[
            (
                "com/a/Child.java",
                "package com.a; class Child extends Parent {}",
            ),
            ("com/b/Parent.java", "package com.b; class Parent {}"),
        ]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        // no import, different package: semantic resolution misses but
        // the simple-name scan finds the internal Parent
        let parent = resolver.resolve_supertype("Parent", &ctx, &[], &index);
        assert_eq!(parent.as_deref(), Some("com.b.Parent"));
    }

    #[test]
    fn test_external_supertype_yields_none() {
        let (units, index) = setup(&[(
            "com/x/A.java",
            "package com.x; class A extends Thread {}",
        )]);
        let roots: Vec<&str> = Vec::new();
        let resolver = Resolver::new(&index, &roots);
        let ctx = ctx_of(&units[0]);
        assert_eq!(resolver.resolve_supertype("Thread", &ctx, &[], &index), None);
    }

    #[test]
    fn test_enclosing_chain() {
        assert_eq!(
            enclosing_chain("p.A$B$C"),
            vec!["p.A$B$C".to_string(), "p.A$B".to_string(), "p.A".to_string()]
        );
        assert_eq!(enclosing_chain("p.A"), vec!["p.A".to_string()]);
    }
}
