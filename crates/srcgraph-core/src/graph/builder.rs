//! Graph builder - second pass over every internal type.
//!
//! Emits type records with file hashes, inheritance edges, fields,
//! methods/constructors with body hashes, and the `field`/`param`/
//! `return` dependency edges. Also accumulates the declaration tables
//! the call extractor resolves against.

use std::path::Path;

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::graph::types::{
    DependencyEdge, DependencyKind, ExtendsEdge, FieldRecord, GraphDocument, ImplementsEdge,
    MethodRecord, ParamRecord, TypeRecord,
};
use crate::index::DeclarationIndex;
use crate::normalize::simple_name;
use crate::parser::{ast, ParsedUnit};
use crate::resolver::{enclosing_chain, FileContext, Resolver, TypeDescription};
use crate::scanner::{content_hash, file_hash};

/// A declared callable, as needed for call-site resolution.
#[derive(Debug, Clone)]
pub struct CalleeDecl {
    pub name: String,
    /// Normalized parameter types, as recorded on the method record.
    pub param_types: Vec<String>,
    pub return_type: String,
    pub is_constructor: bool,
}

impl CalleeDecl {
    /// The identity key: `name(paramType,paramType,...)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.param_types.join(","))
    }
}

/// Declaration tables accumulated for the call-extraction sub-pass.
#[derive(Debug, Default)]
pub struct DeclTables {
    /// owner FQN → declared callables, in declaration order.
    pub methods: FxHashMap<String, Vec<CalleeDecl>>,
    /// owner FQN → field name → described field type.
    pub fields: FxHashMap<String, FxHashMap<String, TypeDescription>>,
    /// child FQN → internal supertype FQN (first internal `extends`).
    pub supers: FxHashMap<String, String>,
}

/// Second-pass builder over the parsed units.
pub struct GraphBuilder<'a> {
    index: &'a DeclarationIndex,
    resolver: &'a Resolver<'a>,
    root: &'a Path,
    project_name: String,
    repo_id: String,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        index: &'a DeclarationIndex,
        resolver: &'a Resolver<'a>,
        root: &'a Path,
        project_name: &str,
        repo_id: &str,
    ) -> Self {
        Self {
            index,
            resolver,
            root,
            project_name: project_name.to_string(),
            repo_id: repo_id.to_string(),
        }
    }

    /// Emit type records, then walk every unit's declarations.
    pub fn build(&self, units: &[ParsedUnit], graph: &mut GraphDocument) -> DeclTables {
        self.emit_types(graph);

        let mut tables = DeclTables::default();
        for unit in units {
            let file_ctx = FileContext::of(unit.tree.root_node(), &unit.source);
            for decl in ast::type_declarations(unit.tree.root_node(), &unit.source) {
                if !ast::CLASS_LIKE_KINDS.contains(&decl.node.kind()) {
                    continue;
                }
                if !self.index.contains(&decl.fqn) {
                    continue;
                }
                self.build_type(unit, &file_ctx, &decl, graph, &mut tables);
            }
        }
        tables
    }

    /// One TypeRecord per indexed FQN, file hash computed once per file.
    fn emit_types(&self, graph: &mut GraphDocument) {
        let mut hash_cache: FxHashMap<String, String> = FxHashMap::default();
        for meta in self.index.iter() {
            let hash = hash_cache
                .entry(meta.file.clone())
                .or_insert_with(|| file_hash(&self.root.join(&meta.file)))
                .clone();
            graph.types.push(TypeRecord {
                project_name: self.project_name.clone(),
                repo_id: self.repo_id.clone(),
                fqn: meta.fqn.clone(),
                name: meta.name.clone(),
                file: meta.file.clone(),
                file_hash: hash,
            });
        }
    }

    fn build_type(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        decl: &ast::TypeDecl,
        graph: &mut GraphDocument,
        tables: &mut DeclTables,
    ) {
        let owner = decl.fqn.as_str();
        let enclosing = enclosing_chain(owner);
        let node = decl.node;

        // Supertype clauses: classes extend/implement, interfaces extend.
        // Enum and record supertype clauses are not traversed.
        match node.kind() {
            "class_declaration" => {
                if let Some(sup) = ast::class_superclass(node) {
                    let raw = ast::text(sup, &unit.source);
                    if let Some(parent) =
                        self.resolver
                            .resolve_supertype(raw, file_ctx, &enclosing, self.index)
                    {
                        tables.supers.insert(owner.to_string(), parent.clone());
                        graph.extends.push(self.extends_edge(owner, &parent));
                    }
                }
                for iface in ast::super_interface_types(node) {
                    let raw = ast::text(iface, &unit.source);
                    if let Some(target) =
                        self.resolver
                            .resolve_supertype(raw, file_ctx, &enclosing, self.index)
                    {
                        graph.implements.push(self.implements_edge(owner, &target));
                    }
                }
            }
            "interface_declaration" => {
                for sup in ast::extends_interface_types(node) {
                    let raw = ast::text(sup, &unit.source);
                    if let Some(parent) =
                        self.resolver
                            .resolve_supertype(raw, file_ctx, &enclosing, self.index)
                    {
                        tables
                            .supers
                            .entry(owner.to_string())
                            .or_insert_with(|| parent.clone());
                        graph.extends.push(self.extends_edge(owner, &parent));
                    }
                }
            }
            _ => {}
        }

        for scope in ast::member_scopes(node) {
            for field in ast::field_declarations(scope) {
                self.build_field(unit, file_ctx, &enclosing, owner, field, graph, tables);
            }
        }
        for scope in ast::member_scopes(node) {
            for callable in ast::callable_declarations(scope) {
                self.build_callable(
                    unit, file_ctx, &enclosing, owner, &decl.name, callable, graph, tables,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_field(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        field: Node,
        graph: &mut GraphDocument,
        tables: &mut DeclTables,
    ) {
        let Some(type_node) = field.child_by_field_name("type") else {
            return;
        };
        let raw = ast::text(type_node, &unit.source);
        let described = self.resolver.describe(raw, file_ctx, enclosing);

        for var in ast::declarators(field) {
            let Some(name_node) = var.child_by_field_name("name") else {
                continue;
            };
            let name = ast::text(name_node, &unit.source).to_string();
            graph.fields.push(FieldRecord {
                project_name: self.project_name.clone(),
                repo_id: self.repo_id.clone(),
                owner_fqn: owner.to_string(),
                name: name.clone(),
                type_name: described.text.clone(),
            });
            tables
                .fields
                .entry(owner.to_string())
                .or_default()
                .insert(name, described.clone());

            if let Some(target) = self.index.match_internal(&described.text) {
                if target != owner {
                    let edge = self.dependency(owner, target, DependencyKind::Field, &unit.file);
                    graph.dependencies.push(edge);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_callable(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        type_name: &str,
        node: Node,
        graph: &mut GraphDocument,
        tables: &mut DeclTables,
    ) {
        let is_constructor = node.kind() == "constructor_declaration";
        let name = if is_constructor {
            type_name.to_string()
        } else {
            node.child_by_field_name("name")
                .map(|n| ast::text(n, &unit.source).to_string())
                .unwrap_or_default()
        };
        if name.is_empty() {
            return;
        }

        let mut params = Vec::new();
        let mut param_types = Vec::new();
        for (pname, ptype) in ast::formal_parameters(node, &unit.source) {
            let described = self.resolver.describe(&ptype, file_ctx, enclosing);
            params.push(ParamRecord {
                name: pname,
                type_name: described.text.clone(),
            });
            if let Some(target) = self.index.match_internal(&described.text) {
                if target != owner {
                    let edge = self.dependency(owner, target, DependencyKind::Param, &unit.file);
                    graph.dependencies.push(edge);
                }
            }
            param_types.push(described.text);
        }
        let signature = format!("{}({})", name, param_types.join(","));

        // Constructors carry no return-type dependency.
        let mut return_type = "void".to_string();
        if !is_constructor {
            if let Some(rt) = node.child_by_field_name("type") {
                let described =
                    self.resolver
                        .describe(ast::text(rt, &unit.source), file_ctx, enclosing);
                return_type = described.text;
                if let Some(target) = self.index.match_internal(&return_type) {
                    if target != owner {
                        let edge =
                            self.dependency(owner, target, DependencyKind::Return, &unit.file);
                        graph.dependencies.push(edge);
                    }
                }
            }
        }

        // Bodyless callables (abstract/interface methods) hash "".
        let body_text = node
            .child_by_field_name("body")
            .map(|b| ast::text(b, &unit.source))
            .unwrap_or("");

        graph.methods.push(MethodRecord {
            project_name: self.project_name.clone(),
            repo_id: self.repo_id.clone(),
            owner_fqn: owner.to_string(),
            name: name.clone(),
            signature,
            return_type: return_type.clone(),
            params,
            file: unit.file.clone(),
            begin_line: Some(ast::begin_line(node)),
            end_line: Some(ast::end_line(node)),
            body_hash: content_hash(body_text),
        });

        tables
            .methods
            .entry(owner.to_string())
            .or_default()
            .push(CalleeDecl {
                name,
                param_types,
                return_type,
                is_constructor,
            });
    }

    fn dependency(
        &self,
        from: &str,
        to: &str,
        via: DependencyKind,
        file: &str,
    ) -> DependencyEdge {
        DependencyEdge {
            project_name: self.project_name.clone(),
            repo_id: self.repo_id.clone(),
            from_fqn: from.to_string(),
            to_fqn: to.to_string(),
            to_simple: simple_name(to),
            via,
            file: file.to_string(),
        }
    }

    fn extends_edge(&self, child: &str, parent: &str) -> ExtendsEdge {
        ExtendsEdge {
            project_name: self.project_name.clone(),
            repo_id: self.repo_id.clone(),
            child_fqn: child.to_string(),
            parent_fqn: parent.to_string(),
        }
    }

    fn implements_edge(&self, child: &str, iface: &str) -> ImplementsEdge {
        ImplementsEdge {
            project_name: self.project_name.clone(),
            repo_id: self.repo_id.clone(),
            child_fqn: child.to_string(),
            iface_fqn: iface.to_string(),
        }
    }
}
