//! Call extraction - resolves method invocations against the declared
//! internal universe.
//!
//! Every failure is localized to the single call expression: unresolved
//! receivers, unknown callees, and ambiguous overloads skip that call
//! and nothing else. Callee signatures come from the resolved
//! declaration's parameter types, never from call-site arguments.

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::graph::builder::{CalleeDecl, DeclTables};
use crate::graph::types::{CallEdge, DependencyEdge, DependencyKind, GraphDocument};
use crate::index::DeclarationIndex;
use crate::normalize::{normalize_type, simple_name, strip_array};
use crate::parser::{ast, ParsedUnit};
use crate::resolver::{enclosing_chain, FileContext, Resolution, Resolver, TypeDescription};

/// Upper bound on supertype-chain walks (cycle guard).
const MAX_HIERARCHY_DEPTH: usize = 32;

/// Declared-variable types visible inside one callable body.
struct VarScopes {
    locals: FxHashMap<String, TypeDescription>,
    params: FxHashMap<String, TypeDescription>,
    fields: FxHashMap<String, TypeDescription>,
}

impl VarScopes {
    fn lookup(&self, name: &str) -> Option<&TypeDescription> {
        self.locals
            .get(name)
            .or_else(|| self.params.get(name))
            .or_else(|| self.fields.get(name))
    }
}

/// Third stage of the run: walks every callable body for invocations.
pub struct CallExtractor<'a> {
    index: &'a DeclarationIndex,
    resolver: &'a Resolver<'a>,
    tables: &'a DeclTables,
    project_name: String,
    repo_id: String,
}

impl<'a> CallExtractor<'a> {
    pub fn new(
        index: &'a DeclarationIndex,
        resolver: &'a Resolver<'a>,
        tables: &'a DeclTables,
        project_name: &str,
        repo_id: &str,
    ) -> Self {
        Self {
            index,
            resolver,
            tables,
            project_name: project_name.to_string(),
            repo_id: repo_id.to_string(),
        }
    }

    pub fn extract(&self, units: &[ParsedUnit], graph: &mut GraphDocument) {
        for unit in units {
            let file_ctx = FileContext::of(unit.tree.root_node(), &unit.source);
            for decl in ast::type_declarations(unit.tree.root_node(), &unit.source) {
                if !ast::CLASS_LIKE_KINDS.contains(&decl.node.kind()) {
                    continue;
                }
                if !self.index.contains(&decl.fqn) {
                    continue;
                }
                for scope in ast::member_scopes(decl.node) {
                    for callable in ast::callable_declarations(scope) {
                        self.extract_from_callable(unit, &file_ctx, &decl, callable, graph);
                    }
                }
            }
        }
    }

    fn extract_from_callable(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        decl: &ast::TypeDecl,
        callable: Node,
        graph: &mut GraphDocument,
    ) {
        let Some(body) = callable.child_by_field_name("body") else {
            return;
        };
        let owner = decl.fqn.as_str();
        let enclosing = enclosing_chain(owner);
        let from_signature = self.callable_signature(unit, file_ctx, &enclosing, decl, callable);
        let scopes = self.collect_scopes(unit, file_ctx, &enclosing, owner, callable, body);

        for invocation in ast::descendants_of_kind(body, "method_invocation") {
            self.process_invocation(
                unit,
                file_ctx,
                &enclosing,
                owner,
                &from_signature,
                &scopes,
                invocation,
                graph,
            );
        }
    }

    /// Rebuild the caller's signature exactly as the builder recorded it.
    fn callable_signature(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        decl: &ast::TypeDecl,
        callable: Node,
    ) -> String {
        let name = if callable.kind() == "constructor_declaration" {
            decl.name.clone()
        } else {
            callable
                .child_by_field_name("name")
                .map(|n| ast::text(n, &unit.source).to_string())
                .unwrap_or_default()
        };
        let param_types: Vec<String> = ast::formal_parameters(callable, &unit.source)
            .into_iter()
            .map(|(_, ptype)| self.resolver.describe(&ptype, file_ctx, enclosing).text)
            .collect();
        format!("{}({})", name, param_types.join(","))
    }

    #[allow(clippy::too_many_arguments)]
    fn collect_scopes(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        callable: Node,
        body: Node,
    ) -> VarScopes {
        let mut params = FxHashMap::default();
        for (pname, ptype) in ast::formal_parameters(callable, &unit.source) {
            let described = self.resolver.describe(&ptype, file_ctx, enclosing);
            params.insert(pname, described);
        }

        let mut locals = FxHashMap::default();
        for node in ast::descendants_of_kind(body, "local_variable_declaration") {
            let Some(type_node) = node.child_by_field_name("type") else {
                continue;
            };
            let described =
                self.resolver
                    .describe(ast::text(type_node, &unit.source), file_ctx, enclosing);
            for var in ast::declarators(node) {
                if let Some(name_node) = var.child_by_field_name("name") {
                    locals
                        .entry(ast::text(name_node, &unit.source).to_string())
                        .or_insert_with(|| described.clone());
                }
            }
        }
        for node in ast::descendants_of_kind(body, "enhanced_for_statement") {
            if let (Some(type_node), Some(name_node)) = (
                node.child_by_field_name("type"),
                node.child_by_field_name("name"),
            ) {
                let described =
                    self.resolver
                        .describe(ast::text(type_node, &unit.source), file_ctx, enclosing);
                locals
                    .entry(ast::text(name_node, &unit.source).to_string())
                    .or_insert(described);
            }
        }
        for node in ast::descendants_of_kind(body, "catch_formal_parameter") {
            if let (Some(type_node), Some(name_node)) = (
                ast::find_child(node, "catch_type"),
                node.child_by_field_name("name"),
            ) {
                let described =
                    self.resolver
                        .describe(ast::text(type_node, &unit.source), file_ctx, enclosing);
                locals
                    .entry(ast::text(name_node, &unit.source).to_string())
                    .or_insert(described);
            }
        }
        for node in ast::descendants_of_kind(body, "resource") {
            if let (Some(type_node), Some(name_node)) = (
                node.child_by_field_name("type"),
                node.child_by_field_name("name"),
            ) {
                let described =
                    self.resolver
                        .describe(ast::text(type_node, &unit.source), file_ctx, enclosing);
                locals
                    .entry(ast::text(name_node, &unit.source).to_string())
                    .or_insert(described);
            }
        }

        let fields = self
            .tables
            .fields
            .get(owner)
            .cloned()
            .unwrap_or_default();

        VarScopes {
            locals,
            params,
            fields,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn process_invocation(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        from_signature: &str,
        scopes: &VarScopes,
        invocation: Node,
        graph: &mut GraphDocument,
    ) {
        let Some(name_node) = invocation.child_by_field_name("name") else {
            return;
        };
        let callee_name = ast::text(name_node, &unit.source);
        let arg_nodes = invocation
            .child_by_field_name("arguments")
            .map(ast::named_children)
            .unwrap_or_default();

        let Some((declaring, callee)) = self.resolve_callee(
            unit,
            file_ctx,
            enclosing,
            owner,
            scopes,
            invocation,
            callee_name,
            arg_nodes.len(),
        ) else {
            tracing::trace!(callee = callee_name, file = %unit.file, "call skipped: unresolved");
            return;
        };

        let mut arg_exprs = Vec::with_capacity(arg_nodes.len());
        let mut arg_types = Vec::with_capacity(arg_nodes.len());
        for arg in &arg_nodes {
            arg_exprs.push(ast::text(*arg, &unit.source).to_string());
            arg_types.push(self.argument_type(unit, file_ctx, enclosing, owner, scopes, *arg));
        }

        graph.calls.push(CallEdge {
            project_name: self.project_name.clone(),
            repo_id: self.repo_id.clone(),
            from_owner_fqn: owner.to_string(),
            from_signature: from_signature.to_string(),
            to_owner_fqn: declaring.clone(),
            to_signature: callee.signature(),
            file: unit.file.clone(),
            arg_exprs,
            arg_types,
        });

        if declaring != owner {
            graph.dependencies.push(DependencyEdge {
                project_name: self.project_name.clone(),
                repo_id: self.repo_id.clone(),
                from_fqn: owner.to_string(),
                to_fqn: declaring.clone(),
                to_simple: simple_name(&declaring),
                via: DependencyKind::Call,
                file: unit.file.clone(),
            });
        }
    }

    /// Resolve a call to `(declaring internal type, declaration)`.
    #[allow(clippy::too_many_arguments)]
    fn resolve_callee(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        scopes: &VarScopes,
        invocation: Node,
        name: &str,
        arity: usize,
    ) -> Option<(String, CalleeDecl)> {
        let Some(object) = invocation.child_by_field_name("object") else {
            return self.find_in_enclosing(enclosing, name, arity);
        };
        match object.kind() {
            "this" => self.find_in_enclosing(enclosing, name, arity),
            "super" => {
                let parent = self.tables.supers.get(owner)?;
                self.find_in_hierarchy(parent, name, arity)
            }
            "identifier" => {
                let id = ast::text(object, &unit.source);
                if let Some(described) = scopes.lookup(id) {
                    let target = self.internal_of(described)?;
                    self.find_in_hierarchy(&target, name, arity)
                } else {
                    // static call through a type name
                    match self.resolver.resolve(id, file_ctx, enclosing) {
                        Resolution::Resolved(entry) if entry.internal => {
                            self.find_in_hierarchy(&entry.qualified, name, arity)
                        }
                        _ => None,
                    }
                }
            }
            "field_access" | "scoped_identifier" => {
                let receiver = ast::text(object, &unit.source);
                if let Some(rest) = receiver.strip_prefix("this.") {
                    let described = scopes.fields.get(rest)?;
                    let target = self.internal_of(described)?;
                    self.find_in_hierarchy(&target, name, arity)
                } else {
                    // fully qualified static call
                    match self.resolver.resolve(receiver, file_ctx, enclosing) {
                        Resolution::Resolved(entry) if entry.internal => {
                            self.find_in_hierarchy(&entry.qualified, name, arity)
                        }
                        _ => None,
                    }
                }
            }
            // chained calls, lambdas, array access: not resolved statically
            _ => None,
        }
    }

    /// The internal FQN behind a described reference, if any.
    fn internal_of(&self, described: &TypeDescription) -> Option<String> {
        if !described.resolved {
            return None;
        }
        let base = strip_array(&described.text);
        if self.index.contains(&base) {
            Some(base)
        } else {
            None
        }
    }

    /// Walk owner, then outer types, for a receiverless call.
    fn find_in_enclosing(
        &self,
        enclosing: &[String],
        name: &str,
        arity: usize,
    ) -> Option<(String, CalleeDecl)> {
        enclosing
            .iter()
            .find_map(|fqn| self.find_in_hierarchy(fqn, name, arity))
    }

    /// Find the declaring type of `name/arity` starting at `start` and
    /// following internal `extends` edges. More than one same-arity
    /// overload is ambiguous and skips the call.
    fn find_in_hierarchy(
        &self,
        start: &str,
        name: &str,
        arity: usize,
    ) -> Option<(String, CalleeDecl)> {
        let mut current = Some(start.to_string());
        let mut depth = 0;
        while let Some(fqn) = current.take() {
            if depth >= MAX_HIERARCHY_DEPTH {
                return None;
            }
            depth += 1;
            if let Some(decls) = self.tables.methods.get(&fqn) {
                let matches: Vec<&CalleeDecl> = decls
                    .iter()
                    .filter(|m| !m.is_constructor && m.name == name && arity_matches(m, arity))
                    .collect();
                match matches.len() {
                    1 => return Some((fqn, matches[0].clone())),
                    0 => {}
                    _ => return None,
                }
            }
            current = self.tables.supers.get(&fqn).cloned();
        }
        None
    }

    /// Best-effort type of one call argument; `""` when unresolvable.
    fn argument_type(
        &self,
        unit: &ParsedUnit,
        file_ctx: &FileContext,
        enclosing: &[String],
        owner: &str,
        scopes: &VarScopes,
        arg: Node,
    ) -> String {
        match arg.kind() {
            "string_literal" => "java.lang.String".to_string(),
            "character_literal" => "char".to_string(),
            "true" | "false" => "boolean".to_string(),
            "null_literal" => "null".to_string(),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal" => {
                if ast::text(arg, &unit.source).ends_with(['l', 'L']) {
                    "long".to_string()
                } else {
                    "int".to_string()
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                if ast::text(arg, &unit.source).ends_with(['f', 'F']) {
                    "float".to_string()
                } else {
                    "double".to_string()
                }
            }
            "this" => owner.to_string(),
            "identifier" => scopes
                .lookup(ast::text(arg, &unit.source))
                .filter(|d| d.resolved)
                .map(|d| normalize_type(&d.text))
                .unwrap_or_default(),
            "field_access" => ast::text(arg, &unit.source)
                .strip_prefix("this.")
                .and_then(|rest| scopes.fields.get(rest))
                .filter(|d| d.resolved)
                .map(|d| normalize_type(&d.text))
                .unwrap_or_default(),
            "object_creation_expression" | "cast_expression" => arg
                .child_by_field_name("type")
                .map(|t| {
                    self.resolver
                        .describe(ast::text(t, &unit.source), file_ctx, enclosing)
                })
                .filter(|d| d.resolved)
                .map(|d| normalize_type(&d.text))
                .unwrap_or_default(),
            "method_invocation" => {
                let nested_name = arg
                    .child_by_field_name("name")
                    .map(|n| ast::text(n, &unit.source))
                    .unwrap_or("");
                let nested_arity = arg
                    .child_by_field_name("arguments")
                    .map(|a| a.named_child_count())
                    .unwrap_or(0);
                if nested_name.is_empty() {
                    return String::new();
                }
                self.resolve_callee(
                    unit,
                    file_ctx,
                    enclosing,
                    owner,
                    scopes,
                    arg,
                    nested_name,
                    nested_arity,
                )
                .map(|(_, decl)| normalize_type(&decl.return_type))
                .unwrap_or_default()
            }
            _ => String::new(),
        }
    }
}

/// Exact arity, or a trailing array parameter absorbing varargs.
fn arity_matches(decl: &CalleeDecl, arity: usize) -> bool {
    let n = decl.param_types.len();
    if arity == n {
        return true;
    }
    n > 0 && decl.param_types[n - 1].ends_with("[]") && arity >= n - 1
}
