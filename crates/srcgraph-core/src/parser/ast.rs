//! AST helpers over tree-sitter Java syntax trees.
//!
//! The extraction passes work directly on syntax nodes; everything here
//! is a thin, allocation-light accessor layer. Type references are
//! handed around as source text and canonicalized by the normalizer.

use tree_sitter::Node;

/// Node kinds that declare a type (indexed in the first pass).
pub const TYPE_DECL_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Node kinds whose members are extracted in the second pass.
/// Annotation declarations occupy FQNs but contribute no members.
pub const CLASS_LIKE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

/// Source text of a node.
pub fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// All children of a node, unnamed tokens included.
pub fn children(node: Node) -> Vec<Node> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

/// Named children of a node.
pub fn named_children(node: Node) -> Vec<Node> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect()
}

/// First child of the given kind.
pub fn find_child<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    children(node).into_iter().find(|c| c.kind() == kind)
}

/// Direct children of the given kind, in order.
pub fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    children(node)
        .into_iter()
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Every descendant of the given kind, preorder.
pub fn descendants_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect_descendants(node, kind, &mut out);
    out
}

fn collect_descendants<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    for child in children(node) {
        if child.kind() == kind {
            out.push(child);
        }
        collect_descendants(child, kind, out);
    }
}

/// 1-based line of the first character of a node.
pub fn begin_line(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-based line of the last character of a node.
pub fn end_line(node: Node) -> u32 {
    node.end_position().row as u32 + 1
}

/// The declared package name, or `""` for the default package.
pub fn package_name(root: Node, source: &str) -> String {
    for child in children(root) {
        if child.kind() == "package_declaration" {
            for part in children(child) {
                if matches!(part.kind(), "identifier" | "scoped_identifier") {
                    return text(part, source).to_string();
                }
            }
        }
    }
    String::new()
}

/// An import statement relevant to type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// `import a.b.C;`
    Single(String),
    /// `import a.b.*;`
    Wildcard(String),
}

/// Type imports of a compilation unit, in source order.
/// Static imports bring members, not types, and are skipped.
pub fn imports(root: Node, source: &str) -> Vec<Import> {
    let mut out = Vec::new();
    for child in children(root) {
        if child.kind() != "import_declaration" {
            continue;
        }
        let parts = children(child);
        if parts.iter().any(|c| c.kind() == "static") {
            continue;
        }
        let Some(path_node) = parts
            .iter()
            .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
        else {
            continue;
        };
        let path = text(*path_node, source).to_string();
        if parts.iter().any(|c| c.kind() == "asterisk") {
            out.push(Import::Wildcard(path));
        } else {
            out.push(Import::Single(path));
        }
    }
    out
}

/// A type declaration found in a compilation unit.
pub struct TypeDecl<'t> {
    pub node: Node<'t>,
    /// Canonical FQN: package joined with `.`, nesting with `$`.
    pub fqn: String,
    /// Simple name.
    pub name: String,
}

/// Collect every type declaration in the tree, nested ones included,
/// in source order.
pub fn type_declarations<'t>(root: Node<'t>, source: &str) -> Vec<TypeDecl<'t>> {
    let package = package_name(root, source);
    let mut out = Vec::new();
    let mut nesting = Vec::new();
    collect_types(root, source, &package, &mut nesting, &mut out);
    out
}

fn collect_types<'t>(
    node: Node<'t>,
    source: &str,
    package: &str,
    nesting: &mut Vec<String>,
    out: &mut Vec<TypeDecl<'t>>,
) {
    for child in children(node) {
        if TYPE_DECL_KINDS.contains(&child.kind()) {
            if let Some(name_node) = child.child_by_field_name("name") {
                let name = text(name_node, source).to_string();
                nesting.push(name.clone());
                let local = nesting.join("$");
                let fqn = if package.is_empty() {
                    local
                } else {
                    format!("{package}.{local}")
                };
                out.push(TypeDecl {
                    node: child,
                    fqn,
                    name,
                });
                collect_types(child, source, package, nesting, out);
                nesting.pop();
                continue;
            }
        }
        collect_types(child, source, package, nesting, out);
    }
}

/// The `extends` clause type of a class declaration, if any.
pub fn class_superclass(decl: Node) -> Option<Node> {
    let clause = find_child(decl, "superclass")?;
    named_children(clause).into_iter().next()
}

/// Types of a class's `implements` clause.
pub fn super_interface_types(decl: Node) -> Vec<Node> {
    clause_types(decl, "super_interfaces")
}

/// Types of an interface's `extends` clause.
pub fn extends_interface_types(decl: Node) -> Vec<Node> {
    clause_types(decl, "extends_interfaces")
}

fn clause_types<'t>(decl: Node<'t>, clause_kind: &str) -> Vec<Node<'t>> {
    let Some(clause) = find_child(decl, clause_kind) else {
        return Vec::new();
    };
    match find_child(clause, "type_list") {
        Some(list) => named_children(list),
        None => Vec::new(),
    }
}

/// The nodes that directly contain a declaration's members.
/// Enum members live behind the `;` inside `enum_body_declarations`.
pub fn member_scopes(decl: Node) -> Vec<Node> {
    let Some(body) = decl.child_by_field_name("body") else {
        return Vec::new();
    };
    if body.kind() == "enum_body" {
        children_of_kind(body, "enum_body_declarations")
    } else {
        vec![body]
    }
}

/// Field declarations directly inside a member scope.
/// Interface constants parse as `constant_declaration`.
pub fn field_declarations(scope: Node) -> Vec<Node> {
    children(scope)
        .into_iter()
        .filter(|c| matches!(c.kind(), "field_declaration" | "constant_declaration"))
        .collect()
}

/// Method and constructor declarations directly inside a member scope.
pub fn callable_declarations(scope: Node) -> Vec<Node> {
    children(scope)
        .into_iter()
        .filter(|c| matches!(c.kind(), "method_declaration" | "constructor_declaration"))
        .collect()
}

/// Variable declarators of a field declaration.
pub fn declarators(field: Node) -> Vec<Node> {
    children_of_kind(field, "variable_declarator")
}

/// `(name, declared-type-text)` of each formal parameter, in order.
/// Varargs surface as arrays (`T...` records as `T[]`).
pub fn formal_parameters(callable: Node, source: &str) -> Vec<(String, String)> {
    let Some(list) = callable.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for param in named_children(list) {
        match param.kind() {
            "formal_parameter" => {
                let name = param
                    .child_by_field_name("name")
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                let mut ty = param
                    .child_by_field_name("type")
                    .map(|t| text(t, source).to_string())
                    .unwrap_or_default();
                if let Some(dims) = param.child_by_field_name("dimensions") {
                    ty.push_str(text(dims, source).trim());
                }
                if !name.is_empty() && !ty.is_empty() {
                    out.push((name, ty));
                }
            }
            "spread_parameter" => {
                let name = find_child(param, "variable_declarator")
                    .and_then(|d| d.child_by_field_name("name"))
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                let ty = children(param)
                    .into_iter()
                    .find(|c| {
                        c.is_named()
                            && !matches!(c.kind(), "modifiers" | "variable_declarator")
                    })
                    .map(|t| format!("{}[]", text(t, source)))
                    .unwrap_or_default();
                if !name.is_empty() && !ty.is_empty() {
                    out.push((name, ty));
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use tree_sitter::Tree;

    fn parse(source: &str) -> Tree {
        let mut parser = JavaParser::new().unwrap();
        parser.parse(source).expect("test source must parse")
    }

    #[test]
    fn test_package_name() {
        let tree = parse("package com.example.app;\nclass A {}");
        assert_eq!(package_name(tree.root_node(), "package com.example.app;\nclass A {}"), "com.example.app");
    }

    #[test]
    fn test_package_name_default_package() {
        let src = "class A {}";
        let tree = parse(src);
        assert_eq!(package_name(tree.root_node(), src), "");
    }

    #[test]
    fn test_imports() {
        let src = "import java.util.List;\nimport java.io.*;\nimport static java.lang.Math.max;\nclass A {}";
        let tree = parse(src);
        let found = imports(tree.root_node(), src);
        assert_eq!(
            found,
            vec![
                Import::Single("java.util.List".to_string()),
                Import::Wildcard("java.io".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_declarations_nested() {
        let src = "package p;\nclass Outer { class Inner {} interface Contract {} }\nenum Mode {}";
        let tree = parse(src);
        let decls = type_declarations(tree.root_node(), src);
        let fqns: Vec<&str> = decls.iter().map(|d| d.fqn.as_str()).collect();
        assert_eq!(fqns, vec!["p.Outer", "p.Outer$Inner", "p.Outer$Contract", "p.Mode"]);
    }

    #[test]
    fn test_supertype_clauses() {
        let src = "class Child extends Parent implements A, B {}";
        let tree = parse(src);
        let decls = type_declarations(tree.root_node(), src);
        let node = decls[0].node;
        assert_eq!(text(class_superclass(node).unwrap(), src), "Parent");
        let ifaces: Vec<&str> = super_interface_types(node)
            .into_iter()
            .map(|n| text(n, src))
            .collect();
        assert_eq!(ifaces, vec!["A", "B"]);
    }

    #[test]
    fn test_interface_extends_clause() {
        let src = "interface Child extends ParentA, ParentB {}";
        let tree = parse(src);
        let decls = type_declarations(tree.root_node(), src);
        let parents: Vec<&str> = extends_interface_types(decls[0].node)
            .into_iter()
            .map(|n| text(n, src))
            .collect();
        assert_eq!(parents, vec!["ParentA", "ParentB"]);
    }

    #[test]
    fn test_formal_parameters() {
        let src = "class A { void m(int count, String name, long... rest) {} }";
        let tree = parse(src);
        let decls = type_declarations(tree.root_node(), src);
        let callable = callable_declarations(member_scopes(decls[0].node)[0])[0];
        let params = formal_parameters(callable, src);
        assert_eq!(
            params,
            vec![
                ("count".to_string(), "int".to_string()),
                ("name".to_string(), "String".to_string()),
                ("rest".to_string(), "long[]".to_string()),
            ]
        );
    }

    #[test]
    fn test_enum_member_scope() {
        let src = "enum Mode { ON, OFF; private int weight; int weight() { return weight; } }";
        let tree = parse(src);
        let decls = type_declarations(tree.root_node(), src);
        let scopes = member_scopes(decls[0].node);
        assert_eq!(scopes.len(), 1);
        assert_eq!(field_declarations(scopes[0]).len(), 1);
        assert_eq!(callable_declarations(scopes[0]).len(), 1);
    }
}
