//! End-to-end pipeline tests over a temporary Java source tree.

use std::fs;
use std::path::Path;

use srcgraph_core::pipeline::{extract, ExtractOptions};
use srcgraph_core::{DependencyKind, GraphDocument};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small multi-file project exercising every edge kind.
fn sample_project(root: &Path) {
    write(
        root,
        "src/main/java/com/shop/Parent.java",
        "package com.shop;\n\npublic class Parent {\n    public void greet() {\n    }\n}\n",
    );
    write(
        root,
        "src/main/java/com/shop/Iface.java",
        "package com.shop;\n\npublic interface Iface {\n    void handle();\n}\n",
    );
    write(
        root,
        "src/main/java/com/shop/Child.java",
        "package com.shop;\n\nimport java.util.List;\n\npublic class Child extends Parent implements Iface {\n    private List<Order> orders;\n    private String label;\n\n    public Child(String label) {\n        this.label = label;\n    }\n\n    public void handle() {\n        greet();\n    }\n\n    public Order first(int index) {\n        return orders.get(index);\n    }\n}\n",
    );
    write(
        root,
        "src/main/java/com/shop/Order.java",
        "package com.shop;\n\npublic class Order {\n    private long id;\n\n    public long total() {\n        return id;\n    }\n}\n",
    );
    write(
        root,
        "src/main/java/com/shop/Report.java",
        "package com.shop;\n\npublic class Report {\n    private Order order;\n\n    public long summarize() {\n        return order.total();\n    }\n}\n",
    );
    // unparsable file: must be skipped without failing the run
    write(
        root,
        "src/main/java/com/shop/Broken.java",
        "package com.shop;\n\npublic class Broken {\n    this is not java at all\n",
    );
}

fn extract_sample() -> GraphDocument {
    let dir = tempfile::tempdir().unwrap();
    sample_project(dir.path());
    extract(
        dir.path(),
        &ExtractOptions {
            project_name: Some("shop".to_string()),
            repo_id: Some("r1".to_string()),
        },
    )
    .unwrap()
}

#[test]
fn every_edge_endpoint_is_a_known_type() {
    let graph = extract_sample();
    let fqns: Vec<&str> = graph.types.iter().map(|t| t.fqn.as_str()).collect();

    for dep in &graph.dependencies {
        assert!(fqns.contains(&dep.from_fqn.as_str()), "{}", dep.from_fqn);
        assert!(fqns.contains(&dep.to_fqn.as_str()), "{}", dep.to_fqn);
    }
    for ext in &graph.extends {
        assert!(fqns.contains(&ext.child_fqn.as_str()));
        assert!(fqns.contains(&ext.parent_fqn.as_str()));
    }
    for imp in &graph.implements {
        assert!(fqns.contains(&imp.child_fqn.as_str()));
        assert!(fqns.contains(&imp.iface_fqn.as_str()));
    }
    for call in &graph.calls {
        assert!(fqns.contains(&call.from_owner_fqn.as_str()));
        assert!(fqns.contains(&call.to_owner_fqn.as_str()));
    }
}

#[test]
fn no_self_dependency_edges() {
    let graph = extract_sample();
    assert!(graph.dependencies.iter().all(|d| d.from_fqn != d.to_fqn));
}

#[test]
fn inheritance_edges_are_internal_only() {
    let graph = extract_sample();
    assert_eq!(graph.extends.len(), 1);
    assert_eq!(graph.extends[0].child_fqn, "com.shop.Child");
    assert_eq!(graph.extends[0].parent_fqn, "com.shop.Parent");
    assert_eq!(graph.implements.len(), 1);
    assert_eq!(graph.implements[0].iface_fqn, "com.shop.Iface");
}

#[test]
fn generic_container_field_produces_element_dependency() {
    let graph = extract_sample();
    let orders_field = graph
        .fields
        .iter()
        .find(|f| f.name == "orders")
        .expect("orders field");
    assert_eq!(orders_field.type_name, "com.shop.Order");
    assert!(graph.dependencies.iter().any(|d| {
        d.from_fqn == "com.shop.Child"
            && d.to_fqn == "com.shop.Order"
            && d.via == DependencyKind::Field
    }));
    // the String-typed field resolves externally: no edge
    assert!(!graph
        .dependencies
        .iter()
        .any(|d| d.to_simple == "String"));
}

#[test]
fn call_edge_and_call_dependency() {
    let graph = extract_sample();
    let call = graph
        .calls
        .iter()
        .find(|c| c.from_owner_fqn == "com.shop.Report")
        .expect("Report.summarize calls Order.total");
    assert_eq!(call.from_signature, "summarize()");
    assert_eq!(call.to_owner_fqn, "com.shop.Order");
    assert_eq!(call.to_signature, "total()");
    assert!(graph.calls.iter().all(|c| {
        c.arg_exprs.len() == c.arg_types.len()
    }));
    assert!(graph.dependencies.iter().any(|d| {
        d.from_fqn == "com.shop.Report"
            && d.to_fqn == "com.shop.Order"
            && d.via == DependencyKind::Call
    }));
}

#[test]
fn inherited_call_resolves_to_declaring_type() {
    let graph = extract_sample();
    let call = graph
        .calls
        .iter()
        .find(|c| c.from_owner_fqn == "com.shop.Child" && c.to_signature == "greet()")
        .expect("Child.handle calls inherited greet");
    assert_eq!(call.to_owner_fqn, "com.shop.Parent");
}

#[test]
fn unparsable_file_is_absent_but_run_succeeds() {
    let graph = extract_sample();
    assert!(!graph.types.iter().any(|t| t.fqn.contains("Broken")));
    assert!(!graph.methods.iter().any(|m| m.owner_fqn.contains("Broken")));
    assert!(!graph.fields.iter().any(|f| f.owner_fqn.contains("Broken")));
    // the rest of the project is fully covered
    assert_eq!(graph.types.len(), 5);
}

#[test]
fn file_hashes_are_stable_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    sample_project(dir.path());
    let options = ExtractOptions::default();
    let first = extract(dir.path(), &options).unwrap();
    let second = extract(dir.path(), &options).unwrap();

    let hashes = |g: &GraphDocument| -> Vec<(String, String)> {
        g.types
            .iter()
            .map(|t| (t.fqn.clone(), t.file_hash.clone()))
            .collect()
    };
    assert_eq!(hashes(&first), hashes(&second));

    let body_hashes = |g: &GraphDocument| -> Vec<(String, String)> {
        g.methods
            .iter()
            .map(|m| (m.signature.clone(), m.body_hash.clone()))
            .collect()
    };
    assert_eq!(body_hashes(&first), body_hashes(&second));
}

#[test]
fn editing_a_body_changes_only_its_hash() {
    let dir = tempfile::tempdir().unwrap();
    sample_project(dir.path());
    let options = ExtractOptions::default();
    let before = extract(dir.path(), &options).unwrap();

    write(
        dir.path(),
        "src/main/java/com/shop/Order.java",
        "package com.shop;\n\npublic class Order {\n    private long id;\n\n    public long total() {\n        return id + 1;\n    }\n}\n",
    );
    let after = extract(dir.path(), &options).unwrap();

    let hash_of = |g: &GraphDocument, owner: &str, sig: &str| -> String {
        g.methods
            .iter()
            .find(|m| m.owner_fqn == owner && m.signature == sig)
            .unwrap()
            .body_hash
            .clone()
    };
    assert_ne!(
        hash_of(&before, "com.shop.Order", "total()"),
        hash_of(&after, "com.shop.Order", "total()")
    );
    assert_eq!(
        hash_of(&before, "com.shop.Report", "summarize()"),
        hash_of(&after, "com.shop.Report", "summarize()")
    );
}

#[test]
fn dedupe_is_idempotent_on_the_final_document() {
    let mut graph = extract_sample();
    let deps = graph.dependencies.len();
    let calls = graph.calls.len();
    graph.dedupe_edges();
    assert_eq!(graph.dependencies.len(), deps);
    assert_eq!(graph.calls.len(), calls);
}

#[test]
fn document_serializes_with_wire_field_names() {
    let graph = extract_sample();
    let json: serde_json::Value =
        serde_json::from_str(&graph.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["project_name"], "shop");
    assert_eq!(json["repo_id"], "r1");
    assert!(json["extends"][0].get("parent_ref").is_some());
    assert!(json["extends"][0].get("parent_fqn").is_none());
    assert!(json["implements"][0].get("iface_ref").is_some());
    let method = &json["methods"][0];
    assert!(method.get("returnType").is_some());
    assert!(method.get("body_hash").is_some());
    // full argument lists always present, even when empty
    for call in json["calls"].as_array().unwrap() {
        assert!(call.get("arg_exprs").unwrap().is_array());
        assert!(call.get("arg_types").unwrap().is_array());
    }
}
