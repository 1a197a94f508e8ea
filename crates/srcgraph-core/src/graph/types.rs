//! Graph records and the serialized output document.
//!
//! Field declaration order is the wire order; downstream consumers key
//! on field names. The `extends`/`implements` collections expose their
//! resolved targets as `parent_ref`/`iface_ref` for loader
//! compatibility.

use serde::Serialize;

/// A declared internal type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeRecord {
    pub project_name: String,
    pub repo_id: String,
    pub fqn: String,
    pub name: String,
    pub file: String,
    pub file_hash: String,
}

/// A declared field variable.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord {
    pub project_name: String,
    pub repo_id: String,
    pub owner_fqn: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A method or constructor parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A declared method or constructor.
///
/// `signature` is the identity key (`name(paramType,paramType,...)`);
/// overloads with identical erased parameter types collide, which is an
/// accepted ambiguity. Constructors record `returnType` as `"void"`.
#[derive(Debug, Clone, Serialize)]
pub struct MethodRecord {
    pub project_name: String,
    pub repo_id: String,
    pub owner_fqn: String,
    pub name: String,
    pub signature: String,
    #[serde(rename = "returnType")]
    pub return_type: String,
    pub params: Vec<ParamRecord>,
    pub file: String,
    #[serde(rename = "beginLine", skip_serializing_if = "Option::is_none")]
    pub begin_line: Option<u32>,
    #[serde(rename = "endLine", skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    pub body_hash: String,
}

/// Syntactic origin of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Field,
    Param,
    Return,
    Call,
}

/// "Type A's declaration surface references internal type B."
#[derive(Debug, Clone, Serialize)]
pub struct DependencyEdge {
    pub project_name: String,
    pub repo_id: String,
    pub from_fqn: String,
    pub to_fqn: String,
    pub to_simple: String,
    pub via: DependencyKind,
    pub file: String,
}

/// `child extends parent`, both internal.
#[derive(Debug, Clone, Serialize)]
pub struct ExtendsEdge {
    pub project_name: String,
    pub repo_id: String,
    pub child_fqn: String,
    #[serde(rename = "parent_ref")]
    pub parent_fqn: String,
}

/// `child implements iface`, both internal.
#[derive(Debug, Clone, Serialize)]
pub struct ImplementsEdge {
    pub project_name: String,
    pub repo_id: String,
    pub child_fqn: String,
    #[serde(rename = "iface_ref")]
    pub iface_fqn: String,
}

/// A resolved call from one internal callable to another.
#[derive(Debug, Clone, Serialize)]
pub struct CallEdge {
    pub project_name: String,
    pub repo_id: String,
    pub from_owner_fqn: String,
    pub from_signature: String,
    pub to_owner_fqn: String,
    pub to_signature: String,
    pub file: String,
    pub arg_exprs: Vec<String>,
    pub arg_types: Vec<String>,
}

/// The assembled output document - one extraction run.
///
/// Append-only during the passes; deduplicated once at the end.
#[derive(Debug, Clone, Serialize)]
pub struct GraphDocument {
    pub project_name: String,
    pub repo_id: String,
    pub types: Vec<TypeRecord>,
    pub methods: Vec<MethodRecord>,
    pub fields: Vec<FieldRecord>,
    pub dependencies: Vec<DependencyEdge>,
    pub extends: Vec<ExtendsEdge>,
    pub implements: Vec<ImplementsEdge>,
    pub calls: Vec<CallEdge>,
}

impl GraphDocument {
    pub fn new(project_name: impl Into<String>, repo_id: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            repo_id: repo_id.into(),
            types: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            dependencies: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
