//! Graph module - records, relationship extraction, and the output
//! document.
//!
//! Key components:
//! - typed entity/edge records with the downstream wire field names
//! - `GraphBuilder` - members, inheritance, and declaration-surface deps
//! - `CallExtractor` - best-effort resolved call edges
//! - composite-key deduplication, first occurrence wins

mod builder;
mod calls;
mod dedup;
mod types;

pub use builder::{CalleeDecl, DeclTables, GraphBuilder};
pub use calls::CallExtractor;
pub use dedup::dedupe_by_key;
pub use types::{
    CallEdge, DependencyEdge, DependencyKind, ExtendsEdge, FieldRecord, GraphDocument,
    ImplementsEdge, MethodRecord, ParamRecord, TypeRecord,
};
