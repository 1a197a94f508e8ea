//! Parser module - native tree-sitter Java parsing and AST access.

pub mod ast;
mod java;

pub use java::{JavaParser, ParsedUnit};
