//! Java parsing using native tree-sitter.

use tree_sitter::{Parser, Tree};

use crate::error::Error;

/// Wrapper around a tree-sitter parser configured for Java.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self, Error> {
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| Error::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse one source file.
    ///
    /// Returns `None` when no tree can be produced or the tree contains
    /// syntax errors; callers skip the file and continue the run.
    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        let tree = self.parser.parse(source, None)?;
        if tree.root_node().has_error() {
            return None;
        }
        Some(tree)
    }
}

/// A successfully parsed source file, retained across both passes.
pub struct ParsedUnit {
    /// Root-relative path, `/`-separated.
    pub file: String,
    /// Raw source text.
    pub source: String,
    /// The syntax tree.
    pub tree: Tree,
}

impl ParsedUnit {
    /// Parse `source` into a unit; `None` when the file is unparsable.
    pub fn parse(
        parser: &mut JavaParser,
        file: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<Self> {
        let source = source.into();
        let tree = parser.parse(&source)?;
        Some(Self {
            file: file.into(),
            source,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_source() {
        let mut parser = JavaParser::new().unwrap();
        let tree = parser.parse("package com.x; public class A { }");
        assert!(tree.is_some());
    }

    #[test]
    fn test_parse_rejects_broken_source() {
        let mut parser = JavaParser::new().unwrap();
        let tree = parser.parse("public class A { this is not java");
        assert!(tree.is_none());
    }

    #[test]
    fn test_parsed_unit_carries_source() {
        let mut parser = JavaParser::new().unwrap();
        let unit = ParsedUnit::parse(&mut parser, "A.java", "class A {}").unwrap();
        assert_eq!(unit.file, "A.java");
        assert_eq!(unit.source, "class A {}");
    }
}
