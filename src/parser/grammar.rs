use tree_sitter::{Language, Node, Parser, Tree};

use super::{NodeKind, ParseError, SourceParser, SyntaxNode, SyntaxTree};

/// A grammar plus the table deciding which of its nodes become regions.
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterParser {
    name: &'static str,
    grammar: Grammar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Rust,
    Python,
    Go,
    TypeScript,
    Tsx,
}

impl Grammar {
    fn language(self) -> Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Region kind for a syntax node, or `None` when it is not a region.
    fn region_kind(self, node: &Node<'_>) -> Option<NodeKind> {
        match (self, node.kind()) {
            (Self::Rust, "function_item")
            | (Self::Python, "function_definition")
            | (Self::Go, "function_declaration" | "method_declaration")
            | (
                Self::TypeScript | Self::Tsx,
                "function_declaration" | "generator_function_declaration" | "method_definition",
            ) => Some(NodeKind::Function),
            (
                Self::Rust,
                "struct_item" | "enum_item" | "union_item" | "trait_item" | "impl_item"
                | "mod_item",
            )
            | (Self::Python, "class_definition")
            | (
                Self::TypeScript | Self::Tsx,
                "class_declaration" | "abstract_class_declaration" | "interface_declaration",
            ) => Some(NodeKind::Class),
            (Self::Go, "type_spec") => node
                .child_by_field_name("type")
                .filter(|ty| matches!(ty.kind(), "struct_type" | "interface_type"))
                .map(|_| NodeKind::Class),
            (Self::TypeScript | Self::Tsx, "variable_declarator") => node
                .child_by_field_name("value")
                .filter(|value| matches!(value.kind(), "arrow_function" | "function_expression"))
                .map(|_| NodeKind::Function),
            _ => None,
        }
    }

    /// Whether a Rust item is only a declaration (`struct Marker;`, `mod foo;`).
    fn is_bodyless(self, node: &Node<'_>) -> bool {
        self == Self::Rust
            && matches!(node.kind(), "struct_item" | "union_item" | "mod_item")
            && node.child_by_field_name("body").is_none()
    }

    fn region_name<'s>(self, node: &Node<'_>, source: &'s str) -> Option<&'s str> {
        let field = if self == Self::Rust && node.kind() == "impl_item" {
            "type"
        } else {
            "name"
        };
        let text = node
            .child_by_field_name(field)?
            .utf8_text(source.as_bytes())
            .ok()?;
        // `impl<T> Foo<T>` is named after `Foo`.
        text.split('<').next().map(str::trim)
    }
}

impl TreeSitterParser {
    pub const RUST: Self = Self::new("rust", Grammar::Rust);
    pub const PYTHON: Self = Self::new("python", Grammar::Python);
    pub const GO: Self = Self::new("go", Grammar::Go);
    pub const TYPESCRIPT: Self = Self::new("typescript", Grammar::TypeScript);
    /// JavaScript and JSX parse with the TSX grammar, which accepts both.
    pub const JAVASCRIPT: Self = Self::new("javascript", Grammar::Tsx);
    pub const TSX: Self = Self::new("tsx", Grammar::Tsx);

    const fn new(name: &'static str, grammar: Grammar) -> Self {
        Self { name, grammar }
    }

    fn syntax_tree(&self, content: &str) -> Result<Tree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.grammar.language())
            .map_err(|e| ParseError::new(0, format!("grammar unavailable: {e}")))?;
        parser
            .parse(content, None)
            .ok_or_else(|| ParseError::new(0, "parser produced no tree"))
    }

    fn collect(&self, node: Node<'_>, source: &str, out: &mut Vec<SyntaxNode>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            let region = self
                .grammar
                .region_kind(&child)
                .filter(|_| !self.grammar.is_bodyless(&child))
                .and_then(|kind| {
                    let name = self.grammar.region_name(&child, source)?;
                    let (start, end) = line_span(&child);
                    Some(SyntaxNode::new(kind, name, start, end))
                });
            match region {
                Some(mut region) => {
                    self.collect(child, source, &mut region.children);
                    out.push(region);
                }
                None => self.collect(child, source, out),
            }
        }
    }
}

impl SourceParser for TreeSitterParser {
    fn language(&self) -> &'static str {
        self.name
    }

    fn parse(&self, content: &str) -> Result<SyntaxTree, ParseError> {
        // A leading BOM is not part of any grammar; removing it keeps rows intact.
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let tree = self.syntax_tree(content)?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_error(root).map_or(1, |n| n.start_position().row + 1);
            return Err(ParseError::new(line, "syntax error"));
        }

        let mut nodes = Vec::new();
        self.collect(root, content, &mut nodes);
        Ok(SyntaxTree { nodes })
    }
}

/// 1-indexed inclusive line span of a node.
fn line_span(node: &Node<'_>) -> (usize, usize) {
    let start = node.start_position();
    let end = node.end_position();
    // A node ending at column 0 stops before that row's first character.
    let end_row = if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    };
    (start.row + 1, end_row + 1)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod tests;
