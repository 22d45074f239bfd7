use super::*;

fn names(nodes: &[SyntaxNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

fn span(node: &SyntaxNode) -> (usize, usize) {
    (node.start_line, node.end_line)
}

// =============================================================================
// Python
// =============================================================================

#[test]
fn python_builds_class_tree() {
    let content = r#"import os


class Foo:
    """Docs."""

    def method(self):
        x = 1
        return x

    async def other(self):
        pass


def top_level(a,
              b):
    return a + b
"#;
    let tree = TreeSitterParser::PYTHON.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Foo", "top_level"]);
    let foo = &tree.nodes[0];
    assert_eq!(foo.kind, NodeKind::Class);
    assert_eq!(span(foo), (4, 12));
    assert_eq!(names(&foo.children), vec!["method", "other"]);
    assert_eq!(span(&foo.children[0]), (7, 9));
    assert_eq!(span(&foo.children[1]), (11, 12));

    let top = &tree.nodes[1];
    assert_eq!(top.kind, NodeKind::Function);
    assert_eq!(span(top), (15, 17));
}

#[test]
fn python_decorated_function_starts_at_def() {
    let content = "\n@decorator\ndef decorated():\n    pass\n\n@functools.lru_cache(maxsize=128)\ndef cached(x):\n    return x\n";
    let tree = TreeSitterParser::PYTHON.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["decorated", "cached"]);
    assert_eq!(tree.nodes[0].start_line, 3);
}

#[test]
fn python_nested_function_is_a_child() {
    let content = "def outer():\n    def inner():\n        return 1\n    return inner\n";
    let tree = TreeSitterParser::PYTHON.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["outer"]);
    assert_eq!(names(&tree.nodes[0].children), vec!["inner"]);
    assert_eq!(span(&tree.nodes[0].children[0]), (2, 3));
}

#[test]
fn python_ignores_definitions_inside_strings() {
    let content = "TEXT = \"\"\"\ndef fake():\n    pass\n\"\"\"\n\n# def commented():\n\ndef real():\n    return TEXT\n";
    let tree = TreeSitterParser::PYTHON.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["real"]);
}

#[test]
fn python_with_byte_order_mark_keeps_blocks() {
    let tree = TreeSitterParser::PYTHON
        .parse("\u{feff}def f():\n    return 1\n")
        .unwrap();

    assert_eq!(names(&tree.nodes), vec!["f"]);
    assert_eq!(span(&tree.nodes[0]), (1, 2));
}

#[test]
fn python_syntax_error_reports_line() {
    let err = TreeSitterParser::PYTHON
        .parse("def ok():\n    return 1\n\ndef broken(:\n    pass\n")
        .unwrap_err();
    assert!((4..=5).contains(&err.line), "line {}", err.line);
}

#[test]
fn empty_source_parses_to_empty_tree() {
    let tree = TreeSitterParser::PYTHON.parse("").unwrap();
    assert!(tree.is_empty());
}

// =============================================================================
// Rust
// =============================================================================

#[test]
fn rust_nests_methods_under_impl() {
    let content = r#"pub struct Foo {
    a: u8,
}

impl Foo {
    pub fn new() -> Self {
        Self { a: 0 }
    }

    fn helper(&self) -> [u8; 2] {
        [self.a, 1]
    }
}

fn main() {
    let s = "}";
}
"#;
    let tree = TreeSitterParser::RUST.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Foo", "Foo", "main"]);
    assert_eq!(tree.nodes[0].kind, NodeKind::Class);
    assert_eq!(span(&tree.nodes[0]), (1, 3));

    let imp = &tree.nodes[1];
    assert_eq!(span(imp), (5, 13));
    assert_eq!(names(&imp.children), vec!["new", "helper"]);
    assert_eq!(span(&imp.children[0]), (6, 8));
    assert_eq!(span(&imp.children[1]), (10, 12));

    assert_eq!(span(&tree.nodes[2]), (15, 17));
}

#[test]
fn rust_skips_bodyless_declarations() {
    let content = r"trait Shape {
    fn area(&self) -> f64;
    fn name(&self) -> String {
        String::new()
    }
}

struct Marker;
mod external;
";
    let tree = TreeSitterParser::RUST.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Shape"]);
    assert_eq!(names(&tree.nodes[0].children), vec!["name"]);
}

#[test]
fn rust_generic_impl_is_named_after_type() {
    let content = "impl<T: Clone> Display for Wrapper<T> {\n    fn fmt(&self) {}\n}\n";
    let tree = TreeSitterParser::RUST.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Wrapper"]);
    assert_eq!(names(&tree.nodes[0].children), vec!["fmt"]);
}

#[test]
fn rust_rejects_unbalanced_braces() {
    assert!(
        TreeSitterParser::RUST
            .parse("fn main() {\n    let x = 1;\n")
            .is_err()
    );
}

// =============================================================================
// Go
// =============================================================================

#[test]
fn go_finds_types_and_methods() {
    let content = "package main

type Server struct {
\taddr string
}

type ID int

func (s *Server) Start() error {
\treturn nil
}

func main() {
}
";
    let tree = TreeSitterParser::GO.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Server", "Start", "main"]);
    assert_eq!(tree.nodes[0].kind, NodeKind::Class);
    assert_eq!(span(&tree.nodes[0]), (3, 5));
    assert_eq!(tree.nodes[1].kind, NodeKind::Function);
    assert_eq!(span(&tree.nodes[1]), (9, 11));
}

// =============================================================================
// TypeScript / JavaScript
// =============================================================================

#[test]
fn typescript_finds_classes_methods_and_arrow_functions() {
    let content = "interface Shape {
  area(): number;
}

export class Circle implements Shape {
  constructor(private r: number) {}

  area(): number {
    return Math.PI * this.r * this.r;
  }
}

export const double = (x: number): number => {
  return x * 2;
};

function helper<T>(value: T): T {
  return value;
}
";
    let tree = TreeSitterParser::TYPESCRIPT.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["Shape", "Circle", "double", "helper"]);
    let circle = &tree.nodes[1];
    assert_eq!(circle.kind, NodeKind::Class);
    assert_eq!(span(circle), (5, 11));
    assert_eq!(names(&circle.children), vec!["constructor", "area"]);
    assert_eq!(tree.nodes[2].kind, NodeKind::Function);
    assert_eq!(span(&tree.nodes[2]), (13, 15));
}

#[test]
fn javascript_accepts_jsx() {
    let content = "function App() {\n  return <div className=\"app\">{title}</div>;\n}\n";
    let tree = TreeSitterParser::JAVASCRIPT.parse(content).unwrap();

    assert_eq!(names(&tree.nodes), vec!["App"]);
    assert_eq!(span(&tree.nodes[0]), (1, 3));
}
