//! Tagged node kinds of the Go syntax tree.

use tree_sitter::Node;

/// Kind of a named node in a Go syntax tree.
///
/// Rules subscribe to these tags rather than to grammar strings, so the
/// walker computes a node's tag once and dispatches with a table lookup.
/// Grammar kinds without a dedicated variant map to [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// The whole file.
    SourceFile,
    /// `package main`
    PackageClause,
    /// `import "fmt"` or an import block.
    ImportDeclaration,
    /// `func Name(...) ...`
    FunctionDeclaration,
    /// `func (r Recv) Name(...) ...`
    MethodDeclaration,
    /// `func(...) { ... }` used as an expression.
    FuncLiteral,
    /// `type T ...`
    TypeDeclaration,
    /// `var x = ...`
    VarDeclaration,
    /// `const x = ...`
    ConstDeclaration,
    /// `(a int, b string)` in a signature.
    ParameterList,
    /// One entry of a parameter or result list.
    ParameterDeclaration,
    /// `{ ... }`
    Block,
    /// `return ...`
    ReturnStatement,
    /// `if ... { }`
    IfStatement,
    /// `for ... { }`
    ForStatement,
    /// `defer f()`
    DeferStatement,
    /// `go f()`
    GoStatement,
    /// `x := ...`
    ShortVarDeclaration,
    /// `x = ...`
    AssignmentStatement,
    /// `f(...)`
    CallExpression,
    /// `a.b`
    SelectorExpression,
    /// A value identifier.
    Identifier,
    /// A type name such as `error` or `int`.
    TypeIdentifier,
    /// A field or method name.
    FieldIdentifier,
    /// `// ...` or `/* ... */`
    Comment,
    /// A region the parser could not make sense of.
    Error,
    /// Any other grammar node.
    Other,
}

impl NodeKind {
    /// Maps a tree-sitter-go grammar kind to its tag.
    #[must_use]
    pub fn from_grammar(kind: &str) -> Self {
        match kind {
            "source_file" => Self::SourceFile,
            "package_clause" => Self::PackageClause,
            "import_declaration" => Self::ImportDeclaration,
            "function_declaration" => Self::FunctionDeclaration,
            "method_declaration" => Self::MethodDeclaration,
            "func_literal" => Self::FuncLiteral,
            "type_declaration" => Self::TypeDeclaration,
            "var_declaration" => Self::VarDeclaration,
            "const_declaration" => Self::ConstDeclaration,
            "parameter_list" => Self::ParameterList,
            "parameter_declaration" => Self::ParameterDeclaration,
            "block" => Self::Block,
            "return_statement" => Self::ReturnStatement,
            "if_statement" => Self::IfStatement,
            "for_statement" => Self::ForStatement,
            "defer_statement" => Self::DeferStatement,
            "go_statement" => Self::GoStatement,
            "short_var_declaration" => Self::ShortVarDeclaration,
            "assignment_statement" => Self::AssignmentStatement,
            "call_expression" => Self::CallExpression,
            "selector_expression" => Self::SelectorExpression,
            "identifier" => Self::Identifier,
            "type_identifier" => Self::TypeIdentifier,
            "field_identifier" => Self::FieldIdentifier,
            "comment" => Self::Comment,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }

    /// Returns the tag of a syntax node.
    #[must_use]
    pub fn of(node: &Node<'_>) -> Self {
        Self::from_grammar(node.kind())
    }
}

/// Returns the source text covered by `node`.
///
/// Returns an empty string if the node does not fall on UTF-8 boundaries of
/// `source`, which cannot happen for trees parsed from that same text.
#[must_use]
pub fn node_text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}
