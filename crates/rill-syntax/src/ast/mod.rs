//! AST nodes and the parse-tree → AST synthesis pass.

mod build;

#[cfg(test)]
mod build_tests;

pub use build::synthesize;

use std::fmt::Write;

use serde::Serialize;

use crate::lexer::{Token, TokenKind};

/// Concrete AST node kinds. Promotion markers in the grammar always
/// resolve to one of these before a node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AstKind {
    Program,
    /// `let` binding; children are the bound [`AstKind::Name`] and the value.
    Let,
    /// Binding name on the left of `=`.
    Name,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    /// Call; the first child is the callee, the rest are arguments.
    Call,
    Int,
    Var,
    /// Placeholder for a subtree that could not be synthesized.
    Error,
}

/// Failure tag on an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AstFault {
    /// An expected token was absent from the input.
    MissingToken,
    /// The attached token carries a lexical error.
    TokenError,
    /// Some descendant failed to parse or synthesize.
    ChildError,
    /// The parse node had no selected production.
    NoProduction,
    /// Promotion could not determine a kind for this node.
    PromotionUnresolved,
}

/// One AST node, owned exclusively by its parent.
#[derive(Debug, Clone, Serialize)]
pub struct AstNode {
    pub kind: AstKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<AstFault>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(kind: AstKind) -> Self {
        Self {
            kind,
            token: None,
            fault: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.fault.is_none()
    }

    /// Whether this node or any descendant carries a fault.
    pub fn has_faults(&self) -> bool {
        self.fault.is_some() || self.children.iter().any(AstNode::has_faults)
    }
}

/// Renders the AST as indented `Kind "token"` lines with fault suffixes.
pub fn dump_ast(node: &AstNode, source: &str) -> String {
    let mut out = String::new();
    write_node(&mut out, node, source, 0, false);
    out.truncate(out.trim_end().len());
    out
}

/// Like [`dump_ast`], with `@start..end` source positions on leaf tokens.
pub fn dump_ast_spanned(node: &AstNode, source: &str) -> String {
    let mut out = String::new();
    write_node(&mut out, node, source, 0, true);
    out.truncate(out.trim_end().len());
    out
}

fn write_node(out: &mut String, node: &AstNode, source: &str, depth: usize, spans: bool) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    let _ = write!(out, "{:?}", node.kind);
    if let Some(token) = node.token
        && token.kind != TokenKind::Eof
    {
        let _ = write!(out, " {:?}", token.text(source));
        if spans {
            let _ = write!(out, " @{}", token.span);
        }
    }
    match node.fault {
        None => {}
        Some(AstFault::MissingToken) => out.push_str(" !missing-token"),
        Some(AstFault::TokenError) => out.push_str(" !token-error"),
        Some(AstFault::ChildError) => out.push_str(" !child-error"),
        Some(AstFault::NoProduction) => out.push_str(" !no-production"),
        Some(AstFault::PromotionUnresolved) => out.push_str(" !promotion-unresolved"),
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, source, depth + 1, spans);
    }
}
