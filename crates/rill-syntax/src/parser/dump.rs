//! Parse-tree dump for snapshots and the CLI.

use std::fmt::Write;

use super::{ParseFault, ParseNode};
use crate::grammar::Symbol;
use crate::lexer::TokenKind;

/// Renders the tree as indented lines: `Symbol "text"` for matched
/// terminals, bare symbol names for non-terminals, with fault suffixes
/// like `!child-failed` where parsing went wrong.
pub fn dump_parse_tree(node: &ParseNode, source: &str) -> String {
    let mut out = String::new();
    write_node(&mut out, node, source, 0);
    out.truncate(out.trim_end().len());
    out
}

fn write_node(out: &mut String, node: &ParseNode, source: &str, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match node.symbol {
        Symbol::Terminal(kind) => {
            let _ = write!(out, "{kind:?}");
            if node.is_ok() && kind != TokenKind::Eof {
                if let Some(token) = node.token {
                    let _ = write!(out, " {:?}", token.text(source));
                }
            }
        }
        Symbol::NonTerminal(nt) => {
            let _ = write!(out, "{nt:?}");
        }
    }
    write_fault(out, node, source);
    out.push('\n');
    for child in &node.children {
        write_node(out, child, source, depth + 1);
    }
}

fn write_fault(out: &mut String, node: &ParseNode, source: &str) {
    let found = || {
        node.token
            .map(|t| {
                if t.kind == TokenKind::Eof {
                    "<eof>".to_string()
                } else {
                    format!("{:?}", t.text(source))
                }
            })
            .unwrap_or_default()
    };
    match node.fault {
        None => {}
        Some(ParseFault::UnexpectedToken) => {
            let _ = write!(out, " !found {}", found());
        }
        Some(ParseFault::NoAlternative) => {
            let _ = write!(out, " !no-alternative {}", found());
        }
        Some(ParseFault::ChildFailed) => out.push_str(" !child-failed"),
        Some(ParseFault::SiblingSkipped) => out.push_str(" !skipped"),
    }
}
