//! Collectors that turn error-tagged tree nodes into diagnostics.
//!
//! Every genuine failure site yields exactly one diagnostic with the
//! offending token's span. Cascade tags (`ChildFailed`, `SiblingSkipped`,
//! `ChildError`) are consequences of a failure already reported and are
//! not repeated.

use super::Diagnostics;
use super::message::DiagnosticKind;
use crate::ast::{AstFault, AstNode};
use crate::grammar::Symbol;
use crate::lexer::{Token, TokenKind};
use crate::parser::{ParseFault, ParseNode};
use crate::span::Span;

/// Reports every `Garbage` token in the stream.
pub fn collect_lex_errors(tokens: &[Token], source: &str, diagnostics: &mut Diagnostics) {
    for token in tokens {
        if token.kind == TokenKind::Garbage {
            diagnostics
                .report(DiagnosticKind::LexicalGarbage, token.span)
                .message(format!(
                    "unrecognized characters `{}`",
                    token.text(source)
                ))
                .emit();
        }
    }
}

/// Reports every genuine parse failure in the tree, in source order.
pub fn collect_parse_errors(node: &ParseNode, source: &str, diagnostics: &mut Diagnostics) {
    match node.fault {
        Some(ParseFault::UnexpectedToken) => {
            let Symbol::Terminal(expected) = node.symbol else {
                return;
            };
            let span = node.token.map(|t| t.span).unwrap_or(Span::empty(0));
            diagnostics
                .report(DiagnosticKind::UnexpectedToken, span)
                .message(format!(
                    "expected {}, found {}",
                    expected.describe(),
                    describe_found(node.token, source)
                ))
                .emit();
        }
        Some(ParseFault::NoAlternative) => {
            let Symbol::NonTerminal(expected) = node.symbol else {
                return;
            };
            let span = node.token.map(|t| t.span).unwrap_or(Span::empty(0));
            diagnostics
                .report(DiagnosticKind::NoAlternative, span)
                .message(format!(
                    "expected {}, found {}",
                    expected.describe(),
                    describe_found(node.token, source)
                ))
                .emit();
        }
        _ => {}
    }
    for child in &node.children {
        collect_parse_errors(child, source, diagnostics);
    }
}

/// Reports root-cause AST faults. Useful on trees synthesized from
/// hand-built parse trees; for the normal pipeline the parse-tree
/// collector already covers the same failure sites.
pub fn collect_ast_errors(node: &AstNode, diagnostics: &mut Diagnostics) {
    let span = node.token.map(|t| t.span).unwrap_or(Span::empty(0));
    match node.fault {
        Some(AstFault::MissingToken) => {
            diagnostics.report(DiagnosticKind::MissingToken, span).emit();
        }
        Some(AstFault::TokenError) => {
            diagnostics.report(DiagnosticKind::TokenError, span).emit();
        }
        Some(AstFault::NoProduction) => {
            diagnostics.report(DiagnosticKind::NoProduction, span).emit();
        }
        Some(AstFault::PromotionUnresolved) => {
            diagnostics
                .report(DiagnosticKind::PromotionUnresolved, span)
                .emit();
        }
        Some(AstFault::ChildError) | None => {}
    }
    for child in &node.children {
        collect_ast_errors(child, diagnostics);
    }
}

fn describe_found(token: Option<Token>, source: &str) -> String {
    match token {
        None => "nothing".to_string(),
        Some(t) if t.kind == TokenKind::Eof => "end of input".to_string(),
        Some(t) if t.kind == TokenKind::Garbage => "unrecognized text".to_string(),
        Some(t) => format!("`{}`", t.text(source)),
    }
}
