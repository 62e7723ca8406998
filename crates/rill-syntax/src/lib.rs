//! Front end for the rill language.
//!
//! The pipeline runs in four stages, each usable on its own:
//!
//! - [`lexer`] - source text to a flat, span-tagged token stream ending
//!   in `Eof`
//! - [`grammar`] - the grammar as data, plus the validator that proves a
//!   grammar is parseable with one-token lookahead
//! - [`parser`] - table-driven recursive descent producing a parse tree
//!   in which failures are data, not errors
//! - [`ast`] - parse tree to AST, driven by the grammar's per-symbol
//!   markers and promotion tables
//!
//! [`compile`] wires the stages together for the built-in rill grammar
//! and collects diagnostics along the way.

pub mod ast;
pub mod diagnostics;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod span;

#[cfg(test)]
mod lexer_tests;

pub use ast::{AstFault, AstKind, AstNode, dump_ast, dump_ast_spanned, synthesize};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use grammar::{Grammar, GrammarErrors, ValidGrammar};
pub use lexer::{Token, TokenKind, lex};
pub use parser::{ParseFault, ParseNode, dump_parse_tree, parse};
pub use span::Span;

/// Everything the front end produces for one source text.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub tree: ParseNode,
    pub ast: AstNode,
    pub diagnostics: Diagnostics,
}

/// Runs the full front end over `source` with the built-in rill grammar.
///
/// Never fails: lexical garbage, parse failures, and synthesis failures
/// all end up as tags in the trees and entries in `diagnostics`.
pub fn compile(source: &str) -> Compilation {
    let grammar = grammar::rill();
    let tokens = lex(source);

    let mut diagnostics = Diagnostics::new();
    diagnostics::collect_lex_errors(&tokens, source, &mut diagnostics);

    let tree = parse(grammar, &tokens);
    diagnostics::collect_parse_errors(&tree, source, &mut diagnostics);

    let ast = synthesize(grammar, &tree);

    Compilation {
        tokens,
        tree,
        ast,
        diagnostics,
    }
}
