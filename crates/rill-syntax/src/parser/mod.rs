//! Table-driven recursive-descent parse engine.
//!
//! The engine walks the grammar tables with a single shared cursor into
//! the token stream. The cursor only ever advances, and only on a terminal
//! match; a terminal mismatch consumes nothing, so the offending token is
//! still in place for the caller to report. Failures are never errors or
//! panics - they are [`ParseFault`] tags embedded in the tree at the exact
//! node where the mismatch occurred, and the engine always returns a
//! complete tree.
//!
//! Direct left recursion is not expanded by recursion. A left-recursive
//! alternative is held back during selection; once the base alternative
//! has parsed, the engine keeps wrapping the accumulated node as the
//! leftmost child of a fresh node for as long as the lookahead can start
//! the continuation. That loop is what makes `1 - 2 - 3` fold
//! left-associatively, and it bounds the recursion depth by grammar
//! nesting rather than input length.

mod dump;


pub use dump::dump_parse_tree;

use std::cell::Cell;

use crate::ast::AstKind;
use crate::grammar::{Grammar, NonTerminal, Production, Symbol, ValidGrammar};
use crate::lexer::{Token, TokenKind};

/// Failure tag on a parse-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFault {
    /// A terminal did not match the token at the cursor.
    UnexpectedToken,
    /// No alternative of a non-terminal covers the lookahead.
    NoAlternative,
    /// A child failed; parsing of the remaining children was abandoned.
    ChildFailed,
    /// Never attempted because an earlier sibling failed.
    SiblingSkipped,
}

/// Memoized result of promotion resolution, filled in lazily by the AST
/// synthesizer. Lives on the parse node because nodes are never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Promotes through the child at `index`, yielding `kind`.
    Kind { index: usize, kind: AstKind },
    /// The node contributes nothing to the AST.
    Empty,
    /// Resolution failed; synthesis reports it on the AST node.
    Failed,
}

/// One parse-tree node, owned exclusively by its parent.
#[derive(Debug, Clone)]
pub struct ParseNode {
    pub symbol: Symbol,
    /// The matched token for a successful terminal; the offending,
    /// unconsumed token for a faulted node.
    pub token: Option<Token>,
    /// Index of the selected production, for non-terminals that got one.
    pub production: Option<usize>,
    /// One slot per production symbol, in order.
    pub children: Vec<ParseNode>,
    pub fault: Option<ParseFault>,
    pub(crate) resolved: Cell<Option<Resolved>>,
}

impl ParseNode {
    fn leaf(symbol: Symbol, token: Token) -> Self {
        Self {
            symbol,
            token: Some(token),
            production: None,
            children: Vec::new(),
            fault: None,
            resolved: Cell::new(None),
        }
    }

    fn mismatch(symbol: Symbol, found: Token) -> Self {
        Self {
            symbol,
            token: Some(found),
            production: None,
            children: Vec::new(),
            fault: Some(ParseFault::UnexpectedToken),
            resolved: Cell::new(None),
        }
    }

    fn no_alternative(symbol: Symbol, found: Token) -> Self {
        Self {
            symbol,
            token: Some(found),
            production: None,
            children: Vec::new(),
            fault: Some(ParseFault::NoAlternative),
            resolved: Cell::new(None),
        }
    }

    fn skipped(symbol: Symbol) -> Self {
        Self {
            symbol,
            token: None,
            production: None,
            children: Vec::new(),
            fault: Some(ParseFault::SiblingSkipped),
            resolved: Cell::new(None),
        }
    }

    fn derived(
        symbol: Symbol,
        production: usize,
        children: Vec<ParseNode>,
        fault: Option<ParseFault>,
    ) -> Self {
        Self {
            symbol,
            token: None,
            production: Some(production),
            children,
            fault,
            resolved: Cell::new(None),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.fault.is_none()
    }
}

/// Parses `tokens` as the grammar's start symbol. The stream must end
/// with an `Eof` token, as produced by [`crate::lexer::lex`].
pub fn parse(grammar: &ValidGrammar, tokens: &[Token]) -> ParseNode {
    debug_assert!(!tokens.is_empty(), "token stream must end with Eof");
    let mut parser = Parser {
        grammar,
        tokens,
        pos: 0,
    };
    parser.parse_symbol(Symbol::NonTerminal(grammar.start()))
}

struct Parser<'a> {
    grammar: &'a Grammar,
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn lookahead(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn parse_symbol(&mut self, symbol: Symbol) -> ParseNode {
        let before = self.pos;
        let node = match symbol {
            Symbol::Terminal(kind) => self.parse_terminal(symbol, kind),
            Symbol::NonTerminal(nt) => self.parse_rule(symbol, nt),
        };
        debug_assert!(self.pos >= before, "cursor must never move backwards");
        node
    }

    fn parse_terminal(&mut self, symbol: Symbol, kind: TokenKind) -> ParseNode {
        let token = self.lookahead();
        if token.kind == kind {
            self.pos += 1;
            ParseNode::leaf(symbol, token)
        } else {
            ParseNode::mismatch(symbol, token)
        }
    }

    fn parse_rule(&mut self, symbol: Symbol, nt: NonTerminal) -> ParseNode {
        let grammar = self.grammar;
        let productions = grammar.productions(nt);
        let look = self.lookahead().kind;

        let mut left_recursive = None;
        let mut selected = None;
        for (index, production) in productions.iter().enumerate() {
            if production.leading() == Some(Symbol::NonTerminal(nt)) {
                if left_recursive.is_none() {
                    left_recursive = Some(index);
                }
                continue;
            }
            if grammar.production_starts(production, look) {
                selected = Some(index);
                break;
            }
        }

        let Some(chosen) = selected else {
            return ParseNode::no_alternative(symbol, self.lookahead());
        };

        let (children, fault) = self.parse_children(&productions[chosen], None);
        let mut node = ParseNode::derived(symbol, chosen, children, fault);

        if let Some(lr) = left_recursive
            && node.is_ok()
        {
            node = self.continue_left_recursive(symbol, &productions[lr], lr, node);
        }
        node
    }

    /// Wraps `node` as the leftmost child of a fresh node for as long as
    /// the continuation can start with the lookahead. A failed
    /// continuation attempt stops the loop and is returned as-is, fault
    /// included; nothing is ever re-parsed.
    fn continue_left_recursive(
        &mut self,
        symbol: Symbol,
        production: &Production,
        index: usize,
        mut node: ParseNode,
    ) -> ParseNode {
        let grammar = self.grammar;
        loop {
            // Second symbol, i.e. the first one after the self-reference.
            let continuation = production.symbol(1);
            if !grammar.can_start_with(continuation, self.lookahead().kind) {
                break;
            }
            let (children, fault) = self.parse_children(production, Some(node));
            node = ParseNode::derived(symbol, index, children, fault);
            if node.fault.is_some() {
                break;
            }
        }
        node
    }

    /// Parses one child slot per production symbol, left to right. The
    /// first failure abandons the rest: remaining slots record only which
    /// symbol was expected, keeping error fan-out to one genuine failure
    /// per node.
    fn parse_children(
        &mut self,
        production: &Production,
        mut seed: Option<ParseNode>,
    ) -> (Vec<ParseNode>, Option<ParseFault>) {
        let mut children = Vec::with_capacity(production.len());
        let mut failed = false;
        for index in 0..production.len() {
            let symbol = production.symbol(index);
            if index == 0
                && let Some(first) = seed.take()
            {
                children.push(first);
                continue;
            }
            if failed {
                children.push(ParseNode::skipped(symbol));
                continue;
            }
            let child = self.parse_symbol(symbol);
            failed = child.fault.is_some();
            children.push(child);
        }
        (children, failed.then_some(ParseFault::ChildFailed))
    }
}
