//! The grammar as data.
//!
//! A [`Grammar`] maps each non-terminal to an ordered list of alternative
//! [`Production`]s. Each production is a sequence of grammar symbols, each
//! tagged with a [`Marker`] that tells the AST synthesizer how the symbol's
//! subtree contributes to the AST, plus an optional promotion target that
//! lets a node take its kind from one of its children.
//!
//! Alternative order matters: the parse engine selects the first
//! alternative whose FIRST set contains the lookahead, so the empty
//! alternative (when present) acts as the catch-all and must come last.
//! [`validate::check`] proves these ordering and disjointness rules before
//! a grammar reaches the engine.

mod table;
pub mod validate;

#[cfg(test)]
mod validate_tests;

pub use table::{rill, rill_grammar};
pub use validate::{GrammarErrors, ValidGrammar, Violation};

use indexmap::IndexMap;

use crate::ast::AstKind;
use crate::lexer::TokenKind;

/// A grammar symbol: one input token kind, or a non-terminal to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

/// Non-terminals of the rill grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Program,
    StmtList,
    Stmt,
    Expr,
    AddOp,
    Term,
    MulOp,
    Factor,
    Postfix,
    Primary,
    CallTail,
    Args,
    ArgsTail,
}

impl NonTerminal {
    pub const ALL: [NonTerminal; 13] = [
        NonTerminal::Program,
        NonTerminal::StmtList,
        NonTerminal::Stmt,
        NonTerminal::Expr,
        NonTerminal::AddOp,
        NonTerminal::Term,
        NonTerminal::MulOp,
        NonTerminal::Factor,
        NonTerminal::Postfix,
        NonTerminal::Primary,
        NonTerminal::CallTail,
        NonTerminal::Args,
        NonTerminal::ArgsTail,
    ];

    /// Human-readable phrase for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            NonTerminal::Program => "a program",
            NonTerminal::StmtList => "a statement list",
            NonTerminal::Stmt => "a statement",
            NonTerminal::Expr => "an expression",
            NonTerminal::AddOp => "`+` or `-`",
            NonTerminal::Term => "an operand",
            NonTerminal::MulOp => "`*` or `/`",
            NonTerminal::Factor => "an operand",
            NonTerminal::Postfix => "an operand",
            NonTerminal::Primary => "an operand",
            NonTerminal::CallTail => "a call argument list",
            NonTerminal::Args => "call arguments",
            NonTerminal::ArgsTail => "`,` or `)`",
        }
    }
}

/// How a symbol's subtree contributes to the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Ignore the symbol and its subtree.
    Drop,
    /// Append the child's own AST children directly to the parent.
    Splice,
    /// The child's resolved kind stands on its own; at the promotion
    /// index it becomes the parent's kind instead.
    Promote,
    /// Wrap the child as a node of this concrete kind.
    Node(AstKind),
}

/// Promotion target of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Take the kind of the child at this index.
    Child(usize),
    /// The node contributes nothing to the AST.
    Empty,
}

/// One right-hand-side alternative: symbols with AST markers, an optional
/// promotion target, and per-position fallback promotion indices.
#[derive(Debug, Clone)]
pub struct Production {
    items: Vec<(Symbol, Marker)>,
    promote: Option<Promotion>,
    fallbacks: Vec<(usize, usize)>,
}

impl Production {
    pub fn new(items: Vec<(Symbol, Marker)>) -> Self {
        Self {
            items,
            promote: None,
            fallbacks: Vec::new(),
        }
    }

    /// The empty production: matches the empty string, contributes nothing.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            promote: Some(Promotion::Empty),
            fallbacks: Vec::new(),
        }
    }

    /// Sets the promotion index.
    pub fn promote(mut self, index: usize) -> Self {
        self.promote = Some(Promotion::Child(index));
        self
    }

    /// If the child at `index` resolves to nothing, retry promotion at `alt`.
    pub fn fallback(mut self, index: usize, alt: usize) -> Self {
        self.fallbacks.push((index, alt));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Matches the empty string.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn symbol(&self, index: usize) -> Symbol {
        self.items[index].0
    }

    #[inline]
    pub fn marker(&self, index: usize) -> Marker {
        self.items[index].1
    }

    #[inline]
    pub fn leading(&self) -> Option<Symbol> {
        self.items.first().map(|(s, _)| *s)
    }

    #[inline]
    pub fn promotion(&self) -> Option<Promotion> {
        self.promote
    }

    pub fn fallback_for(&self, index: usize) -> Option<usize> {
        self.fallbacks
            .iter()
            .find(|(from, _)| *from == index)
            .map(|(_, to)| *to)
    }

    pub fn items(&self) -> &[(Symbol, Marker)] {
        &self.items
    }
}

/// Rule table: each non-terminal's ordered alternatives, in declaration order.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    rules: IndexMap<NonTerminal, Vec<Production>>,
}

impl Grammar {
    pub fn new(start: NonTerminal) -> Self {
        Self {
            start,
            rules: IndexMap::new(),
        }
    }

    pub fn define(&mut self, nt: NonTerminal, alternatives: Vec<Production>) {
        self.rules.insert(nt, alternatives);
    }

    #[inline]
    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn productions(&self, nt: NonTerminal) -> &[Production] {
        self.rules.get(&nt).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn production(&self, nt: NonTerminal, index: usize) -> &Production {
        &self.productions(nt)[index]
    }

    pub fn rules(&self) -> impl Iterator<Item = (NonTerminal, &[Production])> {
        self.rules.iter().map(|(nt, prods)| (*nt, prods.as_slice()))
    }

    /// Whether expanding `symbol` can begin by consuming `look`.
    ///
    /// Directly self-left-recursive alternatives are excluded so the
    /// recursion is well-founded; indirect left recursion would make this
    /// diverge, which is why [`validate::check`] rejects it up front.
    pub fn can_start_with(&self, symbol: Symbol, look: TokenKind) -> bool {
        match symbol {
            Symbol::Terminal(kind) => kind == look,
            Symbol::NonTerminal(nt) => {
                self.productions(nt).iter().any(|p| match p.leading() {
                    None => true,
                    Some(Symbol::NonTerminal(m)) if m == nt => false,
                    Some(first) => self.can_start_with(first, look),
                })
            }
        }
    }

    /// Whether the engine would select `production` on lookahead `look`.
    /// The empty production matches any lookahead.
    pub fn production_starts(&self, production: &Production, look: TokenKind) -> bool {
        match production.leading() {
            None => true,
            Some(first) => self.can_start_with(first, look),
        }
    }
}
