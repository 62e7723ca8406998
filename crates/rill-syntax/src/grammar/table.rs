//! The rill grammar tables.
//!
//! Statements are `let` bindings and expression statements. Expressions
//! are left-associative `+ - * /` chains over unary minus, calls, and
//! parenthesized groups. Binary operators are encoded with one directly
//! left-recursive production per precedence level; the operator
//! non-terminal is the promotion target, so the operator token's marker
//! decides the node kind (`Add`, `Sub`, `Mul`, `Div`).
//!
//! `postfix` carries the one fallback promotion in the grammar: a call
//! suffix promotes to `Call`, and when the suffix matches the empty
//! alternative the promotion falls back to the callee itself, so a bare
//! identifier synthesizes as if the suffix rule did not exist.

use std::sync::OnceLock;

use super::validate::{self, ValidGrammar};
use super::{Grammar, Marker, NonTerminal, Production, Symbol};
use crate::ast::AstKind;
use crate::lexer::TokenKind;

const fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

const fn n(nt: NonTerminal) -> Symbol {
    Symbol::NonTerminal(nt)
}

/// Builds the rill grammar tables.
pub fn rill_grammar() -> Grammar {
    use Marker::{Drop, Node, Promote, Splice};
    use NonTerminal::*;
    use TokenKind::*;

    let mut g = Grammar::new(Program);

    g.define(
        Program,
        vec![Production::new(vec![
            (n(StmtList), Splice),
            (t(Eof), Drop),
        ])],
    );

    g.define(
        StmtList,
        vec![
            Production::new(vec![(n(Stmt), Promote), (n(StmtList), Splice)]),
            Production::empty(),
        ],
    );

    g.define(
        Stmt,
        vec![
            Production::new(vec![
                (t(KwLet), Node(AstKind::Let)),
                (t(Ident), Node(AstKind::Name)),
                (t(Eq), Drop),
                (n(Expr), Promote),
                (t(Semi), Drop),
            ])
            .promote(0),
            Production::new(vec![(n(Expr), Promote), (t(Semi), Drop)]).promote(0),
        ],
    );

    g.define(
        Expr,
        vec![
            Production::new(vec![
                (n(Expr), Promote),
                (n(AddOp), Promote),
                (n(Term), Promote),
            ])
            .promote(1),
            Production::new(vec![(n(Term), Promote)]).promote(0),
        ],
    );

    g.define(
        AddOp,
        vec![
            Production::new(vec![(t(Plus), Node(AstKind::Add))]).promote(0),
            Production::new(vec![(t(Minus), Node(AstKind::Sub))]).promote(0),
        ],
    );

    g.define(
        Term,
        vec![
            Production::new(vec![
                (n(Term), Promote),
                (n(MulOp), Promote),
                (n(Factor), Promote),
            ])
            .promote(1),
            Production::new(vec![(n(Factor), Promote)]).promote(0),
        ],
    );

    g.define(
        MulOp,
        vec![
            Production::new(vec![(t(Star), Node(AstKind::Mul))]).promote(0),
            Production::new(vec![(t(Slash), Node(AstKind::Div))]).promote(0),
        ],
    );

    g.define(
        Factor,
        vec![
            Production::new(vec![(t(Minus), Node(AstKind::Neg)), (n(Factor), Promote)]).promote(0),
            Production::new(vec![(n(Postfix), Promote)]).promote(0),
        ],
    );

    g.define(
        Postfix,
        vec![
            Production::new(vec![(n(Primary), Promote), (n(CallTail), Promote)])
                .promote(1)
                .fallback(1, 0),
        ],
    );

    g.define(
        Primary,
        vec![
            Production::new(vec![(t(Number), Node(AstKind::Int))]).promote(0),
            Production::new(vec![(t(Ident), Node(AstKind::Var))]).promote(0),
            Production::new(vec![
                (t(LParen), Drop),
                (n(Expr), Promote),
                (t(RParen), Drop),
            ])
            .promote(1),
        ],
    );

    g.define(
        CallTail,
        vec![
            Production::new(vec![
                (t(LParen), Node(AstKind::Call)),
                (n(Args), Splice),
                (t(RParen), Drop),
            ])
            .promote(0),
            Production::empty(),
        ],
    );

    g.define(
        Args,
        vec![
            Production::new(vec![(n(Expr), Promote), (n(ArgsTail), Splice)]),
            Production::empty(),
        ],
    );

    g.define(
        ArgsTail,
        vec![
            Production::new(vec![
                (t(Comma), Drop),
                (n(Expr), Promote),
                (n(ArgsTail), Splice),
            ]),
            Production::empty(),
        ],
    );

    g
}

/// The validated rill grammar, checked once on first use.
pub fn rill() -> &'static ValidGrammar {
    static GRAMMAR: OnceLock<ValidGrammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| validate::check(rill_grammar()).expect("rill grammar tables are valid"))
}
