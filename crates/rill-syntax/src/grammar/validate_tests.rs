use super::validate::{self, Violation, find_direct_left_recursion, find_indirect_left_recursion};
use super::{Grammar, Marker, NonTerminal, Production, Symbol, rill_grammar};
use crate::ast::AstKind;
use crate::lexer::TokenKind;

fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

fn n(nt: NonTerminal) -> Symbol {
    Symbol::NonTerminal(nt)
}

fn violations(grammar: Grammar) -> Vec<Violation> {
    validate::check(grammar).expect_err("grammar should be rejected").violations
}

#[test]
fn rill_grammar_is_valid() {
    assert!(validate::check(rill_grammar()).is_ok());
}

#[test]
fn direct_left_recursion_is_found_where_declared() {
    let g = rill_grammar();
    assert_eq!(
        find_direct_left_recursion(NonTerminal::Expr, g.productions(NonTerminal::Expr)),
        Some(0)
    );
    assert_eq!(
        find_direct_left_recursion(NonTerminal::Term, g.productions(NonTerminal::Term)),
        Some(0)
    );
    assert_eq!(
        find_direct_left_recursion(NonTerminal::Primary, g.productions(NonTerminal::Primary)),
        None
    );
}

#[test]
fn shared_leading_terminal_is_a_prefix_conflict() {
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![
            (n(NonTerminal::Primary), Marker::Promote),
            (t(TokenKind::Eof), Marker::Drop),
        ])],
    );
    g.define(
        NonTerminal::Primary,
        vec![
            Production::new(vec![(t(TokenKind::Number), Marker::Node(AstKind::Int))]).promote(0),
            Production::new(vec![(t(TokenKind::Number), Marker::Node(AstKind::Var))]).promote(0),
        ],
    );

    assert!(violations(g).contains(&Violation::PrefixConflict {
        nt: NonTerminal::Primary,
        first: 0,
        second: 1,
        terminal: TokenKind::Number,
    }));
}

#[test]
fn indirect_left_recursion_through_two_rules_is_rejected() {
    let mut g = Grammar::new(NonTerminal::Expr);
    g.define(
        NonTerminal::Expr,
        vec![Production::new(vec![(n(NonTerminal::Term), Marker::Promote)])],
    );
    g.define(
        NonTerminal::Term,
        vec![Production::new(vec![(n(NonTerminal::Expr), Marker::Promote)])],
    );

    let found = violations(g);
    assert!(found.contains(&Violation::IndirectLeftRecursion {
        nt: NonTerminal::Expr,
        path: vec![NonTerminal::Expr, NonTerminal::Term, NonTerminal::Expr],
    }));
}

#[test]
fn indirect_search_skips_the_legal_self_loop() {
    let g = rill_grammar();
    for nt in NonTerminal::ALL {
        assert_eq!(find_indirect_left_recursion(&g, nt), None, "{nt:?}");
    }
}

#[test]
fn left_recursion_without_a_base_case_is_rejected() {
    let mut g = Grammar::new(NonTerminal::Expr);
    g.define(
        NonTerminal::Expr,
        vec![
            Production::new(vec![
                (n(NonTerminal::Expr), Marker::Promote),
                (t(TokenKind::Plus), Marker::Drop),
            ])
            .promote(0),
        ],
    );

    assert!(violations(g).contains(&Violation::LeftRecursionOnly {
        nt: NonTerminal::Expr
    }));
}

#[test]
fn two_left_recursive_alternatives_are_rejected() {
    let mut g = Grammar::new(NonTerminal::Expr);
    g.define(
        NonTerminal::Expr,
        vec![
            Production::new(vec![
                (n(NonTerminal::Expr), Marker::Promote),
                (t(TokenKind::Plus), Marker::Drop),
            ]),
            Production::new(vec![
                (n(NonTerminal::Expr), Marker::Promote),
                (t(TokenKind::Minus), Marker::Drop),
            ]),
            Production::new(vec![(t(TokenKind::Number), Marker::Node(AstKind::Int))]).promote(0),
        ],
    );

    assert!(violations(g).contains(&Violation::MultipleLeftRecursion {
        nt: NonTerminal::Expr,
        first: 0,
        second: 1,
    }));
}

#[test]
fn referencing_an_undefined_rule_is_rejected() {
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![(n(NonTerminal::Expr), Marker::Promote)])],
    );

    assert!(violations(g).contains(&Violation::MissingRule(NonTerminal::Expr)));
}

#[test]
fn empty_alternative_must_come_last() {
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![(n(NonTerminal::Args), Marker::Splice)])],
    );
    g.define(
        NonTerminal::Args,
        vec![
            Production::empty(),
            Production::new(vec![(t(TokenKind::Number), Marker::Drop)]),
        ],
    );

    assert!(violations(g).contains(&Violation::EmptyNotLast {
        nt: NonTerminal::Args,
        index: 0,
    }));
}

#[test]
fn promotion_indices_must_be_in_range() {
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![(t(TokenKind::Number), Marker::Drop)]).promote(5)],
    );

    assert!(violations(g).contains(&Violation::PromotionOutOfRange {
        nt: NonTerminal::Program,
        index: 0,
    }));
}

#[test]
fn can_start_with_terminates_and_matches_first_sets() {
    let g = rill_grammar();

    // Exhaustive sweep over the whole grammar: termination is the point.
    for nt in NonTerminal::ALL {
        for kind in TokenKind::ALL {
            let _ = g.can_start_with(n(nt), kind);
        }
    }

    assert!(g.can_start_with(n(NonTerminal::Expr), TokenKind::Number));
    assert!(g.can_start_with(n(NonTerminal::Expr), TokenKind::Minus));
    assert!(g.can_start_with(n(NonTerminal::Expr), TokenKind::LParen));
    assert!(!g.can_start_with(n(NonTerminal::Expr), TokenKind::Semi));
    assert!(!g.can_start_with(n(NonTerminal::Expr), TokenKind::Plus));

    // Nullable non-terminals can begin with anything.
    for kind in TokenKind::ALL {
        assert!(g.can_start_with(n(NonTerminal::StmtList), kind));
        assert!(g.can_start_with(n(NonTerminal::CallTail), kind));
    }

    // The directly left-recursive alternative is excluded, so `+` does
    // not leak into Expr's FIRST set through `expr -> expr add_op term`.
    assert!(!g.can_start_with(n(NonTerminal::Term), TokenKind::Star));
}
