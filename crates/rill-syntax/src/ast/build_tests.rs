use crate::ast::{AstFault, AstKind, dump_ast, synthesize};
use crate::grammar::{Grammar, Marker, NonTerminal, Production, Symbol, validate};
use crate::lexer::{TokenKind, lex};
use crate::parser::parse;
use crate::compile;

fn ast(source: &str) -> String {
    let compilation = compile(source);
    dump_ast(&compilation.ast, source)
}

#[test]
fn expression_statement_promotes_to_a_single_operator_node() {
    insta::assert_snapshot!(ast("1 + 2;"), @r#"
    Program
      Add "+"
        Int "1"
        Int "2"
    "#);
}

#[test]
fn let_binding_takes_its_kind_from_the_keyword() {
    insta::assert_snapshot!(ast("let x = 1 + 2;"), @r#"
    Program
      Let "let"
        Name "x"
        Add "+"
          Int "1"
          Int "2"
    "#);
}

#[test]
fn subtraction_chain_is_left_associative() {
    insta::assert_snapshot!(ast("1 - 2 - 3;"), @r#"
    Program
      Sub "-"
        Sub "-"
          Int "1"
          Int "2"
        Int "3"
    "#);
}

#[test]
fn precedence_falls_out_of_the_rule_nesting() {
    insta::assert_snapshot!(ast("1 + 2 * 3;"), @r#"
    Program
      Add "+"
        Int "1"
        Mul "*"
          Int "2"
          Int "3"
    "#);
}

#[test]
fn parentheses_promote_without_a_wrapper_node() {
    insta::assert_snapshot!(ast("(1 + 2) * 3;"), @r#"
    Program
      Mul "*"
        Add "+"
          Int "1"
          Int "2"
        Int "3"
    "#);
}

#[test]
fn unary_minus_wraps_its_operand() {
    insta::assert_snapshot!(ast("-x * 3;"), @r#"
    Program
      Mul "*"
        Neg "-"
          Var "x"
        Int "3"
    "#);
}

#[test]
fn call_fallback_promotes_the_callee_for_bare_names() {
    // `f` alone: the call suffix resolves to nothing and promotion falls
    // back to the callee, as if the suffix rule did not exist.
    insta::assert_snapshot!(ast("f;"), @r#"
    Program
      Var "f"
    "#);
}

#[test]
fn call_with_empty_argument_list_splices_zero_children() {
    insta::assert_snapshot!(ast("f();"), @r#"
    Program
      Call "("
        Var "f"
    "#);
}

#[test]
fn call_arguments_splice_flat_after_the_callee() {
    insta::assert_snapshot!(ast("f(1, 2 + 3, g());"), @r#"
    Program
      Call "("
        Var "f"
        Int "1"
        Add "+"
          Int "2"
          Int "3"
        Call "("
          Var "g"
    "#);
}

#[test]
fn statements_splice_flat_into_the_program() {
    insta::assert_snapshot!(ast("a; let b = 2; b;"), @r#"
    Program
      Var "a"
      Let "let"
        Name "b"
        Int "2"
      Var "b"
    "#);
}

#[test]
fn empty_program_has_no_children_and_no_placeholder() {
    let compilation = compile("");
    assert!(compilation.ast.is_ok());
    assert!(compilation.ast.children.is_empty());
}

#[test]
fn clean_sources_synthesize_without_faults() {
    for source in [
        "",
        "1;",
        "f;",
        "f();",
        "let x = (a + 1) * f(x, -2);",
        "a; b; c;",
    ] {
        let compilation = compile(source);
        assert!(
            !compilation.ast.has_faults(),
            "unexpected faults for {source:?}"
        );
        assert!(compilation.diagnostics.is_empty(), "for {source:?}");
    }
}

#[test]
fn parse_failure_surfaces_as_child_error() {
    insta::assert_snapshot!(ast("1 + ;"), @r#"
    Program !child-error
      Add "+" !child-error
        Int "1"
        Error ";" !no-production
    "#);
}

#[test]
fn failed_statement_does_not_disturb_earlier_siblings() {
    insta::assert_snapshot!(ast("a; 1 + ;"), @r#"
    Program !child-error
      Var "a"
      Add "+" !child-error
        Int "1"
        Error ";" !no-production
    "#);
}

#[test]
fn multi_line_programs_synthesize_in_order() {
    let source = indoc::indoc! {"
        # running total
        let a = 1;
        let b = a + 2;
        b;
    "};
    let compilation = compile(source);
    assert!(!compilation.ast.has_faults());

    let kinds: Vec<_> = compilation.ast.children.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![AstKind::Let, AstKind::Let, AstKind::Var]);
}

#[test]
fn ast_serializes_to_json() {
    let compilation = compile("1;");
    let json = serde_json::to_value(&compilation.ast).unwrap();
    assert_eq!(json["kind"], "Program");
    assert_eq!(json["children"][0]["kind"], "Int");
}

#[test]
fn promotion_results_are_memoized_on_the_node() {
    let source = "1 + 2;";
    let tokens = lex(source);
    let tree = parse(crate::grammar::rill(), &tokens);
    let _ = synthesize(crate::grammar::rill(), &tree);

    let stmt = &tree.children[0].children[0];
    assert!(stmt.resolved.get().is_some());
}

fn t(kind: TokenKind) -> Symbol {
    Symbol::Terminal(kind)
}

fn n(nt: NonTerminal) -> Symbol {
    Symbol::NonTerminal(nt)
}

#[test]
fn mutual_fallbacks_resolve_to_nothing() {
    // Two promotion positions whose fallbacks point at each other: a
    // revisited position resolves to nothing instead of chasing forever.
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![
            (n(NonTerminal::Expr), Marker::Promote),
            (t(TokenKind::Eof), Marker::Drop),
        ])],
    );
    g.define(
        NonTerminal::Expr,
        vec![
            Production::new(vec![
                (n(NonTerminal::Args), Marker::Promote),
                (n(NonTerminal::ArgsTail), Marker::Promote),
            ])
            .promote(0)
            .fallback(0, 1)
            .fallback(1, 0),
        ],
    );
    g.define(NonTerminal::Args, vec![Production::empty()]);
    g.define(NonTerminal::ArgsTail, vec![Production::empty()]);
    let grammar = validate::check(g).expect("test grammar is valid");

    let tokens = lex("");
    let tree = parse(&grammar, &tokens);
    assert!(tree.is_ok());

    let ast = synthesize(&grammar, &tree);
    assert!(ast.is_ok());
    assert!(ast.children.is_empty());
}

#[test]
fn empty_promotion_without_fallback_is_unresolved() {
    let mut g = Grammar::new(NonTerminal::Program);
    g.define(
        NonTerminal::Program,
        vec![Production::new(vec![
            (n(NonTerminal::Expr), Marker::Promote),
            (t(TokenKind::Eof), Marker::Drop),
        ])],
    );
    g.define(
        NonTerminal::Expr,
        vec![Production::new(vec![(n(NonTerminal::Args), Marker::Promote)]).promote(0)],
    );
    g.define(NonTerminal::Args, vec![Production::empty()]);
    let grammar = validate::check(g).expect("test grammar is valid");

    let tokens = lex("");
    let ast = synthesize(&grammar, &parse(&grammar, &tokens));

    assert_eq!(ast.children.len(), 1);
    assert_eq!(ast.children[0].kind, AstKind::Error);
    assert_eq!(ast.children[0].fault, Some(AstFault::PromotionUnresolved));
}
