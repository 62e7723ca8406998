use super::DiagnosticKind;
use crate::compile;
use crate::span::Span;

#[test]
fn clean_source_produces_no_diagnostics() {
    let compilation = compile("let x = f(1) + 2;");
    assert!(compilation.diagnostics.is_empty());
    assert!(!compilation.diagnostics.has_errors());
}

#[test]
fn missing_operand_reports_one_diagnostic_at_the_semicolon() {
    let source = "1 + ;";
    let compilation = compile(source);
    let diags: Vec<_> = compilation.diagnostics.iter().collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::NoAlternative);
    assert_eq!(diags[0].span, Span::new(4, 5));
    assert_eq!(diags[0].message, "expected an operand, found `;`");
}

#[test]
fn cascade_tags_are_not_reported() {
    // One genuine failure; the child-failed/skipped chain above it stays
    // out of the diagnostics.
    let compilation = compile("let x = ;");
    assert_eq!(compilation.diagnostics.len(), 1);
}

#[test]
fn terminal_mismatch_names_the_expected_token() {
    let source = "let 1 = 2;";
    let compilation = compile(source);
    let diags: Vec<_> = compilation.diagnostics.iter().collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::UnexpectedToken);
    assert_eq!(diags[0].message, "expected an identifier, found `1`");
    assert_eq!(diags[0].span, Span::new(4, 5));
}

#[test]
fn garbage_and_parse_failure_both_report() {
    let source = "1 @@@2;";
    let compilation = compile(source);
    let kinds: Vec<_> = compilation.diagnostics.iter().map(|d| d.kind).collect();

    assert_eq!(
        kinds,
        vec![DiagnosticKind::LexicalGarbage, DiagnosticKind::UnexpectedToken]
    );
}

#[test]
fn unexpected_end_of_input_is_described_as_such() {
    let compilation = compile("let x = 1");
    let diags: Vec<_> = compilation.diagnostics.iter().collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "expected `;`, found end of input");
}

#[test]
fn rendering_includes_message_and_source_line() {
    let source = "1 + ;";
    let compilation = compile(source);
    let rendered = compilation.diagnostics.render(source);

    assert!(rendered.contains("expected an operand, found `;`"));
    assert!(rendered.contains("1 + ;"));
}

#[test]
fn plain_rendering_without_source_lists_spans() {
    let compilation = compile("1 + ;");
    let rendered = compilation.diagnostics.printer().render();
    assert!(rendered.contains("error:"));
    assert!(rendered.contains("4..5"));
}

#[test]
fn ast_collector_reports_root_causes_only() {
    let compilation = compile("1 + ;");
    let mut diagnostics = super::Diagnostics::new();
    super::collect_ast_errors(&compilation.ast, &mut diagnostics);

    // The Error leaf is the root cause; the child-error chain above it
    // is not repeated.
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().kind,
        DiagnosticKind::NoProduction
    );
}
