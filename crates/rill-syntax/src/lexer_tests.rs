use crate::lexer::{TokenKind, lex};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_take_precedence_over_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("let lettuce = 1;"),
        vec![KwLet, Ident, Eq, Number, Semi, Eof]
    );
}

#[test]
fn spans_slice_back_to_source() {
    let source = "let x = 12;";
    let tokens = lex(source);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text(source)).collect();
    assert_eq!(texts, vec!["let", "x", "=", "12", ";", ""]);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    use TokenKind::*;
    assert_eq!(kinds("1 # to end of line\n2"), vec![Number, Number, Eof]);
}

#[test]
fn garbage_runs_coalesce_into_one_token() {
    use TokenKind::*;
    let source = "1 @@@2;";
    let tokens = lex(source);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Number, Garbage, Number, Semi, Eof]
    );
    assert_eq!(tokens[1].text(source), "@@@");
}

#[test]
fn garbage_at_end_of_input_is_flushed() {
    use TokenKind::*;
    assert_eq!(kinds("1@"), vec![Number, Garbage, Eof]);
}

#[test]
fn empty_source_is_just_eof() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert!(tokens[0].span.is_empty());
}

#[test]
fn eof_sits_at_the_end_of_the_source() {
    let source = "a + b";
    let eof = *lex(source).last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.span.start as usize, source.len());
}

#[test]
fn operators_lex_individually() {
    use TokenKind::*;
    assert_eq!(
        kinds("(a+b)*c/d-e,f"),
        vec![
            LParen, Ident, Plus, Ident, RParen, Star, Ident, Slash, Ident, Minus, Ident, Comma,
            Ident, Eof
        ]
    );
}
