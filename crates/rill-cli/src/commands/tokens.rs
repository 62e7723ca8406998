use rill_syntax::{TokenKind, lex};

use crate::cli::SourceParams;
use crate::util::load_source;

pub fn run(params: SourceParams) {
    let source = load_source(&params);
    for token in lex(&source) {
        if token.kind == TokenKind::Eof {
            println!("{:?} @{}", token.kind, token.span);
        } else {
            println!("{:?} {:?} @{}", token.kind, token.text(&source), token.span);
        }
    }
}
