use rill_syntax::{compile, dump_ast, dump_ast_spanned};

use crate::cli::AstParams;
use crate::util::load_source;

pub fn run(params: AstParams) {
    let source = load_source(&params.source);
    let compilation = compile(&source);

    if params.json {
        let json = serde_json::to_string_pretty(&compilation.ast)
            .expect("AST serialization never fails");
        println!("{json}");
    } else if params.spans {
        println!("{}", dump_ast_spanned(&compilation.ast, &source));
    } else {
        println!("{}", dump_ast(&compilation.ast, &source));
    }

    if compilation.diagnostics.has_errors() {
        eprint!("{}", compilation.diagnostics.render(&source));
        eprintln!();
        std::process::exit(1);
    }
}
