use rill_syntax::{compile, dump_parse_tree};

use crate::cli::SourceParams;
use crate::util::load_source;

pub fn run(params: SourceParams) {
    let source = load_source(&params);
    let compilation = compile(&source);

    println!("{}", dump_parse_tree(&compilation.tree, &source));

    if compilation.diagnostics.has_errors() {
        eprint!("{}", compilation.diagnostics.render(&source));
        eprintln!();
        std::process::exit(1);
    }
}
