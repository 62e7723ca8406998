use rill_syntax::compile;

use crate::cli::CheckParams;
use crate::util::load_source;

pub fn run(params: CheckParams) {
    let source = load_source(&params.source);
    let compilation = compile(&source);

    if compilation.diagnostics.has_errors() {
        eprint!(
            "{}",
            compilation
                .diagnostics
                .render_colored(&source, params.color.enabled())
        );
        eprintln!();
        std::process::exit(1);
    }

    // Silent on success, like `cargo check`.
}
