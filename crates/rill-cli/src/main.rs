mod cli;
mod commands;
mod util;

use cli::{AstParams, CheckParams, SourceParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tokens", m)) => {
            commands::tokens::run(SourceParams::from_matches(m));
        }
        Some(("tree", m)) => {
            commands::tree::run(SourceParams::from_matches(m));
        }
        Some(("ast", m)) => {
            commands::ast::run(AstParams::from_matches(m));
        }
        Some(("check", m)) => {
            commands::check::run(CheckParams::from_matches(m));
        }
        _ => unreachable!("clap should have caught this"),
    }
}
