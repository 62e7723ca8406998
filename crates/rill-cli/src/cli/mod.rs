//! Command-line definition and argument extraction.

pub mod args;

use std::path::PathBuf;

use clap::{ArgMatches, Command};

pub fn build_cli() -> Command {
    Command::new("rill")
        .about("Front end for the rill language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream")
                .arg(args::source_path_arg())
                .arg(args::source_text_arg()),
        )
        .subcommand(
            Command::new("tree")
                .about("Dump the parse tree")
                .arg(args::source_path_arg())
                .arg(args::source_text_arg()),
        )
        .subcommand(
            Command::new("ast")
                .about("Dump the abstract syntax tree")
                .arg(args::source_path_arg())
                .arg(args::source_text_arg())
                .arg(args::format_arg())
                .arg(args::spans_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a file and report diagnostics")
                .arg(args::source_path_arg())
                .arg(args::source_text_arg())
                .arg(args::color_arg()),
        )
}

/// Where the source text comes from: a file, stdin, or an inline flag.
pub struct SourceParams {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl SourceParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            path: matches.get_one::<PathBuf>("source_path").cloned(),
            text: matches.get_one::<String>("source_text").cloned(),
        }
    }
}

pub struct AstParams {
    pub source: SourceParams,
    pub json: bool,
    pub spans: bool,
}

impl AstParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(matches),
            json: matches.get_one::<String>("format").map(String::as_str) == Some("json"),
            spans: matches.get_flag("spans"),
        }
    }
}

pub struct CheckParams {
    pub source: SourceParams,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let color = match matches.get_one::<String>("color").map(String::as_str) {
            Some("always") => ColorChoice::Always,
            Some("never") => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };
        Self {
            source: SourceParams::from_matches(matches),
            color,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve `auto` against whether stderr is a terminal.
    pub fn enabled(self) -> bool {
        use std::io::IsTerminal;
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }
}
