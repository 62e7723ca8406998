use std::io::Read;
use std::{fs, io};

use crate::cli::SourceParams;

/// Loads source text from the inline flag, a file path, or stdin (`-`).
pub fn load_source(params: &SourceParams) -> String {
    if let Some(text) = &params.text {
        return text.clone();
    }
    if let Some(path) = &params.path {
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .unwrap_or_else(|e| fail(&format!("failed to read stdin: {e}")));
            return buf;
        }
        return fs::read_to_string(path)
            .unwrap_or_else(|e| fail(&format!("failed to read {}: {e}", path.display())));
    }
    fail("no source given; pass a file path or -s TEXT")
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
