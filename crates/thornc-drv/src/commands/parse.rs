//! `thornc parse FILE` — dump the parsed AST and any diagnostics for a
//! source file.

use std::path::PathBuf;

use crate::error::{DrvError, Result};
use crate::source::load_codepoints;

pub struct ParseArgs {
    pub path: PathBuf,
}

pub fn run_parse(args: ParseArgs) -> Result<()> {
    let buf = load_codepoints(&args.path)?;
    let (ast, diagnostics) = thornc_par::parse(&buf);

    println!("{:#?}", ast);
    for diag in &diagnostics {
        eprintln!("{:?}: {} ({:?})", diag.phase, diag.message, diag.span);
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(DrvError::ParseFailed {
            path: args.path,
            count: diagnostics.len(),
        })
    }
}
