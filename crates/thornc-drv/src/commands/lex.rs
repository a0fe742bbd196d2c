//! `thornc lex FILE` — dump the token stream for a source file.

use std::path::PathBuf;

use thornc_lex::{Lexer, TokenKind};
use thornc_util::Handler;

use crate::error::{DrvError, Result};
use crate::source::load_codepoints;

pub struct LexArgs {
    pub path: PathBuf,
}

pub fn run_lex(args: LexArgs) -> Result<()> {
    let buf = load_codepoints(&args.path)?;
    let mut handler = Handler::new();
    let mut lexer = Lexer::new(&buf, &mut handler);

    loop {
        let token = lexer.next_token();
        let is_eof = matches!(token.kind, TokenKind::Eof);
        println!("{:?}", token);
        if is_eof {
            break;
        }
    }

    let diagnostics = handler.into_diagnostics();
    for diag in &diagnostics {
        eprintln!("{:?}: {} ({:?})", diag.phase, diag.message, diag.span);
    }
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(DrvError::LexFailed {
            path: args.path,
            count: diagnostics.len(),
        })
    }
}
