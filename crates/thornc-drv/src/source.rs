//! Reads a UTF-8 source file from disk and transcodes it into the
//! zero-terminated UTF-32 code-point buffer the lexer consumes.

use std::path::Path;

use crate::error::{DrvError, Result};

pub fn load_codepoints(path: &Path) -> Result<Vec<u32>> {
    let bytes = std::fs::read(path).map_err(|source| DrvError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let text = std::str::from_utf8(&bytes).map_err(|source| DrvError::NotUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.chars().map(|c| c as u32).chain(std::iter::once(0)).collect())
}
