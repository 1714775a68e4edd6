//! Text program format: one binary literal per line.
//!
//! Everything from `#` to the end of a line is a comment. Blank lines are
//! skipped. A literal may carry a `0b` prefix and `_` digit separators.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ls8_core::MEMORY_BYTES;
use thiserror::Error;

/// Failure to turn a program file into a memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line holds something other than a binary literal.
    #[error("line {line}: `{text}` is not a binary literal")]
    InvalidLiteral {
        /// 1-based source line.
        line: usize,
        /// Offending text with the comment removed.
        text: String,
    },
    /// A literal does not fit in a byte.
    #[error("line {line}: `{text}` does not fit in a byte")]
    ValueOutOfRange {
        /// 1-based source line.
        line: usize,
        /// Offending text with the comment removed.
        text: String,
    },
    /// The image is larger than memory.
    #[error("program is {len} bytes but memory holds {max}", max = MEMORY_BYTES)]
    ProgramTooLarge {
        /// Number of bytes parsed.
        len: usize,
    },
}

/// Parses program text into a memory image in load order.
///
/// # Errors
///
/// Returns the first malformed or out-of-range literal, or
/// [`LoadError::ProgramTooLarge`] when the image exceeds memory.
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let code = raw_line.split('#').next().unwrap_or_default().trim();
        if code.is_empty() {
            continue;
        }
        image.push(parse_literal(code, index + 1)?);
    }

    if image.len() > MEMORY_BYTES {
        return Err(LoadError::ProgramTooLarge { len: image.len() });
    }
    log::debug!("parsed {} program bytes", image.len());
    Ok(image)
}

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_program`].
pub fn load_program_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&source)
}

fn parse_literal(code: &str, line: usize) -> Result<u8, LoadError> {
    let invalid = || LoadError::InvalidLiteral {
        line,
        text: code.to_string(),
    };

    let body = code
        .strip_prefix("0b")
        .or_else(|| code.strip_prefix("0B"))
        .unwrap_or(code);
    let digits: String = body.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
        return Err(invalid());
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > 8 {
        return Err(LoadError::ValueOutOfRange {
            line,
            text: code.to_string(),
        });
    }
    if significant.is_empty() {
        return Ok(0);
    }
    u8::from_str_radix(significant, 2).map_err(|_| invalid())
}
