//! Syntax checks for plain (P1) PBM documents.
//!
//! Only the shape of the text is inspected here. Whether the pixel rows form
//! a rectangle is decided by the parser.

use crate::utils::error::{PbmError, Result};

pub const MAGIC_NUMBER: &str = "P1";
pub const COMMENT_MARKER: char = '#';
/// Plain PBM lines should not exceed 70 characters, white space included.
pub const MAX_LINE_LENGTH: usize = 70;

/// Splits a document into `(line_number, line)` pairs, 1-based.
///
/// A trailing `\r` is removed from every line and the empty line produced by
/// a final newline is dropped.
pub fn document_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .collect()
}

pub fn validate(text: &str) -> Result<()> {
    let lines = document_lines(text);

    if lines.len() <= 1 {
        return Err(PbmError::EmptyOrTooShort);
    }

    let (_, header) = lines[0];
    if !header.contains(MAGIC_NUMBER) {
        return Err(PbmError::BadMagicNumber {
            found: header.chars().take(16).collect(),
        });
    }

    for &(line_number, line) in &lines[1..] {
        let Some(first) = line.chars().next() else {
            continue;
        };

        if first.is_alphabetic() && !line.contains(MAGIC_NUMBER) {
            return Err(PbmError::MissingCommentMarker { line: line_number });
        }

        if first.is_ascii_digit() {
            let length = line.chars().count();
            if length > MAX_LINE_LENGTH {
                return Err(PbmError::LineTooLong {
                    line: line_number,
                    length,
                });
            }
        }
    }

    tracing::debug!("Validated {} lines of P1 text", lines.len());
    Ok(())
}
