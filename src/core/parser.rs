//! Pixel matrix extraction from validated P1 text.

use crate::core::rotation;
use crate::core::validator::{document_lines, COMMENT_MARKER, MAGIC_NUMBER};
use crate::domain::model::{Dimensions, Pixel, PixelMatrix, Rotation};
use crate::utils::error::{PbmError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub matrix: PixelMatrix,
    /// Size as written in the file, if one was found.
    pub declared: Option<(usize, usize)>,
}

/// Parses the image and rotates it by `degrees`; negative angles turn
/// counterclockwise.
pub fn parse_and_rotate(text: &str, degrees: i32) -> Result<PixelMatrix> {
    let rotation = Rotation::from_degrees(degrees)?;
    let ParsedImage { matrix, .. } = parse(text)?;
    tracing::debug!("Parsed {} image", matrix.dimensions());

    rotation::rotate(&matrix, rotation)
}

pub fn parse(text: &str) -> Result<ParsedImage> {
    let lines = document_lines(text);
    let Some((&(_, header), rest)) = lines.split_first() else {
        return Err(PbmError::NoImageData);
    };

    let body: Vec<(usize, &str)> = rest
        .iter()
        .copied()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(COMMENT_MARKER)
        })
        .collect();

    // "P1 2 2" carries the size on the magic number line.
    if let Some(size) = size_after_magic(header) {
        return build(pixel_rows(&body)?, Some(size));
    }

    if let Some((&(_, first), following)) = body.split_first() {
        if let Some(size) = parse_size_tokens(first.split_whitespace()) {
            // "0 1" may be a size or the first row of a two column image;
            // it is a size only when the rows after it agree.
            let following_rows = pixel_rows(following)?;
            if !is_binary_row(first) || size_fits(size, &following_rows) {
                return build(following_rows, Some(size));
            }
        }
    }

    build(pixel_rows(&body)?, None)
}

fn build(rows: Vec<Vec<Pixel>>, declared: Option<(usize, usize)>) -> Result<ParsedImage> {
    if rows.is_empty() {
        return Err(PbmError::NoImageData);
    }

    let matrix = PixelMatrix::new(rows)?;
    if let Some(size) = declared {
        check_declared_size(size, matrix.dimensions());
    }

    Ok(ParsedImage { matrix, declared })
}

/// Lines starting with `0` or `1`, tokenised on white space.
fn pixel_rows(lines: &[(usize, &str)]) -> Result<Vec<Vec<Pixel>>> {
    lines
        .iter()
        .filter(|(_, line)| line.starts_with(['0', '1']))
        .map(|&(line_number, line)| {
            line.split_whitespace()
                .map(|token| {
                    Pixel::from_token(token).ok_or_else(|| PbmError::InvalidPixel {
                        line: line_number,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

fn is_binary_row(line: &str) -> bool {
    line.starts_with(['0', '1']) && line.split_whitespace().all(|t| Pixel::from_token(t).is_some())
}

fn size_fits(size: (usize, usize), rows: &[Vec<Pixel>]) -> bool {
    match rows.first() {
        Some(first) => size == (rows.len(), first.len()) || size == (first.len(), rows.len()),
        None => false,
    }
}

fn size_after_magic(header: &str) -> Option<(usize, usize)> {
    let mut tokens = header.split_whitespace().skip_while(|t| *t != MAGIC_NUMBER);
    tokens.next()?;
    parse_size_tokens(tokens)
}

fn parse_size_tokens<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<(usize, usize)> {
    let first = tokens.next()?.parse().ok()?;
    let second = tokens.next()?.parse().ok()?;
    match tokens.next() {
        None => Some((first, second)),
        Some(_) => None,
    }
}

// Files written by this tool say "rows cols"; other encoders say "width height".
fn check_declared_size(declared: (usize, usize), actual: Dimensions) {
    let rows_cols = declared == (actual.rows, actual.cols);
    let width_height = declared == (actual.cols, actual.rows);
    if !rows_cols && !width_height {
        tracing::warn!(
            "Declared size {} {} does not match the {} pixel data",
            declared.0,
            declared.1,
            actual
        );
    }
}
