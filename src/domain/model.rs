use crate::utils::error::{PbmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single P1 sample. `1` is ink, `0` is background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    White,
    Black,
}

impl Pixel {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(Pixel::White),
            "1" => Some(Pixel::Black),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Pixel::White => '0',
            Pixel::Black => '1',
        }
    }
}

impl From<bool> for Pixel {
    fn from(black: bool) -> Self {
        if black {
            Pixel::Black
        } else {
            Pixel::White
        }
    }
}

/// Rectangular grid of pixels, at least 1x1, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    rows: Vec<Vec<Pixel>>,
}

impl PixelMatrix {
    /// Builds a matrix, rejecting empty input and rows of differing length.
    pub fn new(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(PbmError::NoImageData),
        };

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(PbmError::RaggedRows {
                row: index + 1,
                expected,
                found: row.len(),
            });
        }

        Ok(Self { rows })
    }

    // Callers guarantee a non-empty rectangle.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<Pixel>>) -> Self {
        debug_assert!(!rows.is_empty() && rows.iter().all(|r| r.len() == rows[0].len()));
        Self { rows }
    }

    /// Convenience constructor from `0`/`1` values; anything non-zero is black.
    pub fn from_bits<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|bit| Pixel::from(*bit != 0)).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.row_count(),
            cols: self.col_count(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Pixel>> {
        self.rows
    }

    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|p| (*p == Pixel::Black) as u8).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

/// Angles accepted on the command surface.
pub const SUPPORTED_DEGREES: [i32; 9] = [0, 90, 180, 270, 360, -90, -180, -270, -360];

/// A validated rotation: a direction and a number of quarter turns (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    degrees: i32,
    direction: Direction,
    quarter_turns: u8,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if !SUPPORTED_DEGREES.contains(&degrees) {
            return Err(PbmError::UnsupportedAngle { degrees });
        }

        let direction = if degrees >= 0 {
            Direction::Clockwise
        } else {
            Direction::Counterclockwise
        };

        Ok(Self {
            degrees,
            direction,
            quarter_turns: ((degrees.unsigned_abs() / 90) % 4) as u8,
        })
    }

    pub fn degrees(&self) -> i32 {
        self.degrees
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn quarter_turns(&self) -> u8 {
        self.quarter_turns
    }

    pub fn is_identity(&self) -> bool {
        self.quarter_turns == 0
    }
}

/// Summary of one completed rotation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationReport {
    pub input_path: String,
    pub output_path: String,
    pub degrees: i32,
    pub direction: Direction,
    pub input_dimensions: Dimensions,
    pub output_dimensions: Dimensions,
}
