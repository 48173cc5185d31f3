//! Quarter-turn rotations of a [`PixelMatrix`].
//!
//! Every supported angle is built from one primitive 90° step per direction,
//! applied at most three times:
//!
//! ```text
//! clockwise            counterclockwise
//!   0 | 360  identity    0 | -360  identity
//!   90       1 step      -90       1 step
//!   180      2 steps     -180      2 steps
//!   270      3 steps     -270      3 steps
//! ```
//!
//! For an `R x C` input the clockwise step yields a `C x R` matrix with
//! `out[i][j] = in[R-1-j][i]`; the counterclockwise step yields
//! `out[i][j] = in[j][C-1-i]`. The input is never modified.

use crate::domain::model::{Direction, PixelMatrix, Rotation};
use crate::utils::error::{PbmError, Result};

/// Rotates clockwise by 0, 90, 180, 270 or 360 degrees.
pub fn clockwise(matrix: &PixelMatrix, degrees: i32) -> Result<PixelMatrix> {
    rotate(matrix, directed(degrees, Direction::Clockwise)?)
}

/// Rotates counterclockwise by 0, -90, -180, -270 or -360 degrees.
pub fn counterclockwise(matrix: &PixelMatrix, degrees: i32) -> Result<PixelMatrix> {
    rotate(matrix, directed(degrees, Direction::Counterclockwise)?)
}

/// Applies `rotation.quarter_turns()` primitive steps in the rotation's direction.
pub fn rotate(matrix: &PixelMatrix, rotation: Rotation) -> Result<PixelMatrix> {
    let step = match rotation.direction() {
        Direction::Clockwise => quarter_turn_clockwise,
        Direction::Counterclockwise => quarter_turn_counterclockwise,
    };
    Ok(repeat(matrix, rotation.quarter_turns(), step))
}

// 0 belongs to both directions; every other angle only to the one its sign names.
fn directed(degrees: i32, direction: Direction) -> Result<Rotation> {
    let rotation = Rotation::from_degrees(degrees)?;
    if degrees != 0 && rotation.direction() != direction {
        return Err(PbmError::UnsupportedAngle { degrees });
    }
    Ok(rotation)
}

fn repeat(matrix: &PixelMatrix, turns: u8, step: fn(&PixelMatrix) -> PixelMatrix) -> PixelMatrix {
    let mut rotated = matrix.clone();
    for _ in 0..turns {
        rotated = step(&rotated);
    }
    rotated
}

/// Transpose of the row-reversed matrix.
pub fn quarter_turn_clockwise(matrix: &PixelMatrix) -> PixelMatrix {
    let rows = matrix.rows();
    let rotated = (0..matrix.col_count())
        .map(|col| rows.iter().rev().map(|row| row[col]).collect())
        .collect();
    PixelMatrix::from_rows_unchecked(rotated)
}

/// The clockwise step with every row, and then the row order, reversed.
pub fn quarter_turn_counterclockwise(matrix: &PixelMatrix) -> PixelMatrix {
    let mut rows = quarter_turn_clockwise(matrix).into_rows();
    for row in &mut rows {
        row.reverse();
    }
    rows.reverse();
    PixelMatrix::from_rows_unchecked(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> PixelMatrix {
        PixelMatrix::from_bits(rows).unwrap()
    }

    #[test]
    fn test_square_quarter_turn() {
        let m = matrix(&[&[0, 1], &[1, 0]]);
        assert_eq!(clockwise(&m, 90).unwrap().to_bits(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_non_square_quarter_turn() {
        let m = matrix(&[&[0, 1, 1], &[1, 0, 0]]);
        let rotated = clockwise(&m, 90).unwrap();
        assert_eq!(rotated.row_count(), 3);
        assert_eq!(rotated.col_count(), 2);
        assert_eq!(rotated.to_bits(), vec![vec![1, 0], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_clockwise_index_mapping() {
        let m = matrix(&[&[1, 0, 0, 0], &[0, 0, 1, 1], &[1, 1, 0, 1]]);
        let rotated = clockwise(&m, 90).unwrap();
        let r = m.row_count();
        for i in 0..rotated.row_count() {
            for j in 0..rotated.col_count() {
                assert_eq!(rotated.get(i, j), m.get(r - 1 - j, i));
            }
        }
    }

    #[test]
    fn test_counterclockwise_index_mapping() {
        let m = matrix(&[&[1, 0, 0, 0], &[0, 0, 1, 1], &[1, 1, 0, 1]]);
        let rotated = counterclockwise(&m, -90).unwrap();
        let c = m.col_count();
        assert_eq!(rotated.row_count(), 4);
        for i in 0..rotated.row_count() {
            for j in 0..rotated.col_count() {
                assert_eq!(rotated.get(i, j), m.get(j, c - 1 - i));
            }
        }
    }

    #[test]
    fn test_half_turn_mapping() {
        let m = matrix(&[&[1, 0, 0], &[0, 1, 1]]);
        for rotated in [clockwise(&m, 180).unwrap(), counterclockwise(&m, -180).unwrap()] {
            assert_eq!(rotated.dimensions(), m.dimensions());
            for i in 0..2 {
                for j in 0..3 {
                    assert_eq!(rotated.get(i, j), m.get(1 - i, 2 - j));
                }
            }
        }
    }

    #[test]
    fn test_three_quarters_match_opposite_direction() {
        let m = matrix(&[&[1, 0, 0], &[0, 1, 1]]);
        assert_eq!(clockwise(&m, 270).unwrap(), counterclockwise(&m, -90).unwrap());
        assert_eq!(counterclockwise(&m, -270).unwrap(), clockwise(&m, 90).unwrap());
    }

    #[test]
    fn test_identity_angles() {
        let m = matrix(&[&[1, 0, 0], &[0, 1, 1]]);
        assert_eq!(clockwise(&m, 0).unwrap(), m);
        assert_eq!(clockwise(&m, 360).unwrap(), m);
        assert_eq!(counterclockwise(&m, -360).unwrap(), m);
        assert_eq!(counterclockwise(&m, 0).unwrap(), m);
    }

    #[test]
    fn test_wrong_direction_or_angle_is_rejected() {
        let m = matrix(&[&[1]]);
        for degrees in [-90, 45, 450] {
            assert!(matches!(
                clockwise(&m, degrees),
                Err(PbmError::UnsupportedAngle { .. })
            ));
        }
        for degrees in [90, -45, 360] {
            assert!(matches!(
                counterclockwise(&m, degrees),
                Err(PbmError::UnsupportedAngle { .. })
            ));
        }
    }

    #[test]
    fn test_rotate_uses_direction() {
        let m = matrix(&[&[0, 1, 1], &[1, 0, 0]]);
        let rotation = Rotation::from_degrees(-90).unwrap();
        assert_eq!(
            rotate(&m, rotation).unwrap().to_bits(),
            vec![vec![1, 0], vec![1, 0], vec![0, 1]]
        );
    }

    #[test]
    fn test_rotate_applies_quarter_turns() {
        let m = matrix(&[&[0, 1, 1], &[1, 0, 0]]);
        let rotation = Rotation::from_degrees(270).unwrap();
        assert_eq!(rotation.quarter_turns(), 3);

        let mut expected = m.clone();
        for _ in 0..rotation.quarter_turns() {
            expected = quarter_turn_clockwise(&expected);
        }
        assert_eq!(rotate(&m, rotation).unwrap(), expected);
        assert_eq!(rotate(&m, Rotation::from_degrees(-360).unwrap()).unwrap(), m);
    }
}
