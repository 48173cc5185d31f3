use crate::core::validator::MAGIC_NUMBER;
use crate::domain::model::PixelMatrix;
use std::path::Path;

/// Renders `matrix` as P1 text with a `# <file name>` comment and a
/// `rows cols` size line.
pub fn serialize(matrix: &PixelMatrix, export_path: &str) -> String {
    let name = Path::new(export_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| export_path.to_string());

    let mut lines = Vec::with_capacity(matrix.row_count() + 3);
    lines.push(MAGIC_NUMBER.to_string());
    lines.push(format!("# {}", name));
    lines.push(format!("{} {}", matrix.row_count(), matrix.col_count()));
    for row in matrix.rows() {
        let tokens: Vec<String> = row.iter().map(|p| p.as_char().to_string()).collect();
        lines.push(tokens.join(" "));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parser, validator};

    #[test]
    fn test_serialize_layout() {
        let matrix = PixelMatrix::from_bits(&[[1u8, 0], [0, 1], [0, 1]]).unwrap();
        let text = serialize(&matrix, "/tmp/out/rotated.pbm");
        assert_eq!(text, "P1\n# rotated.pbm\n3 2\n1 0\n0 1\n0 1\n");
    }

    #[test]
    fn test_serialized_text_parses_back() {
        let matrix = PixelMatrix::from_bits(&[[1u8, 0, 1, 1], [0, 1, 0, 0]]).unwrap();
        let text = serialize(&matrix, "out.pbm");
        assert!(validator::validate(&text).is_ok());
        assert_eq!(parser::parse(&text).unwrap().matrix, matrix);
    }

    #[test]
    fn test_wide_rows_exceed_line_limit() {
        let matrix = PixelMatrix::from_bits(&[vec![1u8; 36]]).unwrap();
        let text = serialize(&matrix, "wide.pbm");
        assert!(validator::validate(&text).is_err());
    }
}
