//! Text encoding of matrices.
//!
//! Rows are separated by `;`, elements within a row by ASCII whitespace,
//! e.g. `"1 2;3 4"`. The text carries no header, so dimensions are always
//! supplied by the caller.

use std::fmt;

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

pub const ROW_DELIMITER: char = ';';

/// Magnitudes outside `[EXP_LOWER, EXP_UPPER)` are written in exponent form.
const EXP_LOWER: f64 = 1e-5;
const EXP_UPPER: f64 = 1e16;

/// How malformed or short input is handled when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Never fails. Missing rows and values stay zero, extra ones are ignored,
    /// and a non-numeric token ends consumption of its row.
    #[default]
    Lenient,
    /// Requires exactly `rows` rows of exactly `cols` numeric values.
    Strict,
}

/// Lenient decode into a `rows x cols` matrix.
///
/// Tokens are whitespace-separated and parsed whole, so `"1x"` is rejected
/// rather than read as `1`.
pub fn decode(text: &str, rows: usize, cols: usize) -> DenseMatrix {
    let mut matrix = DenseMatrix::zeros(rows, cols);
    fill_lenient(&mut matrix, text);
    matrix
}

fn fill_lenient(matrix: &mut DenseMatrix, text: &str) {
    let (rows, cols) = matrix.dims();
    for (row, segment) in text.split(ROW_DELIMITER).take(rows).enumerate() {
        for (col, token) in segment.split_ascii_whitespace().take(cols).enumerate() {
            match token.parse::<f64>() {
                Ok(value) => {
                    if let Some(slot) = matrix.get_mut(row, col) {
                        *slot = value;
                    }
                }
                Err(_) => {
                    log::warn!(
                        "Non-numeric token '{}' at row {}, column {}; rest of row left at zero",
                        token,
                        row,
                        col
                    );
                    break;
                }
            }
        }
    }
}

pub fn decode_with(text: &str, rows: usize, cols: usize, mode: DecodeMode) -> Result<DenseMatrix> {
    match mode {
        DecodeMode::Lenient => {
            let mut matrix = DenseMatrix::try_zeros(rows, cols)?;
            fill_lenient(&mut matrix, text);
            Ok(matrix)
        }
        DecodeMode::Strict => decode_strict(text, rows, cols),
    }
}

fn decode_strict(text: &str, rows: usize, cols: usize) -> Result<DenseMatrix> {
    // An empty text is the encoding of a matrix with no rows.
    let segments: Vec<&str> = if rows == 0 && text.trim().is_empty() {
        Vec::new()
    } else {
        text.split(ROW_DELIMITER).collect()
    };
    if segments.len() != rows {
        return Err(MatrixError::RowCount {
            expected: rows,
            found: segments.len(),
        });
    }

    // Grows with the text, not with the declared shape
    let mut data = Vec::new();
    for (row, segment) in segments.iter().enumerate() {
        let mut found = 0;
        for (col, token) in segment.split_ascii_whitespace().enumerate() {
            let value = token
                .parse::<f64>()
                .map_err(|_| MatrixError::InvalidElement {
                    row,
                    col,
                    token: token.to_string(),
                })?;
            data.push(value);
            found += 1;
        }
        if found != cols {
            return Err(MatrixError::RowLength {
                row,
                expected: cols,
                found,
            });
        }
    }
    DenseMatrix::from_data(rows, cols, data)
}

pub fn encode(matrix: &DenseMatrix) -> String {
    matrix.to_string()
}

/// Writes the `;`/space encoding. Both `f64` `Display` and `LowerExp` give the
/// shortest text that parses back to the same value, so `decode(encode(m))`
/// reproduces `m`.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                write!(f, "{}", ROW_DELIMITER)?;
            }
            for (col, value) in self.row(row).unwrap_or_default().iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write_value(f, *value)?;
            }
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(EXP_LOWER..EXP_UPPER).contains(&magnitude) {
        write!(f, "{:e}", value)
    } else {
        write!(f, "{}", value)
    }
}
