use thiserror::Error;

pub type Result<T> = core::result::Result<T, MatrixError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Invalid matrix dimensions: {rows}x{cols}")]
    InvalidDimension { rows: i64, cols: i64 },

    #[error("Matrix of {rows}x{cols} is too large to allocate")]
    TooLarge { rows: usize, cols: usize },

    #[error("Data length ({found}) does not match dimensions ({expected} elements)")]
    DataLength { expected: usize, found: usize },

    #[error("Matrix indices out of range")]
    IndexOutOfRange { row: usize, col: usize },

    /// `operation` is the noun used in the message, e.g. "addition".
    #[error("Matrix dimensions don't match for {operation}")]
    DimensionMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("Divisor matrix must be square for division")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix is singular, cannot be inverted")]
    Singular,

    // Strict decode only
    #[error("Invalid value at Matrix[{}][{}]: '{token}'", .row + 1, .col + 1)]
    InvalidElement {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("Row {} has {found} values, expected {expected}", .row + 1)]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Matrix text has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
}

#[cfg(feature = "wasm")]
impl From<MatrixError> for wasm_bindgen::JsValue {
    fn from(err: MatrixError) -> Self {
        Self::from_str(&err.to_string())
    }
}
