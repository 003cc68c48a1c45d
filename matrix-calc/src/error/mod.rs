use derive_more::From;

use matrix_core::MatrixError;

pub type Result<T> = core::result::Result<T, CalcError>;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Prefix that marks a textual result as an error report.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, From)]
pub enum CalcError {
    // -- Externals
    #[from]
    Matrix(MatrixError),

    #[from]
    Json(serde_json::Error),

    /// Numeric selector outside 0..=3.
    InvalidOperation(i32),

    UnknownOperation(String),
}

impl CalcError {
    /// The text reported across the string boundary.
    pub fn to_error_text(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for CalcError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            CalcError::Matrix(err) => write!(fmt, "{err}"),
            CalcError::Json(err) => write!(fmt, "Invalid request: {err}"),
            CalcError::InvalidOperation(_) => write!(fmt, "Invalid operation code"),
            CalcError::UnknownOperation(name) => write!(fmt, "Unknown operation: {name}"),
        }
    }
}

impl std::error::Error for CalcError {}

// endregion: --- Error Boilerplate

// Convert custom error to JsValue for WASM boundary
#[cfg(feature = "wasm")]
impl From<CalcError> for JsValue {
    fn from(err: CalcError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
