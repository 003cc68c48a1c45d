//! Operation dispatcher over `matrix-core`.
//!
//! Takes two `;`-delimited matrix texts with their declared shapes and an
//! operation selector, and returns the encoded result. Failures never cross
//! the text boundary as errors: they come back as `"Error: <message>"`.

mod operation;

pub mod error;
pub mod model;
pub use error::{CalcError, ERROR_PREFIX};
pub use model::{OperationRequest, OperationResponse, OperationSelector};
pub use operation::Operation;

use matrix_core::DenseMatrix;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

// --- WASM Setup ---
// Initialize logging and panic hook for WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn wasm_init() {
    // Only run this initialization once.
    static START: std::sync::Once = std::sync::Once::new();
    START.call_once(|| {
        // Use `wasm_logger` for Rust logs -> console.log
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
        // Redirect panics to console.error
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        log::info!("Matrix calculator WASM module initialized.");
    });
}

/// Typed entry point: applies `operation` to two already decoded matrices.
pub fn perform(a: &DenseMatrix, b: &DenseMatrix, operation: Operation) -> error::Result<DenseMatrix> {
    operation.apply(a, b)
}

/// Text boundary. `operation` codes: 0 add, 1 subtract, 2 multiply, 3 divide.
///
/// Matrix text is decoded leniently; the result is either an encoded matrix
/// or a string starting with [`ERROR_PREFIX`].
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn perform_operation(
    matrix_a: &str,
    matrix_b: &str,
    rows_a: i32,
    cols_a: i32,
    rows_b: i32,
    cols_b: i32,
    operation: i32,
) -> String {
    OperationRequest {
        matrix_a: matrix_a.to_string(),
        matrix_b: matrix_b.to_string(),
        rows_a,
        cols_a,
        rows_b,
        cols_b,
        operation: OperationSelector::Code(operation),
        strict: false,
    }
    .evaluate_to_text()
}

/// Same as [`perform_operation`] but takes an [`OperationRequest`] as JSON.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn perform_request_json(json: &str) -> String {
    match serde_json::from_str::<OperationRequest>(json) {
        Ok(request) => request.evaluate_to_text(),
        Err(err) => CalcError::from(err).to_error_text(),
    }
}

/// True when `text` is an error report rather than an encoded matrix.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn is_error(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}
