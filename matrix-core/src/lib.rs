//! # Matrix Core Library
//!
//! Dense `f64` matrices with dimension-checked arithmetic, a full-pivot LU
//! decomposition for inversion, and the `;`-delimited text codec.

// Declare modules
pub mod codec;
pub mod dense_matrix;
pub mod error;
pub mod lu;
pub mod traits;

// Re-export public types
pub use codec::{decode, decode_with, encode, DecodeMode};
pub use dense_matrix::DenseMatrix;
pub use error::{MatrixError, Result};
pub use lu::FullPivLu;
pub use traits::Matrix;
