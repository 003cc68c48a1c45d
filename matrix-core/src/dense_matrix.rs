use serde::Serialize;

use crate::error::{MatrixError, Result};
use crate::lu::FullPivLu;
use crate::traits::Matrix;

/// Represents a dense matrix of `f64` stored in row-major order on the CPU.
///
/// The dimensions are fixed at construction; arithmetic always returns a new
/// matrix and never mutates either operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // Data stored row-major: data[row * cols + col]
}

impl DenseMatrix {
    /// Creates a zero-filled matrix from signed dimensions, as received at an
    /// integer boundary. Negative counts are rejected.
    pub fn new(rows: i64, cols: i64) -> Result<Self> {
        let (rows, cols) = Self::checked_dims(rows, cols)?;
        Self::try_zeros(rows, cols)
    }

    /// Converts signed dimensions to `usize`, rejecting negative counts and
    /// shapes whose element count overflows `usize`.
    pub fn checked_dims(rows: i64, cols: i64) -> Result<(usize, usize)> {
        let invalid = || MatrixError::InvalidDimension { rows, cols };
        let r = usize::try_from(rows).map_err(|_| invalid())?;
        let c = usize::try_from(cols).map_err(|_| invalid())?;
        element_count(r, c)?;
        Ok((r, c))
    }

    /// Creates a new DenseMatrix filled with zeros.
    /// Panics if the allocation fails; see [`DenseMatrix::try_zeros`].
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Zero-filled matrix that reports `TooLarge` instead of aborting when the
    /// storage cannot be allocated.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::TooLarge { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self { rows, cols, data })
    }

    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix.data[i * n + i] = 1.0;
        }
        matrix
    }

    /// Creates a new DenseMatrix from raw data, dimensions, assuming row-major order.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a DenseMatrix from a slice of rows. All rows must have the
    /// length of the first one.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|row| row.len() != cols) {
            return Err(MatrixError::DataLength {
                expected: rows.len() * cols,
                found: data.len(),
            });
        }
        Self::from_data(rows.len(), cols, data)
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns one row as a slice, or None if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.index_of(row, col).map(|idx| self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.index_of(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Gets the element at the specified row and column (mutable).
    /// Returns None if indices are out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        let idx = self.index_of(row, col).ok()?;
        self.data.get_mut(idx)
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(MatrixError::IndexOutOfRange { row, col })
        }
    }

    // --- Arithmetic ---

    pub fn add(&self, other: &DenseMatrix) -> Result<Self> {
        self.zip_with(other, "addition", |a, b| a + b)
    }

    pub fn subtract(&self, other: &DenseMatrix) -> Result<Self> {
        self.zip_with(other, "subtraction", |a, b| a - b)
    }

    /// Standard matrix product, shape (self.rows, other.cols).
    pub fn multiply(&self, other: &DenseMatrix) -> Result<Self> {
        self.product(other, "multiplication")
    }

    /// Right-multiplies by the inverse of `other`.
    ///
    /// Checks run in order: `other` square, `other` invertible, then
    /// `self.cols == other.rows`.
    pub fn divide(&self, other: &DenseMatrix) -> Result<Self> {
        if !other.is_square() {
            return Err(MatrixError::NotSquare {
                rows: other.rows,
                cols: other.cols,
            });
        }
        let inverse = other.inverse()?;
        self.product(&inverse, "division")
    }

    /// Inverse through a full-pivot LU decomposition.
    pub fn inverse(&self) -> Result<Self> {
        let lu = FullPivLu::new(self)?;
        log::debug!(
            "Inverting {}x{} matrix: rank {}, determinant {}",
            self.rows,
            self.cols,
            lu.rank(),
            lu.determinant()
        );
        lu.inverse()
    }

    fn zip_with(
        &self,
        other: &DenseMatrix,
        operation: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self> {
        if !self.same_shape(other) {
            return Err(self.mismatch(other, operation));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    fn product(&self, other: &DenseMatrix, operation: &'static str) -> Result<Self> {
        if self.cols != other.rows {
            return Err(self.mismatch(other, operation));
        }
        let mut result = Self::try_zeros(self.rows, other.cols)?;
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }
                result.data[i * other.cols + j] = sum;
            }
        }
        Ok(result)
    }

    fn mismatch(&self, other: &DenseMatrix, operation: &'static str) -> MatrixError {
        MatrixError::DimensionMismatch {
            operation,
            lhs: self.dims(),
            rhs: other.dims(),
        }
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatrixError::TooLarge { rows, cols })
}

impl Matrix for DenseMatrix {
    type Value = f64;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    // rows(), cols(), is_square() are provided by default impls in the trait
}
