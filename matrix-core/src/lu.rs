//! LU decomposition with complete (row and column) pivoting.
//!
//! Factors a square matrix as `P * A * Q = L * U` where `P` and `Q` are
//! permutations, `L` is unit lower triangular and `U` is upper triangular.
//! Full pivoting makes the diagonal of `U` non-increasing in magnitude, so the
//! numerical rank can be read off by comparing each pivot against the largest
//! one.

use crate::dense_matrix::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::Matrix;

#[derive(Debug, Clone)]
pub struct FullPivLu {
    n: usize,
    /// L (strictly below the diagonal, unit diagonal implied) and U packed row-major.
    lu: Vec<f64>,
    /// `row_perm[k]` is the original row now at position k.
    row_perm: Vec<usize>,
    /// `col_perm[k]` is the original column now at position k.
    col_perm: Vec<usize>,
    transpositions: usize,
    max_pivot: f64,
}

impl FullPivLu {
    pub fn new(matrix: &DenseMatrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }

        let n = matrix.rows();
        let mut lu = matrix.data().to_vec();
        let mut row_perm: Vec<usize> = (0..n).collect();
        let mut col_perm: Vec<usize> = (0..n).collect();
        let mut transpositions = 0;
        let mut max_pivot = 0.0f64;

        for k in 0..n {
            // Largest magnitude in the trailing (n-k)x(n-k) block
            let (mut p, mut q, mut biggest) = (k, k, 0.0f64);
            for i in k..n {
                for j in k..n {
                    let v = lu[i * n + j].abs();
                    if v > biggest {
                        biggest = v;
                        p = i;
                        q = j;
                    }
                }
            }
            if k == 0 {
                max_pivot = biggest;
            }
            if biggest == 0.0 {
                // Remaining block is exactly zero, nothing left to eliminate.
                break;
            }

            if p != k {
                for j in 0..n {
                    lu.swap(k * n + j, p * n + j);
                }
                row_perm.swap(k, p);
                transpositions += 1;
            }
            if q != k {
                for i in 0..n {
                    lu.swap(i * n + k, i * n + q);
                }
                col_perm.swap(k, q);
                transpositions += 1;
            }

            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let mult = lu[i * n + k] / pivot;
                lu[i * n + k] = mult;
                for j in (k + 1)..n {
                    lu[i * n + j] -= mult * lu[k * n + j];
                }
            }
        }

        Ok(Self {
            n,
            lu,
            row_perm,
            col_perm,
            transpositions,
            max_pivot,
        })
    }

    /// Pivots with magnitude at or below `threshold() * max_pivot` count as zero.
    pub fn threshold(&self) -> f64 {
        self.n as f64 * f64::EPSILON
    }

    pub fn rank(&self) -> usize {
        let cutoff = self.threshold() * self.max_pivot;
        (0..self.n)
            .filter(|&k| self.lu[k * self.n + k].abs() > cutoff)
            .count()
    }

    pub fn is_invertible(&self) -> bool {
        self.rank() == self.n
    }

    pub fn determinant(&self) -> f64 {
        let product: f64 = (0..self.n).map(|k| self.lu[k * self.n + k]).product();
        if self.transpositions % 2 == 0 {
            product
        } else {
            -product
        }
    }

    /// Solves `A x = b` for a single right-hand side.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        if b.len() != self.n {
            return Err(MatrixError::DataLength {
                expected: self.n,
                found: b.len(),
            });
        }
        if !self.is_invertible() {
            return Err(MatrixError::Singular);
        }
        Ok(self.solve_unchecked(b))
    }

    pub fn inverse(&self) -> Result<DenseMatrix> {
        if !self.is_invertible() {
            return Err(MatrixError::Singular);
        }
        let n = self.n;
        let mut inverse = vec![0.0; n * n];
        let mut e = vec![0.0; n];
        for j in 0..n {
            e.iter_mut().for_each(|v| *v = 0.0);
            e[j] = 1.0;
            let column = self.solve_unchecked(&e);
            for (i, value) in column.into_iter().enumerate() {
                inverse[i * n + j] = value;
            }
        }
        DenseMatrix::from_data(n, n, inverse)
    }

    fn solve_unchecked(&self, b: &[f64]) -> Vec<f64> {
        let n = self.n;
        let mut y: Vec<f64> = self.row_perm.iter().map(|&r| b[r]).collect();

        // Forward substitution, L has a unit diagonal
        for i in 0..n {
            let mut sum = y[i];
            for j in 0..i {
                sum -= self.lu[i * n + j] * y[j];
            }
            y[i] = sum;
        }
        // Back substitution with U
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.lu[i * n + j] * y[j];
            }
            y[i] = sum / self.lu[i * n + i];
        }

        let mut x = vec![0.0; n];
        for (k, &c) in self.col_perm.iter().enumerate() {
            x[c] = y[k];
        }
        x
    }
}
