//! Square matrix storage and the naive multiply kernel.
//!
//! A [`Matrix`] is one contiguous row-major buffer: cell (i, j) lives at
//! `i * n + j`. Its dimension is fixed at creation.

pub mod fill;
pub mod naive_ijk;

use crate::error::{BenchError, Result};

/// Owned n×n matrix of `f64`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Allocate a zero-filled n×n matrix.
    ///
    /// Fails on `n == 0`, on `n * n` overflow, or when the allocator
    /// refuses the reservation.
    ///
    /// ```
    /// use matmul_bench::Matrix;
    ///
    /// let m = Matrix::new(3).unwrap();
    /// assert_eq!(m.size(), 3);
    /// assert_eq!(m.as_slice().len(), 9);
    /// assert!(Matrix::new(0).is_err());
    /// ```
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(BenchError::InvalidSize(n));
        }
        let len = n.checked_mul(n).ok_or(BenchError::Allocation { n })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BenchError::Allocation { n })?;
        data.resize(len, 0.0);

        Ok(Self { n, data })
    }

    /// Wrap an existing row-major buffer of length `n * n`.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(BenchError::InvalidSize(n));
        }
        let expected = n.checked_mul(n).ok_or(BenchError::Allocation { n })?;
        if data.len() != expected {
            return Err(BenchError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Dimension of the matrix (rows == columns).
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
