//! Coordinate-format and compressed-row sparse matrices
//!
//! [`CooMatrix`] is the persisted form: entries keep the order in which the
//! projection emitted them. [`CsrMatrix`] is derived on demand for lookups and
//! row-major iteration.

use serde::{Deserialize, Serialize};

use super::SparseError;

/// Square N×N matrix in coordinate format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooMatrix {
    n: u32,
    rows: Vec<u32>,
    cols: Vec<u32>,
    weights: Vec<f64>,
}

impl CooMatrix {
    pub fn new(n: u32) -> Self {
        Self {
            n,
            rows: Vec::new(),
            cols: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn from_triplets(
        n: u32,
        rows: Vec<u32>,
        cols: Vec<u32>,
        weights: Vec<f64>,
    ) -> Result<Self, SparseError> {
        if rows.len() != cols.len() || rows.len() != weights.len() {
            return Err(SparseError::LengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
                weights: weights.len(),
            });
        }
        if let Some((&row, &col)) = rows.iter().zip(&cols).find(|(r, c)| **r >= n || **c >= n) {
            return Err(SparseError::OutOfBounds { row, col, n });
        }
        Ok(Self {
            n,
            rows,
            cols,
            weights,
        })
    }

    pub fn push(&mut self, row: u32, col: u32, weight: f64) -> Result<(), SparseError> {
        if row >= self.n || col >= self.n {
            return Err(SparseError::OutOfBounds { row, col, n: self.n });
        }
        self.rows.push(row);
        self.cols.push(col);
        self.weights.push(weight);
        Ok(())
    }

    /// Matrix dimension (rows = cols = N)
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Number of stored entries, explicit zeros included
    pub fn nnz(&self) -> usize {
        self.weights.len()
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn cols(&self) -> &[u32] {
        &self.cols
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Entries in storage order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.weights)
            .map(|((&r, &c), &w)| (r, c, w))
    }

    /// Compressed-row form; duplicate coordinates are summed
    pub fn to_csr(&self) -> CsrMatrix {
        let n = self.n as usize;
        let mut order: Vec<usize> = (0..self.nnz()).collect();
        order.sort_by_key(|&k| (self.rows[k], self.cols[k]));

        let mut indptr = vec![0usize; n + 1];
        let mut indices: Vec<u32> = Vec::with_capacity(order.len());
        let mut data: Vec<f64> = Vec::with_capacity(order.len());
        let mut last: Option<(u32, u32)> = None;

        for k in order {
            let coord = (self.rows[k], self.cols[k]);
            if last == Some(coord) {
                if let Some(w) = data.last_mut() {
                    *w += self.weights[k];
                }
                continue;
            }
            last = Some(coord);
            indptr[coord.0 as usize + 1] += 1;
            indices.push(coord.1);
            data.push(self.weights[k]);
        }
        for i in 0..n {
            indptr[i + 1] += indptr[i];
        }

        CsrMatrix {
            n: self.n,
            indptr,
            indices,
            data,
        }
    }

    /// Entries with a nonzero weight, row-major with ascending columns
    pub fn nonzero_row_major(&self) -> Vec<(u32, u32, f64)> {
        self.to_csr().iter().filter(|&(_, _, w)| w != 0.0).collect()
    }

    /// Every stored (i, j) has a matching (j, i) of equal weight
    pub fn is_symmetric(&self) -> bool {
        let csr = self.to_csr();
        let symmetric = csr.iter().all(|(r, c, w)| csr.get(c, r) == Some(w));
        symmetric
    }
}

/// Square N×N matrix in compressed sparse row format
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n: u32,
    indptr: Vec<usize>,
    indices: Vec<u32>,
    data: Vec<f64>,
}

impl CsrMatrix {
    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.n {
            return None;
        }
        let (start, end) = (self.indptr[row as usize], self.indptr[row as usize + 1]);
        self.indices[start..end]
            .binary_search(&col)
            .ok()
            .map(|k| self.data[start + k])
    }

    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let (start, end) = if row < self.n {
            (self.indptr[row as usize], self.indptr[row as usize + 1])
        } else {
            (0, 0)
        };
        self.indices[start..end]
            .iter()
            .copied()
            .zip(self.data[start..end].iter().copied())
    }

    /// All entries, row-major with ascending columns
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        (0..self.n).flat_map(move |r| self.row(r).map(move |(c, w)| (r, c, w)))
    }
}
