//! Pearson correlation between metric weights of one cycle
//!
//! Matrices are aligned on the union of their stored coordinates; a
//! coordinate missing from one matrix counts as weight 0 there.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::features::projection::Metric;
use crate::features::sparse::CooMatrix;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("{metric} matrix is {found}x{found}, expected {expected}x{expected}")]
    ShapeMismatch {
        metric: Metric,
        expected: u32,
        found: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// Row-major, `metrics.len()` squared
    pub values: Vec<Vec<f64>>,
    /// Aligned coordinates the correlation was computed over
    pub samples: usize,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|&m| m == a)?;
        let j = self.metrics.iter().position(|&m| m == b)?;
        Some(self.values[i][j])
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>16}", "")?;
        for m in &self.metrics {
            write!(f, "{:>16}", m.as_str())?;
        }
        writeln!(f)?;
        for (m, row) in self.metrics.iter().zip(&self.values) {
            write!(f, "{:>16}", m.as_str())?;
            for v in row {
                write!(f, "{:>16.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn metric_correlation(
    matrices: &[(Metric, &CooMatrix)],
) -> Result<CorrelationMatrix, CorrelationError> {
    let n = matrices.first().map(|(_, m)| m.n()).unwrap_or(0);
    if let Some((metric, m)) = matrices.iter().find(|(_, m)| m.n() != n) {
        return Err(CorrelationError::ShapeMismatch {
            metric: *metric,
            expected: n,
            found: m.n(),
        });
    }

    let csr: Vec<_> = matrices.iter().map(|(_, m)| m.to_csr()).collect();
    let mut coords: Vec<(u32, u32)> = csr
        .iter()
        .flat_map(|m| m.iter().map(|(r, c, _)| (r, c)))
        .collect();
    coords.sort_unstable();
    coords.dedup();

    let columns: Vec<Vec<f64>> = csr
        .iter()
        .map(|m| {
            coords
                .iter()
                .map(|&(r, c)| m.get(r, c).unwrap_or(0.0))
                .collect()
        })
        .collect();

    let k = matrices.len();
    let mut values = vec![vec![0.0; k]; k];
    for i in 0..k {
        values[i][i] = 1.0;
        for j in i + 1..k {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        metrics: matrices.iter().map(|(m, _)| *m).collect(),
        values,
        samples: coords.len(),
    })
}

/// NaN when either side has zero variance
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    if x.is_empty() {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(weights: &[f64]) -> CooMatrix {
        let mut m = CooMatrix::new(4);
        for (k, &w) in weights.iter().enumerate() {
            m.push(k as u32, 3, w).unwrap();
        }
        m
    }

    #[test]
    fn test_linear_metrics_correlate_perfectly() {
        let a = matrix(&[1.0, 2.0, 3.0]);
        let b = matrix(&[2.0, 4.0, 6.0]);
        let c = matrix(&[3.0, 2.0, 1.0]);
        let corr = metric_correlation(&[
            (Metric::Jaccard, &a),
            (Metric::Cosine, &b),
            (Metric::Adamic, &c),
        ])
        .unwrap();

        assert_eq!(corr.samples, 3);
        assert!((corr.get(Metric::Jaccard, Metric::Cosine).unwrap() - 1.0).abs() < 1e-12);
        assert!((corr.get(Metric::Cosine, Metric::Adamic).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(corr.get(Metric::Adamic, Metric::Adamic), Some(1.0));
    }

    #[test]
    fn test_constant_metric_is_nan_off_diagonal() {
        let a = matrix(&[1.0, 2.0, 3.0]);
        let flat = matrix(&[5.0, 5.0, 5.0]);
        let corr = metric_correlation(&[(Metric::Jaccard, &a), (Metric::Affinity, &flat)]).unwrap();

        assert!(corr.values[0][1].is_nan());
        assert_eq!(corr.values[1][1], 1.0);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let a = matrix(&[1.0]);
        let b = CooMatrix::new(7);
        assert_eq!(
            metric_correlation(&[(Metric::Jaccard, &a), (Metric::Cosine, &b)]).unwrap_err(),
            CorrelationError::ShapeMismatch {
                metric: Metric::Cosine,
                expected: 4,
                found: 7
            }
        );
    }
}
