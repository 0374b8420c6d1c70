//! L2-regularised logistic regression
//!
//! Full-batch gradient descent on sparse tf-idf rows. Deterministic: same
//! rows and config always give the same weights.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::logic::model::classifier::sigmoid;
use crate::logic::model::SparseVector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticConfig {
    /// Inverse regularisation strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the gradient norm falls below this
    pub tol: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 2000,
            tol: 1e-6,
        }
    }
}

/// One fitted decision row
#[derive(Debug, Clone)]
pub struct BinaryFit {
    pub weights: Array1<f64>,
    pub bias: f64,
    pub iterations: usize,
    pub final_loss: f64,
}

/// Mean log-loss plus the L2 penalty
pub fn objective(rows: &[SparseVector], targets: &[f64], weights: &Array1<f64>, bias: f64, c: f64) -> f64 {
    let n = rows.len().max(1) as f64;
    let data_loss: f64 = rows
        .iter()
        .zip(targets)
        .map(|(x, &y)| {
            let z = x.dot(weights) + bias;
            // log(1 + e^z) - y*z, computed stably
            let softplus = if z > 0.0 { z + (-z).exp().ln_1p() } else { z.exp().ln_1p() };
            softplus - y * z
        })
        .sum();
    data_loss / n + weights.dot(weights) / (2.0 * c * n)
}

/// Step size `1/L` from the Lipschitz bound of the objective's gradient:
/// log-loss curvature is at most `0.25 * (max |x|^2 + 1)` (bias included),
/// the penalty adds `1 / (C n)`.
pub fn step_size(rows: &[SparseVector], c: f64) -> f64 {
    let n = rows.len().max(1) as f64;
    let max_sq_norm = rows
        .iter()
        .map(|x| x.entries.iter().map(|&(_, v)| v * v).sum::<f64>())
        .fold(0.0, f64::max);
    1.0 / (0.25 * (max_sq_norm + 1.0) + 1.0 / (c * n))
}

/// Fit one row: `targets` are 1.0 for the positive class, 0.0 otherwise
pub fn fit_binary(rows: &[SparseVector], targets: &[f64], dim: usize, config: &LogisticConfig) -> BinaryFit {
    let n = rows.len().max(1) as f64;
    let step = step_size(rows, config.c);
    let mut weights = Array1::<f64>::zeros(dim);
    let mut bias = 0.0;
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        let mut grad_w = &weights / (config.c * n);
        let mut grad_b = 0.0;
        for (x, &y) in rows.iter().zip(targets) {
            let err = (sigmoid(x.dot(&weights) + bias) - y) / n;
            for &(i, v) in &x.entries {
                if i < dim {
                    grad_w[i] += err * v;
                }
            }
            grad_b += err;
        }

        let grad_norm = (grad_w.dot(&grad_w) + grad_b * grad_b).sqrt();
        if grad_norm < config.tol {
            break;
        }

        weights.scaled_add(-step, &grad_w);
        bias -= step * grad_b;
    }

    let final_loss = objective(rows, targets, &weights, bias, config.c);
    BinaryFit {
        weights,
        bias,
        iterations,
        final_loss,
    }
}
