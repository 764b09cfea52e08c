// src/summarize/jacobi.rs
//! Cyclic Jacobi eigen-decomposition of a real symmetric matrix.

use ndarray::Array2;

const MAX_SWEEPS: usize = 32;
const EPS: f64 = 1e-12;

/// Eigenvalues in descending order (ties by original index) and the matching
/// eigenvectors as columns.
#[derive(Debug, Clone)]
pub(crate) struct Eigen {
    pub values: Vec<f64>,
    pub vectors: Array2<f64>,
}

pub(crate) fn symmetric_eigen(m: &Array2<f64>) -> Eigen {
    let n = m.nrows();
    let mut a = m.clone();
    let mut v = Array2::<f64>::eye(n);

    let scale = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);
    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off <= EPS * EPS * scale {
            break;
        }

        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                // negligible next to both diagonal entries
                if apq.abs() <= f64::MIN_POSITIVE
                    || apq.abs() <= EPS * (a[[p, p]] * a[[q, q]]).abs().sqrt()
                {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                rotated = true;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
        if !rotated {
            break;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]).then(i.cmp(&j)));

    let values = order.iter().map(|&i| a[[i, i]].max(0.0)).collect();
    let mut vectors = Array2::<f64>::zeros((n, n));
    for (dst, &src) in order.iter().enumerate() {
        vectors.column_mut(dst).assign(&v.column(src));
    }
    Eigen { values, vectors }
}
