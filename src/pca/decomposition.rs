//! Covariance and eigendecomposition primitives

use ndarray::{Array1, Array2, Axis};

/// Eigenvalue decomposition of a symmetric matrix
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Eigenvalues (sorted in descending order)
    pub eigenvalues: Array1<f64>,
    /// Eigenvectors (columns correspond to eigenvalues)
    pub eigenvectors: Array2<f64>,
}

impl EigenDecomposition {
    /// Decompose a symmetric matrix with power iteration and Hotelling
    /// deflation. Iterates are kept orthogonal to the eigenvectors already
    /// found, so trailing small eigenpairs stay accurate. Suitable for the
    /// small covariance matrices this crate works with; the closed-form
    /// route lives in [`crate::pca::ExactPca`].
    pub fn from_symmetric(matrix: &Array2<f64>) -> Self {
        let n = matrix.nrows();
        let mut eigenvalues = Array1::zeros(n);
        let mut eigenvectors = Array2::zeros((n, n));
        let mut deflated = matrix.clone();
        let mut found: Vec<Array1<f64>> = Vec::with_capacity(n);

        for i in 0..n {
            let (eigenvalue, eigenvector) = power_iteration(&deflated, &found, 500, 1e-12);

            eigenvalues[i] = eigenvalue;
            for j in 0..n {
                eigenvectors[[j, i]] = eigenvector[j];
            }

            // Deflate: A <- A - lambda * v * v^T
            let outer = outer_product(&eigenvector, &eigenvector);
            deflated = deflated - eigenvalue * outer;
            found.push(eigenvector);
        }

        // Deflation already yields descending magnitudes, but rounding can
        // swap near-equal eigenvalues; sort to keep the order contract.
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let sorted_eigenvalues = Array1::from_vec(indices.iter().map(|&i| eigenvalues[i]).collect());

        let mut sorted_eigenvectors = Array2::zeros((n, n));
        for (new_idx, &old_idx) in indices.iter().enumerate() {
            for j in 0..n {
                sorted_eigenvectors[[j, new_idx]] = eigenvectors[[j, old_idx]];
            }
        }

        Self {
            eigenvalues: sorted_eigenvalues,
            eigenvectors: sorted_eigenvectors,
        }
    }
}

/// Power iteration for the dominant eigenpair within the orthogonal
/// complement of `previous`
fn power_iteration(
    matrix: &Array2<f64>,
    previous: &[Array1<f64>],
    max_iter: usize,
    tol: f64,
) -> (f64, Array1<f64>) {
    let n = matrix.nrows();

    let mut v = Array1::from_vec(vec![1.0 / (n as f64).sqrt(); n]);
    orthogonalize(&mut v, previous);
    if normalize(&mut v) < 1e-8 {
        // The uniform start lies in the span of the found eigenvectors;
        // fall back to coordinate axes.
        for i in 0..n {
            v.fill(0.0);
            v[i] = 1.0;
            orthogonalize(&mut v, previous);
            if normalize(&mut v) >= 1e-8 {
                break;
            }
        }
    }

    let mut eigenvalue = 0.0;

    for _ in 0..max_iter {
        let mut new_v = matrix.dot(&v);

        // Rayleigh quotient: v has unit norm, so lambda = v^T A v
        let new_eigenvalue: f64 = v.dot(&new_v);

        orthogonalize(&mut new_v, previous);
        let norm = normalize(&mut new_v);
        if norm < 1e-12 {
            // The matrix annihilates the remaining subspace; v is an
            // eigenvector for a (numerically) zero eigenvalue.
            return (new_eigenvalue, v);
        }

        if (new_eigenvalue - eigenvalue).abs() < tol {
            return (new_eigenvalue, new_v);
        }

        eigenvalue = new_eigenvalue;
        v = new_v;
    }

    (eigenvalue, v)
}

/// Remove the components of `v` along each basis vector
fn orthogonalize(v: &mut Array1<f64>, basis: &[Array1<f64>]) {
    for b in basis {
        let proj = v.dot(b);
        for j in 0..v.len() {
            v[j] -= proj * b[j];
        }
    }
}

/// Scale `v` to unit norm, returning the norm it had
fn normalize(v: &mut Array1<f64>) -> f64 {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}

fn outer_product(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    let n = a.len();
    let m = b.len();
    let mut result = Array2::zeros((n, m));

    for i in 0..n {
        for j in 0..m {
            result[[i, j]] = a[i] * b[j];
        }
    }

    result
}

/// Sample covariance matrix (ddof = 1) of rows-as-observations data
pub fn covariance_matrix(data: &Array2<f64>) -> Array2<f64> {
    let n = data.nrows() as f64;
    let mean = data.mean_axis(Axis(0)).unwrap();

    let centered = data - &mean;

    centered.t().dot(&centered) / (n - 1.0)
}

/// Correlation matrix derived from a covariance matrix
pub fn correlation_from_covariance(cov: &Array2<f64>) -> Array2<f64> {
    let n = cov.nrows();
    let mut corr = Array2::zeros((n, n));

    let std_devs: Vec<f64> = (0..n).map(|i| cov[[i, i]].sqrt()).collect();

    for i in 0..n {
        for j in 0..n {
            if std_devs[i] > 1e-10 && std_devs[j] > 1e-10 {
                corr[[i, j]] = cov[[i, j]] / (std_devs[i] * std_devs[j]);
            } else {
                corr[[i, j]] = if i == j { 1.0 } else { 0.0 };
            }
        }
    }

    corr
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_eigen_decomposition() {
        let matrix = array![[4.0, 2.0], [2.0, 3.0]];
        let eigen = EigenDecomposition::from_symmetric(&matrix);

        // Exact eigenvalues are (7 +- sqrt(17)) / 2
        let disc = 17.0f64.sqrt();
        assert!((eigen.eigenvalues[0] - (7.0 + disc) / 2.0).abs() < 1e-8);
        assert!((eigen.eigenvalues[1] - (7.0 - disc) / 2.0).abs() < 1e-8);

        // Trace equals the sum of eigenvalues
        assert!((eigen.eigenvalues.sum() - 7.0).abs() < 1e-8);
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let matrix = array![[5.0, 1.0, 0.5], [1.0, 4.0, 0.25], [0.5, 0.25, 3.0]];
        let eigen = EigenDecomposition::from_symmetric(&matrix);

        for i in 0..3 {
            for j in 0..3 {
                let dot = eigen
                    .eigenvectors
                    .column(i)
                    .dot(&eigen.eigenvectors.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-6,
                    "columns {} and {} not orthonormal: {}",
                    i,
                    j,
                    dot
                );
            }
        }
    }

    #[test]
    fn test_rank_deficient_matrix() {
        // Rank-one matrix: eigenvalues 2, 0; the zero eigenpair still
        // comes back orthonormal
        let matrix = array![[1.0, 1.0], [1.0, 1.0]];
        let eigen = EigenDecomposition::from_symmetric(&matrix);

        assert!((eigen.eigenvalues[0] - 2.0).abs() < 1e-8);
        assert!(eigen.eigenvalues[1].abs() < 1e-8);

        let dot = eigen
            .eigenvectors
            .column(0)
            .dot(&eigen.eigenvectors.column(1));
        assert!(dot.abs() < 1e-8);
        let norm1 = eigen.eigenvectors.column(1).dot(&eigen.eigenvectors.column(1));
        assert!((norm1 - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_covariance_matrix() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let cov = covariance_matrix(&data);

        assert_eq!(cov.shape(), &[2, 2]);
        assert!((cov[[0, 1]] - cov[[1, 0]]).abs() < 1e-10);
        // Column variance of [1, 3, 5] with ddof = 1 is 4
        assert!((cov[[0, 0]] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_correlation_from_covariance() {
        let cov = array![[1.0, 0.5], [0.5, 1.0]];
        let corr = correlation_from_covariance(&cov);

        assert!((corr[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((corr[[1, 1]] - 1.0).abs() < 1e-10);
        assert!((corr[[0, 1]] - 0.5).abs() < 1e-10);
    }
}
