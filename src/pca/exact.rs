//! Library-backed PCA using nalgebra's closed-form symmetric eigensolver

use super::decomposition::covariance_matrix;
use crate::data::standardize;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// PCA fitted through `nalgebra::SymmetricEigen`, the reference the
/// hand-rolled [`super::PcaModel`] is checked against.
///
/// With `whiten` set, each score column is divided by the standard
/// deviation of its component so the transformed output has unit variance
/// per component.
#[derive(Debug, Clone)]
pub struct ExactPca {
    /// Number of components retained
    pub n_components: usize,
    /// Projection matrix (eigenvectors as columns, D x K)
    pub components: Array2<f64>,
    /// Eigenvalue per retained component
    pub explained_variance: Array1<f64>,
    /// Whether transform output is whitened
    pub whiten: bool,
    /// Per-feature mean fitted during standardization
    pub mean: Array1<f64>,
    /// Per-feature scale fitted during standardization
    pub scale: Array1<f64>,
}

impl ExactPca {
    /// Fit on a raw observations-by-features matrix
    pub fn fit(data: &Array2<f64>, n_components: Option<usize>, whiten: bool) -> Self {
        let (n_samples, n_features) = data.dim();
        let n_components = n_components
            .unwrap_or(n_features)
            .min(n_features)
            .min(n_samples);

        let (standardized, mean, std) = standardize(data);
        let scale = std.mapv(|s| if s > 1e-10 { s } else { 1.0 });

        let cov = covariance_matrix(&standardized);
        let cov_na = DMatrix::from_fn(n_features, n_features, |i, j| cov[[i, j]]);
        let eigen = cov_na.symmetric_eigen();

        // nalgebra does not order the eigenpairs
        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| {
            eigen.eigenvalues[b]
                .partial_cmp(&eigen.eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut components = Array2::zeros((n_features, n_components));
        let mut explained_variance = Array1::zeros(n_components);
        for (new_idx, &old_idx) in order.iter().take(n_components).enumerate() {
            explained_variance[new_idx] = eigen.eigenvalues[old_idx];
            for row in 0..n_features {
                components[[row, new_idx]] = eigen.eigenvectors[(row, old_idx)];
            }
        }

        Self {
            n_components,
            components,
            explained_variance,
            whiten,
            mean,
            scale,
        }
    }

    /// Project data into component space, whitening if configured
    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        let standardized = (data - &self.mean) / &self.scale;
        let mut scores = standardized.dot(&self.components);

        if self.whiten {
            for j in 0..self.n_components {
                let std_pc = self.explained_variance[j].max(0.0).sqrt();
                if std_pc > 1e-12 {
                    scores.column_mut(j).mapv_inplace(|v| v / std_pc);
                }
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Axis};

    fn toy_data() -> Array2<f64> {
        array![
            [2.5, 2.4],
            [0.5, 0.7],
            [2.2, 2.9],
            [1.9, 2.2],
            [3.1, 3.0],
            [2.3, 2.7],
            [2.0, 1.6],
            [1.0, 1.1],
            [1.5, 1.6],
            [1.1, 0.9]
        ]
    }

    #[test]
    fn test_eigenvalues_descending_and_sum_to_trace() {
        let data = toy_data();
        let pca = ExactPca::fit(&data, None, false);

        assert!(pca.explained_variance[0] >= pca.explained_variance[1]);

        let n = data.nrows() as f64;
        let expected_trace = 2.0 * n / (n - 1.0);
        assert!((pca.explained_variance.sum() - expected_trace).abs() < 1e-8);
    }

    #[test]
    fn test_components_orthonormal() {
        let data = toy_data();
        let pca = ExactPca::fit(&data, None, false);

        for i in 0..2 {
            for j in 0..2 {
                let dot = pca.components.column(i).dot(&pca.components.column(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_whitened_scores_have_unit_variance() {
        let data = toy_data();
        let pca = ExactPca::fit(&data, None, true);
        let scores = pca.transform(&data);

        // Sample variance (ddof = 1) of each whitened column is 1
        let n = scores.nrows() as f64;
        for j in 0..scores.ncols() {
            let col = scores.index_axis(Axis(1), j);
            let mean = col.mean().unwrap();
            let var: f64 = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            assert!((var - 1.0).abs() < 1e-8, "column {} variance {}", j, var);
        }
    }

    #[test]
    fn test_k_clamped_to_features() {
        let data = toy_data();
        let pca = ExactPca::fit(&data, Some(5), false);
        assert_eq!(pca.n_components, 2);
        assert_eq!(pca.components.shape(), &[2, 2]);
    }
}
