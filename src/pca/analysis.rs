//! Hand-rolled PCA pipeline

use super::decomposition::{covariance_matrix, EigenDecomposition};
use crate::data::{standardize, Dataset};
use ndarray::{s, Array1, Array2};

/// A fitted PCA model.
///
/// Fitting standardizes every feature to zero mean and unit variance,
/// computes the covariance matrix of the standardized data and
/// eigendecomposes it. The fitted mean and scale are kept so new data can
/// be pushed through the same transform.
#[derive(Debug, Clone)]
pub struct PcaModel {
    /// Number of components retained
    pub n_components: usize,
    /// Projection matrix (eigenvectors as columns, D x K)
    pub components: Array2<f64>,
    /// Eigenvalue per retained component
    pub explained_variance: Array1<f64>,
    /// Fraction of total variance per retained component
    pub explained_variance_ratio: Array1<f64>,
    /// Running sum of the variance fractions
    pub cumulative_variance_ratio: Array1<f64>,
    /// Sum of all eigenvalues (trace of the covariance matrix)
    pub total_variance: f64,
    /// Per-feature mean fitted during standardization
    pub mean: Array1<f64>,
    /// Per-feature scale fitted during standardization (1.0 for
    /// zero-variance features)
    pub scale: Array1<f64>,
    /// Feature names, if the fit had them
    pub feature_names: Vec<String>,
}

impl PcaModel {
    /// Fit on a labeled dataset
    pub fn fit(dataset: &Dataset, n_components: Option<usize>) -> Self {
        Self::fit_matrix(
            &dataset.features,
            n_components,
            dataset.feature_names.clone(),
        )
    }

    /// Fit on a raw observations-by-features matrix
    pub fn fit_matrix(
        data: &Array2<f64>,
        n_components: Option<usize>,
        feature_names: Vec<String>,
    ) -> Self {
        let (n_samples, n_features) = data.dim();
        let n_components = n_components
            .unwrap_or(n_features)
            .min(n_features)
            .min(n_samples);

        let (standardized, mean, std) = standardize(data);
        let scale = std.mapv(|s| if s > 1e-10 { s } else { 1.0 });

        let cov = covariance_matrix(&standardized);
        let eigen = EigenDecomposition::from_symmetric(&cov);

        let components = eigen.eigenvectors.slice(s![.., ..n_components]).to_owned();
        let explained_variance = eigen.eigenvalues.slice(s![..n_components]).to_owned();

        let total_variance = eigen.eigenvalues.sum();
        let explained_variance_ratio = if total_variance > 0.0 {
            &explained_variance / total_variance
        } else {
            Array1::zeros(n_components)
        };

        let mut cumulative = Array1::zeros(n_components);
        let mut cum_sum = 0.0;
        for i in 0..n_components {
            cum_sum += explained_variance_ratio[i];
            cumulative[i] = cum_sum;
        }

        Self {
            n_components,
            components,
            explained_variance,
            explained_variance_ratio,
            cumulative_variance_ratio: cumulative,
            total_variance,
            mean,
            scale,
            feature_names,
        }
    }

    /// Fit, keeping the smallest number of components whose cumulative
    /// variance fraction reaches `variance_threshold`
    pub fn fit_with_variance_threshold(
        data: &Array2<f64>,
        variance_threshold: f64,
        feature_names: Vec<String>,
    ) -> Self {
        let full = Self::fit_matrix(data, None, feature_names.clone());

        let n_components = full
            .cumulative_variance_ratio
            .iter()
            .position(|&v| v >= variance_threshold)
            .map(|i| i + 1)
            .unwrap_or(full.n_components);

        Self::fit_matrix(data, Some(n_components), feature_names)
    }

    /// Project data into component space using the fitted mean and scale
    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        let standardized = (data - &self.mean) / &self.scale;
        standardized.dot(&self.components)
    }

    /// Map component-space scores back to the original feature space
    pub fn inverse_transform(&self, scores: &Array2<f64>) -> Array2<f64> {
        scores.dot(&self.components.t()) * &self.scale + &self.mean
    }

    /// Root-mean-square reconstruction error, measured in the standardized
    /// feature space so features contribute on a common scale
    pub fn reconstruction_error(&self, data: &Array2<f64>) -> f64 {
        let standardized = (data - &self.mean) / &self.scale;
        let scores = standardized.dot(&self.components);
        let reconstructed = scores.dot(&self.components.t());

        let diff = &standardized - &reconstructed;
        let mse: f64 = diff.iter().map(|x| x * x).sum::<f64>() / diff.len() as f64;
        mse.sqrt()
    }

    /// Loadings matrix: eigenvectors scaled by the standard deviation of
    /// their component
    pub fn loadings(&self) -> Array2<f64> {
        let n_features = self.components.nrows();
        let mut loadings = Array2::zeros((n_features, self.n_components));

        for j in 0..self.n_components {
            let std_pc = self.explained_variance[j].max(0.0).sqrt();
            for i in 0..n_features {
                loadings[[i, j]] = self.components[[i, j]] * std_pc;
            }
        }

        loadings
    }

    /// Per-component feature weights, sorted by absolute contribution
    pub fn feature_contributions(&self) -> Vec<Vec<(String, f64)>> {
        let mut contributions = Vec::new();

        for pc_idx in 0..self.n_components {
            let mut pc_contributions: Vec<(String, f64)> = self
                .feature_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), self.components[[i, pc_idx]]))
                .collect();

            pc_contributions.sort_by(|a, b| {
                b.1.abs()
                    .partial_cmp(&a.1.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            contributions.push(pc_contributions);
        }

        contributions
    }

    /// Print a summary of the fitted model
    pub fn summary(&self) {
        println!("\n=== PCA Summary ===");
        println!("Number of components: {}", self.n_components);
        println!("Number of features: {}", self.feature_names.len());
        println!();

        println!("Explained Variance:");
        println!("{:-<50}", "");
        println!(
            "{:>5} {:>12} {:>12} {:>12}",
            "PC", "Eigenvalue", "Ratio", "Cumulative"
        );
        println!("{:-<50}", "");

        for i in 0..self.n_components {
            println!(
                "{:>5} {:>12.6} {:>11.2}% {:>11.2}%",
                i + 1,
                self.explained_variance[i],
                self.explained_variance_ratio[i] * 100.0,
                self.cumulative_variance_ratio[i] * 100.0
            );
        }

        println!();
        println!("Top feature weights in PC1:");
        if let Some(contributions) = self.feature_contributions().first() {
            for (name, weight) in contributions.iter().take(5) {
                println!("  {:>14}: {:>8.4}", name, weight);
            }
        }
    }

    /// Suggest a component count from the curvature of the cumulative
    /// variance curve
    pub fn find_elbow(&self) -> usize {
        if self.n_components <= 2 {
            return self.n_components;
        }

        let mut max_curvature = 0.0;
        let mut elbow_idx = 1;

        for i in 1..(self.n_components - 1) {
            let prev = self.cumulative_variance_ratio[i - 1];
            let curr = self.cumulative_variance_ratio[i];
            let next = self.cumulative_variance_ratio[i + 1];

            let curvature = (prev + next - 2.0 * curr).abs();

            if curvature > max_curvature {
                max_curvature = curvature;
                elbow_idx = i + 1;
            }
        }

        elbow_idx
    }
}
