//! Agreement check between the hand-rolled and library PCA routes

use super::{ExactPca, PcaModel};
use crate::utils::correlation;
use ndarray::Array2;

/// Per-component agreement between the two routes.
///
/// Eigenvector signs are arbitrary, so the exact component is flipped to
/// match the hand-rolled one before deviations are measured.
#[derive(Debug, Clone)]
pub struct ComponentAgreement {
    /// Component index (0-based)
    pub component: usize,
    /// Eigenvalue from the power-iteration route
    pub eigenvalue_hand: f64,
    /// Eigenvalue from the nalgebra route
    pub eigenvalue_exact: f64,
    /// Whether the exact eigenvector was sign-flipped for alignment
    pub sign_flipped: bool,
    /// Largest absolute entry-wise eigenvector deviation after alignment
    pub max_vector_deviation: f64,
    /// Largest absolute score deviation after alignment
    pub max_score_deviation: f64,
    /// Correlation between the two score columns
    pub score_correlation: f64,
}

/// Full comparison between [`PcaModel`] and [`ExactPca`] on one dataset
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    /// Components compared
    pub components: Vec<ComponentAgreement>,
}

impl ComparisonReport {
    /// Fit both routes on the same data and measure their agreement
    pub fn run(data: &Array2<f64>, n_components: Option<usize>) -> Self {
        let hand = PcaModel::fit_matrix(data, n_components, Vec::new());
        let exact = ExactPca::fit(data, n_components, false);

        let hand_scores = hand.transform(data);
        let exact_scores = exact.transform(data);

        let mut components = Vec::with_capacity(hand.n_components);
        for j in 0..hand.n_components {
            let hand_vec = hand.components.column(j);
            let exact_vec = exact.components.column(j);

            let sign_flipped = hand_vec.dot(&exact_vec) < 0.0;
            let sign = if sign_flipped { -1.0 } else { 1.0 };

            let max_vector_deviation = hand_vec
                .iter()
                .zip(exact_vec.iter())
                .map(|(h, e)| (h - sign * e).abs())
                .fold(0.0, f64::max);

            let max_score_deviation = hand_scores
                .column(j)
                .iter()
                .zip(exact_scores.column(j).iter())
                .map(|(h, e)| (h - sign * e).abs())
                .fold(0.0, f64::max);

            let score_correlation = correlation(
                &hand_scores.column(j).to_owned(),
                &(exact_scores.column(j).to_owned() * sign),
            );

            components.push(ComponentAgreement {
                component: j,
                eigenvalue_hand: hand.explained_variance[j],
                eigenvalue_exact: exact.explained_variance[j],
                sign_flipped,
                max_vector_deviation,
                max_score_deviation,
                score_correlation,
            });
        }

        Self { components }
    }

    /// Largest eigenvector deviation across all compared components
    pub fn max_deviation(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.max_vector_deviation)
            .fold(0.0, f64::max)
    }

    /// Whether every compared component agrees within `tol`
    pub fn agrees_within(&self, tol: f64) -> bool {
        self.components.iter().all(|c| {
            c.max_vector_deviation < tol
                && (c.eigenvalue_hand - c.eigenvalue_exact).abs() < tol
        })
    }

    /// Print the agreement table
    pub fn summary(&self) {
        println!("\n=== Hand-Rolled vs Library PCA ===");
        println!(
            "{:>5} {:>14} {:>14} {:>6} {:>12} {:>12} {:>10}",
            "PC", "Eig (hand)", "Eig (exact)", "Flip", "Max dV", "Max dScore", "Corr"
        );
        println!("{:-<80}", "");

        for c in &self.components {
            println!(
                "{:>5} {:>14.8} {:>14.8} {:>6} {:>12.2e} {:>12.2e} {:>10.6}",
                c.component + 1,
                c.eigenvalue_hand,
                c.eigenvalue_exact,
                if c.sign_flipped { "yes" } else { "no" },
                c.max_vector_deviation,
                c.max_score_deviation,
                c.score_correlation
            );
        }
    }
}
