//! Example: Basic PCA
//!
//! This example demonstrates the basic concepts of PCA
//! using synthetic correlated 2-D data.

use ndarray::Array2;
use pca_iris::pca::{covariance_matrix, EigenDecomposition, PcaModel};
use rand::Rng;

fn main() {
    println!("===========================================");
    println!("  Principal Component Analysis - Basics");
    println!("===========================================");
    println!();

    // Generate correlated 2D data
    let data = generate_correlated_data(200, 0.8);
    println!("Generated {} data points in 2D", data.nrows());

    // Calculate and display covariance
    let cov = covariance_matrix(&data);
    println!("\nCovariance Matrix:");
    println!("  [{:>8.4}, {:>8.4}]", cov[[0, 0]], cov[[0, 1]]);
    println!("  [{:>8.4}, {:>8.4}]", cov[[1, 0]], cov[[1, 1]]);

    // Eigendecomposition by power iteration
    let eigen = EigenDecomposition::from_symmetric(&cov);

    println!("\nEigenvalues (Explained Variance):");
    let total: f64 = eigen.eigenvalues.sum();
    for (i, val) in eigen.eigenvalues.iter().enumerate() {
        println!("  PC{}: {:.4} ({:.1}%)", i + 1, val, val / total * 100.0);
    }

    println!("\nPrincipal Components (Eigenvectors):");
    for i in 0..2 {
        let v = eigen.eigenvectors.column(i);
        println!("  PC{}: [{:>7.4}, {:>7.4}]", i + 1, v[0], v[1]);
    }

    // Verify orthogonality
    let dot_product = eigen
        .eigenvectors
        .column(0)
        .dot(&eigen.eigenvectors.column(1));
    println!("\nPC1 . PC2 = {:.10} (should be ~0)", dot_product);

    // Keep one component and measure what is lost
    let model = PcaModel::fit_matrix(&data, Some(1), vec!["x".to_string(), "y".to_string()]);
    let error = model.reconstruction_error(&data);

    println!("\nDimensionality Reduction:");
    println!("  Original dimensions: 2");
    println!("  Reduced dimensions: 1");
    println!("  Reconstruction RMSE (standardized space): {:.4}", error);

    println!(
        "\nFirst PC explains {:.1}% of variance",
        model.explained_variance_ratio[0] * 100.0
    );

    println!("\n===========================================");
    println!("  Demonstration Complete");
    println!("===========================================");
}

fn generate_correlated_data(n: usize, correlation: f64) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    let mut data = Array2::zeros((n, 2));

    for i in 0..n {
        let x: f64 = rng.gen_range(-2.0..2.0);
        let noise: f64 = rng.gen_range(-1.0..1.0) * (1.0 - correlation.abs()).sqrt();
        let y = correlation * x + noise;

        data[[i, 0]] = x;
        data[[i, 1]] = y;
    }

    data
}
