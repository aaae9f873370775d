//! Example: Iris walkthrough
//!
//! End-to-end run of the PCA pipeline on the bundled Iris dataset:
//! standardize, decompose, inspect the spectrum, project to 2D and
//! cross-check against the library eigensolver.

use anyhow::Result;
use ndarray::Axis;
use pca_iris::data::standardize;
use pca_iris::pca::{ComparisonReport, PcaModel};
use pca_iris::utils::{print_scatter, print_variance_plot};
use pca_iris::Dataset;

fn main() -> Result<()> {
    println!("===========================================");
    println!("  PCA on the Iris Dataset");
    println!("===========================================");
    println!();

    let dataset = Dataset::from_whitespace_file("data/iris.txt")?;
    println!(
        "Loaded {} observations, {} features, {} classes",
        dataset.n_samples(),
        dataset.n_features(),
        dataset.class_names().len()
    );

    // Step 1: standardize each feature
    let (standardized, mean, std) = standardize(&dataset.features);
    println!("\nPer-feature mean and std before standardization:");
    for (i, name) in dataset.feature_names.iter().enumerate() {
        println!("  {:>14}: mean {:>6.3}, std {:>6.3}", name, mean[i], std[i]);
    }
    let check = standardized.mean_axis(Axis(0)).unwrap();
    println!(
        "Largest column mean after standardization: {:.2e}",
        check.iter().fold(0.0f64, |a, &b| a.max(b.abs()))
    );

    // Steps 2-5: covariance, eigendecomposition, explained variance
    let model = PcaModel::fit(&dataset, None);
    model.summary();
    print_variance_plot(&model.explained_variance_ratio, 10);

    // Steps 6-7: keep two components and project
    let reduced = PcaModel::fit(&dataset, Some(2));
    let scores = reduced.transform(&dataset.features);
    println!(
        "\nTwo components retain {:.1}% of the variance",
        reduced.cumulative_variance_ratio[1] * 100.0
    );
    print_scatter(&scores, &dataset.labels, 60, 20);

    // Step 8: cross-check against the library eigensolver
    let report = ComparisonReport::run(&dataset.features, None);
    report.summary();

    Ok(())
}
