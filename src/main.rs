//! PCA Iris - Main entry point
//!
//! This CLI tool walks through Principal Component Analysis
//! on the Iris dataset.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pca_iris::{
    data::Dataset,
    pca::{self, ComparisonReport, ExactPca, PcaModel},
    utils::{
        print_bar_chart, print_correlation_matrix, print_scatter, print_variance_plot,
        SummaryStats,
    },
};

#[derive(Parser)]
#[command(name = "pca-iris")]
#[command(about = "PCA walkthrough on the Iris dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe each feature and the feature correlations
    Summarize {
        /// Input data file (whitespace-delimited)
        #[arg(short, long, default_value = "data/iris.txt")]
        input: String,
    },

    /// Run the hand-rolled PCA pipeline
    Analyze {
        /// Input data file (whitespace-delimited)
        #[arg(short, long, default_value = "data/iris.txt")]
        input: String,

        /// Number of principal components
        #[arg(short, long)]
        n_components: Option<usize>,

        /// Target explained variance ratio
        #[arg(short, long)]
        variance_target: Option<f64>,
    },

    /// Project onto the leading components and export the scores
    Project {
        /// Input data file (whitespace-delimited)
        #[arg(short, long, default_value = "data/iris.txt")]
        input: String,

        /// Number of principal components
        #[arg(short, long, default_value = "2")]
        n_components: usize,

        /// Output CSV file for the scores
        #[arg(short, long, default_value = "scores.csv")]
        output: String,

        /// Whiten the scores (uses the library eigensolver)
        #[arg(short, long)]
        whiten: bool,

        /// Skip the terminal scatter plot
        #[arg(long)]
        no_plot: bool,
    },

    /// Compare the hand-rolled decomposition against the library one
    Compare {
        /// Input data file (whitespace-delimited)
        #[arg(short, long, default_value = "data/iris.txt")]
        input: String,

        /// Number of principal components
        #[arg(short, long)]
        n_components: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize { input } => {
            summarize(&input)?;
        }
        Commands::Analyze {
            input,
            n_components,
            variance_target,
        } => {
            analyze(&input, n_components, variance_target)?;
        }
        Commands::Project {
            input,
            n_components,
            output,
            whiten,
            no_plot,
        } => {
            project(&input, n_components, &output, whiten, no_plot)?;
        }
        Commands::Compare {
            input,
            n_components,
        } => {
            compare(&input, n_components)?;
        }
    }

    Ok(())
}

fn load(input: &str) -> Result<Dataset> {
    println!("Loading data from: {}", input);
    let dataset = Dataset::from_whitespace_file(input)?;
    println!(
        "Loaded {} observations with {} features",
        dataset.n_samples(),
        dataset.n_features()
    );
    Ok(dataset)
}

fn summarize(input: &str) -> Result<()> {
    let dataset = load(input)?;

    println!("\nClasses:");
    for (name, rows) in dataset.class_indices() {
        println!("  {:>20}: {} observations", name, rows.len());
    }

    for name in &dataset.feature_names {
        if let Some(column) = dataset.feature_column(name) {
            println!("\n--- {} ---", name);
            SummaryStats::from_data(&column).print();
        }
    }

    let cov = pca::covariance_matrix(&dataset.features);
    let corr = pca::correlation_from_covariance(&cov);
    println!("\nFeature correlations:");
    print_correlation_matrix(&corr, &dataset.feature_names);

    Ok(())
}

fn analyze(input: &str, n_components: Option<usize>, variance_target: Option<f64>) -> Result<()> {
    let dataset = load(input)?;

    let model = if let Some(target) = variance_target {
        println!("\nFitting PCA with variance target: {:.1}%", target * 100.0);
        PcaModel::fit_with_variance_threshold(
            &dataset.features,
            target,
            dataset.feature_names.clone(),
        )
    } else {
        println!(
            "\nFitting PCA with {} components",
            n_components.unwrap_or(dataset.n_features())
        );
        PcaModel::fit(&dataset, n_components)
    };

    model.summary();
    print_variance_plot(&model.explained_variance_ratio, 15);

    // Eigenvector weights, the directions the walkthrough visualizes
    for j in 0..model.n_components.min(2) {
        let weights: Vec<f64> = model.components.column(j).to_vec();
        print_bar_chart(
            &model.feature_names,
            &weights,
            30,
            &format!("PC{} feature weights", j + 1),
        );
    }

    let elbow = model.find_elbow();
    println!("\nSuggested number of components (elbow): {}", elbow);

    let error = model.reconstruction_error(&dataset.features);
    println!("Reconstruction RMSE (standardized space): {:.6}", error);

    Ok(())
}

fn project(
    input: &str,
    n_components: usize,
    output: &str,
    whiten: bool,
    no_plot: bool,
) -> Result<()> {
    let dataset = load(input)?;

    let scores = if whiten {
        println!("\nProjecting onto {} whitened components", n_components);
        let model = ExactPca::fit(&dataset.features, Some(n_components), true);
        model.transform(&dataset.features)
    } else {
        println!("\nProjecting onto {} components", n_components);
        let model = PcaModel::fit(&dataset, Some(n_components));
        model.transform(&dataset.features)
    };

    if !no_plot {
        print_scatter(&scores, &dataset.labels, 60, 20);
    }

    dataset.write_scores_csv(output, &scores)?;
    println!("Scores written to: {}", output);

    Ok(())
}

fn compare(input: &str, n_components: Option<usize>) -> Result<()> {
    let dataset = load(input)?;

    let report = ComparisonReport::run(&dataset.features, n_components);
    report.summary();

    if report.agrees_within(1e-6) {
        println!("\nBoth routes agree to within 1e-6 (up to eigenvector sign).");
    } else {
        println!(
            "\nLargest eigenvector deviation after sign alignment: {:.2e}",
            report.max_deviation()
        );
    }

    Ok(())
}
