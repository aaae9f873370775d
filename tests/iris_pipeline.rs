//! End-to-end pipeline checks against the bundled Iris dataset

use ndarray::Axis;
use pca_iris::data::standardize;
use pca_iris::pca::{ComparisonReport, ExactPca, PcaModel};
use pca_iris::Dataset;

fn iris() -> Dataset {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/iris.txt");
    Dataset::from_whitespace_file(path).expect("bundled iris dataset should load")
}

#[test]
fn loads_the_expected_table() {
    let dataset = iris();

    assert_eq!(dataset.n_samples(), 150);
    assert_eq!(dataset.n_features(), 4);
    assert_eq!(
        dataset.feature_names,
        vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]
    );
    assert_eq!(dataset.label_name, "species");

    let groups = dataset.class_indices();
    assert_eq!(groups.len(), 3);
    for (name, rows) in &groups {
        assert_eq!(rows.len(), 50, "class {} should have 50 rows", name);
    }
}

#[test]
fn standardized_columns_have_zero_mean_unit_variance() {
    let dataset = iris();
    let (standardized, _, _) = standardize(&dataset.features);

    let mean = standardized.mean_axis(Axis(0)).unwrap();
    let std = standardized.std_axis(Axis(0), 0.0);

    for j in 0..4 {
        assert!(mean[j].abs() < 1e-10, "column {} mean {}", j, mean[j]);
        assert!((std[j] - 1.0).abs() < 1e-10, "column {} std {}", j, std[j]);
    }
}

#[test]
fn spectrum_matches_the_known_iris_shape() {
    let dataset = iris();
    let model = PcaModel::fit(&dataset, None);

    // Eigenvalues descending
    for i in 1..4 {
        assert!(model.explained_variance[i - 1] >= model.explained_variance[i]);
    }

    // The first component dominates, two components carry nearly all of it
    assert!(
        model.explained_variance_ratio[0] > 0.65 && model.explained_variance_ratio[0] < 0.80,
        "PC1 ratio {}",
        model.explained_variance_ratio[0]
    );
    assert!(
        model.cumulative_variance_ratio[1] > 0.90,
        "PC1+PC2 ratio {}",
        model.cumulative_variance_ratio[1]
    );
    assert!((model.cumulative_variance_ratio[3] - 1.0).abs() < 1e-8);

    // Eigenvalues sum to the covariance trace: d * n / (n - 1)
    let expected_trace = 4.0 * 150.0 / 149.0;
    assert!((model.total_variance - expected_trace).abs() < 1e-6);
}

#[test]
fn components_are_orthonormal() {
    let dataset = iris();
    let model = PcaModel::fit(&dataset, None);

    for i in 0..4 {
        for j in 0..4 {
            let dot = model.components.column(i).dot(&model.components.column(j));
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!(
                (dot - expected).abs() < 1e-6,
                "components {} and {}: dot {}",
                i,
                j,
                dot
            );
        }
    }
}

#[test]
fn reconstruction_error_shrinks_as_components_are_added() {
    let dataset = iris();

    let mut previous = f64::INFINITY;
    for k in 1..=4 {
        let model = PcaModel::fit(&dataset, Some(k));
        let error = model.reconstruction_error(&dataset.features);
        assert!(
            error <= previous + 1e-10,
            "error rose at k = {}: {} > {}",
            k,
            error,
            previous
        );
        previous = error;
    }

    assert!(previous < 1e-6, "full reconstruction error {}", previous);
}

#[test]
fn hand_rolled_route_matches_library_route() {
    let dataset = iris();
    let report = ComparisonReport::run(&dataset.features, None);

    assert_eq!(report.components.len(), 4);
    assert!(
        report.agrees_within(1e-4),
        "max deviation {}",
        report.max_deviation()
    );
    for c in &report.components {
        assert!(
            c.score_correlation > 0.999,
            "PC{} score correlation {}",
            c.component + 1,
            c.score_correlation
        );
    }
}

#[test]
fn whitened_projection_has_unit_variance_scores() {
    let dataset = iris();
    let model = ExactPca::fit(&dataset.features, Some(2), true);
    let scores = model.transform(&dataset.features);

    let n = scores.nrows() as f64;
    for j in 0..2 {
        let col = scores.column(j);
        let mean = col.mean().unwrap();
        let var: f64 = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!((var - 1.0).abs() < 1e-8, "column {} variance {}", j, var);
    }
}

#[test]
fn score_export_round_trips_through_csv() {
    let dataset = iris();
    let model = PcaModel::fit(&dataset, Some(2));
    let scores = model.transform(&dataset.features);

    let mut path = std::env::temp_dir();
    path.push(format!("iris_scores_{}.csv", std::process::id()));
    dataset.write_scores_csv(&path, &scores).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("pc1,pc2,species"));
    assert_eq!(lines.count(), 150);
}
