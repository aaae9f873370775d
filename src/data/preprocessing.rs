//! Feature preprocessing utilities

use ndarray::{Array1, Array2, Axis};

/// Standardize data to zero mean and unit variance per column.
///
/// Returns the standardized matrix together with the fitted per-column mean
/// and population standard deviation. Columns with (near) zero variance are
/// centered but left unscaled.
pub fn standardize(data: &Array2<f64>) -> (Array2<f64>, Array1<f64>, Array1<f64>) {
    let mean = data.mean_axis(Axis(0)).unwrap();
    let std = data.std_axis(Axis(0), 0.0);

    let mut result = data.clone();
    let (n_rows, n_cols) = data.dim();

    for j in 0..n_cols {
        if std[j] > 1e-10 {
            for i in 0..n_rows {
                result[[i, j]] = (result[[i, j]] - mean[j]) / std[j];
            }
        } else {
            for i in 0..n_rows {
                result[[i, j]] -= mean[j];
            }
        }
    }

    (result, mean, std)
}

/// Center data to zero mean per column
pub fn center(data: &Array2<f64>) -> Array2<f64> {
    let mean = data.mean_axis(Axis(0)).unwrap();
    data - &mean
}
