//! # PCA Iris - Principal Component Analysis from First Principles
//!
//! This library walks through PCA on the classic Iris dataset:
//! standardization, covariance, eigendecomposition by power iteration,
//! explained variance, and projection - cross-checked against a
//! closed-form library eigensolver.
//!
//! ## Modules
//!
//! - `data` - Dataset loading and preprocessing
//! - `pca` - Hand-rolled PCA, library reference and their comparison
//! - `utils` - Statistics helpers and terminal plots

pub mod data;
pub mod pca;
pub mod utils;

pub use data::Dataset;
pub use pca::{ComparisonReport, ExactPca, PcaModel};
