//! Labeled feature table and file loading

use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Container for a table of N observations x D features, each row labeled
/// with a class.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature column names, in file order
    pub feature_names: Vec<String>,
    /// Name of the label column
    pub label_name: String,
    /// Feature matrix (rows = observations, cols = features)
    pub features: Array2<f64>,
    /// Class label per observation
    pub labels: Vec<String>,
}

impl Dataset {
    /// Create a new Dataset from parts
    pub fn new(
        feature_names: Vec<String>,
        label_name: String,
        features: Array2<f64>,
        labels: Vec<String>,
    ) -> Self {
        Self {
            feature_names,
            label_name,
            features,
            labels,
        }
    }

    /// Load a whitespace-delimited text file.
    ///
    /// The first non-comment line names the columns; the last column is the
    /// class label, every other column is numeric. Lines starting with `#`
    /// and blank lines are skipped.
    pub fn from_whitespace_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut header: Option<Vec<String>> = None;
        let mut values: Vec<f64> = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        let mut n_features = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line_num = idx + 1;
            let line = line.with_context(|| format!("Failed to read line {}", line_num))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();

            match &header {
                None => {
                    if fields.len() < 2 {
                        bail!(
                            "Header on line {} needs at least one feature column and a label column",
                            line_num
                        );
                    }
                    n_features = fields.len() - 1;
                    header = Some(fields.iter().map(|f| f.to_string()).collect());
                }
                Some(columns) => {
                    if fields.len() != columns.len() {
                        bail!(
                            "Line {} has {} fields, expected {}",
                            line_num,
                            fields.len(),
                            columns.len()
                        );
                    }
                    for field in &fields[..n_features] {
                        let value: f64 = field.parse().with_context(|| {
                            format!("Failed to parse numeric value {:?} on line {}", field, line_num)
                        })?;
                        values.push(value);
                    }
                    labels.push(fields[n_features].to_string());
                }
            }
        }

        let mut columns = match header {
            Some(c) => c,
            None => bail!("Dataset file {} is empty", path.display()),
        };
        if labels.is_empty() {
            bail!("Dataset file {} has a header but no data rows", path.display());
        }

        let label_name = columns.pop().unwrap_or_default();
        let n_samples = labels.len();
        let features = Array2::from_shape_vec((n_samples, n_features), values)
            .context("Failed to assemble feature matrix")?;

        Ok(Self {
            feature_names: columns,
            label_name,
            features,
            labels,
        })
    }

    /// Number of observations
    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Distinct class names, in first-appearance order
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for label in &self.labels {
            if !names.iter().any(|n| n == label) {
                names.push(label.clone());
            }
        }
        names
    }

    /// Row indices per class, in first-appearance order
    pub fn class_indices(&self) -> Vec<(String, Vec<usize>)> {
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (i, label) in self.labels.iter().enumerate() {
            match groups.iter_mut().find(|(name, _)| name == label) {
                Some((_, rows)) => rows.push(i),
                None => groups.push((label.clone(), vec![i])),
            }
        }
        groups
    }

    /// Get the values of a feature column by name
    pub fn feature_column(&self, name: &str) -> Option<Array1<f64>> {
        let idx = self.feature_names.iter().position(|n| n == name)?;
        Some(self.features.column(idx).to_owned())
    }

    /// Export a score matrix (one row per observation) to CSV, with the
    /// class label appended to each row.
    pub fn write_scores_csv<P: AsRef<Path>>(&self, path: P, scores: &Array2<f64>) -> Result<()> {
        if scores.nrows() != self.n_samples() {
            bail!(
                "Score matrix has {} rows, dataset has {} observations",
                scores.nrows(),
                self.n_samples()
            );
        }

        let mut writer = csv::Writer::from_path(path.as_ref())
            .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;

        let mut header: Vec<String> = (1..=scores.ncols()).map(|i| format!("pc{}", i)).collect();
        header.push(self.label_name.clone());
        writer.write_record(&header)?;

        for (i, label) in self.labels.iter().enumerate() {
            let mut row: Vec<String> = Vec::with_capacity(scores.ncols() + 1);
            for j in 0..scores.ncols() {
                row.push(format!("{:.6}", scores[[i, j]]));
            }
            row.push(label.clone());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("dataset_test_{}_{}.txt", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_whitespace_file() {
        let path = write_temp(
            "load",
            "# toy table\n\
             a b c kind\n\
             1.0 2.0 3.0 x\n\
             4.0 5.0 6.0 y\n\
             \n\
             7.0 8.0 9.0 x\n",
        );

        let data = Dataset::from_whitespace_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.n_samples(), 3);
        assert_eq!(data.n_features(), 3);
        assert_eq!(data.feature_names, vec!["a", "b", "c"]);
        assert_eq!(data.label_name, "kind");
        assert_eq!(data.labels, vec!["x", "y", "x"]);
        assert_eq!(data.features[[1, 2]], 6.0);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let path = write_temp("badnum", "a b kind\n1.0 2.0 x\n1.0 oops y\n");
        let err = Dataset::from_whitespace_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_wrong_field_count() {
        let path = write_temp("short", "a b kind\n1.0 2.0 x\n1.0 2.0\n");
        let err = Dataset::from_whitespace_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(format!("{:#}", err).contains("expected 3"));
    }

    #[test]
    fn test_class_groups() {
        let data = Dataset::new(
            vec!["a".to_string()],
            "kind".to_string(),
            array![[1.0], [2.0], [3.0]],
            vec!["x".to_string(), "y".to_string(), "x".to_string()],
        );

        assert_eq!(data.class_names(), vec!["x", "y"]);
        let groups = data.class_indices();
        assert_eq!(groups[0], ("x".to_string(), vec![0, 2]));
        assert_eq!(groups[1], ("y".to_string(), vec![1]));
    }
}
