//! Statistical utility functions

use ndarray::Array1;

/// Calculate mean of an array
pub fn mean(data: &Array1<f64>) -> f64 {
    data.mean().unwrap_or(0.0)
}

/// Calculate variance of an array with the given delta degrees of freedom
pub fn variance(data: &Array1<f64>, ddof: usize) -> f64 {
    let n = data.len();
    if n <= ddof {
        return 0.0;
    }

    let mean = mean(data);
    let sum_sq: f64 = data.iter().map(|&x| (x - mean).powi(2)).sum();
    sum_sq / (n - ddof) as f64
}

/// Calculate standard deviation of an array
pub fn std_dev(data: &Array1<f64>, ddof: usize) -> f64 {
    variance(data, ddof).sqrt()
}

/// Calculate percentile (0..=100)
pub fn percentile(data: &Array1<f64>, p: f64) -> f64 {
    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if sorted.is_empty() {
        return f64::NAN;
    }

    let idx = (p / 100.0 * (sorted.len() - 1) as f64) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Calculate median
pub fn median(data: &Array1<f64>) -> f64 {
    percentile(data, 50.0)
}

/// Calculate correlation between two arrays
pub fn correlation(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x > 1e-10 && var_y > 1e-10 {
        cov / (var_x.sqrt() * var_y.sqrt())
    } else {
        0.0
    }
}

/// Summary statistics for a data series
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Calculate summary statistics
    pub fn from_data(data: &Array1<f64>) -> Self {
        let mut sorted: Vec<f64> = data.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            count: data.len(),
            mean: mean(data),
            std: std_dev(data, 1),
            min: *sorted.first().unwrap_or(&f64::NAN),
            q25: percentile(data, 25.0),
            median: percentile(data, 50.0),
            q75: percentile(data, 75.0),
            max: *sorted.last().unwrap_or(&f64::NAN),
        }
    }

    /// Print summary
    pub fn print(&self) {
        println!("Count:  {}", self.count);
        println!("Mean:   {:.6}", self.mean);
        println!("Std:    {:.6}", self.std);
        println!("Min:    {:.6}", self.min);
        println!("25%:    {:.6}", self.q25);
        println!("50%:    {:.6}", self.median);
        println!("75%:    {:.6}", self.q75);
        println!("Max:    {:.6}", self.max);
    }
}
