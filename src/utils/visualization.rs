//! Visualization utilities (text-based for terminal output)

use ndarray::{Array1, Array2};

const SCATTER_GLYPHS: [char; 6] = ['o', 'x', '+', '#', '@', '%'];

/// Print a simple ASCII bar chart
pub fn print_bar_chart(labels: &[String], values: &[f64], width: usize, title: &str) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.len()));

    let max_abs = values
        .iter()
        .fold(0.0f64, |a, &b| if b.abs() > a { b.abs() } else { a });
    let scale = if max_abs > 1e-10 { max_abs } else { 1.0 };

    let max_label_len = labels.iter().map(|s| s.len()).max().unwrap_or(10);

    for (label, &value) in labels.iter().zip(values.iter()) {
        let bar_len = (value.abs() / scale * width as f64) as usize;
        let bar = "#".repeat(bar_len);

        println!(
            "{:>label_width$} | {:<bar_width$} {:>8.4}",
            label,
            bar,
            value,
            label_width = max_label_len,
            bar_width = width
        );
    }
}

/// Print a correlation matrix
pub fn print_correlation_matrix(matrix: &Array2<f64>, labels: &[String]) {
    let n = matrix.nrows();
    let label_width = labels.iter().map(|s| s.len()).max().unwrap_or(6).max(6);

    // Header
    print!("{:>width$}", "", width = label_width + 1);
    for label in labels.iter().take(n) {
        print!(" {:>6}", &label[..label.len().min(6)]);
    }
    println!();

    // Data rows
    for (i, label) in labels.iter().enumerate().take(n) {
        print!("{:>width$} ", label, width = label_width);
        for j in 0..n {
            print!(" {:>6}", format!("{:.2}", matrix[[i, j]]));
        }
        println!();
    }
}

/// Print explained variance plot (text-based)
pub fn print_variance_plot(explained_variance_ratio: &Array1<f64>, n_show: usize) {
    println!("\nExplained Variance Ratio by Component");
    println!("=====================================");

    let n = explained_variance_ratio.len().min(n_show);
    let mut cumulative = 0.0;

    println!("{:>5} {:>10} {:>12} {}", "PC", "Variance%", "Cumulative%", "Bar");
    println!("{:-<50}", "");

    for i in 0..n {
        let var = explained_variance_ratio[i];
        cumulative += var;

        let bar_len = (var * 50.0) as usize;
        let bar = "#".repeat(bar_len);

        println!(
            "{:>5} {:>9.2}% {:>11.2}% {}",
            i + 1,
            var * 100.0,
            cumulative * 100.0,
            bar
        );
    }

    if explained_variance_ratio.len() > n_show {
        println!(
            "... and {} more components",
            explained_variance_ratio.len() - n_show
        );
    }
}

/// Print a scatter plot of the first two score columns, one glyph per
/// class. Classes beyond the glyph set reuse the last glyph.
pub fn print_scatter(scores: &Array2<f64>, labels: &[String], width: usize, height: usize) {
    if scores.ncols() < 2 || scores.nrows() == 0 || scores.nrows() != labels.len() {
        println!("(scatter needs at least two score columns and one row per label)");
        return;
    }

    let xs = scores.column(0);
    let ys = scores.column(1);

    let x_min = xs.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = xs.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let y_min = ys.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let y_max = ys.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let x_range = if (x_max - x_min).abs() > 1e-10 {
        x_max - x_min
    } else {
        1.0
    };
    let y_range = if (y_max - y_min).abs() > 1e-10 {
        y_max - y_min
    } else {
        1.0
    };

    // Class -> glyph, in first-appearance order
    let mut classes: Vec<&str> = Vec::new();
    for label in labels {
        if !classes.iter().any(|c| *c == label.as_str()) {
            classes.push(label);
        }
    }

    let mut grid = vec![vec![' '; width]; height];
    for (i, label) in labels.iter().enumerate() {
        let class_idx = classes
            .iter()
            .position(|c| *c == label.as_str())
            .unwrap_or(0);
        let glyph = SCATTER_GLYPHS[class_idx.min(SCATTER_GLYPHS.len() - 1)];

        let col = ((xs[i] - x_min) / x_range * (width - 1) as f64) as usize;
        // Rows print top-down, so flip the y axis
        let row = height - 1 - ((ys[i] - y_min) / y_range * (height - 1) as f64) as usize;
        grid[row.min(height - 1)][col.min(width - 1)] = glyph;
    }

    println!("\nScores: PC2 (vertical) vs PC1 (horizontal)");
    println!("+{}+", "-".repeat(width));
    for row in &grid {
        let line: String = row.iter().collect();
        println!("|{}|", line);
    }
    println!("+{}+", "-".repeat(width));
    println!(
        "PC1: [{:.2}, {:.2}]  PC2: [{:.2}, {:.2}]",
        x_min, x_max, y_min, y_max
    );

    print!("Legend:");
    for (idx, class) in classes.iter().enumerate() {
        print!(
            "  {} = {}",
            SCATTER_GLYPHS[idx.min(SCATTER_GLYPHS.len() - 1)],
            class
        );
    }
    println!();
}
