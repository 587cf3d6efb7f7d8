//! Minimal line tables for CLI output.

use console::style;

/// A simple table with minimal styling. Numeric cells are right-aligned.
///
/// # Example
/// ```text
/// Section         Items  Sections
/// ───────────────────────────────
/// Google Alerts       3         1
/// Prompts            12         0
/// ```
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|&s| s.to_string()).collect();
        let col_widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

        Self {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row; cells beyond the header count are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let row: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|s| s.as_ref().to_string())
            .collect();

        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }

        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the body rows (no header, no styling).
    #[must_use]
    pub fn render_rows(&self) -> Vec<String> {
        self.rows.iter().map(|row| self.format_row(row)).collect()
    }

    /// Render the table to stdout.
    pub fn print(&self) {
        println!("{}", style(self.format_row(&self.headers)).bold());

        let total_width: usize =
            self.col_widths.iter().sum::<usize>() + self.col_widths.len().saturating_sub(1) * 2;
        println!("{}", "─".repeat(total_width));

        for line in self.render_rows() {
            println!("{line}");
        }
    }

    fn format_row(&self, cells: &[String]) -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = self.col_widths.get(i).copied().unwrap_or(0);
                if is_numeric(cell) {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}
