//! Table rendering utilities for CLI outputs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Width of each column: the longest of header and cells.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn render_line<'a>(
        &self,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
        out: &mut String,
    ) {
        let rendered: Vec<String> = cells
            .zip(self.columns.iter().zip(widths))
            .map(|(cell, (col, w))| match col.align {
                Align::Left => format!("{:<w$}", cell, w = *w),
                Align::Right => format!("{:>w$}", cell, w = *w),
            })
            .collect();
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
    }

    pub fn render(&self, separator: &str) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        self.render_line(&widths, self.columns.iter().map(|c| c.header.as_str()), &mut out);

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&super::formatting::separator(separator, total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            self.render_line(&widths, row.iter().map(String::as_str), &mut out);
        }

        out
    }
}
