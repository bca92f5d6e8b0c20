/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Header and layout constraints for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment: Alignment::Right,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Plain-text table with a header row and a dashed rule beneath it.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Content width of each column, capped by `max_width`.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max);
                match column.max_width {
                    Some(limit) => widest.min(limit),
                    None => widest,
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        lines.push(self.render_row(&header, &widths));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate(text, width);
    match alignment {
        Alignment::Left => format!("{:<width$}", fitted, width = width),
        Alignment::Right => format!("{:>width$}", fitted, width = width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_and_truncate() {
        let mut table = Table::new(vec![
            TableColumn::right("ID"),
            TableColumn::left("Payee").max_width(6),
            TableColumn::right("Amount"),
        ]);
        table.push_row(vec!["1".into(), "Grocer".into(), "4.00".into()]);
        table.push_row(vec!["12".into(), "Supermarket".into(), "120.50".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  Payee   Amount");
        assert_eq!(lines[1], "--  ------  ------");
        assert_eq!(lines[2], " 1  Grocer    4.00");
        assert_eq!(lines[3], "12  Super…  120.50");
    }
}
