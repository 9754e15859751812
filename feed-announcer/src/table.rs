use crate::types::{AnnouncerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Right,
}

/// Fixed-width table with a header, body rows and an optional footer.
///
/// Every row has the header's column count. The first column is centered
/// and set apart from the rest; the remaining columns are right aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    body: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
    alignments: Vec<Alignment>,
}

impl Table {
    pub fn new(header: Vec<String>, body: Vec<Vec<String>>, footer: Option<Vec<String>>) -> Result<Self> {
        let columns = header.len();
        if columns == 0 {
            return Err(AnnouncerError::Transform("table header has no columns".to_string()));
        }
        for row in body.iter().chain(footer.iter()) {
            if row.len() != columns {
                return Err(AnnouncerError::Transform(format!(
                    "row has {} cells, header has {}",
                    row.len(),
                    columns
                )));
            }
        }

        let alignments = std::iter::once(Alignment::Center)
            .chain(std::iter::repeat(Alignment::Right))
            .take(columns)
            .collect();

        Ok(Self {
            header,
            body,
            footer,
            alignments,
        })
    }

    pub fn columns(&self) -> usize {
        self.header.len()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn body(&self) -> &[Vec<String>] {
        &self.body
    }

    pub fn footer(&self) -> Option<&[String]> {
        self.footer.as_deref()
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.body.len() + 6);

        lines.push(border(&widths, '╔', '═', '╦', '╗'));
        lines.push(self.render_row(&self.header, &widths));
        lines.push(border(&widths, '╟', '─', '╫', '╢'));
        for row in &self.body {
            lines.push(self.render_row(row, &widths));
        }
        if let Some(footer) = &self.footer {
            if !self.body.is_empty() {
                lines.push(border(&widths, '╟', '─', '╫', '╢'));
            }
            lines.push(self.render_row(footer, &widths));
        }
        lines.push(border(&widths, '╚', '═', '╩', '╝'));

        lines.join("\n")
    }

    fn column_widths(&self) -> Vec<usize> {
        (0..self.columns())
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(self.body.iter())
                    .chain(self.footer.iter())
                    .map(|row| row[col].chars().count())
                    .max()
                    .unwrap_or(0)
                    + 2
            })
            .collect()
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let first = pad(&row[0], widths[0], self.alignments[0]);
        if row.len() == 1 {
            return format!("║{}║", first);
        }
        let rest: Vec<String> = row[1..]
            .iter()
            .zip(&widths[1..])
            .zip(&self.alignments[1..])
            .map(|((cell, width), align)| pad(cell, *width, *align))
            .collect();
        format!("║{}║{}║", first, rest.join(" "))
    }
}

fn border(widths: &[usize], left: char, fill: char, split: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    line.extend(std::iter::repeat(fill).take(widths[0]));
    if widths.len() > 1 {
        let rest = widths[1..].iter().sum::<usize>() + widths.len() - 2;
        line.push(split);
        line.extend(std::iter::repeat(fill).take(rest));
    }
    line.push(right);
    line
}

fn pad(cell: &str, width: usize, align: Alignment) -> String {
    let gap = width.saturating_sub(cell.chars().count());
    let (left, right) = match align {
        Alignment::Right => (gap - gap.min(1), gap.min(1)),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(right))
}
