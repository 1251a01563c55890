// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned table output for list commands.

use std::io::Write;

use crate::color;

pub enum Align {
    Left,
    Right,
}

pub enum CellStyle {
    Plain,
    Muted,
    Status,
}

pub struct Column {
    pub name: &'static str,
    pub align: Align,
    pub style: CellStyle,
    /// Longer values are cut to this many characters.
    pub max_width: Option<usize>,
}

impl Column {
    fn new(name: &'static str, align: Align, style: CellStyle) -> Self {
        Self {
            name,
            align,
            style,
            max_width: None,
        }
    }

    pub fn left(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Plain)
    }

    pub fn right(name: &'static str) -> Self {
        Self::new(name, Align::Right, CellStyle::Plain)
    }

    pub fn muted(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Muted)
    }

    pub fn status(name: &'static str) -> Self {
        Self::new(name, Align::Left, CellStyle::Status)
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: color::should_colorize(),
        }
    }

    #[cfg(test)]
    pub fn plain(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: false,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write header and rows. Nothing is written for an empty table.
    /// A left-aligned last column is never padded; color goes on after
    /// padding so escapes don't count toward widths.
    pub fn render(&self, out: &mut impl Write) {
        if self.rows.is_empty() {
            return;
        }
        let widths = self.widths();

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = self.layout(i, col.name, widths[i]);
                if self.colorize {
                    color::apply_header(&cell)
                } else {
                    cell
                }
            })
            .collect();
        let _ = writeln!(out, "{}", header.join(SEP));

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let raw = row.get(i).map(String::as_str).unwrap_or("");
                    let cell = self.layout(i, truncate(raw, col.max_width), widths[i]);
                    match (&col.style, self.colorize) {
                        (CellStyle::Muted, true) => color::apply_muted(&cell),
                        (CellStyle::Status, true) => color::apply_status(&cell),
                        _ => cell,
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join(SEP));
        }
    }

    /// Print to stdout.
    pub fn print(&self) {
        self.render(&mut std::io::stdout().lock());
    }

    fn layout(&self, index: usize, text: &str, width: usize) -> String {
        let col = &self.columns[index];
        let last = index + 1 == self.columns.len();
        match col.align {
            Align::Left if last => text.to_string(),
            Align::Left => format!("{text:<width$}"),
            Align::Right => format!("{text:>width$}"),
        }
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| {
                        let len = row.get(i).map(|s| s.chars().count()).unwrap_or(0);
                        col.max_width.map_or(len, |max| len.min(max))
                    })
                    .fold(col.name.len(), usize::max)
            })
            .collect()
    }
}

fn truncate(s: &str, max: Option<usize>) -> &str {
    match max {
        Some(max) => match s.char_indices().nth(max) {
            Some((end, _)) => &s[..end],
            None => s,
        },
        None => s,
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
