// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Grid table rendering of a [`Comparison`].
//!
//! ```text
//! +-------+---------+-----------------+------------------+------------+
//! | Image | COCO ID | VGG Annotations | COCO Annotations | Difference |
//! +=======+=========+=================+==================+============+
//! | a.jpg |    1    |        2        |        2         |     0      |
//! +-------+---------+-----------------+------------------+------------+
//! | Total |         |        2        |        2         |     0      |
//! +-------+---------+-----------------+------------------+------------+
//! ```

use crate::compare::{Category, Comparison, ComparisonRow};
use colored::{Color, Colorize};
use std::fmt;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = [
    "Image",
    "COCO ID",
    "VGG Annotations",
    "COCO Annotations",
    "Difference",
];

/// Cell padding on each side of the content.
const PADDING: usize = 1;

/// Highlight color of a row category.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Zero => Color::Yellow,
        Category::Match => Color::Green,
        Category::Mismatch => Color::Red,
        Category::Deficit => Color::Magenta,
    }
}

/// Renders a comparison as a grid table with a trailing total row.
pub struct ComparisonTable<'a> {
    comparison: &'a Comparison,
    placeholder: &'a str,
    color: bool,
}

impl<'a> ComparisonTable<'a> {
    pub fn new(comparison: &'a Comparison) -> Self {
        Self {
            comparison,
            placeholder: "N/A",
            color: true,
        }
    }

    /// Text shown for rows without a COCO id.
    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Enable or disable row highlighting.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn row_cells(&self, row: &ComparisonRow) -> [String; 5] {
        [
            row.filename.clone(),
            row.coco_id_display(self.placeholder),
            row.vgg_count.to_string(),
            row.coco_count.to_string(),
            row.difference.to_string(),
        ]
    }

    fn total_cells(&self) -> [String; 5] {
        [
            "Total".to_string(),
            String::new(),
            self.comparison.total_vgg_annotations.to_string(),
            self.comparison.total_coco_annotations.to_string(),
            self.comparison.total_difference().to_string(),
        ]
    }

    fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize; 5], fill: char) -> fmt::Result {
        write!(f, "+")?;
        for width in widths {
            let rule: String = std::iter::repeat_n(fill, width + 2 * PADDING).collect();
            write!(f, "{}+", rule)?;
        }
        writeln!(f)
    }

    fn write_cells(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize; 5],
        cells: &[String; 5],
        color: Option<Color>,
    ) -> fmt::Result {
        write!(f, "|")?;
        for (cell, width) in cells.iter().zip(widths) {
            let slack = width.saturating_sub(cell.width());
            let left = slack / 2 + PADDING;
            let right = slack - slack / 2 + PADDING;
            write!(f, "{:left$}", "", left = left)?;
            match color {
                Some(color) if self.color => write!(f, "{}", cell.as_str().color(color))?,
                _ => write!(f, "{}", cell)?,
            }
            write!(f, "{:right$}|", "", right = right)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<_> = self
            .comparison
            .rows
            .iter()
            .map(|row| (self.row_cells(row), row.category))
            .collect();
        let total = self.total_cells();

        let mut widths = HEADERS.map(UnicodeWidthStr::width);
        for cells in rows.iter().map(|(cells, _)| cells).chain(Some(&total)) {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }

        let headers = HEADERS.map(str::to_string);
        Self::write_rule(f, &widths, '-')?;
        self.write_cells(f, &widths, &headers, None)?;
        Self::write_rule(f, &widths, '=')?;
        for (cells, category) in &rows {
            self.write_cells(f, &widths, cells, Some(category_color(*category)))?;
            Self::write_rule(f, &widths, '-')?;
        }
        self.write_cells(f, &widths, &total, None)?;
        Self::write_rule(f, &widths, '-')?;

        for dup in &self.comparison.duplicates {
            writeln!(
                f,
                "Duplicate {} filename {}: keys {} (kept {})",
                dup.source,
                dup.filename,
                dup.keys.join(", "),
                dup.kept().unwrap_or_default()
            )?;
        }
        if !self.comparison.skipped_coco_ids.is_empty() {
            let ids: Vec<_> = self
                .comparison
                .skipped_coco_ids
                .iter()
                .map(u64::to_string)
                .collect();
            writeln!(f, "Skipped undeclared COCO image ids: {}", ids.join(", "))?;
        }
        if !self.comparison.skipped_via_ids.is_empty() {
            writeln!(
                f,
                "Skipped VIA file ids without metadata: {}",
                self.comparison.skipped_via_ids.join(", ")
            )?;
        }
        Ok(())
    }
}
