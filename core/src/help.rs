//! Usage table rendering.
//!
//! Renders a [`DeclarationSet`] as a four-column table (flag, usage, expect,
//! default) framed by dashed bars. Column widths are recomputed on every
//! render from the longest cell in each column, clamped to
//! `[min_width, max_width]`. Cells wider than `max_width` are not truncated.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::DeclarationSet;

pub const DEFAULT_MIN_WIDTH: usize = 7;
pub const DEFAULT_MAX_WIDTH: usize = 100;

const HEADERS: [&str; 4] = ["flag", "usage", "expect", "default"];

/// Formats the usage table for a declaration set.
///
/// # Examples
///
/// ```
/// use argsmap_core::{DeclarationSet, FlagDeclaration, HelpFormatter};
///
/// let set: DeclarationSet = [FlagDeclaration::with_value("-p").with_usage("port")]
///     .into_iter()
///     .collect();
/// let text = HelpFormatter::default().render(&set);
///
/// assert!(text.starts_with("Usage:\n"));
/// assert!(text.contains("| -p      | port    |"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpFormatter {
    pub min_width: usize,
    pub max_width: usize,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl HelpFormatter {
    pub fn new(min_width: usize, max_width: usize) -> Self {
        Self {
            min_width,
            max_width,
        }
    }

    /// Computes the width of each column for `declarations`.
    pub fn column_widths(&self, declarations: &DeclarationSet) -> [usize; 4] {
        let mut widths = [self.min_width; 4];
        for decl in declarations {
            let cells = [
                decl.token.as_str(),
                decl.usage.as_str(),
                decl.expected_value.as_str(),
                decl.default_value.as_str(),
            ];
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths.map(|w| w.min(self.max_width))
    }

    /// Renders the full usage table.
    pub fn render(&self, declarations: &DeclarationSet) -> String {
        let widths = self.column_widths(declarations);
        let bar = bar(&widths);

        let mut out = String::from("Usage:\n");
        out.push_str(&bar);
        out.push('\n');
        out.push_str(&row(&widths, HEADERS));
        out.push('\n');
        out.push_str(&bar);
        out.push('\n');
        for decl in declarations {
            let cells = [
                decl.token.as_str(),
                decl.usage.as_str(),
                decl.expected_value.as_str(),
                decl.default_value.as_str(),
            ];
            out.push_str(&row(&widths, cells));
            out.push('\n');
        }
        out.push_str(&bar);
        out.push('\n');
        out
    }

    /// Writes the usage table to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `writer`.
    pub fn write_to(
        &self,
        declarations: &DeclarationSet,
        mut writer: impl Write,
    ) -> io::Result<()> {
        writer.write_all(self.render(declarations).as_bytes())
    }

    /// Prints the usage table to stdout.
    pub fn print(&self, declarations: &DeclarationSet) {
        print!("{}", self.render(declarations));
    }
}

fn row(widths: &[usize; 4], cells: [&str; 4]) -> String {
    widths
        .iter()
        .zip(cells)
        .map(|(&width, cell)| format!("| {cell:<width$} "))
        .collect()
}

fn bar(widths: &[usize; 4]) -> String {
    widths
        .iter()
        .map(|width| format!("|{}", "-".repeat(width + 2)))
        .collect()
}
