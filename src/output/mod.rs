//
//  atlassian-cloud
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! `atl` prints API payloads either as tables for people or as JSON for
//! scripts (`--json`).
//!
//! Tables are described by [`Column`]s, each pulling one value out of every
//! payload with a JSON pointer:
//!
//! ```rust
//! use atlassian_cloud::api::Payload;
//! use atlassian_cloud::output::{rows, Column};
//! use serde_json::json;
//!
//! let columns = [Column::new("ID", "/id"), Column::new("Owner", "/owner/displayName")];
//! let filters = vec![Payload::new(json!({"id": "10000", "owner": {"displayName": "Ada"}}))];
//!
//! assert_eq!(rows(&filters, &columns), vec![vec!["10000".to_string(), "Ada".to_string()]]);
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde_json::Value;

use crate::api::Payload;

/// Maximum cell width in table output.
const MAX_CELL: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One table column: a header and the JSON pointer of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub pointer: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, pointer: &'static str) -> Self {
        Self { header, pointer }
    }
}

/// Renders a JSON value as table cell text.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => truncate(s, MAX_CELL),
        Some(other) => truncate(&other.to_string(), MAX_CELL),
    }
}

/// Extracts the cells of `columns` from every payload.
pub fn rows(items: &[Payload], columns: &[Column]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| columns.iter().map(|c| cell_text(item.at(c.pointer))).collect())
        .collect()
}

/// Writes payloads in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn from_flag(json: bool) -> Self {
        Self::new(if json { OutputFormat::Json } else { OutputFormat::Table })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Prints one payload: pretty JSON, or its top-level fields as a table.
    pub fn write_payload(&self, payload: &Payload) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(payload)?,
            OutputFormat::Table => match payload.as_value() {
                Value::Object(map) => {
                    let mut builder = TableBuilder::new().color(self.color).headers(["Field", "Value"]);
                    for (key, value) in map {
                        builder = builder.row([key.clone(), cell_text(Some(value))]);
                    }
                    builder.print();
                }
                other => println!("{}", other),
            },
        }
        Ok(())
    }

    /// Prints a listing.
    pub fn write_items(&self, items: &[Payload], columns: &[Column]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(items)?,
            OutputFormat::Table => {
                if items.is_empty() {
                    self.write_info("No results");
                    return Ok(());
                }
                let mut builder = TableBuilder::new()
                    .color(self.color)
                    .headers(columns.iter().map(|c| c.header));
                for row in rows(items, columns) {
                    builder = builder.row(row.into_iter().zip(columns).map(|(cell, column)| {
                        match column.header {
                            "Status" | "State" => format_status(&cell, self.color),
                            _ => cell,
                        }
                    }));
                }
                builder.print();
            }
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Prints a `key: value` line with a dimmed key.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_text(Some(&json!("x"))), "x");
        assert_eq!(cell_text(Some(&json!(42))), "42");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(Some(&json!("y".repeat(80)))).chars().count(), MAX_CELL);
    }

    #[test]
    fn test_rows_leave_missing_fields_empty() {
        let items = vec![
            Payload::new(json!({"id": 1, "title": "A", "version": {"number": 3}})),
            Payload::new(json!({"id": 2})),
        ];
        let columns = [
            Column::new("ID", "/id"),
            Column::new("Title", "/title"),
            Column::new("Version", "/version/number"),
        ];
        assert_eq!(
            rows(&items, &columns),
            vec![
                vec!["1".to_string(), "A".to_string(), "3".to_string()],
                vec!["2".to_string(), String::new(), String::new()],
            ]
        );
    }
}
