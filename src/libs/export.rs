//! Report export to CSV, TSV, Markdown and plain text.
//!
//! Output is deterministic for a given report sequence: the column set is
//! the primary template's fields in `order` (the primary template is the one
//! bound to the first report), followed by fields that only other templates
//! define, sorted by name. Headers are field labels. A report without a
//! value for a column renders an empty cell.
//!
//! CSV and TSV output quotes a value only when it contains the delimiter, a
//! quote or a line break, so it parses back to the original values.

use crate::libs::error::{NippoError, Result};
use crate::libs::report::Report;
use crate::libs::summary::TemplateIndex;
use crate::libs::template::Template;
use chrono::Local;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = NippoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(NippoError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// One output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub label: String,
}

/// Resolves the ordered column set for `reports`.
pub fn columns(reports: &[Report], templates: &TemplateIndex) -> Vec<Column> {
    let mut bound: Vec<&Template> = Vec::new();
    for report in reports {
        if let Some(template) = templates.get(&report.template_id) {
            if !bound.iter().any(|t| t.id == template.id) {
                bound.push(template);
            }
        }
    }
    let Some((primary, others)) = bound.split_first() else {
        return Vec::new();
    };

    let mut columns: Vec<Column> = primary
        .fields
        .iter()
        .map(|f| Column {
            name: f.name.clone(),
            label: f.label.clone(),
        })
        .collect();

    let mut extra: Vec<Column> = Vec::new();
    for template in others {
        for field in &template.fields {
            let known = columns.iter().chain(extra.iter()).any(|c| c.name == field.name);
            if !known {
                extra.push(Column {
                    name: field.name.clone(),
                    label: field.label.clone(),
                });
            }
        }
    }
    extra.sort_by(|a, b| a.name.cmp(&b.name));
    columns.extend(extra);
    columns
}

pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// File name used when the caller does not choose one.
    pub fn default_path(&self) -> PathBuf {
        let stem = format!("nippo_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        PathBuf::from(format!("{}.{}", stem, self.format.extension()))
    }

    pub fn render(&self, reports: &[Report], templates: &TemplateIndex) -> Result<String> {
        let columns = columns(reports, templates);
        if columns.is_empty() {
            return Ok(String::new());
        }
        let rows: Vec<Vec<&str>> = reports
            .iter()
            .map(|r| columns.iter().map(|c| r.get(&c.name).unwrap_or("")).collect())
            .collect();

        match self.format {
            ExportFormat::Csv => render_delimited(&columns, &rows, b','),
            ExportFormat::Tsv => render_delimited(&columns, &rows, b'\t'),
            ExportFormat::Markdown => Ok(render_markdown(&columns, &rows)),
            ExportFormat::Text => Ok(render_text(reports, &columns, &rows)),
        }
    }

    pub fn export_to(&self, reports: &[Report], templates: &TemplateIndex, path: &Path) -> Result<()> {
        let content = self.render(reports, templates)?;
        File::create(path)?.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn render_delimited(columns: &[Column], rows: &[Vec<&str>], delimiter: u8) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(columns.iter().map(|c| c.label.as_str())).map_err(io::Error::from)?;
    for row in rows {
        wtr.write_record(row).map_err(io::Error::from)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| NippoError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}

fn render_markdown(columns: &[Column], rows: &[Vec<&str>]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| markdown_cell(&c.label)).collect();
    let _ = writeln!(out, "| {} |", header.join(" | "));
    let _ = writeln!(out, "|{}|", vec![" --- "; columns.len()].join("|"));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| markdown_cell(v)).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    out
}

fn render_text(reports: &[Report], columns: &[Column], rows: &[Vec<&str>]) -> String {
    let mut out = String::new();
    for (i, (report, row)) in reports.iter().zip(rows).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ===", report.date.format("%Y-%m-%d"));
        for (column, value) in columns.iter().zip(row) {
            let mut lines = value.lines();
            let _ = writeln!(out, "{}: {}", column.label, lines.next().unwrap_or(""));
            for line in lines {
                let _ = writeln!(out, "  {}", line);
            }
        }
    }
    out
}
