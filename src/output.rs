//! Data structures for representing the output, and writers for them.

use crate::analyzer::Strategy;
use crate::categories::Category;
use crate::errors::{Result, invalid_argument};
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    pub types: usize,
    pub tokens: usize,
    pub mattr: f64,
    /// MATTR of the category against the whole document.
    pub relative_mattr: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Row {
    Analyzed {
        name: String,
        lossy: bool,
        results: Vec<CategoryResult>,
    },
    Failed {
        name: String,
        error: String,
    },
}

impl Row {
    pub fn name(&self) -> &str {
        match self {
            Row::Analyzed { name, .. } => name,
            Row::Failed { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub window_size: usize,
    pub categories: Vec<Category>,
    /// The strategy that was actually used.
    pub strategy: Strategy,
    pub relative: bool,
    pub rows: Vec<Row>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn failures(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r, Row::Failed { .. }))
            .count()
    }

    pub fn header(&self) -> Vec<String> {
        let mut header = vec!["File Name".to_owned()];
        for c in &self.categories {
            let label = c.label();
            header.push(format!("{label} Types"));
            header.push(format!("{label} Tokens"));
            header.push(format!("{label} MATTR"));
            if self.relative {
                header.push(format!("{label} MATTR (All Words)"));
            }
        }
        header
    }

    fn cells(&self, row: &Row) -> Vec<Cell> {
        let width = self.header().len();
        let mut cells = vec![Cell::Text(row.name().to_owned())];
        match row {
            Row::Analyzed { results, .. } => {
                for r in results {
                    cells.push(Cell::Count(r.types));
                    cells.push(Cell::Count(r.tokens));
                    cells.push(Cell::Ratio(r.mattr));
                    if self.relative {
                        cells.push(Cell::Ratio(r.relative_mattr));
                    }
                }
            }
            Row::Failed { error, .. } => {
                cells.push(Cell::Text(format!("error: {error}")));
            }
        }
        cells.resize(width, Cell::Text(String::new()));
        cells
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(self.header())?;
        for row in &self.rows {
            writer.write_record(self.cells(row).iter().map(|c| c.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Writes the report in the format given by the extension of `path`:
    /// `.csv`, `.xlsx` or `.json`.
    pub fn save(&self, path: &Path, compact: bool) -> Result<()> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("csv") => self.write_csv(fs::File::create(path)?)?,
            Some("xlsx") => self.write_xlsx(path)?,
            Some("json") => {
                let writer = io::BufWriter::new(fs::File::create(path)?);
                if compact {
                    serde_json::to_writer(writer, self)?;
                } else {
                    serde_json::to_writer_pretty(writer, self)?;
                }
            }
            _ => {
                return Err(invalid_argument(format!(
                    "{}: output file should end in .csv, .xlsx or .json",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let ratio = Format::new().set_num_format("0.0000");
        let worksheet = workbook.add_worksheet();
        for (col, h) in self.header().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, h, &bold)?;
        }
        for (i, row) in self.rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, cell) in self.cells(row).into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, col, s)?;
                    }
                    Cell::Count(n) => {
                        worksheet.write_number(r, col, n as f64)?;
                    }
                    Cell::Ratio(x) => {
                        worksheet.write_number_with_format(r, col, x, &ratio)?;
                    }
                }
            }
        }
        workbook.save(path)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Cell {
    Text(String),
    Count(usize),
    Ratio(f64),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Count(n) => write!(f, "{n}"),
            Cell::Ratio(x) => write!(f, "{x:.4}"),
        }
    }
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

/// One-line summary of a row, for logging.
pub fn row_string(row: &Row) -> String {
    match row {
        Row::Analyzed { name, results, .. } => format!(
            "{name}: {}",
            results
                .iter()
                .map(|r| format!(
                    "{} {}/{} {:.4}",
                    r.category, r.types, r.tokens, r.mattr
                ))
                .join(", ")
        ),
        Row::Failed { name, error } => format!("{name}: failed: {error}"),
    }
}
