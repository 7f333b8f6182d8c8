//! Dataset loading and normalization.
//!
//! [`CanonicalTable`] is the unit-consistent in-memory form of the raw
//! college dataset. Normalization runs once at process start; the
//! resulting table is immutable and safely shared for reads by every
//! subsequent request.
//!
//! Normalization rules:
//!
//! - The three INR monetary columns are divided by 100,000 (INR to
//!   lakhs) and rounded to two decimals.
//! - Monetary columns are renamed to their `(Lakhs)` labels. The
//!   average-package column is renamed without conversion; its source
//!   data is already in lakhs.
//! - Every missing or empty cell becomes the single-space blank marker
//!   so each cell serializes as non-empty text.
//! - Negative or implausibly large monetary values are rejected: the
//!   process must not serve requests with a bad table.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use campusmatch_types::{CollegeRecord, MatchError, Result};

/// The marker every missing or empty cell is normalized to.
pub const BLANK_MARKER: &str = " ";

/// Monetary columns converted from INR to lakhs, with their canonical
/// labels.
const CONVERTED_COLUMNS: [(&str, &str); 3] = [
    ("Highest Package (INR)", "Highest Package (Lakhs)"),
    ("Annual Tuition Fees (INR)", "Annual Tuition Fees (Lakhs)"),
    ("Annual Hostel Fees (INR)", "Annual Hostel Fees (Lakhs)"),
];

/// Columns renamed to the canonical label without unit conversion.
const RENAMED_COLUMNS: [(&str, &str); 1] = [("Average Package (INR)", "Average Package (Lakhs)")];

/// Columns the raw dataset must provide (by source or canonical name).
const REQUIRED_COLUMNS: [&str; 17] = [
    "College",
    "Type",
    "Location",
    "Rank",
    "Branches",
    "Highest Package (INR)",
    "Average Package (INR)",
    "Annual Tuition Fees (INR)",
    "Annual Hostel Fees (INR)",
    "Student Satisfaction (/10)",
    "Hostel",
    "Facilities",
    "Placements",
    "Scholarships",
    "Exams",
    "Cutoff",
    "12th Marks Required (%)",
];

/// Upper bound for a normalized monetary value, in lakhs (1e9 INR).
const MAX_LAKHS: f64 = 10_000.0;

/// The normalized, unit-consistent in-memory dataset.
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    columns: Vec<String>,
    rows: Vec<CollegeRecord>,
}

impl CanonicalTable {
    /// Load and normalize a CSV file.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = table.len(), "loaded college dataset");
        Ok(table)
    }

    /// Read and normalize CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| MatchError::DataFormat {
                reason: format!("unreadable CSV header: {e}"),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| MatchError::DataFormat {
                reason: format!("unreadable CSV row: {e}"),
            })?;
            records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
        }

        Self::normalize(headers, records)
    }

    /// Normalize raw tabular data into the canonical form.
    ///
    /// Idempotent: input already carrying the canonical column labels
    /// passes through without unit conversion.
    pub fn normalize(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        for required in REQUIRED_COLUMNS {
            let canonical = canonical_label(required);
            let present = headers
                .iter()
                .any(|h| h == required || h == canonical);
            if !present {
                return Err(MatchError::DataFormat {
                    reason: format!("missing required column '{required}'"),
                });
            }
        }

        let columns: Vec<String> = headers
            .iter()
            .map(|h| canonical_label(h).to_string())
            .collect();

        let converted: Vec<bool> = headers
            .iter()
            .map(|h| CONVERTED_COLUMNS.iter().any(|(raw, _)| raw == h))
            .collect();

        let mut rows = Vec::with_capacity(records.len());
        for (row_idx, record) in records.iter().enumerate() {
            if record.len() != headers.len() {
                return Err(MatchError::DataFormat {
                    reason: format!(
                        "row {} has {} cells, expected {}",
                        row_idx + 1,
                        record.len(),
                        headers.len()
                    ),
                });
            }

            let mut row = CollegeRecord::new();
            for (col_idx, cell) in record.iter().enumerate() {
                let name = &columns[col_idx];
                let value = if converted[col_idx] {
                    normalize_monetary(cell, name, row_idx)?
                } else {
                    parse_cell(cell)
                };
                row.insert(name.clone(), value);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// The canonical column labels, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The normalized rows.
    pub fn rows(&self) -> &[CollegeRecord] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `num_rows` rows as a JSON array string, for use as a
    /// dataset sample in a prompt.
    pub fn sample_json(&self, num_rows: usize) -> Result<String> {
        let end = num_rows.min(self.rows.len());
        Ok(serde_json::to_string(&self.rows[..end])?)
    }

    /// The entire table as a JSON array string.
    pub fn full_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows)?)
    }
}

/// The canonical label for a source column (identity for everything
/// outside the rename set).
fn canonical_label(header: &str) -> &str {
    for (raw, canonical) in CONVERTED_COLUMNS.iter().chain(RENAMED_COLUMNS.iter()) {
        if *raw == header {
            return canonical;
        }
    }
    header
}

/// Convert a raw INR cell to lakhs, rounded to two decimals.
///
/// Blank cells stay blank (marker). Non-numeric or out-of-bound values
/// are data errors, fatal at load time.
fn normalize_monetary(cell: &str, column: &str, row_idx: usize) -> Result<Value> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(Value::String(BLANK_MARKER.to_string()));
    }

    let raw: f64 = trimmed.parse().map_err(|_| MatchError::DataFormat {
        reason: format!("non-numeric value '{trimmed}' in '{column}' (row {})", row_idx + 1),
    })?;

    let lakhs = (raw / 100_000.0 * 100.0).round() / 100.0;

    if lakhs < 0.0 || lakhs > MAX_LAKHS {
        return Err(MatchError::DataFormat {
            reason: format!("monetary value {lakhs} lakhs out of range in '{column}' (row {})", row_idx + 1),
        });
    }

    match serde_json::Number::from_f64(lakhs) {
        Some(n) => Ok(Value::Number(n)),
        None => {
            warn!(column, row = row_idx + 1, "non-finite monetary value, blanking");
            Ok(Value::String(BLANK_MARKER.to_string()))
        }
    }
}

/// Parse a non-monetary cell: blank marker for empty, number when the
/// cell is numeric, string otherwise.
fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::String(BLANK_MARKER.to_string());
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(float) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}
