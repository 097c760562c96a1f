use std::path::Path;

use anyhow::{bail, Context, Result};

/// A parsed CSV export: normalized column names plus rows of optional cells.
/// Empty cells are `None`, which the loader stores as NULL.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Normalizes a raw CSV header into a column identifier:
/// trimmed, lowercased, spaces replaced with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Reads and parses a CSV export. Any structural problem (unreadable file,
/// ragged record, empty or duplicate header) aborts the load.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(normalize_header)
        .collect();

    if columns.is_empty() {
        bail!("CSV file '{}' has no columns", path.display());
    }
    for (i, column) in columns.iter().enumerate() {
        if column.is_empty() {
            bail!("CSV header field {} is empty after normalization", i + 1);
        }
        if columns[..i].contains(column) {
            bail!("Duplicate column '{column}' after header normalization");
        }
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // Header is line 1, so the first record is line 2.
        let record = record.with_context(|| format!("Malformed CSV record on line {}", i + 2))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(CsvTable { columns, rows })
}
