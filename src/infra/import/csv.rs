use std::path::Path;

use anyhow::{Context, Result};

use crate::usecase::ports::spreadsheet::TabularData;

pub fn read_csv_table(csv_path: &Path) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required: {}", csv_path.display())
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to parse csv record {}", row_idx + 1))?;
        let row: Vec<String> = (0..columns.len())
            .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
            .collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    Ok(TabularData { columns, rows })
}
