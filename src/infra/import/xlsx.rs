use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::usecase::ports::spreadsheet::TabularData;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) if v.is_datetime() => date_cell(cell).unwrap_or_else(|| v.to_string()),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => date_cell(cell).unwrap_or_else(|| v.to_string()),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Date cells come back in the `DD-MM-YYYY` form used by text exports.
fn date_cell(cell: &Data) -> Option<String> {
    cell.as_date().map(|date| date.format("%d-%m-%Y").to_string())
}

/// Reads the first worksheet; its first row is the header.
pub fn read_xlsx_table(xlsx_path: &Path) -> Result<TabularData> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>());
    let columns = rows
        .next()
        .with_context(|| format!("sheet has no header row: {sheet_name}"))?;
    let rows = rows
        .filter(|row| row.iter().any(|value| !value.is_empty()))
        .collect();

    Ok(TabularData { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn cell_to_string_renders_whole_floats_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(12.0)), "12");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::String(" Ranchi ".to_string())), "Ranchi");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn date_cells_render_as_record_dates() {
        let created_on = Data::DateTime(ExcelDateTime::new(
            45427.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(cell_to_string(&created_on), "15-05-2024");
        assert_eq!(
            cell_to_string(&Data::DateTimeIso("2024-05-15".to_string())),
            "15-05-2024"
        );
    }

    #[test]
    fn duration_cells_keep_their_serial_value() {
        let elapsed = Data::DateTime(ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(cell_to_string(&elapsed), "1.5");
    }
}
