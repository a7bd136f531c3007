use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::usecase::ports::spreadsheet::{SpreadsheetWriter, TabularData};

const MAX_SHEET_NAME_LEN: usize = 31;

pub struct XlsxWriter {
    pub output_dir: PathBuf,
}

impl SpreadsheetWriter for XlsxWriter {
    fn write(&self, sheet: &TabularData, sheet_name: &str, file_stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("failed to create export dir: {}", self.output_dir.display())
        })?;
        let path = self.output_dir.join(format!("{file_stem}.xlsx"));

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        let name: String = sheet_name.chars().take(MAX_SHEET_NAME_LEN).collect();
        worksheet
            .set_name(&name)
            .with_context(|| format!("invalid sheet name: {name}"))?;

        for (col_idx, column) in sheet.columns.iter().enumerate() {
            let col = u16::try_from(col_idx).context("too many columns for xlsx")?;
            worksheet
                .write_string_with_format(0, col, column, &header_format)
                .context("failed to write xlsx header")?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let xlsx_row = u32::try_from(row_idx + 1).context("too many rows for xlsx")?;
            for (col_idx, value) in row.iter().enumerate() {
                let col = u16::try_from(col_idx).context("too many columns for xlsx")?;
                worksheet
                    .write_string(xlsx_row, col, value)
                    .context("failed to write xlsx cell")?;
            }
        }

        workbook
            .save(&path)
            .with_context(|| format!("failed to save xlsx: {}", path.display()))?;
        Ok(path)
    }
}
