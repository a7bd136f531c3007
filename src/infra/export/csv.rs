use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::usecase::ports::spreadsheet::{SpreadsheetWriter, TabularData};

pub struct CsvWriter {
    pub output_dir: PathBuf,
}

impl SpreadsheetWriter for CsvWriter {
    fn write(&self, sheet: &TabularData, _sheet_name: &str, file_stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("failed to create export dir: {}", self.output_dir.display())
        })?;
        let path = self.output_dir.join(format!("{file_stem}.csv"));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to create csv: {}", path.display()))?;
        writer
            .write_record(&sheet.columns)
            .context("failed to write csv header")?;
        for row in &sheet.rows {
            writer.write_record(row).context("failed to write csv row")?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush csv: {}", path.display()))?;

        Ok(path)
    }
}
