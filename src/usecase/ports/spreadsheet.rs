use std::path::PathBuf;

/// Header row plus string rows, the shape every sheet is read and written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.columns
            .iter()
            .position(|column| normalize_header(column) == wanted)
    }
}

/// `Gram Panchayat`, `gram-panchayat` and `GRAM_PANCHAYAT` all name the same column.
pub fn normalize_header(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

pub trait SpreadsheetWriter: Send + Sync {
    /// Writes one sheet to `{file_stem}.{extension}` and returns the path written.
    fn write(&self, sheet: &TabularData, sheet_name: &str, file_stem: &str)
        -> anyhow::Result<PathBuf>;
}
