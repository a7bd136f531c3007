use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::export::csv::CsvWriter;
use crate::infra::export::default_export_dir;
use crate::infra::export::xlsx::XlsxWriter;
use crate::usecase::ports::spreadsheet::SpreadsheetWriter;

pub const DEFAULT_FIRST_FINANCIAL_YEAR: i32 = 2020;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub export: ExportConfig,
    pub filters: FiltersConfig,
    pub notices: NoticesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `handpump_dashboard=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Defaults to the user's Downloads folder.
    pub directory: Option<PathBuf>,
    pub format: ExportFormat,
}

impl ExportConfig {
    pub fn output_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_export_dir)
    }

    pub fn writer(&self) -> Arc<dyn SpreadsheetWriter> {
        let output_dir = self.output_dir();
        match self.format {
            ExportFormat::Xlsx => Arc::new(XlsxWriter { output_dir }),
            ExportFormat::Csv => Arc::new(CsvWriter { output_dir }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    pub first_financial_year: i32,
    /// Month restored on reset; the current month when unset.
    pub default_month: Option<String>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            first_financial_year: DEFAULT_FIRST_FINANCIAL_YEAR,
            default_month: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeMode {
    Dialog,
    #[default]
    Log,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticesConfig {
    pub mode: NoticeMode,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// No path means defaults; a path that cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
